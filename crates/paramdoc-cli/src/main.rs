//! # paramdoc-cli
//!
//! Command-line interface for regenerating the parameter table of a Markdown
//! document from a CustomResourceDefinition.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use paramdoc_generator::{Generator, GeneratorConfig, MissingVersionPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramdoc")]
#[command(about = "Regenerate a CRD parameter table inside a Markdown document")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CRD file to read the schema from
    #[arg(long)]
    crd_filename: Option<PathBuf>,

    /// Markdown document to update
    #[arg(long)]
    md_filename: Option<PathBuf>,

    /// Schema version to document (default: v1alpha1)
    #[arg(long)]
    api_version: Option<String>,

    /// Identifier of the generated block (default: FUNCTION-SPEC)
    #[arg(long)]
    block_id: Option<String>,

    /// Render only kept rows instead of failing when the version is absent
    #[arg(long)]
    allow_missing_version: bool,

    /// Print the updated document instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(path) = self.crd_filename {
            config = config.schema_path(path);
        }
        if let Some(path) = self.md_filename {
            config = config.document_path(path);
        }
        if let Some(version) = self.api_version {
            config = config.api_version(version);
        }
        if let Some(identifier) = self.block_id {
            config = config.block_identifier(identifier);
        }
        if self.allow_missing_version {
            config = config.missing_version(MissingVersionPolicy::Warn);
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let config = cli.into_config()?;
    let generator = Generator::new(config).context("Invalid configuration")?;

    if dry_run {
        let report = generator
            .preview()
            .context("Failed to generate parameter table")?;
        print!("{}", report.document);
        return Ok(());
    }

    let report = generator
        .run()
        .context("Failed to generate parameter table")?;
    if !report.changed {
        tracing::info!(
            "{} is up to date",
            generator.config().document_path.display()
        );
    }

    Ok(())
}
