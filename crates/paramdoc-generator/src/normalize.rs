//! Description clean-up

/// Drop a leading restatement of the field name from a description.
///
/// `"Namespace of the secret."` for field `namespace` becomes
/// `"Of the secret."`. Descriptions whose first word is not the field name
/// (compared case-insensitively) are returned unchanged, as are single-word
/// descriptions.
pub fn normalize_description(description: &str, name: &str) -> String {
    let trimmed = description.trim_matches(' ');
    let name = name.trim_matches(' ');
    if name.is_empty() {
        return trimmed.to_string();
    }

    let Some((first_word, rest)) = trimmed.split_once(' ') else {
        return description.to_string();
    };
    if first_word.to_lowercase() != name.to_lowercase() {
        return description.to_string();
    }

    capitalize(rest.trim_matches(' '))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
