use crate::types::ParsedField;

/// Display label of a field.
///
/// Uses `field_config.label` when set, otherwise the key with its first
/// character upper-cased.
pub fn get_label(field: &ParsedField) -> String {
    if let Some(label) = field.field_config.as_ref().and_then(|c| c.label.as_ref()) {
        return label.clone();
    }
    capitalize(&field.key)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
