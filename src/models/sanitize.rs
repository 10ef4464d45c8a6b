use crate::models::{Measurements, Properties};

pub(crate) const MAX_KEY_LENGTH: usize = 150;
pub(crate) const MAX_VALUE_LENGTH: usize = 8192;

/// In-place cleanup of a contract type.
///
/// Implementations truncate over-long strings and drop invalid entries,
/// returning advisory warnings. A warning never invalidates the value.
pub(crate) trait Sanitize {
    fn sanitize(&mut self) -> Vec<String>;
}

/// Truncates `value` to at most `max_len` bytes, backing up to the nearest
/// char boundary. Returns whether anything was cut.
pub(crate) fn truncate_in_place(value: &mut String, max_len: usize) -> bool {
    if value.len() <= max_len {
        return false;
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value.truncate(end);
    true
}

pub(crate) fn sanitize_field(
    warnings: &mut Vec<String>,
    value: &mut String,
    max_len: usize,
    field: &str,
) {
    if truncate_in_place(value, max_len) {
        warnings.push(format!("{} exceeded maximum length of {}", field, max_len));
    }
}

pub(crate) fn sanitize_optional_field(
    warnings: &mut Vec<String>,
    value: &mut Option<String>,
    max_len: usize,
    field: &str,
) {
    if let Some(value) = value.as_mut() {
        sanitize_field(warnings, value, max_len, field);
    }
}

pub(crate) fn sanitize_properties(
    warnings: &mut Vec<String>,
    properties: &mut Properties,
    context: &str,
) {
    let long_keys: Vec<String> = properties
        .keys()
        .filter(|k| k.len() > MAX_KEY_LENGTH)
        .cloned()
        .collect();
    for mut key in long_keys {
        let value = properties
            .remove(&key)
            .expect("key was just read from the map");
        truncate_in_place(&mut key, MAX_KEY_LENGTH);
        warnings.push(format!(
            "{}.Properties key exceeded maximum length of {}",
            context, MAX_KEY_LENGTH
        ));
        properties.insert(key, value);
    }
    for value in properties.values_mut() {
        if truncate_in_place(value, MAX_VALUE_LENGTH) {
            warnings.push(format!(
                "{}.Properties value exceeded maximum length of {}",
                context, MAX_VALUE_LENGTH
            ));
        }
    }
}

pub(crate) fn sanitize_measurements(
    warnings: &mut Vec<String>,
    measurements: &mut Measurements,
    context: &str,
) {
    let long_keys: Vec<String> = measurements
        .keys()
        .filter(|k| k.len() > MAX_KEY_LENGTH)
        .cloned()
        .collect();
    for mut key in long_keys {
        let value = measurements
            .remove(&key)
            .expect("key was just read from the map");
        truncate_in_place(&mut key, MAX_KEY_LENGTH);
        warnings.push(format!(
            "{}.Measurements key exceeded maximum length of {}",
            context, MAX_KEY_LENGTH
        ));
        measurements.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let mut value = "aé".to_string();
        assert!(truncate_in_place(&mut value, 2));
        assert_eq!(value, "a");
    }

    #[test]
    fn truncate_leaves_short_values_alone() {
        let mut value = "short".to_string();
        assert!(!truncate_in_place(&mut value, 150));
        assert_eq!(value, "short");
    }

    #[test]
    fn properties_keys_and_values_are_limited() {
        let mut warnings = Vec::new();
        let mut properties = Properties::new();
        properties.insert("k".repeat(200), "v".to_string());
        properties.insert("ok".to_string(), "v".repeat(9000));
        sanitize_properties(&mut warnings, &mut properties, "RequestData");
        assert_eq!(warnings.len(), 2);
        assert!(properties.contains_key(&"k".repeat(MAX_KEY_LENGTH)));
        assert_eq!(properties["ok"].len(), MAX_VALUE_LENGTH);
    }
}
