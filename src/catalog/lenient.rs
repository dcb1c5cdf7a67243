//! Forgiving readers for catalog values.
//!
//! Catalog records come from hand-edited JSON and spreadsheet imports, so a
//! socket may arrive as a number, a wattage as `"650"`, and a support list as
//! `"AM4, AM5"`. Anything that cannot be interpreted reads as absent instead
//! of failing the whole catalog.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const LIST_SEPARATORS: &[char] = &[',', ';', '|'];

pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn value_as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

pub(crate) fn value_as_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        Value::String(s) => s
            .split(LIST_SEPARATORS)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Number(_) => value_as_string(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_string(&Value::deserialize(deserializer)?))
}

pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_number(&Value::deserialize(deserializer)?))
}

pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_list(&Value::deserialize(deserializer)?))
}

pub(crate) fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

/// Non-negative whole count; negatives and fractions are floored to a valid count.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = value_as_number(&Value::deserialize(deserializer)?).unwrap_or(0.0);
    Ok(n.max(0.0).min(u32::MAX as f64).floor() as u32)
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_string(&Value::deserialize(deserializer)?).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_accepts_numbers() {
        assert_eq!(value_as_string(&json!(1700)), Some("1700".to_string()));
        assert_eq!(value_as_string(&json!("  AM5 ")), Some("AM5".to_string()));
        assert_eq!(value_as_string(&json!("")), None);
        assert_eq!(value_as_string(&json!(null)), None);
        assert_eq!(value_as_string(&json!({"a": 1})), None);
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(value_as_number(&json!(650)), Some(650.0));
        assert_eq!(value_as_number(&json!(" 125.5 ")), Some(125.5));
        assert_eq!(value_as_number(&json!("lots")), None);
        assert_eq!(value_as_number(&json!(true)), Some(1.0));
        assert_eq!(value_as_number(&json!([1])), None);
    }

    #[test]
    fn test_list_splits_delimited_strings() {
        assert_eq!(
            value_as_list(&json!("AM4, AM5;LGA1700 | LGA1851")),
            vec!["AM4", "AM5", "LGA1700", "LGA1851"]
        );
        assert_eq!(value_as_list(&json!(["ATX", "", 5])), vec!["ATX", "5"]);
        assert!(value_as_list(&json!(null)).is_empty());
    }
}
