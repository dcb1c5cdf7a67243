use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::Part;

/// A soft problem with a catalog record. The engine still accepts the part;
/// warnings are surfaced so the editor can prompt for a fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub part_id: String,
    pub field: String,
    pub message: String,
}

impl ValidationWarning {
    fn new(part: &Part, field: &str, message: String) -> Self {
        Self {
            part_id: part.id.clone(),
            field: field.to_string(),
            message,
        }
    }
}

/// Check a single part for values the pricing and compatibility rules cannot use.
pub fn validate_part(part: &Part) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if part.id.trim().is_empty() {
        warnings.push(ValidationWarning::new(part, "id", "Part has no id".to_string()));
    }

    if part.name.trim().is_empty() {
        warnings.push(ValidationWarning::new(
            part,
            "name",
            format!("{} part has an empty name", part.category()),
        ));
    }

    if part.price < 0.0 {
        warnings.push(ValidationWarning::new(
            part,
            "price",
            format!("Price {} is negative", part.price),
        ));
    }

    if let Some(cost) = part.cost {
        if cost < 0.0 {
            warnings.push(ValidationWarning::new(
                part,
                "cost",
                format!("Cost {} is negative", cost),
            ));
        }
    }

    warnings
}

/// Validate every part and flag repeated ids.
pub fn validate_parts(parts: &[Part]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for part in parts {
        warnings.extend(validate_part(part));
        if !seen.insert(part.id.as_str()) {
            warnings.push(ValidationWarning::new(
                part,
                "id",
                format!("Duplicate part id '{}'", part.id),
            ));
        }
    }

    warnings
}
