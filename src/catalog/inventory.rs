//! Read-only catalog snapshot handed to the engine for one evaluation.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::types::{Category, Part};
use super::validation::validate_parts;
use crate::error::BuildError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    /// Build a catalog, rejecting repeated part ids.
    pub fn new(parts: Vec<Part>) -> Result<Self, BuildError> {
        let mut seen = HashSet::new();
        for part in &parts {
            if !seen.insert(part.id.as_str()) {
                return Err(BuildError::DuplicatePart(part.id.clone()));
            }
        }
        Ok(Self { parts })
    }

    /// Parse a JSON array of part records.
    pub fn from_json(json: &str) -> Result<Self> {
        let parts: Vec<Part> = serde_json::from_str(json).context("Invalid catalog JSON")?;

        for warning in validate_parts(&parts) {
            warn!("Catalog part {}: {}", warning.part_id, warning.message);
        }

        Ok(Self::new(parts)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {:?}", path))?;
        let catalog = Self::from_json(&content)?;
        info!("Loaded {} parts from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Part> + '_ {
        self.parts.iter().filter(move |p| p.category() == category)
    }

    /// Raw candidate list for a category, optionally hiding parts with no stock.
    pub fn candidates(&self, category: Category, hide_out_of_stock: bool) -> Vec<Part> {
        self.by_category(category)
            .filter(|p| !hide_out_of_stock || p.in_stock())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PartSpec;

    fn part(id: &str, category: Category, stock: u32) -> Part {
        Part::new(id, id.to_uppercase(), 100.0, PartSpec::empty(category)).with_stock(stock)
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![part("a", Category::Cpu, 1), part("a", Category::Gpu, 1)]);
        assert_eq!(result, Err(BuildError::DuplicatePart("a".to_string())));
    }

    #[test]
    fn test_candidates_respect_stock_flag() {
        let catalog = Catalog::new(vec![
            part("cpu-a", Category::Cpu, 3),
            part("cpu-b", Category::Cpu, 0),
            part("gpu-a", Category::Gpu, 1),
        ])
        .unwrap();

        assert_eq!(catalog.candidates(Category::Cpu, false).len(), 2);
        let visible = catalog.candidates(Category::Cpu, true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "cpu-a");
        assert!(catalog.candidates(Category::Ssd, false).is_empty());
    }

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "c1", "name": "CPU", "category": "CPU", "price": 5000,
                 "attributes": {"socket": "AM5", "tdp": 105}},
                {"id": "m1", "name": "Board", "category": "Motherboard", "price": 4000}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("c1").unwrap().spec.cpu().unwrap().tdp, Some(105.0));
        assert!(catalog.get("zz").is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let result = Catalog::from_json(
            r#"[{"id": "k1", "name": "Keyboard", "category": "Keyboard", "price": 10}]"#,
        );
        assert!(result.is_err());
    }
}
