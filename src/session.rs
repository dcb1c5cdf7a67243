//! A quoting session: the selection plus the state that rides along with it.
//!
//! `BuildSession` ties the pure engine functions together the way the desk
//! uses them: every base change re-derives filters when Smart Sync is on, and
//! [`BuildSession::evaluate`] recomputes filters, candidate lists,
//! compatibility and the quote in one pass. Sessions persist as a JSON
//! snapshot written atomically.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::{Catalog, Category, Part};
use crate::compat::{check_compatibility, CompatibilityReport};
use crate::config::{default_config, EngineConfig};
use crate::error::BuildError;
use crate::quote::{calculate_quote, PricingConfig, Quote};
use crate::selection::{AddonLine, Selection};
use crate::sync::{apply_filters, derive_filters, FilterField, FilterSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSession {
    #[serde(default)]
    selection: Selection,
    #[serde(default)]
    filters: FilterSet,
    #[serde(default = "default_smart_sync")]
    smart_sync: bool,
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Slots that must be filled for a complete quote
    #[serde(default)]
    pub required: Vec<Category>,
    #[serde(default)]
    pub hide_out_of_stock: bool,
}

fn default_smart_sync() -> bool {
    true
}

/// Everything the desk shows for the current session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub report: CompatibilityReport,
    pub filters: FilterSet,
    /// Filtered candidates for every category
    pub candidates: BTreeMap<Category, Vec<Part>>,
    pub quote: Quote,
}

/// A fresh session with the embedded default settings.
impl Default for BuildSession {
    fn default() -> Self {
        Self::new(&default_config())
    }
}

impl BuildSession {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            selection: Selection::new(),
            filters: FilterSet::default(),
            smart_sync: config.smart_sync,
            pricing: config.pricing.clone(),
            required: config.required_categories.clone(),
            hide_out_of_stock: config.hide_out_of_stock,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn smart_sync(&self) -> bool {
        self.smart_sync
    }

    /// Toggle Smart Sync. Turning it on syncs immediately.
    pub fn set_smart_sync(&mut self, enabled: bool) {
        self.smart_sync = enabled;
        if enabled {
            self.sync_filters();
        }
    }

    pub fn select(&mut self, part: Part) -> Result<Option<Part>, BuildError> {
        let previous = self.selection.select(part)?;
        self.base_changed();
        Ok(previous)
    }

    pub fn deselect(&mut self, category: Category) -> Option<Part> {
        let removed = self.selection.deselect(category);
        if removed.is_some() {
            self.base_changed();
        }
        removed
    }

    pub fn add_addon(&mut self, product: Part, qty: u32) -> Result<(), BuildError> {
        self.selection.add_addon(product, qty)
    }

    pub fn update_addon_qty(&mut self, id: &str, qty: u32) -> Result<(), BuildError> {
        self.selection.update_addon_qty(id, qty)
    }

    pub fn remove_addon(&mut self, id: &str) -> Option<AddonLine> {
        self.selection.remove_addon(id)
    }

    /// Merge the filters implied by the current base parts, regardless of Smart Sync.
    pub fn sync_filters(&mut self) {
        self.filters = derive_filters(&self.selection, &self.filters);
    }

    pub fn clear_filter(&mut self, field: FilterField) {
        self.filters.clear(field);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
    }

    /// Start over: empty selection and no filters. Pricing and settings stay.
    pub fn reset(&mut self) {
        self.selection.reset();
        self.filters.clear_all();
        info!("Session reset");
    }

    fn base_changed(&mut self) {
        if self.smart_sync {
            self.sync_filters();
            debug!("Smart Sync updated filters: {:?}", self.filters);
        }
    }

    /// Recompute everything shown for the session against a catalog snapshot.
    pub fn evaluate(&self, catalog: &Catalog) -> Evaluation {
        let candidates = Category::ALL
            .into_iter()
            .map(|category| {
                let raw = catalog.candidates(category, self.hide_out_of_stock);
                let kept = apply_filters(category, &raw, &self.filters)
                    .into_iter()
                    .cloned()
                    .collect();
                (category, kept)
            })
            .collect();

        Evaluation {
            report: check_compatibility(&self.selection),
            filters: self.filters.clone(),
            candidates,
            quote: calculate_quote(&self.selection, &self.pricing, &self.required),
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Write the session to `path` atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        let snapshot = SessionSnapshot {
            saved_at: Utc::now(),
            session: self.clone(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(path)?;

        info!("Saved session to {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(SessionSnapshot::load(path)?.session)
    }
}

/// On-disk form of a saved session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub saved_at: DateTime<Utc>,
    pub session: BuildSession,
}

impl SessionSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session {:?}", path))?;
        let snapshot: SessionSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Invalid session file {:?}", path))?;
        info!("Loaded session from {:?} (saved {})", path, snapshot.saved_at);
        Ok(snapshot)
    }
}

/// Where the CLI keeps its session when no path is given.
pub fn default_session_path() -> Result<PathBuf> {
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join("pcbuild").join("session.json")),
        None => bail!("Could not determine the platform data directory"),
    }
}
