//! The in-progress build: one part per base slot plus quantified add-ons.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{
    CaseAttributes, Category, CoolerAttributes, CpuAttributes, GpuAttributes,
    MotherboardAttributes, Part, PsuAttributes, RamAttributes, StorageAttributes,
};
use crate::error::BuildError;

/// An add-on line. `id` is the product id, so each product appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonLine {
    pub id: String,
    pub product: Part,
    pub qty: u32,
}

/// Deserializing replays every part through [`Selection::select`] and
/// [`Selection::add_addon`], so a saved selection obeys the same rules as a
/// live one: slots hold parts of their own category, add-on lines merge by
/// product id and quantities are at least one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SelectionRecord", into = "SelectionRecord")]
pub struct Selection {
    base: BTreeMap<Category, Part>,
    addons: Vec<AddonLine>,
}

/// Wire form of a [`Selection`], unchecked.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionRecord {
    #[serde(default)]
    base: BTreeMap<Category, Part>,
    #[serde(default)]
    addons: Vec<AddonLine>,
}

impl TryFrom<SelectionRecord> for Selection {
    type Error = BuildError;

    fn try_from(record: SelectionRecord) -> Result<Self, Self::Error> {
        let mut selection = Selection::new();
        for (slot, part) in record.base {
            let category = part.category();
            if category != slot {
                return Err(BuildError::SlotMismatch {
                    slot,
                    id: part.id,
                    category,
                });
            }
            selection.select(part)?;
        }
        // The line id is always the product id; rebuild it from the product.
        for line in record.addons {
            selection.add_addon(line.product, line.qty)?;
        }
        Ok(selection)
    }
}

impl From<Selection> for SelectionRecord {
    fn from(selection: Selection) -> Self {
        Self {
            base: selection.base,
            addons: selection.addons,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a part into its base slot, returning whatever occupied it before.
    pub fn select(&mut self, part: Part) -> Result<Option<Part>, BuildError> {
        let category = part.category();
        if !category.is_base() {
            return Err(BuildError::NotBaseCategory { category });
        }
        debug!("Selected {} for {}", part.id, category);
        Ok(self.base.insert(category, part))
    }

    pub fn deselect(&mut self, category: Category) -> Option<Part> {
        self.base.remove(&category)
    }

    pub fn get(&self, category: Category) -> Option<&Part> {
        self.base.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.base.contains_key(&category)
    }

    /// Chosen base parts in slot order.
    pub fn base_parts(&self) -> impl Iterator<Item = &Part> + '_ {
        self.base.values()
    }

    pub fn addons(&self) -> &[AddonLine] {
        &self.addons
    }

    /// Add `qty` units of an add-on product, merging with an existing line
    /// for the same product. Quantities below one count as one.
    pub fn add_addon(&mut self, product: Part, qty: u32) -> Result<(), BuildError> {
        let category = product.category();
        if !category.is_addon() {
            return Err(BuildError::NotAddonCategory { category });
        }
        let qty = qty.max(1);

        match self.addons.iter_mut().find(|line| line.id == product.id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(qty);
                debug!("Add-on {} quantity now {}", line.id, line.qty);
            }
            None => {
                debug!("Added add-on {} x{}", product.id, qty);
                self.addons.push(AddonLine {
                    id: product.id.clone(),
                    product,
                    qty,
                });
            }
        }
        Ok(())
    }

    pub fn update_addon_qty(&mut self, id: &str, qty: u32) -> Result<(), BuildError> {
        let line = self
            .addons
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| BuildError::UnknownAddon(id.to_string()))?;
        line.qty = qty.max(1);
        Ok(())
    }

    pub fn remove_addon(&mut self, id: &str) -> Option<AddonLine> {
        let index = self.addons.iter().position(|line| line.id == id)?;
        Some(self.addons.remove(index))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.addons.is_empty()
    }

    // -------------------------------------------------------------------------
    // Typed attribute views of the base slots
    // -------------------------------------------------------------------------

    pub fn cpu(&self) -> Option<&CpuAttributes> {
        self.get(Category::Cpu).and_then(|p| p.spec.cpu())
    }

    pub fn motherboard(&self) -> Option<&MotherboardAttributes> {
        self.get(Category::Motherboard).and_then(|p| p.spec.motherboard())
    }

    pub fn gpu(&self) -> Option<&GpuAttributes> {
        self.get(Category::Gpu).and_then(|p| p.spec.gpu())
    }

    pub fn ram(&self) -> Option<&RamAttributes> {
        self.get(Category::Ram).and_then(|p| p.spec.ram())
    }

    pub fn storage(&self) -> Option<&StorageAttributes> {
        self.get(Category::Storage).and_then(|p| p.spec.storage())
    }

    pub fn psu(&self) -> Option<&PsuAttributes> {
        self.get(Category::Psu).and_then(|p| p.spec.psu())
    }

    pub fn case(&self) -> Option<&CaseAttributes> {
        self.get(Category::Case).and_then(|p| p.spec.case())
    }

    pub fn cooler(&self) -> Option<&CoolerAttributes> {
        self.get(Category::Cooler).and_then(|p| p.spec.cooler())
    }
}
