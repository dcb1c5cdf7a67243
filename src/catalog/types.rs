//! Part records and their category-specific attributes.
//!
//! On the wire a part is a flat record with an open `attributes` object:
//!
//! ```json
//! { "id": "cpu-7600", "name": "Ryzen 5 7600", "category": "CPU",
//!   "price": 7490, "stock": 4, "cost": 6500,
//!   "attributes": { "socket": "AM5", "tdp": 65 } }
//! ```
//!
//! In memory the attributes become a [`PartSpec`] variant chosen by the
//! category, so only the keys a category defines are ever inspected and any
//! extra keys are dropped while reading.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::lenient;
use crate::error::BuildError;

// =============================================================================
// CATEGORIES
// =============================================================================

/// Closed set of part categories.
///
/// The first eight are base slots (one part each per build); Monitor,
/// Software and SSD are add-ons sold in quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Cpu,
    Motherboard,
    Gpu,
    Ram,
    Storage,
    Psu,
    Case,
    Cooler,
    Monitor,
    Software,
    Ssd,
}

impl Category {
    pub const BASE: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooler,
    ];

    pub const ADDON: [Category; 3] = [Category::Monitor, Category::Software, Category::Ssd];

    pub const ALL: [Category; 11] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooler,
        Category::Monitor,
        Category::Software,
        Category::Ssd,
    ];

    pub fn is_base(self) -> bool {
        !self.is_addon()
    }

    pub fn is_addon(self) -> bool {
        matches!(self, Category::Monitor | Category::Software | Category::Ssd)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Motherboard => "Motherboard",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Psu => "PSU",
            Category::Case => "Case",
            Category::Cooler => "Cooler",
            Category::Monitor => "Monitor",
            Category::Software => "Software",
            Category::Ssd => "SSD",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BuildError;

    /// Case-insensitive match on the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BuildError::UnknownCategory(wanted.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = BuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Thermal design power in watts
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub tdp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherboardAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub ram_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub pcie_slots: Option<f64>,
    /// Storage interfaces the board exposes (e.g. "NVMe", "SATA")
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuAttributes {
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub tdp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamAttributes {
    /// Memory generation, e.g. "DDR5"
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ram_type: Option<String>,
}

/// Shared by the Storage base slot and SSD add-ons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsuAttributes {
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub wattage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseAttributes {
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub form_factor_support: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolerAttributes {
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub socket_support: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Category-indexed attributes of a part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartSpec {
    Cpu(CpuAttributes),
    Motherboard(MotherboardAttributes),
    Gpu(GpuAttributes),
    Ram(RamAttributes),
    Storage(StorageAttributes),
    Psu(PsuAttributes),
    Case(CaseAttributes),
    Cooler(CoolerAttributes),
    Monitor(MonitorAttributes),
    Software(SoftwareAttributes),
    Ssd(StorageAttributes),
}

impl PartSpec {
    pub fn category(&self) -> Category {
        match self {
            PartSpec::Cpu(_) => Category::Cpu,
            PartSpec::Motherboard(_) => Category::Motherboard,
            PartSpec::Gpu(_) => Category::Gpu,
            PartSpec::Ram(_) => Category::Ram,
            PartSpec::Storage(_) => Category::Storage,
            PartSpec::Psu(_) => Category::Psu,
            PartSpec::Case(_) => Category::Case,
            PartSpec::Cooler(_) => Category::Cooler,
            PartSpec::Monitor(_) => Category::Monitor,
            PartSpec::Software(_) => Category::Software,
            PartSpec::Ssd(_) => Category::Ssd,
        }
    }

    /// Empty attributes for a category.
    pub fn empty(category: Category) -> Self {
        Self::from_attributes(category, Value::Null)
    }

    /// Read an open attribute object into the typed variant for `category`.
    /// Non-object input yields empty attributes.
    pub fn from_attributes(category: Category, attributes: Value) -> Self {
        match category {
            Category::Cpu => PartSpec::Cpu(read_attributes(category, attributes)),
            Category::Motherboard => PartSpec::Motherboard(read_attributes(category, attributes)),
            Category::Gpu => PartSpec::Gpu(read_attributes(category, attributes)),
            Category::Ram => PartSpec::Ram(read_attributes(category, attributes)),
            Category::Storage => PartSpec::Storage(read_attributes(category, attributes)),
            Category::Psu => PartSpec::Psu(read_attributes(category, attributes)),
            Category::Case => PartSpec::Case(read_attributes(category, attributes)),
            Category::Cooler => PartSpec::Cooler(read_attributes(category, attributes)),
            Category::Monitor => PartSpec::Monitor(read_attributes(category, attributes)),
            Category::Software => PartSpec::Software(read_attributes(category, attributes)),
            Category::Ssd => PartSpec::Ssd(read_attributes(category, attributes)),
        }
    }

    pub fn to_attributes(&self) -> Value {
        let value = match self {
            PartSpec::Cpu(a) => serde_json::to_value(a),
            PartSpec::Motherboard(a) => serde_json::to_value(a),
            PartSpec::Gpu(a) => serde_json::to_value(a),
            PartSpec::Ram(a) => serde_json::to_value(a),
            PartSpec::Storage(a) | PartSpec::Ssd(a) => serde_json::to_value(a),
            PartSpec::Psu(a) => serde_json::to_value(a),
            PartSpec::Case(a) => serde_json::to_value(a),
            PartSpec::Cooler(a) => serde_json::to_value(a),
            PartSpec::Monitor(a) => serde_json::to_value(a),
            PartSpec::Software(a) => serde_json::to_value(a),
        };
        value.unwrap_or_default()
    }

    pub fn cpu(&self) -> Option<&CpuAttributes> {
        match self {
            PartSpec::Cpu(a) => Some(a),
            _ => None,
        }
    }

    pub fn motherboard(&self) -> Option<&MotherboardAttributes> {
        match self {
            PartSpec::Motherboard(a) => Some(a),
            _ => None,
        }
    }

    pub fn gpu(&self) -> Option<&GpuAttributes> {
        match self {
            PartSpec::Gpu(a) => Some(a),
            _ => None,
        }
    }

    pub fn ram(&self) -> Option<&RamAttributes> {
        match self {
            PartSpec::Ram(a) => Some(a),
            _ => None,
        }
    }

    /// Storage attributes of either a Storage or an SSD part.
    pub fn storage(&self) -> Option<&StorageAttributes> {
        match self {
            PartSpec::Storage(a) | PartSpec::Ssd(a) => Some(a),
            _ => None,
        }
    }

    pub fn psu(&self) -> Option<&PsuAttributes> {
        match self {
            PartSpec::Psu(a) => Some(a),
            _ => None,
        }
    }

    pub fn case(&self) -> Option<&CaseAttributes> {
        match self {
            PartSpec::Case(a) => Some(a),
            _ => None,
        }
    }

    pub fn cooler(&self) -> Option<&CoolerAttributes> {
        match self {
            PartSpec::Cooler(a) => Some(a),
            _ => None,
        }
    }
}

fn read_attributes<T>(category: Category, attributes: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if !attributes.is_object() {
        return T::default();
    }
    serde_json::from_value(attributes).unwrap_or_else(|e| {
        warn!("Unreadable {} attributes, treating as empty: {}", category, e);
        T::default()
    })
}

// =============================================================================
// PARTS
// =============================================================================

/// A purchasable unit from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartRecord", into = "PartRecord")]
pub struct Part {
    pub id: String,
    pub name: String,
    /// Selling price
    pub price: f64,
    /// Units on hand; informational only
    pub stock: u32,
    /// Acquisition cost, used for margin reporting
    pub cost: Option<f64>,
    pub spec: PartSpec,
}

impl Part {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, spec: PartSpec) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: 0,
            cost: None,
            spec,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn category(&self) -> Category {
        self.spec.category()
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Flat wire shape of a [`Part`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartRecord {
    #[serde(deserialize_with = "lenient::id")]
    id: String,
    #[serde(default)]
    name: String,
    category: Category,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    price: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    stock: u32,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
    #[serde(default)]
    attributes: Value,
}

impl From<PartRecord> for Part {
    fn from(record: PartRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            stock: record.stock,
            cost: record.cost,
            spec: PartSpec::from_attributes(record.category, record.attributes),
        }
    }
}

impl From<Part> for PartRecord {
    fn from(part: Part) -> Self {
        Self {
            category: part.category(),
            attributes: part.spec.to_attributes(),
            id: part.id,
            name: part.name,
            price: part.price,
            stock: part.stock,
            cost: part.cost,
        }
    }
}
