//! Derived candidate filters ("Smart Sync").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Soft constraints narrowing candidates for categories not yet chosen.
///
/// Every field is optional; `None` means unconstrained. The set is derived
/// from chosen parts and merged into the previous set, so a field persists
/// until a later derivation replaces it or the user clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooler_socket: Option<String>,
    #[serde(
        default,
        rename = "minPSUWatt",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_psu_watt: Option<f64>,
}

/// Individual filter fields, as shown on the filter chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Socket,
    RamType,
    FormFactor,
    StorageInterface,
    CoolerSocket,
    #[serde(rename = "minPSUWatt")]
    MinPsuWatt,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Socket,
        FilterField::RamType,
        FilterField::FormFactor,
        FilterField::StorageInterface,
        FilterField::CoolerSocket,
        FilterField::MinPsuWatt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Socket => "Socket",
            FilterField::RamType => "RAM type",
            FilterField::FormFactor => "Form factor",
            FilterField::StorageInterface => "Storage interface",
            FilterField::CoolerSocket => "Cooler socket",
            FilterField::MinPsuWatt => "Min PSU watt",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterField {
    type Err = BuildError;

    /// Case-insensitive; `_` and `-` are ignored, so `ramType`, `ram_type`
    /// and `ram-type` all name the same field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let field = match wanted.as_str() {
            "socket" => FilterField::Socket,
            "ramtype" => FilterField::RamType,
            "formfactor" => FilterField::FormFactor,
            "storageinterface" => FilterField::StorageInterface,
            "coolersocket" => FilterField::CoolerSocket,
            "minpsuwatt" => FilterField::MinPsuWatt,
            _ => return Err(BuildError::UnknownFilterField(s.to_string())),
        };
        Ok(field)
    }
}

impl FilterSet {
    /// Overlay `update` onto `self`: fields set in `update` win, the rest are kept.
    pub fn merge(mut self, update: FilterSet) -> FilterSet {
        fn overlay<T>(base: &mut Option<T>, update: Option<T>) {
            if update.is_some() {
                *base = update;
            }
        }
        overlay(&mut self.socket, update.socket);
        overlay(&mut self.ram_type, update.ram_type);
        overlay(&mut self.form_factor, update.form_factor);
        overlay(&mut self.storage_interface, update.storage_interface);
        overlay(&mut self.cooler_socket, update.cooler_socket);
        overlay(&mut self.min_psu_watt, update.min_psu_watt);
        self
    }

    /// Remove one constraint (chip toggle).
    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::Socket => self.socket = None,
            FilterField::RamType => self.ram_type = None,
            FilterField::FormFactor => self.form_factor = None,
            FilterField::StorageInterface => self.storage_interface = None,
            FilterField::CoolerSocket => self.cooler_socket = None,
            FilterField::MinPsuWatt => self.min_psu_watt = None,
        }
    }

    pub fn clear_all(&mut self) {
        *self = FilterSet::default();
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Active constraints with their display values, in chip order.
    pub fn active(&self) -> Vec<(FilterField, String)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = match field {
                    FilterField::Socket => self.socket.clone(),
                    FilterField::RamType => self.ram_type.clone(),
                    FilterField::FormFactor => self.form_factor.clone(),
                    FilterField::StorageInterface => self.storage_interface.clone(),
                    FilterField::CoolerSocket => self.cooler_socket.clone(),
                    FilterField::MinPsuWatt => self.min_psu_watt.map(|w| format!("{}W", w)),
                }?;
                Some((field, value))
            })
            .collect()
    }
}
