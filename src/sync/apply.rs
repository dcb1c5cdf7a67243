//! Narrow candidate lists with a [`FilterSet`].

use crate::catalog::{Category, Part, PartSpec};

use super::types::FilterSet;

/// Constraint check: an unset constraint passes everything.
fn require<T: ?Sized>(constraint: Option<&T>, test: impl FnOnce(&T) -> bool) -> bool {
    constraint.map_or(true, test)
}

fn equals(constraint: &Option<String>, value: &Option<String>) -> bool {
    require(constraint.as_deref(), |wanted| value.as_deref() == Some(wanted))
}

fn listed(constraint: &Option<String>, values: &[String]) -> bool {
    require(constraint.as_deref(), |wanted| values.iter().any(|v| v == wanted))
}

/// Whether a part satisfies every constraint relevant to its category.
///
/// A part missing an attribute that an active constraint inspects fails that
/// constraint. Categories no constraint touches always pass.
pub fn matches_filters(part: &Part, filters: &FilterSet) -> bool {
    match &part.spec {
        PartSpec::Cpu(cpu) => equals(&filters.socket, &cpu.socket),
        PartSpec::Motherboard(mb) => {
            equals(&filters.socket, &mb.socket)
                && equals(&filters.ram_type, &mb.ram_type)
                && equals(&filters.form_factor, &mb.form_factor)
                && listed(&filters.storage_interface, &mb.storage)
        }
        PartSpec::Ram(ram) => equals(&filters.ram_type, &ram.ram_type),
        PartSpec::Storage(drive) | PartSpec::Ssd(drive) => {
            equals(&filters.storage_interface, &drive.interface)
        }
        PartSpec::Psu(psu) => require(filters.min_psu_watt.as_ref(), |min| {
            psu.wattage.is_some_and(|w| w >= *min)
        }),
        PartSpec::Case(case) => listed(&filters.form_factor, &case.form_factor_support),
        PartSpec::Cooler(cooler) => listed(&filters.cooler_socket, &cooler.socket_support),
        PartSpec::Gpu(_) | PartSpec::Monitor(_) | PartSpec::Software(_) => true,
    }
}

/// The candidates of `category` that pass the filters, in their original order.
/// Parts of other categories are dropped.
pub fn apply_filters<'a>(
    category: Category,
    candidates: &'a [Part],
    filters: &FilterSet,
) -> Vec<&'a Part> {
    candidates
        .iter()
        .filter(|part| part.category() == category)
        .filter(|part| matches_filters(part, filters))
        .collect()
}
