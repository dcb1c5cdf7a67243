//! Smart Sync: derive filters from the parts already chosen.

use tracing::debug;

use crate::compat::estimate_wattage;
use crate::selection::Selection;

use super::types::FilterSet;

/// Constraints implied by the current base selection alone.
///
/// Precedence follows the merge order: the motherboard socket is applied
/// first and a chosen CPU's socket overrides it, even when the two disagree
/// (the checker reports that mismatch separately).
pub fn implied_filters(selection: &Selection) -> FilterSet {
    let mut implied = FilterSet::default();
    let mb = selection.motherboard();
    let cpu = selection.cpu();

    if let Some(socket) = mb.and_then(|m| m.socket.clone()) {
        implied.socket = Some(socket);
    }

    // Coolers follow the CPU, never the board.
    if let Some(socket) = cpu.and_then(|c| c.socket.clone()) {
        implied.socket = Some(socket.clone());
        implied.cooler_socket = Some(socket);
    }

    if let Some(mb) = mb {
        if mb.ram_type.is_some() {
            implied.ram_type = mb.ram_type.clone();
        }
        if mb.form_factor.is_some() {
            implied.form_factor = mb.form_factor.clone();
        }
    }

    implied.storage_interface = selection
        .storage()
        .and_then(|s| s.interface.clone())
        .or_else(|| mb.and_then(|m| m.storage.first().cloned()));

    if selection.psu().is_some() {
        implied.min_psu_watt = Some(estimate_wattage(selection).max(0.0));
    }

    implied
}

/// Merge the constraints implied by `selection` into `previous`.
///
/// Fields the selection does not imply keep their previous value, so the
/// result is stable: deriving again from the same selection changes nothing.
pub fn derive_filters(selection: &Selection, previous: &FilterSet) -> FilterSet {
    let implied = implied_filters(selection);
    debug!("Smart Sync implied filters: {:?}", implied);
    previous.clone().merge(implied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;

    fn put(sel: &mut Selection, spec: PartSpec) {
        let id = spec.category().to_string();
        sel.select(Part::new(id.clone(), id, 1000.0, spec)).unwrap();
    }

    fn motherboard() -> PartSpec {
        PartSpec::Motherboard(MotherboardAttributes {
            socket: Some("AM5".to_string()),
            ram_type: Some("DDR5".to_string()),
            form_factor: Some("mATX".to_string()),
            pcie_slots: Some(1.0),
            storage: vec!["NVMe".to_string(), "SATA".to_string()],
        })
    }

    fn cpu(socket: &str) -> PartSpec {
        PartSpec::Cpu(CpuAttributes {
            socket: Some(socket.to_string()),
            tdp: Some(125.0),
        })
    }

    #[test]
    fn test_empty_selection_keeps_previous() {
        let previous = FilterSet {
            form_factor: Some("ATX".to_string()),
            ..Default::default()
        };
        assert_eq!(derive_filters(&Selection::new(), &previous), previous);
    }

    #[test]
    fn test_motherboard_implies_board_fields() {
        let mut sel = Selection::new();
        put(&mut sel, motherboard());

        let filters = derive_filters(&sel, &FilterSet::default());
        assert_eq!(filters.socket.as_deref(), Some("AM5"));
        assert_eq!(filters.ram_type.as_deref(), Some("DDR5"));
        assert_eq!(filters.form_factor.as_deref(), Some("mATX"));
        assert_eq!(filters.storage_interface.as_deref(), Some("NVMe"));
        assert_eq!(filters.cooler_socket, None);
        assert_eq!(filters.min_psu_watt, None);
    }

    #[test]
    fn test_cpu_socket_overrides_motherboard() {
        let mut sel = Selection::new();
        put(&mut sel, motherboard());
        put(&mut sel, cpu("LGA1700"));

        let filters = derive_filters(&sel, &FilterSet::default());
        assert_eq!(filters.socket.as_deref(), Some("LGA1700"));
        assert_eq!(filters.cooler_socket.as_deref(), Some("LGA1700"));
    }

    #[test]
    fn test_storage_interface_prefers_chosen_drive() {
        let mut sel = Selection::new();
        put(&mut sel, motherboard());
        put(
            &mut sel,
            PartSpec::Storage(StorageAttributes {
                interface: Some("SATA".to_string()),
            }),
        );
        assert_eq!(
            derive_filters(&sel, &FilterSet::default()).storage_interface.as_deref(),
            Some("SATA")
        );

        put(&mut sel, PartSpec::Storage(StorageAttributes { interface: None }));
        assert_eq!(
            derive_filters(&sel, &FilterSet::default()).storage_interface.as_deref(),
            Some("NVMe")
        );
    }

    #[test]
    fn test_any_psu_sets_minimum_wattage() {
        let mut sel = Selection::new();
        put(&mut sel, cpu("AM5"));
        put(&mut sel, PartSpec::Gpu(GpuAttributes { tdp: Some(200.0) }));
        put(&mut sel, PartSpec::Psu(PsuAttributes { wattage: Some(200.0) }));

        let filters = derive_filters(&sel, &FilterSet::default());
        assert_eq!(filters.min_psu_watt, Some(425.0));
    }

    #[test]
    fn test_deriving_twice_is_stable() {
        let mut sel = Selection::new();
        put(&mut sel, motherboard());
        put(&mut sel, cpu("AM5"));
        put(&mut sel, PartSpec::Psu(PsuAttributes { wattage: Some(750.0) }));

        let previous = FilterSet {
            ram_type: Some("DDR4".to_string()),
            ..Default::default()
        };
        let once = derive_filters(&sel, &previous);
        let twice = derive_filters(&sel, &once);
        assert_eq!(once, twice);
    }
}
