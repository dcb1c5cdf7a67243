//! The fixed pairwise compatibility rule set.
//!
//! Each rule names the parts it needs; it stays silent unless all of them are
//! in the selection. When it fires it produces either an `ok` note or a note
//! at its failure level. Rules never depend on one another.

use crate::selection::Selection;

use super::types::{Level, Note, RuleId};

/// Watts added on top of CPU and GPU TDP when sizing a power supply.
pub const WATTAGE_HEADROOM: f64 = 100.0;

/// Estimated system draw: CPU TDP + GPU TDP + fixed headroom. Missing TDPs count as zero.
pub fn estimate_wattage(selection: &Selection) -> f64 {
    let cpu = selection.cpu().and_then(|c| c.tdp).unwrap_or(0.0);
    let gpu = selection.gpu().and_then(|g| g.tdp).unwrap_or(0.0);
    cpu + gpu + WATTAGE_HEADROOM
}

/// Result of a rule whose parts are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
}

impl Verdict {
    fn pass(message: String) -> Self {
        Self { passed: true, message }
    }

    fn fail(message: String) -> Self {
        Self { passed: false, message }
    }

    fn from_check(passed: bool, ok: impl FnOnce() -> String, failed: impl FnOnce() -> String) -> Self {
        if passed {
            Self::pass(ok())
        } else {
            Self::fail(failed())
        }
    }
}

pub struct CompatRule {
    pub id: RuleId,
    /// Short label for listings
    pub description: &'static str,
    /// Level reported when the check fails
    pub failure_level: Level,
    check: fn(&Selection) -> Option<Verdict>,
}

impl CompatRule {
    /// Evaluate against a selection. `None` when the rule's parts are not all chosen.
    pub fn evaluate(&self, selection: &Selection) -> Option<Note> {
        let verdict = (self.check)(selection)?;
        Some(Note {
            rule: self.id,
            level: if verdict.passed {
                Level::Ok
            } else {
                self.failure_level
            },
            message: verdict.message,
        })
    }
}

/// All rules in report order.
pub const RULES: &[CompatRule] = &[
    CompatRule {
        id: RuleId::SocketMatch,
        description: "CPU socket matches motherboard",
        failure_level: Level::Error,
        check: socket_match,
    },
    CompatRule {
        id: RuleId::RamType,
        description: "RAM type matches motherboard",
        failure_level: Level::Error,
        check: ram_type,
    },
    CompatRule {
        id: RuleId::PcieSlot,
        description: "Motherboard has a PCIe slot for the GPU",
        failure_level: Level::Error,
        check: pcie_slot,
    },
    CompatRule {
        id: RuleId::CaseFormFactor,
        description: "Case supports the motherboard form factor",
        failure_level: Level::Error,
        check: case_form_factor,
    },
    CompatRule {
        id: RuleId::CoolerSocket,
        description: "Cooler supports the CPU socket",
        failure_level: Level::Error,
        check: cooler_socket,
    },
    CompatRule {
        id: RuleId::StorageInterface,
        description: "Motherboard exposes the storage interface",
        failure_level: Level::Error,
        check: storage_interface,
    },
    CompatRule {
        id: RuleId::PsuWattage,
        description: "PSU covers the estimated draw",
        failure_level: Level::Warn,
        check: psu_wattage,
    },
];

pub fn rule(id: RuleId) -> Option<&'static CompatRule> {
    RULES.iter().find(|r| r.id == id)
}

fn show(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

fn socket_match(selection: &Selection) -> Option<Verdict> {
    let cpu = selection.cpu()?;
    let mb = selection.motherboard()?;
    Some(Verdict::from_check(
        cpu.socket == mb.socket,
        || format!("CPU and motherboard share socket {}", show(&cpu.socket)),
        || {
            format!(
                "CPU socket {} does not match motherboard socket {}",
                show(&cpu.socket),
                show(&mb.socket)
            )
        },
    ))
}

fn ram_type(selection: &Selection) -> Option<Verdict> {
    let ram = selection.ram()?;
    let mb = selection.motherboard()?;
    Some(Verdict::from_check(
        ram.ram_type == mb.ram_type,
        || format!("RAM type {} matches motherboard", show(&ram.ram_type)),
        || {
            format!(
                "RAM type {} is not supported by motherboard ({})",
                show(&ram.ram_type),
                show(&mb.ram_type)
            )
        },
    ))
}

fn pcie_slot(selection: &Selection) -> Option<Verdict> {
    selection.gpu()?;
    let mb = selection.motherboard()?;
    let slots = mb.pcie_slots.unwrap_or(0.0);
    Some(Verdict::from_check(
        slots > 0.0,
        || format!("Motherboard has {} PCIe slot(s) for the GPU", slots),
        || "Motherboard has no PCIe slot for the GPU".to_string(),
    ))
}

fn case_form_factor(selection: &Selection) -> Option<Verdict> {
    let case = selection.case()?;
    let mb = selection.motherboard()?;
    let supported = mb
        .form_factor
        .as_ref()
        .is_some_and(|ff| case.form_factor_support.contains(ff));
    Some(Verdict::from_check(
        supported,
        || format!("Case fits {} motherboard", show(&mb.form_factor)),
        || {
            format!(
                "Case does not support {} motherboard (supports: {})",
                show(&mb.form_factor),
                case.form_factor_support.join(", ")
            )
        },
    ))
}

fn cooler_socket(selection: &Selection) -> Option<Verdict> {
    let cooler = selection.cooler()?;
    let cpu = selection.cpu()?;
    let supported = cpu
        .socket
        .as_ref()
        .is_some_and(|socket| cooler.socket_support.contains(socket));
    Some(Verdict::from_check(
        supported,
        || format!("Cooler supports socket {}", show(&cpu.socket)),
        || {
            format!(
                "Cooler does not support CPU socket {} (supports: {})",
                show(&cpu.socket),
                cooler.socket_support.join(", ")
            )
        },
    ))
}

/// Only evaluated when the drive names an interface and the board lists any.
fn storage_interface(selection: &Selection) -> Option<Verdict> {
    let storage = selection.storage()?;
    let mb = selection.motherboard()?;
    let interface = storage.interface.as_ref()?;
    if mb.storage.is_empty() {
        return None;
    }
    Some(Verdict::from_check(
        mb.storage.contains(interface),
        || format!("Motherboard supports {} storage", interface),
        || {
            format!(
                "Motherboard does not support {} storage (supports: {})",
                interface,
                mb.storage.join(", ")
            )
        },
    ))
}

fn psu_wattage(selection: &Selection) -> Option<Verdict> {
    let psu = selection.psu()?;
    if selection.cpu().is_none() && selection.gpu().is_none() {
        return None;
    }
    let needed = estimate_wattage(selection);
    let wattage = psu.wattage;
    Some(Verdict::from_check(
        wattage.is_some_and(|w| w >= needed),
        || format!("PSU {}W covers the estimated {}W", wattage.unwrap_or(0.0), needed),
        || match wattage {
            Some(w) => format!("PSU {}W is below the estimated {}W requirement", w, needed),
            None => format!("PSU wattage unknown; estimated requirement is {}W", needed),
        },
    ))
}
