//! Pairwise compatibility checking for a build.
//!
//! A fixed list of independent rules (socket, RAM type, PCIe, case form
//! factor, cooler socket, storage interface, PSU wattage) is evaluated against
//! the chosen base parts. Incompatibilities are data in the returned
//! [`CompatibilityReport`], never errors.
//!
//! # Example
//!
//! ```ignore
//! use pcbuild::compat::check_compatibility;
//!
//! let report = check_compatibility(&selection);
//! if report.has_errors() {
//!     for note in report.notes_at(Level::Error) {
//!         println!("{}", note.message);
//!     }
//! }
//! ```

mod checker;
mod rules;
mod types;

pub use checker::check_compatibility;
pub use rules::{estimate_wattage, rule, CompatRule, Verdict, RULES, WATTAGE_HEADROOM};
pub use types::*;
