//! Parts inventory: categories, typed attributes and the catalog snapshot.

mod inventory;
mod lenient;
mod types;
mod validation;

pub use inventory::Catalog;
pub use types::*;
pub use validation::{validate_part, validate_parts, ValidationWarning};
