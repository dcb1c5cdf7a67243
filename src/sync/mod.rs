//! Smart Sync: filters derived from chosen parts, and their application to
//! candidate lists for the slots still open.

mod apply;
mod derive;
mod types;

pub use apply::{apply_filters, matches_filters};
pub use derive::{derive_filters, implied_filters};
pub use types::{FilterField, FilterSet};
