//! Compatibility, Smart Sync filtering and quoting for custom PC builds.
//!
//! The engine consumes a [`catalog::Catalog`] and a [`selection::Selection`]
//! and produces a [`compat::CompatibilityReport`], a [`sync::FilterSet`],
//! filtered candidate lists and a [`quote::Quote`]. All engine functions are
//! pure; [`session::BuildSession`] wires them together and persists state.

pub mod catalog;
pub mod compat;
pub mod config;
mod error;
pub mod quote;
pub mod selection;
pub mod session;
pub mod sync;

pub use catalog::{Catalog, Category, Part, PartSpec};
pub use compat::{check_compatibility, CompatibilityReport, Level};
pub use config::{default_config, load_config, EngineConfig};
pub use error::BuildError;
pub use quote::{calculate_quote, PricingConfig, Quote};
pub use selection::Selection;
pub use session::{BuildSession, Evaluation};
pub use sync::{apply_filters, derive_filters, FilterSet};

/// Install the fmt subscriber, honoring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
