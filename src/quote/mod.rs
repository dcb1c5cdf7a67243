//! Quote calculation for a build.
//!
//! Turns a selection (base parts plus quantified add-ons) into an itemized
//! quote with discount, VAT and optional cost/margin figures.

mod calculator;
mod types;

pub use calculator::{calculate_quote, discount_for};
pub use types::*;
