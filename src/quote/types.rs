use serde::{Deserialize, Serialize};

use crate::catalog::Category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    None,
    /// `discount_value` is a percentage of the subtotal
    Percent,
    /// `discount_value` is an absolute amount
    Fixed,
}

/// Pricing options for a quote. Values are taken as given; the calculator
/// only caps the discount to the subtotal. Omitted fields take the defaults
/// (no discount, 7% VAT enabled, no cost reporting).
///
/// JSON uses camelCase like the rest of the session; the snake_case names are
/// accepted too so the TOML config reads like the other settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(alias = "discount_type")]
    pub discount_type: DiscountType,
    #[serde(alias = "discount_value")]
    pub discount_value: f64,
    #[serde(alias = "vat_enabled")]
    pub vat_enabled: bool,
    #[serde(alias = "vat_percent")]
    pub vat_percent: f64,
    /// Report cost, profit and margin alongside the price
    #[serde(alias = "include_cost")]
    pub include_cost: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            discount_type: DiscountType::None,
            discount_value: 0.0,
            vat_enabled: true,
            vat_percent: 7.0,
            include_cost: false,
        }
    }
}

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub category: Category,
    pub part_id: String,
    pub name: String,
    pub unit_price: f64,
    pub qty: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Base parts in slot order, then add-ons in the order they were added
    pub lines: Vec<QuoteLine>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub net_before_tax: f64,
    pub tax_amount: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<f64>,
    /// Required categories with no part chosen
    pub missing_required: Vec<Category>,
}

impl Quote {
    /// A quote is ready to hand over once every required slot is filled.
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}
