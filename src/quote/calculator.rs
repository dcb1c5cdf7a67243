//! Quote arithmetic: subtotal, discount, VAT and margin.

use tracing::{debug, warn};

use crate::catalog::{Category, Part};
use crate::selection::Selection;

use super::types::{DiscountType, PricingConfig, Quote, QuoteLine};

/// Discount for a subtotal, kept within `0..=subtotal`. A non-finite
/// discount value gives no discount.
pub fn discount_for(subtotal: f64, pricing: &PricingConfig) -> f64 {
    if pricing.discount_type != DiscountType::None && !pricing.discount_value.is_finite() {
        warn!("Ignoring non-finite discount value {}", pricing.discount_value);
        return 0.0;
    }
    let raw = match pricing.discount_type {
        DiscountType::None => 0.0,
        DiscountType::Percent => subtotal * pricing.discount_value / 100.0,
        DiscountType::Fixed => pricing.discount_value,
    };
    raw.min(subtotal).max(0.0)
}

fn line(category: Category, part: &Part, qty: u32) -> QuoteLine {
    QuoteLine {
        category,
        part_id: part.id.clone(),
        name: part.name.clone(),
        unit_price: part.price,
        qty,
        line_total: part.price * f64::from(qty),
    }
}

/// Price a selection.
///
/// Never fails. The discount is capped at the subtotal so the net never goes
/// negative; the VAT percentage is applied as given unless it is not a finite
/// number, in which case no tax is charged. Cost, profit and margin
/// are reported only when `pricing.include_cost` is set, with missing costs
/// counting as zero and tax excluded from the margin basis.
pub fn calculate_quote(
    selection: &Selection,
    pricing: &PricingConfig,
    required: &[Category],
) -> Quote {
    let mut lines: Vec<QuoteLine> = selection
        .base_parts()
        .map(|part| line(part.category(), part, 1))
        .collect();
    lines.extend(
        selection
            .addons()
            .iter()
            .map(|addon| line(addon.product.category(), &addon.product, addon.qty)),
    );

    let subtotal: f64 = lines.iter().map(|l| l.line_total).sum();
    let discount_amount = discount_for(subtotal, pricing);
    let net_before_tax = (subtotal - discount_amount).max(0.0);

    let tax_amount = if pricing.vat_enabled {
        let vat_percent = if pricing.vat_percent.is_finite() {
            pricing.vat_percent
        } else {
            warn!("Ignoring non-finite VAT percent {}", pricing.vat_percent);
            0.0
        };
        if vat_percent < 0.0 {
            warn!("Negative VAT percent {} applied as given", vat_percent);
        }
        net_before_tax * vat_percent / 100.0
    } else {
        0.0
    };
    let total = net_before_tax + tax_amount;

    let (cost_total, profit, margin_percent) = if pricing.include_cost {
        let cost_total: f64 = selection
            .base_parts()
            .map(|p| p.cost.unwrap_or(0.0))
            .chain(
                selection
                    .addons()
                    .iter()
                    .map(|a| a.product.cost.unwrap_or(0.0) * f64::from(a.qty)),
            )
            .sum();
        let profit = net_before_tax - cost_total;
        let margin = if net_before_tax > 0.0 {
            profit / net_before_tax * 100.0
        } else {
            0.0
        };
        (Some(cost_total), Some(profit), Some(margin))
    } else {
        (None, None, None)
    };

    let mut missing_required = Vec::new();
    for &category in required {
        if !selection.contains(category) && !missing_required.contains(&category) {
            missing_required.push(category);
        }
    }

    debug!(
        "Quote: subtotal {} discount {} tax {} total {} ({} lines)",
        subtotal,
        discount_amount,
        tax_amount,
        total,
        lines.len()
    );

    Quote {
        lines,
        subtotal,
        discount_amount,
        net_before_tax,
        tax_amount,
        total,
        cost_total,
        profit,
        margin_percent,
        missing_required,
    }
}
