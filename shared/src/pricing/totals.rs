//! Order totals
//!
//! `subtotal = Σ line amounts`, `discount = $1 × flags set`,
//! `total = max(subtotal - discount, 0)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SOCIAL_DISCOUNT_PER_FLAG;
use crate::models::{OrderLineItem, SocialDiscounts};

/// How a line contributes to the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// `price` is the whole line (bulk items carry their bundle price)
    #[default]
    PerLine,
    /// `price` is per piece and is multiplied by `quantity`
    PerUnit,
}

impl PriceBasis {
    pub fn line_amount(&self, item: &OrderLineItem) -> Decimal {
        match self {
            Self::PerLine => item.price,
            Self::PerUnit => item
                .price
                .saturating_mul(Decimal::from(item.quantity.unwrap_or(1))),
        }
    }
}

/// Totals of one order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Social discount for an order ($0, $1 or $2)
pub fn social_discount(discounts: &SocialDiscounts) -> Decimal {
    SOCIAL_DISCOUNT_PER_FLAG * Decimal::from(discounts.count())
}

/// Compute subtotal, discount and total for a list of lines
///
/// Sums saturate at `Decimal::MAX` instead of panicking.
pub fn compute_totals(
    items: &[OrderLineItem],
    discounts: &SocialDiscounts,
    basis: PriceBasis,
) -> OrderTotals {
    let subtotal = items
        .iter()
        .map(|item| basis.line_amount(item))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let discount = social_discount(discounts);
    let total = (subtotal - discount).max(Decimal::ZERO);

    OrderTotals {
        subtotal,
        discount,
        total,
    }
}
