//! Pricing
//!
//! Half-portion rules and order totals. Everything here is a pure
//! function of its inputs; uses rust_decimal so that `(9 + 1) / 2` and
//! friends never pick up binary floating point noise.

mod half_portion;
mod totals;

pub use half_portion::HalfPriceRule;
pub use totals::{OrderTotals, PriceBasis, compute_totals, social_discount};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reduction per social discount flag (followed account, reposted story)
pub const SOCIAL_DISCOUNT_PER_FLAG: Decimal = dec!(1);

/// Added to an item ordered "with drink"
pub const DRINK_UPCHARGE: Decimal = dec!(2);
