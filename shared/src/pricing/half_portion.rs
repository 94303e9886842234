//! Half-portion price rules
//!
//! Each kiosk prints its own half prices on the board, so the rules are not
//! unifiable: changing one changes what customers are charged.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How a kiosk derives the half-portion price from the full price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfPriceRule {
    /// `base / 2 + 1`
    PlusOne,
    /// `(base + 1) / 2`
    Inverted,
    /// 10→6, 12→7, 14→8, 16→9; any other base falls back to `base / 2`
    Lookup,
}

/// Board prices for the lookup rule
const LOOKUP_TABLE: [(Decimal, Decimal); 4] = [
    (dec!(10), dec!(6)),
    (dec!(12), dec!(7)),
    (dec!(14), dec!(8)),
    (dec!(16), dec!(9)),
];

impl HalfPriceRule {
    /// Half-portion price for a full price of `base`
    pub fn half_price(&self, base: Decimal) -> Decimal {
        match self {
            Self::PlusOne => base / dec!(2) + Decimal::ONE,
            Self::Inverted => (base + Decimal::ONE) / dec!(2),
            Self::Lookup => LOOKUP_TABLE
                .iter()
                .find(|(full, _)| *full == base)
                .map(|(_, half)| *half)
                .unwrap_or_else(|| base / dec!(2)),
        }
    }

    /// Unit price for a line: `base` unless a half portion was chosen
    pub fn apply(&self, base: Decimal, is_half: bool) -> Decimal {
        if is_half { self.half_price(base) } else { base }
    }
}
