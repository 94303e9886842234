//! Static menu model
//!
//! Menus are defined at build time (see [`crate::catalog`]) and never
//! mutated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced choice: a flavor of a product, or an option of a combo group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Flavor {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Bundle size of a quantity-based item and its price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityTier {
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// One "pick exactly one" group of a combo (e.g. the drink of a waffle combo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboGroup {
    pub name: String,
    pub options: Vec<Flavor>,
}

/// A product on a kiosk menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    /// Whether a half portion can be ordered
    pub half_portion: bool,
    /// Fixed price for items without flavors
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub base_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flavors: Vec<Flavor>,
    /// Non-empty for bulk items sold by piece count across several flavors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quantity_tiers: Vec<QuantityTier>,
    /// Per-piece price for bulk quantities that match no tier
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub custom_piece_price: Option<Decimal>,
    /// Non-empty for combos; the line price is the sum of the picked options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_groups: Vec<ComboGroup>,
    /// Whether the item can be ordered "with drink" (adds a bundled drink)
    #[serde(default)]
    pub drink_option: bool,
}

impl MenuItem {
    /// Item with a fixed price and no flavors
    pub fn fixed(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            half_portion: false,
            base_price: Some(price),
            flavors: Vec::new(),
            quantity_tiers: Vec::new(),
            custom_piece_price: None,
            combo_groups: Vec::new(),
            drink_option: false,
        }
    }

    /// Item priced per flavor
    pub fn flavored(name: impl Into<String>, half_portion: bool, flavors: Vec<Flavor>) -> Self {
        Self {
            name: name.into(),
            half_portion,
            base_price: None,
            flavors,
            quantity_tiers: Vec::new(),
            custom_piece_price: None,
            combo_groups: Vec::new(),
            drink_option: false,
        }
    }

    /// Combo made of one pick per group
    pub fn combo(name: impl Into<String>, groups: Vec<ComboGroup>) -> Self {
        Self {
            name: name.into(),
            half_portion: false,
            base_price: None,
            flavors: Vec::new(),
            quantity_tiers: Vec::new(),
            custom_piece_price: None,
            combo_groups: groups,
            drink_option: false,
        }
    }

    /// Bulk item sold in fixed piece counts across the listed flavors
    pub fn quantity_based(
        name: impl Into<String>,
        flavors: Vec<Flavor>,
        tiers: Vec<QuantityTier>,
    ) -> Self {
        Self {
            name: name.into(),
            half_portion: false,
            base_price: None,
            flavors,
            quantity_tiers: tiers,
            custom_piece_price: None,
            combo_groups: Vec::new(),
            drink_option: false,
        }
    }

    pub fn with_custom_piece_price(mut self, price: Decimal) -> Self {
        self.custom_piece_price = Some(price);
        self
    }

    pub fn with_drink_option(mut self) -> Self {
        self.drink_option = true;
        self
    }

    pub fn is_quantity_based(&self) -> bool {
        !self.quantity_tiers.is_empty()
    }

    pub fn is_combo(&self) -> bool {
        !self.combo_groups.is_empty()
    }

    pub fn flavor(&self, name: &str) -> Option<&Flavor> {
        self.flavors.iter().find(|f| f.name == name)
    }

    pub fn tier(&self, quantity: u32) -> Option<&QuantityTier> {
        self.quantity_tiers.iter().find(|t| t.quantity == quantity)
    }
}

/// Everything a kiosk sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Kiosk slug
    pub kiosk: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn item(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.name == name)
    }
}
