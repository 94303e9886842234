//! Session-scoped cart
//!
//! The in-progress order a kiosk operator builds before submitting. A `Cart`
//! lives for one form session (or one quote request) and is never shared
//! across requests. Every add and remove re-applies the kiosk's bundle
//! promotion to the whole cart, so removing the qualifying item raises the
//! promoted item back to its regular price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{FlavorCount, Menu, MenuItem, OrderLineItem, OrderSubmission, SocialDiscounts};
use crate::pricing::{DRINK_UPCHARGE, HalfPriceRule, OrderTotals, PriceBasis, compute_totals};

/// What the operator picked for one line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub product: String,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub is_half: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Per-flavor piece counts for bulk items
    #[serde(default)]
    pub flavors: Vec<FlavorCount>,
    /// One option per combo group, in group order
    #[serde(default)]
    pub combo: Vec<String>,
    #[serde(default)]
    pub with_drink: bool,
}

impl Selection {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            ..Self::default()
        }
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn half(mut self) -> Self {
        self.is_half = true;
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn flavor_count(mut self, name: impl Into<String>, count: u32) -> Self {
        self.flavors.push(FlavorCount::new(name, count));
        self
    }

    pub fn pick(mut self, option: impl Into<String>) -> Self {
        self.combo.push(option.into());
        self
    }

    pub fn with_drink(mut self) -> Self {
        self.with_drink = true;
        self
    }
}

/// Cross-item promotion: `item` costs `promo_price` while the cart holds any
/// of `qualifying`, `regular_price` otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlePromotion {
    pub item: String,
    pub qualifying: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub promo_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub regular_price: Decimal,
}

impl BundlePromotion {
    /// $5 keychain with a waffle or croffle, $8 on its own
    pub fn keychain() -> Self {
        Self {
            item: "KeyChain".into(),
            qualifying: vec!["Waffle".into(), "Croffle".into()],
            promo_price: dec!(5),
            regular_price: dec!(8),
        }
    }

    /// Re-price every promoted line from the current cart contents
    pub fn apply(&self, items: &mut [OrderLineItem]) {
        let qualifies = items
            .iter()
            .any(|i| self.qualifying.iter().any(|q| *q == i.product));
        let price = if qualifies {
            self.promo_price
        } else {
            self.regular_price
        };
        for item in items.iter_mut().filter(|i| i.product == self.item) {
            item.price = price;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Product {0} is not on the menu")]
    UnknownProduct(String),

    #[error("Please select a flavor for {0}")]
    FlavorRequired(String),

    #[error("Flavor {flavor} is not available for {product}")]
    UnknownFlavor { product: String, flavor: String },

    #[error("Half portion is not available for {0}")]
    HalfUnavailable(String),

    #[error("{0} cannot be ordered with a drink")]
    DrinkUnavailable(String),

    #[error("Please select quantity for {0}")]
    QuantityRequired(String),

    #[error("Quantity {quantity} is not available for {product}")]
    UnknownQuantity { product: String, quantity: u32 },

    #[error("Please select exactly {expected} pieces (selected {actual})")]
    FlavorCountMismatch { expected: u32, actual: u32 },

    #[error("Please select an item from each subcategory of {0}")]
    ComboIncomplete(String),

    #[error("{option} is not an option of {group}")]
    UnknownComboOption { group: String, option: String },

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("No cart line at index {0}")]
    IndexOutOfRange(usize),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::UnknownProduct(_) => ErrorCode::ProductNotFound,
            CartError::FlavorRequired(_) => ErrorCode::RequiredField,
            CartError::UnknownFlavor { .. } => ErrorCode::FlavorNotFound,
            CartError::HalfUnavailable(_) | CartError::DrinkUnavailable(_) => {
                ErrorCode::HalfPortionUnavailable
            }
            CartError::QuantityRequired(_) => ErrorCode::RequiredField,
            CartError::UnknownQuantity { .. } => ErrorCode::QuantityTierNotFound,
            CartError::FlavorCountMismatch { .. } => ErrorCode::FlavorCountMismatch,
            CartError::ComboIncomplete(_) | CartError::UnknownComboOption { .. } => {
                ErrorCode::ComboIncomplete
            }
            CartError::ZeroQuantity => ErrorCode::ValueOutOfRange,
            CartError::IndexOutOfRange(_) => ErrorCode::OrderItemNotFound,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// A kiosk cart: menu + pricing rules + the lines added so far
#[derive(Debug, Clone)]
pub struct Cart<'m> {
    menu: &'m Menu,
    rule: HalfPriceRule,
    promotion: Option<BundlePromotion>,
    items: Vec<OrderLineItem>,
}

impl<'m> Cart<'m> {
    pub fn new(menu: &'m Menu, rule: HalfPriceRule, promotion: Option<BundlePromotion>) -> Self {
        Self {
            menu,
            rule,
            promotion,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price a selection against the menu and append it
    pub fn add(&mut self, selection: Selection) -> Result<&OrderLineItem, CartError> {
        let menu = self.menu;
        let item = menu
            .item(&selection.product)
            .ok_or_else(|| CartError::UnknownProduct(selection.product.clone()))?;

        if selection.is_half && !item.half_portion {
            return Err(CartError::HalfUnavailable(item.name.clone()));
        }
        if selection.with_drink && !item.drink_option {
            return Err(CartError::DrinkUnavailable(item.name.clone()));
        }
        if selection.quantity == Some(0) {
            return Err(CartError::ZeroQuantity);
        }

        let mut line = if item.is_combo() {
            self.combo_line(item, &selection)?
        } else if item.is_quantity_based() {
            Self::bulk_line(item, &selection)?
        } else if !item.flavors.is_empty() {
            self.flavored_line(item, &selection)?
        } else {
            let mut line =
                OrderLineItem::new(&item.name, "", item.base_price.unwrap_or(Decimal::ZERO));
            line.quantity = selection.quantity;
            line
        };

        if selection.with_drink {
            line.price += DRINK_UPCHARGE;
            line.with_drink = true;
        }

        self.items.push(line);
        self.reprice();

        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Remove the line at `index`
    pub fn remove(&mut self, index: usize) -> Result<OrderLineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange(index));
        }
        let removed = self.items.remove(index);
        self.reprice();
        Ok(removed)
    }

    pub fn totals(&self, discounts: &SocialDiscounts, basis: PriceBasis) -> OrderTotals {
        compute_totals(&self.items, discounts, basis)
    }

    pub fn into_submission(
        self,
        order_id: impl Into<String>,
        discounts: SocialDiscounts,
    ) -> OrderSubmission {
        OrderSubmission::new(order_id, self.items).with_discounts(discounts)
    }

    fn reprice(&mut self) {
        if let Some(promotion) = &self.promotion {
            promotion.apply(&mut self.items);
        }
    }

    fn flavored_line(
        &self,
        item: &MenuItem,
        selection: &Selection,
    ) -> Result<OrderLineItem, CartError> {
        let flavor_name = selection
            .flavor
            .as_deref()
            .ok_or_else(|| CartError::FlavorRequired(item.name.clone()))?;
        let flavor = item
            .flavor(flavor_name)
            .ok_or_else(|| CartError::UnknownFlavor {
                product: item.name.clone(),
                flavor: flavor_name.to_string(),
            })?;

        let mut line = OrderLineItem::new(
            &item.name,
            &flavor.name,
            self.rule.apply(flavor.price, selection.is_half),
        );
        line.is_half = selection.is_half;
        line.quantity = selection.quantity;
        Ok(line)
    }

    fn combo_line(&self, item: &MenuItem, selection: &Selection) -> Result<OrderLineItem, CartError> {
        if selection.combo.len() != item.combo_groups.len() {
            return Err(CartError::ComboIncomplete(item.name.clone()));
        }

        let mut price = Decimal::ZERO;
        for (group, pick) in item.combo_groups.iter().zip(&selection.combo) {
            let option = group
                .options
                .iter()
                .find(|o| o.name == *pick)
                .ok_or_else(|| CartError::UnknownComboOption {
                    group: group.name.clone(),
                    option: pick.clone(),
                })?;
            price += option.price;
        }

        let mut line = OrderLineItem::new(&item.name, selection.combo.join(" + "), price);
        line.quantity = selection.quantity;
        Ok(line)
    }

    fn bulk_line(item: &MenuItem, selection: &Selection) -> Result<OrderLineItem, CartError> {
        let quantity = selection
            .quantity
            .ok_or_else(|| CartError::QuantityRequired(item.name.clone()))?;

        let price = match (item.tier(quantity), item.custom_piece_price) {
            (Some(tier), _) => tier.price,
            (None, Some(each)) => each * Decimal::from(quantity),
            (None, None) => {
                return Err(CartError::UnknownQuantity {
                    product: item.name.clone(),
                    quantity,
                });
            }
        };

        for picked in &selection.flavors {
            if item.flavor(&picked.name).is_none() {
                return Err(CartError::UnknownFlavor {
                    product: item.name.clone(),
                    flavor: picked.name.clone(),
                });
            }
        }

        let actual: u32 = selection.flavors.iter().map(|f| f.count).sum();
        if actual != quantity || selection.flavors.iter().any(|f| f.count == 0) {
            return Err(CartError::FlavorCountMismatch {
                expected: quantity,
                actual,
            });
        }

        Ok(OrderLineItem::bulk(
            &item.name,
            quantity,
            selection.flavors.clone(),
            price,
        ))
    }
}
