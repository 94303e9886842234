//! Order wire models
//!
//! The JSON a kiosk form posts to an order endpoint, and the receipt it gets
//! back.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Longest order id accepted (the forms cap the numeric input well below this)
pub const MAX_ORDER_ID_LEN: usize = 64;

/// Longest product / flavor / category name accepted
pub const MAX_NAME_LEN: usize = 200;

/// Highest unit price accepted
pub const MAX_PRICE: Decimal = dec!(100000);

/// Highest quantity (or per-flavor piece count) accepted
pub const MAX_QUANTITY: u32 = 10_000;

/// One flavor of a bulk item and how many pieces of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorCount {
    pub name: String,
    pub count: u32,
}

impl FlavorCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// The two social-media discount checkboxes, each worth $1 once per order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialDiscounts {
    #[serde(default)]
    pub followed_instagram: bool,
    #[serde(default)]
    pub reposted_story: bool,
}

impl SocialDiscounts {
    pub fn new(followed_instagram: bool, reposted_story: bool) -> Self {
        Self {
            followed_instagram,
            reposted_story,
        }
    }

    /// Number of flags set (0, 1 or 2)
    pub fn count(&self) -> u32 {
        u32::from(self.followed_instagram) + u32::from(self.reposted_story)
    }
}

/// A single cart line as submitted by a kiosk form
///
/// `price` is the resolved unit price (menu price after the kiosk's half
/// portion rule and any promotion). Bulk items carry `quantity` and the
/// per-flavor breakdown in `selected_flavors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LineItemWire")]
pub struct OrderLineItem {
    pub product: String,
    /// Empty for items that were submitted without a flavor (legacy forms)
    pub flavor: String,
    pub is_half: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_flavors: Option<Vec<FlavorCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub with_drink: bool,
}

impl OrderLineItem {
    /// Plain flavored item
    pub fn new(product: impl Into<String>, flavor: impl Into<String>, price: Decimal) -> Self {
        Self {
            product: product.into(),
            flavor: flavor.into(),
            is_half: false,
            price,
            quantity: None,
            selected_flavors: None,
            category: None,
            with_drink: false,
        }
    }

    pub fn half(mut self) -> Self {
        self.is_half = true;
        self
    }

    /// Bulk item with a per-flavor breakdown
    pub fn bulk(
        product: impl Into<String>,
        quantity: u32,
        flavors: Vec<FlavorCount>,
        price: Decimal,
    ) -> Self {
        Self {
            product: product.into(),
            flavor: "Mixed".to_string(),
            is_half: false,
            price,
            quantity: Some(quantity),
            selected_flavors: Some(flavors),
            category: None,
            with_drink: false,
        }
    }

    /// Bulk flavor breakdown, if this is a bulk item with at least one flavor
    pub fn bulk_flavors(&self) -> Option<&[FlavorCount]> {
        self.selected_flavors
            .as_deref()
            .filter(|flavors| !flavors.is_empty())
    }

    /// Number of pieces ordered on this line (1 unless a quantity was given)
    pub fn pieces(&self) -> u32 {
        match (self.quantity, self.bulk_flavors()) {
            (Some(q), _) => q,
            (None, Some(flavors)) => flavors.iter().map(|f| f.count).sum(),
            (None, None) => 1,
        }
    }

    /// Ledger description of the line
    ///
    /// - `"{product} - {flavor}"`, with `" (Half)"` for half portions
    /// - `"{product} - {n} pcs [{flavor}, {flavor} ({count}), ...]"` for bulk
    ///   items; the count suffix is omitted when a flavor's count is 1
    /// - `"{product}"` when no flavor was submitted
    pub fn description(&self) -> String {
        if let Some(flavors) = self.bulk_flavors() {
            let details = flavors
                .iter()
                .map(|f| {
                    if f.count > 1 {
                        format!("{} ({})", f.name, f.count)
                    } else {
                        f.name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            return format!("{} - {} pcs [{}]", self.product, self.pieces(), details);
        }

        if self.flavor.is_empty() {
            return self.product.clone();
        }

        let half = if self.is_half { " (Half)" } else { "" };
        format!("{} - {}{}", self.product, self.flavor, half)
    }

    /// Short label used in error messages (`product - flavor`)
    pub fn label(&self) -> String {
        if self.flavor.is_empty() {
            self.product.clone()
        } else {
            format!("{} - {}", self.product, self.flavor)
        }
    }

    fn validate(&self, index: usize) -> AppResult<()> {
        let field = |name: &str| format!("items[{index}].{name}");

        if self.product.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                format!("{} must not be empty", field("product")),
            ));
        }
        for (name, value) in [("product", &self.product), ("flavor", &self.flavor)] {
            if value.len() > MAX_NAME_LEN {
                return Err(AppError::validation(format!(
                    "{} is too long ({} chars, max {MAX_NAME_LEN})",
                    field(name),
                    value.len()
                )));
            }
        }
        if self.price.is_sign_negative() {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} must not be negative", field("price")),
            ));
        }
        if self.price > MAX_PRICE {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} must be at most {MAX_PRICE}", field("price")),
            ));
        }
        if self.quantity == Some(0) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} must be at least 1", field("quantity")),
            ));
        }
        if self.quantity.is_some_and(|q| q > MAX_QUANTITY) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} must be at most {MAX_QUANTITY}", field("quantity")),
            ));
        }
        if let Some(flavors) = &self.selected_flavors
            && flavors.iter().any(|f| f.count == 0 || f.name.trim().is_empty())
        {
            return Err(AppError::validation(format!(
                "{} entries need a name and a count of at least 1",
                field("selectedFlavors")
            )));
        }
        if let Some(flavors) = &self.selected_flavors
            && flavors.iter().any(|f| f.count > MAX_QUANTITY)
        {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("{} counts must be at most {MAX_QUANTITY}", field("selectedFlavors")),
            ));
        }
        Ok(())
    }
}

/// Body of an order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub order_id: String,
    pub items: Vec<OrderLineItem>,
    #[serde(default)]
    pub social_discounts: SocialDiscounts,
}

impl OrderSubmission {
    pub fn new(order_id: impl Into<String>, items: Vec<OrderLineItem>) -> Self {
        Self {
            order_id: order_id.into(),
            items,
            social_discounts: SocialDiscounts::default(),
        }
    }

    pub fn with_discounts(mut self, discounts: SocialDiscounts) -> Self {
        self.social_discounts = discounts;
        self
    }

    /// Boundary validation: nothing malformed reaches the ledger
    pub fn validate(&self) -> AppResult<()> {
        let order_id = self.order_id.trim();
        if order_id.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "orderId must not be empty",
            )
            .with_detail("field", "orderId"));
        }
        if order_id.len() > MAX_ORDER_ID_LEN {
            return Err(AppError::validation(format!(
                "orderId is too long ({} chars, max {MAX_ORDER_ID_LEN})",
                order_id.len()
            ))
            .with_detail("field", "orderId"));
        }
        if self.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty).with_detail("field", "items"));
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(())
    }
}

/// Success body returned to the kiosk form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<String>,
}

// ========== Wire form ==========

/// Nested item payload used by the two oldest forms
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedItem {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    with_drink: Option<bool>,
}

/// Accepts both the flat line item and the legacy `{ item: {...} }` shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemWire {
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    flavor: Option<String>,
    #[serde(default)]
    is_half: bool,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price: Option<Decimal>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    selected_flavors: Option<Vec<FlavorCount>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    with_drink: bool,
    #[serde(default)]
    item: Option<NestedItem>,
}

impl TryFrom<LineItemWire> for OrderLineItem {
    type Error = String;

    fn try_from(wire: LineItemWire) -> Result<Self, Self::Error> {
        if let Some(nested) = wire.item {
            return Ok(Self {
                product: nested.name,
                flavor: String::new(),
                is_half: false,
                price: nested.price,
                quantity: wire.quantity,
                selected_flavors: None,
                category: wire.category,
                with_drink: nested.with_drink.unwrap_or(false),
            });
        }

        let product = wire.product.ok_or("line item is missing `product`")?;
        let price = wire.price.ok_or("line item is missing `price`")?;
        Ok(Self {
            product,
            flavor: wire.flavor.unwrap_or_default(),
            is_half: wire.is_half,
            price,
            quantity: wire.quantity,
            selected_flavors: wire.selected_flavors,
            category: wire.category,
            with_drink: wire.with_drink,
        })
    }
}
