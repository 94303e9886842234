//! Shared types for the kiosk order ledger
//!
//! Pure domain types used by the order server and by anything that builds
//! carts on behalf of a kiosk form: error codes, order wire models, static
//! menus, half-portion rules and order totals.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod models;
pub mod pricing;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use cart::{BundlePromotion, Cart, CartError, Selection};
pub use catalog::KioskId;
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{FlavorCount, Menu, MenuItem, OrderLineItem, OrderReceipt, OrderSubmission, SocialDiscounts};
pub use pricing::{HalfPriceRule, OrderTotals, PriceBasis};
