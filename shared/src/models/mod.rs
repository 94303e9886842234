//! Domain models shared between the kiosk forms and the order server

pub mod menu;
pub mod order;

pub use menu::{ComboGroup, Flavor, Menu, MenuItem, QuantityTier};
pub use order::{FlavorCount, OrderLineItem, OrderReceipt, OrderSubmission, SocialDiscounts};
