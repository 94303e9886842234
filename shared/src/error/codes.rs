//! Unified error codes for the kiosk order ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the kiosk forms can
/// branch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// HTTP method not allowed on this route
    MethodNotAllowed = 9,

    // ==================== 4xxx: Order ====================
    /// Order has no line items
    OrderEmpty = 4007,
    /// Cart index does not exist
    OrderItemNotFound = 4006,
    /// Bulk item flavor counts do not add up to the chosen quantity
    FlavorCountMismatch = 4010,
    /// Combo selection is missing a group or names an unknown option
    ComboIncomplete = 4011,

    // ==================== 6xxx: Menu ====================
    /// Product is not on this kiosk's menu
    ProductNotFound = 6001,
    /// Flavor is not offered for the product
    FlavorNotFound = 6002,
    /// Product has no half portion
    HalfPortionUnavailable = 6003,
    /// Quantity is not one of the product's tiers
    QuantityTierNotFound = 6004,
    /// Kiosk slug is unknown
    KioskNotFound = 6100,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Appending a row to the ledger failed
    LedgerAppendFailed = 9501,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::MethodNotAllowed => "Method not allowed",

            // Order
            ErrorCode::OrderEmpty => "Please add at least one item to your order",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::FlavorCountMismatch => "Flavor counts do not match the selected quantity",
            ErrorCode::ComboIncomplete => "Please select an item from each subcategory",

            // Menu
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::FlavorNotFound => "Flavor not found",
            ErrorCode::HalfPortionUnavailable => "Half portion is not available for this product",
            ErrorCode::QuantityTierNotFound => "Quantity is not available for this product",
            ErrorCode::KioskNotFound => "Kiosk not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::LedgerAppendFailed => "Failed to append order to ledger",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::MethodNotAllowed),

            // Order
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4010 => Ok(ErrorCode::FlavorCountMismatch),
            4011 => Ok(ErrorCode::ComboIncomplete),

            // Menu
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::FlavorNotFound),
            6003 => Ok(ErrorCode::HalfPortionUnavailable),
            6004 => Ok(ErrorCode::QuantityTierNotFound),
            6100 => Ok(ErrorCode::KioskNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9501 => Ok(ErrorCode::LedgerAppendFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
