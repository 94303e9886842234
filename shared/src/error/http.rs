//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::OrderItemNotFound | Self::KioskNotFound => {
                StatusCode::NOT_FOUND
            }

            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            // 422: well-formed request the menu cannot satisfy
            Self::ProductNotFound
            | Self::FlavorNotFound
            | Self::HalfPortionUnavailable
            | Self::QuantityTierNotFound
            | Self::FlavorCountMismatch
            | Self::ComboIncomplete => StatusCode::UNPROCESSABLE_ENTITY,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::OrderEmpty => StatusCode::BAD_REQUEST,

            Self::InternalError | Self::LedgerAppendFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
