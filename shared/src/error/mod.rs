//! Unified error system for the kiosk order ledger
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: The `{ "error": ... }` JSON body every failure carries
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::validation("items must not be empty")
//!     .with_detail("field", "items");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.error, "items must not be empty");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
