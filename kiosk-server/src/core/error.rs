//! Startup and server errors
//!
//! Request-level failures are [`shared::AppError`]s; these are the errors
//! that stop the process.

use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger setup failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
