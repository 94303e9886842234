//! Order ledger - the remote append-only table orders are written to
//!
//! # 结构
//!
//! - [`LedgerSink`] - 追加接口
//! - [`SheetsLedger`] - Google Sheets v4 `values.append` 客户端
//! - [`MemoryLedger`] - 内存账本 (开发和测试)
//! - [`Clock`] / [`LedgerTimestamp`] - 行时间戳 (kiosk 本地时间)
//!
//! The ledger is never read back. Each call appends after existing content;
//! there is no transaction and no retry.

pub mod auth;
pub mod clock;
pub mod memory;
pub mod sheets;

pub use auth::{ServiceAccountAuth, ServiceAccountKey};
pub use clock::{Clock, FixedClock, LEDGER_TIMEZONE, LedgerTimestamp, SystemClock};
pub use memory::MemoryLedger;
pub use sheets::SheetsLedger;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// One cell of a ledger row
///
/// Serialized as the plain JSON scalar Sheets parses with `USER_ENTERED`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Bool(bool),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => rust_decimal::serde::float::serialize(n, serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for CellValue {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(Decimal::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A fixed-width, positional ledger row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LedgerRow(pub Vec<CellValue>);

impl LedgerRow {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    pub fn cell(&self, index: usize) -> Option<&CellValue> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger credentials invalid: {0}")]
    Credentials(String),

    #[error("access token exchange failed: {0}")]
    TokenExchange(String),

    #[error("ledger request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ledger rejected append ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("ledger misconfigured: {0}")]
    Config(String),

    #[error("append call {call} failed (injected)")]
    Injected { call: usize },
}

/// Append-only ledger collaborator
#[async_trait]
pub trait LedgerSink: Send + Sync {
    /// Backend name, reported by `/health`
    fn name(&self) -> &'static str;

    /// Append `rows` after the existing content of `range`
    async fn append(&self, range: &str, rows: &[LedgerRow]) -> Result<(), LedgerError>;
}
