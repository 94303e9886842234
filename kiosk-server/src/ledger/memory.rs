//! In-process ledger
//!
//! Backs `LEDGER_BACKEND=memory` and the tests. Keeps every appended row with
//! its range, and can be told to start failing from a given call.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{LedgerError, LedgerRow, LedgerSink};

#[derive(Debug, Default)]
pub struct MemoryLedger {
    rows: Mutex<Vec<(String, LedgerRow)>>,
    calls: AtomicUsize,
    fail_from: Option<usize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every append call whose 0-based index is `>= call`
    pub fn fail_from_call(call: usize) -> Self {
        Self {
            fail_from: Some(call),
            ..Self::default()
        }
    }

    /// All rows appended so far, in append order
    pub fn rows(&self) -> Vec<(String, LedgerRow)> {
        self.rows.lock().clone()
    }

    /// Rows appended to `range`
    pub fn rows_in(&self, range: &str) -> Vec<LedgerRow> {
        self.rows
            .lock()
            .iter()
            .filter(|(r, _)| r == range)
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Number of append calls, including failed ones
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerSink for MemoryLedger {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn append(&self, range: &str, rows: &[LedgerRow]) -> Result<(), LedgerError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_from.is_some_and(|from| call >= from) {
            return Err(LedgerError::Injected { call });
        }

        let mut stored = self.rows.lock();
        stored.extend(rows.iter().map(|row| (range.to_string(), row.clone())));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> LedgerRow {
        LedgerRow::new(vec![id.into()])
    }

    #[tokio::test]
    async fn test_records_rows_per_range() {
        let ledger = MemoryLedger::new();
        ledger.append("Summary!A3", &[row("1")]).await.unwrap();
        ledger.append("pacificmall!A2", &[row("2"), row("3")]).await.unwrap();

        assert_eq!(ledger.calls(), 2);
        assert_eq!(ledger.rows().len(), 3);
        assert_eq!(ledger.rows_in("pacificmall!A2"), vec![row("2"), row("3")]);
    }

    #[tokio::test]
    async fn test_fail_from_call() {
        let ledger = MemoryLedger::fail_from_call(1);
        assert!(ledger.append("A", &[row("1")]).await.is_ok());

        let err = ledger.append("A", &[row("2")]).await.unwrap_err();
        assert!(matches!(err, LedgerError::Injected { call: 1 }));
        assert!(ledger.append("A", &[row("3")]).await.is_err());

        assert_eq!(ledger.rows().len(), 1);
        assert_eq!(ledger.calls(), 3);
    }
}
