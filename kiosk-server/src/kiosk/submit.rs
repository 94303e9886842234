//! Order submission engine
//!
//! `Validating -> Appending(0..n) -> Responding`. Rows are appended one call
//! at a time in cart order; the first failed call ends the order and the rows
//! already written stay in the ledger.

use serde::Serialize;
use shared::pricing::compute_totals;
use shared::{AppError, OrderSubmission, OrderTotals};
use thiserror::Error;

use super::KioskProfile;
use super::row::RowContext;
use crate::ledger::{Clock, LedgerError, LedgerSink, LedgerTimestamp};

/// What a successful order wrote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub rows_written: usize,
    pub totals: OrderTotals,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The body failed boundary validation; nothing was appended
    #[error(transparent)]
    Invalid(#[from] AppError),

    /// A ledger call failed after `rows_written` rows were appended
    #[error("Failed to append item {item}")]
    AppendFailed {
        item: String,
        rows_written: usize,
        #[source]
        source: LedgerError,
    },
}

impl SubmitError {
    pub fn rows_written(&self) -> usize {
        match self {
            Self::Invalid(_) => 0,
            Self::AppendFailed { rows_written, .. } => *rows_written,
        }
    }
}

/// Validate `submission` and append its rows to `profile`'s sheet range
pub async fn submit_order(
    profile: &KioskProfile,
    submission: &OrderSubmission,
    ledger: &dyn LedgerSink,
    clock: &dyn Clock,
) -> Result<SubmitOutcome, SubmitError> {
    if let Err(e) = submission.validate() {
        tracing::warn!(error = %e, "Order rejected");
        return Err(e.into());
    }

    let totals = compute_totals(
        &submission.items,
        &submission.social_discounts,
        profile.price_basis,
    );
    tracing::info!(
        items = submission.items.len(),
        subtotal = %totals.subtotal,
        discount = %totals.discount,
        total = %totals.total,
        "Order validated"
    );

    let ctx = RowContext {
        order_id: submission.order_id.trim(),
        discounts: submission.social_discounts,
        totals,
    };

    let mut rows_written = 0;
    for (index, item) in submission.items.iter().enumerate() {
        for draft in profile.layout.drafts(&ctx, index, item) {
            let row = draft.stamp(&LedgerTimestamp::now(clock));

            if let Err(source) = ledger
                .append(profile.sheet_range, std::slice::from_ref(&row))
                .await
            {
                let label = profile.failure_label.of(item);
                tracing::error!(
                    item = %label,
                    index,
                    rows_written,
                    error = %source,
                    "Append failed, aborting order"
                );
                return Err(SubmitError::AppendFailed {
                    item: label,
                    rows_written,
                    source,
                });
            }
            rows_written += 1;
        }
        tracing::debug!(item = %item.description(), index, "Appended item");
    }

    Ok(SubmitOutcome {
        rows_written,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::profile;
    use crate::ledger::{CellValue, FixedClock, MemoryLedger};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use shared::{ErrorCode, KioskId, OrderLineItem, SocialDiscounts};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 24, 17, 5, 0).unwrap())
    }

    /// Advances one minute on every reading
    struct SteppingClock {
        next: parking_lot::Mutex<chrono::DateTime<Utc>>,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            let mut next = self.next.lock();
            let now = *next;
            *next = now + chrono::Duration::minutes(1);
            now
        }
    }

    fn three_items() -> OrderSubmission {
        OrderSubmission::new(
            "77",
            vec![
                OrderLineItem::new("Waffle", "Original", dec!(10)),
                OrderLineItem::new("Croffle", "Chocolate", dec!(8)),
                OrderLineItem::new("Waffle", "Pistacho", dec!(8)).half(),
            ],
        )
        .with_discounts(SocialDiscounts::new(true, false))
    }

    #[tokio::test]
    async fn test_all_rows_appended_in_order() {
        let ledger = MemoryLedger::new();
        let outcome = submit_order(
            profile(KioskId::BittersweetChristmas),
            &three_items(),
            &ledger,
            &clock(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.rows_written, 3);
        assert_eq!(outcome.totals.total, dec!(25));

        let rows = ledger.rows_in("bittersweetv2!A2");
        let names: Vec<_> = rows
            .iter()
            .filter_map(|r| r.cell(2).and_then(CellValue::as_text))
            .collect();
        assert_eq!(
            names,
            ["Waffle - Original", "Croffle - Chocolate", "Waffle - Pistacho (Half)"]
        );
        assert_eq!(rows[0].cell(6), Some(&CellValue::Text("2024-12-24".into())));
    }

    #[tokio::test]
    async fn test_each_row_gets_its_own_timestamp() {
        let ledger = MemoryLedger::new();
        let clock = SteppingClock {
            next: parking_lot::Mutex::new(Utc.with_ymd_and_hms(2024, 12, 24, 17, 5, 0).unwrap()),
        };
        submit_order(profile(KioskId::PacificMall), &three_items(), &ledger, &clock)
            .await
            .unwrap();

        let times: Vec<_> = ledger
            .rows_in("pacificmall!A2")
            .iter()
            .map(|r| r.cell(7).and_then(CellValue::as_text).unwrap().to_string())
            .collect();
        assert_eq!(times, ["12:05", "12:06", "12:07"]);
    }

    #[tokio::test]
    async fn test_failure_on_item_k_leaves_k_rows() {
        for k in 0..3 {
            let ledger = MemoryLedger::fail_from_call(k);
            let err = submit_order(
                profile(KioskId::BittersweetChristmas),
                &three_items(),
                &ledger,
                &clock(),
            )
                .await
                .unwrap_err();

            assert_eq!(err.rows_written(), k);
            assert_eq!(ledger.rows().len(), k);
            assert_eq!(ledger.calls(), k + 1);

            let expected = three_items().items[k].label();
            assert_eq!(err.to_string(), format!("Failed to append item {expected}"));
        }
    }

    #[tokio::test]
    async fn test_product_only_failure_label() {
        let ledger = MemoryLedger::fail_from_call(1);
        let err = submit_order(profile(KioskId::NorthYork), &three_items(), &ledger, &clock())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to append item Croffle");
    }

    #[tokio::test]
    async fn test_invalid_order_appends_nothing() {
        let ledger = MemoryLedger::new();
        let submission = OrderSubmission::new("  ", vec![]);
        let err = submit_order(profile(KioskId::BlowChick), &submission, &ledger, &clock())
            .await
            .unwrap_err();

        match err {
            SubmitError::Invalid(e) => assert_eq!(e.code, ErrorCode::RequiredField),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger.calls(), 0);
    }

    #[tokio::test]
    async fn test_bundled_drink_row_counts_as_written() {
        let mut with_drink = OrderLineItem::new("Original Waffle", "", dec!(10));
        with_drink.with_drink = true;
        let submission = OrderSubmission::new(
            "5",
            vec![with_drink, OrderLineItem::new("Hot Milk Tea", "", dec!(4))],
        );

        let ledger = MemoryLedger::fail_from_call(2);
        let err = submit_order(profile(KioskId::Bittersweet), &submission, &ledger, &clock())
            .await
            .unwrap_err();

        assert_eq!(err.rows_written(), 2);
        assert_eq!(err.to_string(), "Failed to append item Hot Milk Tea");
        let rows = ledger.rows_in("Summary!A3");
        assert_eq!(rows[1].cell(2), Some(&CellValue::Text("Hot Milk Tea".into())));
    }

    #[tokio::test]
    async fn test_order_id_is_trimmed() {
        let ledger = MemoryLedger::new();
        let submission =
            OrderSubmission::new(" 12 ", vec![OrderLineItem::new("Waffle", "Original", dec!(9))]);
        submit_order(profile(KioskId::BlowChick), &submission, &ledger, &clock())
            .await
            .unwrap();
        assert_eq!(
            ledger.rows()[0].1.cell(0),
            Some(&CellValue::Text("12".into()))
        );
    }
}
