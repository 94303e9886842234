//! Google Sheets ledger
//!
//! `POST {base}/v4/spreadsheets/{id}/values/{range}:append?valueInputOption=USER_ENTERED`
//! with body `{"values": [[...], ...]}`. One attempt per call.

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;

use super::{LedgerError, LedgerRow, LedgerSink, ServiceAccountAuth};

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Serialize)]
struct AppendBody<'a> {
    values: &'a [LedgerRow],
}

#[derive(Debug)]
pub struct SheetsLedger {
    client: reqwest::Client,
    base_url: String,
    sheet_id: String,
    auth: ServiceAccountAuth,
}

impl SheetsLedger {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        sheet_id: impl Into<String>,
        auth: ServiceAccountAuth,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            sheet_id: sheet_id.into(),
            auth,
        }
    }
}

/// `values.append` endpoint for `range` of spreadsheet `sheet_id`
pub fn append_url(base_url: &str, sheet_id: &str, range: &str) -> Result<Url, LedgerError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| LedgerError::Config(format!("invalid Sheets API base {base_url}: {e}")))?;

    let target = format!("{range}:append");
    url.path_segments_mut()
        .map_err(|_| LedgerError::Config(format!("Sheets API base {base_url} cannot be a base")))?
        .pop_if_empty()
        .extend([
            "v4",
            "spreadsheets",
            sheet_id,
            "values",
            target.as_str(),
        ]);
    url.query_pairs_mut()
        .append_pair("valueInputOption", "USER_ENTERED");

    Ok(url)
}

#[async_trait]
impl LedgerSink for SheetsLedger {
    fn name(&self) -> &'static str {
        "sheets"
    }

    async fn append(&self, range: &str, rows: &[LedgerRow]) -> Result<(), LedgerError> {
        let url = append_url(&self.base_url, &self.sheet_id, range)?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&AppendBody { values: rows })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(range, status = status.as_u16(), "Sheets append rejected");
            return Err(LedgerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(range, rows = rows.len(), "Sheets append ok");
        Ok(())
    }
}
