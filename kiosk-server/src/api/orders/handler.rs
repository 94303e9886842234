//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, header},
    response::{IntoResponse, Response},
};
use shared::{AppError, AppResult, ErrorCode, OrderReceipt, OrderSubmission};
use tracing::Instrument;

use crate::core::ServerState;
use crate::kiosk::{self, KioskProfile, SubmitError, submit_order};

/// Order body, kept as a `Result` so malformed JSON gets the JSON error shape
pub type OrderBody = Result<Json<OrderSubmission>, JsonRejection>;

/// POST /api/orders/{kiosk} - 提交订单
pub async fn submit_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    body: OrderBody,
) -> AppResult<Json<OrderReceipt>> {
    let profile = kiosk::find(&slug).ok_or_else(|| AppError::kiosk_not_found(&slug))?;
    submit(profile, state, body).await
}

/// POST {legacy_path} - 提交订单到 kiosk 的表格
pub async fn submit(
    profile: &'static KioskProfile,
    state: ServerState,
    body: OrderBody,
) -> AppResult<Json<OrderReceipt>> {
    let span = tracing::info_span!(
        "order",
        kiosk = profile.slug(),
        order_id = tracing::field::Empty
    );

    async move {
        let Json(submission) = body.map_err(|rejection| {
            tracing::warn!(error = %rejection.body_text(), "Order body rejected");
            AppError::from(rejection)
        })?;
        tracing::Span::current().record("order_id", submission.order_id.trim());

        let outcome = submit_order(
            profile,
            &submission,
            state.ledger.as_ref(),
            state.clock.as_ref(),
        )
        .await
        .map_err(|e| into_app_error(profile, e))?;

        tracing::info!(
            rows = outcome.rows_written,
            total = %outcome.totals.total,
            "Order recorded"
        );

        Ok(Json(OrderReceipt {
            message: profile.success_message.to_string(),
            waiting_time: profile.waiting_time.map(str::to_string),
        }))
    }
    .instrument(span)
    .await
}

fn into_app_error(profile: &KioskProfile, err: SubmitError) -> AppError {
    match err {
        SubmitError::Invalid(e) => e,
        e @ SubmitError::AppendFailed { .. } => {
            let rows_written = e.rows_written();
            AppError::ledger_append_failed(format!("{}{}", profile.failure_prefix, e))
                .with_detail("rowsWritten", rows_written)
        }
    }
}

/// Any method other than POST on an order endpoint
pub async fn method_not_allowed(method: Method) -> Response {
    let error = AppError::with_message(
        ErrorCode::MethodNotAllowed,
        format!("Method {method} Not Allowed"),
    );
    ([(header::ALLOW, "POST")], error).into_response()
}
