//! Kiosk API Handlers

use axum::{
    Json,
    extract::{Path, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult, Menu, OrderLineItem, OrderTotals, Selection, SocialDiscounts};

use crate::kiosk::{self, KioskProfile, RowLayout};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskSummary {
    slug: &'static str,
    name: &'static str,
    order_path: String,
    legacy_path: &'static str,
    sheet_range: &'static str,
    layout: RowLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    waiting_time: Option<&'static str>,
}

impl From<&'static KioskProfile> for KioskSummary {
    fn from(profile: &'static KioskProfile) -> Self {
        Self {
            slug: profile.slug(),
            name: profile.id.display_name(),
            order_path: format!("/api/orders/{}", profile.slug()),
            legacy_path: profile.legacy_path,
            sheet_range: profile.sheet_range,
            layout: profile.layout,
            waiting_time: profile.waiting_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub social_discounts: SocialDiscounts,
}

#[derive(Debug, Serialize)]
pub struct QuoteLine {
    pub description: String,
    #[serde(flatten)]
    pub item: OrderLineItem,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub items: Vec<QuoteLine>,
    pub totals: OrderTotals,
}

fn find_profile(slug: &str) -> AppResult<&'static KioskProfile> {
    kiosk::find(slug).ok_or_else(|| AppError::kiosk_not_found(slug))
}

/// GET /api/kiosks - 获取所有 kiosk
pub async fn list() -> Json<Vec<KioskSummary>> {
    Json(kiosk::profiles().iter().map(KioskSummary::from).collect())
}

/// GET /api/kiosks/{kiosk}/menu - 获取菜单
pub async fn menu(Path(slug): Path<String>) -> AppResult<Json<&'static Menu>> {
    Ok(Json(find_profile(&slug)?.menu()))
}

/// POST /api/kiosks/{kiosk}/quote - 计价
///
/// Adds every selection to a fresh cart, so promotions see the whole cart.
pub async fn quote(
    Path(slug): Path<String>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> AppResult<Json<QuoteResponse>> {
    let profile = find_profile(&slug)?;
    let Json(request) = body?;

    let mut cart = profile.cart();
    for (index, selection) in request.selections.into_iter().enumerate() {
        cart.add(selection)
            .map_err(|e| AppError::from(e).with_detail("index", index))?;
    }

    let totals = cart.totals(&request.social_discounts, profile.price_basis);
    let items = cart
        .items()
        .iter()
        .map(|item| QuoteLine {
            description: item.description(),
            item: item.clone(),
        })
        .collect();

    Ok(Json(QuoteResponse { items, totals }))
}
