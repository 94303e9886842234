//! Ledger row layouts
//!
//! Each kiosk's sheet has its own fixed column order. A layout turns one
//! line item into one or more [`RowDraft`]s; the draft is stamped with the
//! date and time just before it is appended.
//!
//! | Layout | Columns |
//! |--------|---------|
//! | Summary | orderId, date, time, category, name, quantity, unitPrice, lineTotal, "Pending" |
//! | Basic | orderId, "Pending", description, price, date, time |
//! | Discounted | orderId, "Pending", description, price, discount, total, date, time, followed, reposted [, puff counts] |

use rust_decimal::Decimal;
use serde::Serialize;
use shared::catalog::BUNDLED_DRINK;
use shared::{OrderLineItem, OrderTotals, PriceBasis, SocialDiscounts};

use crate::ledger::{CellValue, LedgerRow, LedgerTimestamp};

const STATUS_PENDING: &str = "Pending";

/// Separator of combo component names in the classic form
const COMBO_SEPARATOR: &str = " + ";

/// Flavors counted in their own columns, in column order
pub const PUFF_COUNT_FLAVORS: [&str; 5] =
    ["Original", "Pistachio", "Chocolate", "Black Sesame", "Matcha"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RowLayout {
    /// Combo summary sheet, one row per combo component
    Summary,
    /// Plain item rows, optionally followed by a free bundled-drink row
    Basic { bundled_drink: bool },
    /// Rows carrying the order discount and total on the first item
    Discounted { puff_counts: bool },
}

/// Order-level values every row of the order can see
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub order_id: &'a str,
    pub discounts: SocialDiscounts,
    pub totals: OrderTotals,
}

/// A row waiting for its timestamp
///
/// `cells` holds every column except date and time, which are inserted at
/// `stamp_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDraft {
    cells: Vec<CellValue>,
    stamp_at: usize,
}

impl RowDraft {
    fn new(cells: Vec<CellValue>, stamp_at: usize) -> Self {
        Self { cells, stamp_at }
    }

    pub fn stamp(self, at: &LedgerTimestamp) -> LedgerRow {
        let mut cells = self.cells;
        let tail = cells.split_off(self.stamp_at.min(cells.len()));
        cells.push(at.date.clone().into());
        cells.push(at.time.clone().into());
        cells.extend(tail);
        LedgerRow::new(cells)
    }
}

impl RowLayout {
    /// Drafts for the item at `index` of the order, in append order
    pub fn drafts(&self, ctx: &RowContext<'_>, index: usize, item: &OrderLineItem) -> Vec<RowDraft> {
        match self {
            Self::Summary => summary_drafts(ctx, item),
            Self::Basic { bundled_drink } => {
                let mut drafts = vec![basic_draft(
                    ctx.order_id,
                    item.description(),
                    item.price,
                )];
                if *bundled_drink && item.with_drink {
                    drafts.push(basic_draft(ctx.order_id, BUNDLED_DRINK.to_string(), Decimal::ZERO));
                }
                drafts
            }
            Self::Discounted { puff_counts } => {
                vec![discounted_draft(ctx, index, item, *puff_counts)]
            }
        }
    }
}

fn summary_drafts(ctx: &RowContext<'_>, item: &OrderLineItem) -> Vec<RowDraft> {
    let category = item.category.clone().unwrap_or_else(|| item.product.clone());
    let name = if item.flavor.is_empty() {
        &item.product
    } else {
        &item.flavor
    };
    let quantity = item.quantity.unwrap_or(1);
    let line_total = PriceBasis::PerUnit.line_amount(item);

    name.split(COMBO_SEPARATOR)
        .enumerate()
        .map(|(component, part)| {
            let (unit, total) = if component == 0 {
                (item.price, line_total)
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            };
            RowDraft::new(
                vec![
                    ctx.order_id.into(),
                    category.clone().into(),
                    part.into(),
                    quantity.into(),
                    unit.into(),
                    total.into(),
                    STATUS_PENDING.into(),
                ],
                1,
            )
        })
        .collect()
}

fn basic_draft(order_id: &str, description: String, price: Decimal) -> RowDraft {
    RowDraft::new(
        vec![
            order_id.into(),
            STATUS_PENDING.into(),
            description.into(),
            price.into(),
        ],
        4,
    )
}

fn discounted_draft(
    ctx: &RowContext<'_>,
    index: usize,
    item: &OrderLineItem,
    puff_counts: bool,
) -> RowDraft {
    // The whole order's discount and total sit on the first row only
    let (discount, total) = if index == 0 {
        (ctx.totals.discount, ctx.totals.total)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let mut cells: Vec<CellValue> = vec![
        ctx.order_id.into(),
        STATUS_PENDING.into(),
        item.description().into(),
        item.price.into(),
        discount.into(),
        total.into(),
        ctx.discounts.followed_instagram.into(),
        ctx.discounts.reposted_story.into(),
    ];

    if puff_counts {
        cells.extend(PUFF_COUNT_FLAVORS.iter().map(|flavor| {
            let count = item
                .bulk_flavors()
                .and_then(|flavors| flavors.iter().find(|f| f.name == *flavor))
                .map_or(0, |f| f.count);
            CellValue::from(count)
        }));
    }

    RowDraft::new(cells, 6)
}
