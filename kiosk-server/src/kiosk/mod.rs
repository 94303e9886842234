//! Kiosk profiles
//!
//! One generic order handler serves every kiosk; what differs between kiosks
//! lives in its [`KioskProfile`].
//!
//! | Kiosk | Legacy path | Range | Layout | Half rule | Wait |
//! |-------|-------------|-------|--------|-----------|------|
//! | classic | /api/sheet | Summary!A3 | Summary | PlusOne | - |
//! | bittersweet | /api/sheetv2 | Summary!A3 | Basic + drink row | PlusOne | - |
//! | blowchick | /api/sheetv3 | BlowChick!A3 | Basic | Inverted | - |
//! | bittersweet-christmas | /api/bitter | bittersweetv2!A2 | Discounted | PlusOne | - |
//! | north-york | /api/sheet-north-york | north-york!A2 | Discounted | PlusOne | 15-20 minutes |
//! | pacific-mall | /api/sheet-pacific-mall | pacificmall!A2 | Discounted + puff counts | Lookup | 15-20 minutes |

pub mod row;
pub mod submit;

pub use row::{RowContext, RowDraft, RowLayout};
pub use submit::{SubmitError, SubmitOutcome, submit_order};

use std::sync::LazyLock;

use shared::{BundlePromotion, Cart, HalfPriceRule, KioskId, Menu, OrderLineItem, PriceBasis};

const LEGACY_SUCCESS: &str = "Data added successfully";
const ORDER_SUCCESS: &str = "Order processed successfully";
const LEGACY_FAILURE_PREFIX: &str = "Error adding data to sheet: ";
const STANDARD_WAIT: &str = "15-20 minutes";

/// How a failed item is named in `Failed to append item ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLabel {
    /// Product only
    Product,
    /// `product - flavor` (product alone when there is no flavor)
    ProductFlavor,
}

impl ItemLabel {
    pub fn of(&self, item: &OrderLineItem) -> String {
        match self {
            Self::Product => item.product.clone(),
            Self::ProductFlavor => item.label(),
        }
    }
}

/// Everything that makes one kiosk's endpoint different from another's
#[derive(Debug, Clone)]
pub struct KioskProfile {
    pub id: KioskId,
    /// Path the kiosk's form has always posted to
    pub legacy_path: &'static str,
    /// Sheet range rows are appended to
    pub sheet_range: &'static str,
    pub half_rule: HalfPriceRule,
    pub layout: RowLayout,
    pub price_basis: PriceBasis,
    pub success_message: &'static str,
    /// Prepended to the error message of a failed order
    pub failure_prefix: &'static str,
    pub failure_label: ItemLabel,
    pub waiting_time: Option<&'static str>,
    pub promotion: Option<BundlePromotion>,
}

impl KioskProfile {
    pub fn slug(&self) -> &'static str {
        self.id.slug()
    }

    pub fn menu(&self) -> &'static Menu {
        self.id.menu()
    }

    /// Fresh cart priced by this kiosk's rules
    pub fn cart(&self) -> Cart<'static> {
        Cart::new(self.menu(), self.half_rule, self.promotion.clone())
    }

    fn build(id: KioskId) -> Self {
        match id {
            KioskId::Classic => Self {
                id,
                legacy_path: "/api/sheet",
                sheet_range: "Summary!A3",
                half_rule: HalfPriceRule::PlusOne,
                layout: RowLayout::Summary,
                price_basis: PriceBasis::PerUnit,
                success_message: LEGACY_SUCCESS,
                failure_prefix: LEGACY_FAILURE_PREFIX,
                failure_label: ItemLabel::Product,
                waiting_time: None,
                promotion: None,
            },
            KioskId::Bittersweet => Self {
                id,
                legacy_path: "/api/sheetv2",
                sheet_range: "Summary!A3",
                half_rule: HalfPriceRule::PlusOne,
                layout: RowLayout::Basic {
                    bundled_drink: true,
                },
                price_basis: PriceBasis::PerLine,
                success_message: LEGACY_SUCCESS,
                failure_prefix: LEGACY_FAILURE_PREFIX,
                failure_label: ItemLabel::Product,
                waiting_time: None,
                promotion: None,
            },
            KioskId::BlowChick => Self {
                id,
                legacy_path: "/api/sheetv3",
                sheet_range: "BlowChick!A3",
                half_rule: HalfPriceRule::Inverted,
                layout: RowLayout::Basic {
                    bundled_drink: false,
                },
                price_basis: PriceBasis::PerLine,
                success_message: ORDER_SUCCESS,
                failure_prefix: "",
                failure_label: ItemLabel::ProductFlavor,
                waiting_time: None,
                promotion: None,
            },
            KioskId::BittersweetChristmas => Self {
                id,
                legacy_path: "/api/bitter",
                sheet_range: "bittersweetv2!A2",
                half_rule: HalfPriceRule::PlusOne,
                layout: RowLayout::Discounted { puff_counts: false },
                price_basis: PriceBasis::PerLine,
                success_message: ORDER_SUCCESS,
                failure_prefix: "",
                failure_label: ItemLabel::ProductFlavor,
                waiting_time: None,
                promotion: None,
            },
            KioskId::NorthYork => Self {
                id,
                legacy_path: "/api/sheet-north-york",
                sheet_range: "north-york!A2",
                half_rule: HalfPriceRule::PlusOne,
                layout: RowLayout::Discounted { puff_counts: false },
                price_basis: PriceBasis::PerLine,
                success_message: ORDER_SUCCESS,
                failure_prefix: "",
                failure_label: ItemLabel::Product,
                waiting_time: Some(STANDARD_WAIT),
                promotion: None,
            },
            KioskId::PacificMall => Self {
                id,
                legacy_path: "/api/sheet-pacific-mall",
                sheet_range: "pacificmall!A2",
                half_rule: HalfPriceRule::Lookup,
                layout: RowLayout::Discounted { puff_counts: true },
                price_basis: PriceBasis::PerLine,
                success_message: ORDER_SUCCESS,
                failure_prefix: "",
                failure_label: ItemLabel::Product,
                waiting_time: Some(STANDARD_WAIT),
                promotion: Some(BundlePromotion::keychain()),
            },
        }
    }
}

// Built once, in `KioskId::ALL` order
static PROFILES: LazyLock<Vec<KioskProfile>> =
    LazyLock::new(|| KioskId::ALL.into_iter().map(KioskProfile::build).collect());

/// Every kiosk profile
pub fn profiles() -> &'static [KioskProfile] {
    &PROFILES
}

pub fn profile(id: KioskId) -> &'static KioskProfile {
    let index = KioskId::ALL
        .iter()
        .position(|k| *k == id)
        .unwrap_or_default();
    &PROFILES[index]
}

/// Profile for a kiosk slug (`pacific-mall`, ...)
pub fn find(slug: &str) -> Option<&'static KioskProfile> {
    slug.parse::<KioskId>().ok().map(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_profile_per_kiosk() {
        assert_eq!(profiles().len(), KioskId::ALL.len());
        for id in KioskId::ALL {
            assert_eq!(profile(id).id, id);
        }
    }

    #[test]
    fn test_legacy_paths_unique() {
        let paths: HashSet<_> = profiles().iter().map(|p| p.legacy_path).collect();
        assert_eq!(paths.len(), profiles().len());
    }

    #[test]
    fn test_find_by_slug() {
        let profile = find("north-york").unwrap();
        assert_eq!(profile.sheet_range, "north-york!A2");
        assert_eq!(profile.waiting_time, Some("15-20 minutes"));
        assert!(find("downtown").is_none());
    }

    #[test]
    fn test_pacific_mall_cart_has_keychain_promotion() {
        let mut cart = profile(KioskId::PacificMall).cart();
        cart.add(shared::Selection::new("Croffle").flavor("Original"))
            .unwrap();
        let keychain = cart.add(shared::Selection::new("KeyChain")).unwrap();
        assert_eq!(keychain.price, rust_decimal::Decimal::from(5));
    }

    #[test]
    fn test_failure_labels() {
        let item = OrderLineItem::new("Croffle", "Matcha", rust_decimal::Decimal::from(8));
        assert_eq!(profile(KioskId::PacificMall).failure_label.of(&item), "Croffle");
        assert_eq!(profile(KioskId::NorthYork).failure_label.of(&item), "Croffle");
        assert_eq!(
            profile(KioskId::BittersweetChristmas).failure_label.of(&item),
            "Croffle - Matcha"
        );
        assert_eq!(profile(KioskId::BlowChick).failure_label.of(&item), "Croffle - Matcha");
    }

    #[test]
    fn test_legacy_kiosks_use_legacy_messages() {
        for id in [KioskId::Classic, KioskId::Bittersweet] {
            assert_eq!(profile(id).success_message, "Data added successfully");
            assert_eq!(profile(id).failure_prefix, "Error adding data to sheet: ");
        }
        assert_eq!(
            profile(KioskId::BlowChick).success_message,
            "Order processed successfully"
        );
    }
}
