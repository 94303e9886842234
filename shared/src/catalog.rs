//! Kiosk catalog
//!
//! The kiosks in the chain and the static menu each one sells.
//!
//! | Kiosk | Menu |
//! |-------|------|
//! | classic | combos, savoury/sweet sets, milkshakes |
//! | bittersweet | waffles with optional bundled drink |
//! | blowchick | waffles (half portions) and croffles |
//! | bittersweet-christmas | holiday waffle board and croffles |
//! | north-york | same board as bittersweet-christmas |
//! | pacific-mall | waffles, croffles, keychain |

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{ComboGroup, Flavor, Menu, MenuItem};

/// A kiosk of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KioskId {
    Classic,
    Bittersweet,
    #[serde(rename = "blowchick")]
    BlowChick,
    BittersweetChristmas,
    NorthYork,
    PacificMall,
}

impl KioskId {
    pub const ALL: [KioskId; 6] = [
        KioskId::Classic,
        KioskId::Bittersweet,
        KioskId::BlowChick,
        KioskId::BittersweetChristmas,
        KioskId::NorthYork,
        KioskId::PacificMall,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Bittersweet => "bittersweet",
            Self::BlowChick => "blowchick",
            Self::BittersweetChristmas => "bittersweet-christmas",
            Self::NorthYork => "north-york",
            Self::PacificMall => "pacific-mall",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Classic => "Waffle Combo Order Form",
            Self::Bittersweet => "BitterSweet Order Form",
            Self::BlowChick => "Blow Chick Order Form",
            Self::BittersweetChristmas => "BitterSweet Christmas Order Form",
            Self::NorthYork => "North York Order Form",
            Self::PacificMall => "Pacific Mall Order Form",
        }
    }

    /// Static menu of this kiosk
    pub fn menu(&self) -> &'static Menu {
        let index = Self::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default();
        &MENUS[index]
    }
}

impl fmt::Display for KioskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for KioskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("unknown kiosk: {s}"))
    }
}

/// Name of the drink bundled with "with drink" items
pub const BUNDLED_DRINK: &str = "Hot Milk Tea";

// Menus are built once, in `KioskId::ALL` order
static MENUS: LazyLock<Vec<Menu>> = LazyLock::new(|| {
    KioskId::ALL
        .iter()
        .map(|kiosk| Menu {
            kiosk: kiosk.slug().to_string(),
            items: build_items(*kiosk),
        })
        .collect()
});

fn priced(entries: &[(&str, Decimal)]) -> Vec<Flavor> {
    entries
        .iter()
        .map(|(name, price)| Flavor::new(*name, *price))
        .collect()
}

fn build_items(kiosk: KioskId) -> Vec<MenuItem> {
    match kiosk {
        KioskId::Classic => classic_items(),
        KioskId::Bittersweet => bittersweet_items(),
        KioskId::BlowChick => vec![
            MenuItem::flavored(
                "Waffle",
                true,
                priced(&[
                    ("Original", dec!(9)),
                    ("Earl Grey", dec!(11)),
                    ("Chocolate", dec!(13)),
                    ("Pistacho", dec!(13)),
                    ("Ovaltine", dec!(13)),
                ]),
            ),
            small_croffle(),
        ],
        KioskId::BittersweetChristmas | KioskId::NorthYork => vec![
            MenuItem::flavored(
                "Waffle",
                true,
                priced(&[
                    ("Original", dec!(10)),
                    ("Earl Grey", dec!(12)),
                    ("Chocolate", dec!(12)),
                    ("Pistacho", dec!(14)),
                    ("Ovaltine", dec!(14)),
                    ("Black sesame", dec!(14)),
                    ("Sea Salt Caramel", dec!(14)),
                ]),
            ),
            small_croffle(),
        ],
        KioskId::PacificMall => vec![
            MenuItem::flavored(
                "Waffle",
                true,
                priced(&[
                    ("Original", dec!(14)),
                    ("Nutella Crunch", dec!(14)),
                    ("Earl Grey", dec!(14)),
                    ("Matcha", dec!(14)),
                    ("Black Sesame", dec!(16)),
                    ("Pistachio", dec!(16)),
                    ("Crème Brûlée", dec!(16)),
                    ("Matcha RedBean", dec!(16)),
                ]),
            ),
            MenuItem::flavored(
                "Croffle",
                false,
                priced(&[
                    ("Original", dec!(8)),
                    ("Chocolate", dec!(8)),
                    ("Pistachio", dec!(8)),
                    ("Crème Brûlée", dec!(8)),
                    ("Matcha", dec!(8)),
                    ("Matcha RedBean", dec!(8)),
                ]),
            ),
            MenuItem::fixed("KeyChain", dec!(8)),
        ],
    }
}

fn small_croffle() -> MenuItem {
    MenuItem::flavored(
        "Croffle",
        false,
        priced(&[
            ("Original", dec!(6)),
            ("Chocolate", dec!(8)),
            ("Pistacho", dec!(8)),
            ("Ovaltine", dec!(8)),
        ]),
    )
}

fn bittersweet_items() -> Vec<MenuItem> {
    vec![
        MenuItem::fixed("Original Waffle", dec!(8)).with_drink_option(),
        MenuItem::fixed("Nutella Crunch", dec!(10)).with_drink_option(),
        MenuItem::fixed("Original Chocolate", dec!(10)).with_drink_option(),
        MenuItem::fixed("Matcha Waffle", dec!(8)).with_drink_option(),
        MenuItem::fixed("Pistachio Waffle", dec!(12)).with_drink_option(),
        MenuItem::fixed(BUNDLED_DRINK, dec!(4)),
    ]
}

fn classic_items() -> Vec<MenuItem> {
    let ten = |names: &[&str]| -> Vec<Flavor> {
        names.iter().map(|n| Flavor::new(*n, dec!(10))).collect()
    };
    let free = |names: &[&str]| -> Vec<Flavor> {
        names.iter().map(|n| Flavor::new(*n, Decimal::ZERO)).collect()
    };

    vec![
        MenuItem::combo(
            "Classic Combo - 1 Waffle + 1 Drink",
            vec![
                ComboGroup {
                    name: "Waffle Flavors".into(),
                    options: ten(&[
                        "Classic Waffle (Chocolate)",
                        "Classic Waffle (Matcha)",
                        "Classic Waffle (Original)",
                        "Classic Waffle (Sesame)",
                    ]),
                },
                ComboGroup {
                    name: "Drink Options".into(),
                    options: free(&["Hot Milk tea", "Iced Milk Tea", "Lemonade", "No Drink"]),
                },
            ],
        ),
        MenuItem::flavored(
            "Savoury Combo",
            false,
            ten(&["Crispy Ebi", "Seaweed Pork Floss", "Pulled Pork"]),
        ),
        MenuItem::flavored(
            "Sweet Combo - 1 Waffle + Ice Cream",
            false,
            ten(&["Creme Burlee", "Matcha Red Bean", "Chocolate Nutella Crunch"]),
        ),
        MenuItem::flavored("Milkshakes", false, ten(&["Oreo Milkshake"])),
        MenuItem::combo(
            "Drink Combo",
            vec![
                ComboGroup {
                    name: "First Drink".into(),
                    options: ten(&["Lemonade", "Hot Milk tea", "Iced Milktea"]),
                },
                ComboGroup {
                    name: "Second Drink".into(),
                    options: free(&["Lemonade", "Hot Milk tea", "cold Milk tea"]),
                },
            ],
        ),
    ]
}
