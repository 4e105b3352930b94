//! Static product catalog: main currency packs plus the funnel offer lists.
//!
//! Prices are kept in integer cents; every display string is pre-formatted
//! here and carried verbatim through the funnel, never recomputed.

/// Which funnel family an offer belongs to. Drives redirect routing after a
/// paid confirmation, see [`crate::redirect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferCategory {
    /// Main storefront currency packs.
    Pack,
    /// Checkout add-on items offered in the pre-payment modal.
    Addon,
    /// Discounted retry shown when the user abandons the confirmation page.
    Downsell,
    /// Cosmetic skin offers, sold on upsell step 1.
    Skin,
    /// Extra currency offer, sold on upsell step 2.
    CoinUpsell,
    /// Premium account status, sold on upsell step 3.
    PremiumStatus,
    /// Release-fee style final charge.
    Fee,
}

/// Top-level game title sold through the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: &'static str,
    pub name: &'static str,
    pub currency_name: &'static str,
    pub icon: &'static str,
    /// The title ships its own storefront; purchases made under it skip the
    /// upsell sequence entirely.
    pub standalone: bool,
}

/// Game selected when the visitor has not picked one yet.
pub const DEFAULT_GAME_ID: &str = "100067";

pub const GAMES: &[Game] = &[
    Game {
        id: "100067",
        name: "Free Fire",
        currency_name: "diamantes",
        icon: "/static/img/games/free-fire.png",
        standalone: false,
    },
    Game {
        id: "100151",
        name: "Delta Force",
        currency_name: "Delta Coins",
        icon: "/static/img/games/delta-force.png",
        standalone: true,
    },
];

#[must_use]
pub fn find_game(id: &str) -> Option<&'static Game> {
    GAMES.iter().find(|g| g.id == id)
}

/// Whether purchases under this game id bypass the upsell sequence. Unknown
/// ids get the regular funnel.
#[must_use]
pub fn game_is_standalone(id: &str) -> bool {
    find_game(id).is_some_and(|g| g.standalone)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: OfferCategory,
    pub original_amount: &'static str,
    pub bonus_amount: &'static str,
    pub total_amount: &'static str,
    pub price_cents: i64,
    pub formatted_price: &'static str,
    pub image: &'static str,
}

const fn product(
    id: &'static str,
    name: &'static str,
    category: OfferCategory,
    original_amount: &'static str,
    bonus_amount: &'static str,
    total_amount: &'static str,
    price_cents: i64,
    formatted_price: &'static str,
    image: &'static str,
) -> Product {
    Product {
        id,
        name,
        category,
        original_amount,
        bonus_amount,
        total_amount,
        price_cents,
        formatted_price,
        image,
    }
}

pub const DIAMOND_PACKS: &[Product] = &[
    product(
        "pack-1060",
        "1.060 Diamantes",
        OfferCategory::Pack,
        "1.060",
        "1.060",
        "2.120",
        1690,
        "R$ 16,90",
        "/static/img/packs/pack-1060.png",
    ),
    product(
        "pack-2180",
        "2.180 Diamantes",
        OfferCategory::Pack,
        "2.180",
        "2.180",
        "4.360",
        2190,
        "R$ 21,90",
        "/static/img/packs/pack-2180.png",
    ),
    product(
        "pack-5600",
        "5.600 Diamantes",
        OfferCategory::Pack,
        "5.600",
        "5.600",
        "11.200",
        3980,
        "R$ 39,80",
        "/static/img/packs/pack-5600.png",
    ),
    product(
        "pack-15600",
        "15.600 Diamantes",
        OfferCategory::Pack,
        "15.600",
        "15.600",
        "31.200",
        8980,
        "R$ 89,80",
        "/static/img/packs/pack-15600.png",
    ),
];

/// Add-ons offered in the pre-payment modal on the checkout page.
pub const CHECKOUT_ADDONS: &[Product] = &[
    product(
        "addon-sombra",
        "Sombra Roxa",
        OfferCategory::Addon,
        "",
        "",
        "Sombra Roxa",
        999,
        "R$ 9,99",
        "/static/img/addons/sombra.png",
    ),
    product(
        "addon-barba",
        "Barba do Velho",
        OfferCategory::Addon,
        "",
        "",
        "Barba do Velho",
        999,
        "R$ 9,99",
        "/static/img/addons/barba.png",
    ),
    product(
        "addon-coelhao",
        "Pacote Coelhão",
        OfferCategory::Addon,
        "",
        "",
        "Pacote Coelhão",
        499,
        "R$ 4,99",
        "/static/img/addons/coelhao.png",
    ),
    product(
        "addon-calca",
        "Calça Angelical Azul",
        OfferCategory::Addon,
        "",
        "",
        "Calça Angelical",
        1499,
        "R$ 14,99",
        "/static/img/addons/calca.png",
    ),
];

pub const DOWNSELL_OFFERS: &[Product] = &[product(
    "downsell-bonus",
    "5.600 Diamantes +399 Bônus",
    OfferCategory::Downsell,
    "5.600",
    "399",
    "5.999",
    1780,
    "R$ 17,80",
    "/static/img/offers/downsell.png",
)];

pub const SKIN_OFFERS: &[Product] = &[
    product(
        "skin-itachi",
        "Skin Itachi",
        OfferCategory::Skin,
        "",
        "",
        "Skins",
        1490,
        "R$ 14,90",
        "/static/img/skins/itachi.png",
    ),
    product(
        "skin-madara",
        "Skin Madara",
        OfferCategory::Skin,
        "",
        "",
        "Skins",
        1870,
        "R$ 18,70",
        "/static/img/skins/madara.png",
    ),
    product(
        "skin-minato",
        "Skin Minato",
        OfferCategory::Skin,
        "",
        "",
        "Skins",
        990,
        "R$ 9,90",
        "/static/img/skins/minato.png",
    ),
    product(
        "skin-obito",
        "Skin Obito",
        OfferCategory::Skin,
        "",
        "",
        "Skins",
        1490,
        "R$ 14,90",
        "/static/img/skins/obito.png",
    ),
    product(
        "skin-orochimaru",
        "Skin Orochimaru",
        OfferCategory::Skin,
        "",
        "",
        "Skins",
        990,
        "R$ 9,90",
        "/static/img/skins/orochimaru.png",
    ),
];

pub const COIN_UPSELL_OFFERS: &[Product] = &[product(
    "upsell-5600",
    "5.600 Diamantes",
    OfferCategory::CoinUpsell,
    "5.600",
    "0",
    "5.600",
    1490,
    "R$ 14,90",
    "/static/img/offers/upsell-5600.png",
)];

pub const PREMIUM_STATUS_OFFERS: &[Product] = &[product(
    "status-premium",
    "Influencer Beta",
    OfferCategory::PremiumStatus,
    "",
    "",
    "Influencer Beta",
    6780,
    "R$ 67,80",
    "/static/img/offers/status-premium.png",
)];

pub const FEE_OFFERS: &[Product] = &[product(
    "tax-release",
    "Taxa de Liberação Imediata",
    OfferCategory::Fee,
    "",
    "",
    "Liberação",
    1990,
    "R$ 19,90",
    "/static/img/offers/tax-release.png",
)];

const ALL_LISTS: &[&[Product]] = &[
    DIAMOND_PACKS,
    CHECKOUT_ADDONS,
    DOWNSELL_OFFERS,
    SKIN_OFFERS,
    COIN_UPSELL_OFFERS,
    PREMIUM_STATUS_OFFERS,
    FEE_OFFERS,
];

/// Look a product up across every list in the catalog.
#[must_use]
pub fn find_product(id: &str) -> Option<&'static Product> {
    ALL_LISTS
        .iter()
        .flat_map(|list| list.iter())
        .find(|p| p.id == id)
}

/// Category of a known product id, `None` for ids the catalog has never
/// heard of (the resolver falls back to its documented default for those).
#[must_use]
pub fn category_of(id: &str) -> Option<OfferCategory> {
    find_product(id).map(|p| p.category)
}
