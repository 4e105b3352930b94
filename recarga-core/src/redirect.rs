//! Post-payment redirect resolution.
//!
//! Pure and total: every `(product id, context)` pair maps to a route, never
//! a panic. The mapping is driven by the catalog's category table so new
//! offers route correctly without touching the state machine.

use crate::catalog::{self, OfferCategory};

/// Funnel destinations reachable after a paid confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelRoute {
    Upsell1,
    Upsell2,
    Upsell3,
    Upsell4,
    Success,
}

/// Context the resolver consults besides the product itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedirectContext {
    /// The purchase was made through the standalone companion storefront,
    /// which has no upsell sequence of its own.
    pub standalone_app: bool,
}

/// Next funnel step after a paid confirmation. First match wins:
/// standalone storefront, then the purchased product's category, then the
/// first upsell step as the default for unknown ids.
#[must_use]
pub fn resolve(product_id: &str, ctx: &RedirectContext) -> FunnelRoute {
    if ctx.standalone_app {
        return FunnelRoute::Success;
    }
    match catalog::category_of(product_id) {
        Some(OfferCategory::Skin) => FunnelRoute::Upsell2,
        Some(OfferCategory::CoinUpsell) => FunnelRoute::Upsell3,
        Some(OfferCategory::PremiumStatus) => FunnelRoute::Upsell4,
        Some(OfferCategory::Fee) => FunnelRoute::Success,
        // Packs, add-ons and the downsell all start the upsell sequence,
        // as does anything the catalog does not recognize.
        Some(
            OfferCategory::Downsell | OfferCategory::Pack | OfferCategory::Addon,
        )
        | None => FunnelRoute::Upsell1,
    }
}

#[cfg(test)]
mod tests {
    use super::{FunnelRoute, RedirectContext, resolve};

    fn storefront() -> RedirectContext {
        RedirectContext::default()
    }

    #[test]
    fn standalone_app_always_goes_to_success() {
        let ctx = RedirectContext {
            standalone_app: true,
        };
        assert_eq!(resolve("pack-1060", &ctx), FunnelRoute::Success);
        assert_eq!(resolve("skin-itachi", &ctx), FunnelRoute::Success);
        assert_eq!(resolve("whatever", &ctx), FunnelRoute::Success);
    }

    #[test]
    fn categories_route_in_declared_order() {
        assert_eq!(resolve("downsell-bonus", &storefront()), FunnelRoute::Upsell1);
        assert_eq!(resolve("skin-madara", &storefront()), FunnelRoute::Upsell2);
        assert_eq!(resolve("upsell-5600", &storefront()), FunnelRoute::Upsell3);
        assert_eq!(resolve("status-premium", &storefront()), FunnelRoute::Upsell4);
        assert_eq!(resolve("tax-release", &storefront()), FunnelRoute::Success);
    }

    #[test]
    fn main_packs_enter_the_upsell_sequence() {
        assert_eq!(resolve("pack-1060", &storefront()), FunnelRoute::Upsell1);
        assert_eq!(resolve("pack-15600", &storefront()), FunnelRoute::Upsell1);
    }

    #[test]
    fn unknown_ids_fall_back_to_the_first_upsell() {
        assert_eq!(resolve("", &storefront()), FunnelRoute::Upsell1);
        assert_eq!(resolve("mystery-sku", &storefront()), FunnelRoute::Upsell1);
    }

    #[test]
    fn resolution_is_deterministic() {
        for id in ["pack-1060", "skin-obito", "tax-release", "nope"] {
            assert_eq!(resolve(id, &storefront()), resolve(id, &storefront()));
        }
    }
}
