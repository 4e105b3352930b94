//! Resolver totality over the whole catalog plus order-building sanity.

use recarga_core::{
    CHECKOUT_ADDONS, COIN_UPSELL_OFFERS, DIAMOND_PACKS, DOWNSELL_OFFERS, FEE_OFFERS,
    FunnelRoute, PREMIUM_STATUS_OFFERS, RedirectContext, SKIN_OFFERS, build_order, format_brl,
    game_is_standalone, resolve,
};

#[test]
fn every_catalog_product_resolves_to_a_route() {
    let ctx = RedirectContext::default();
    let lists: [(&[recarga_core::Product], FunnelRoute); 7] = [
        (DIAMOND_PACKS, FunnelRoute::Upsell1),
        (CHECKOUT_ADDONS, FunnelRoute::Upsell1),
        (DOWNSELL_OFFERS, FunnelRoute::Upsell1),
        (SKIN_OFFERS, FunnelRoute::Upsell2),
        (COIN_UPSELL_OFFERS, FunnelRoute::Upsell3),
        (PREMIUM_STATUS_OFFERS, FunnelRoute::Upsell4),
        (FEE_OFFERS, FunnelRoute::Success),
    ];
    for (list, expected) in lists {
        for product in list {
            assert_eq!(
                resolve(product.id, &ctx),
                expected,
                "product {} routed unexpectedly",
                product.id
            );
        }
    }
}

#[test]
fn standalone_context_short_circuits_every_category() {
    let ctx = RedirectContext {
        standalone_app: true,
    };
    for product in DIAMOND_PACKS.iter().chain(SKIN_OFFERS) {
        assert_eq!(resolve(product.id, &ctx), FunnelRoute::Success);
    }
}

#[test]
fn companion_title_selection_bypasses_the_upsell_sequence() {
    let companion = RedirectContext {
        standalone_app: game_is_standalone("100151"),
    };
    assert_eq!(resolve("pack-1060", &companion), FunnelRoute::Success);

    let main_title = RedirectContext {
        standalone_app: game_is_standalone("100067"),
    };
    assert_eq!(resolve("pack-1060", &main_title), FunnelRoute::Upsell1);
}

#[test]
fn order_totals_format_like_the_storefront() {
    let order = build_order(&DIAMOND_PACKS[1], &[&CHECKOUT_ADDONS[0]]);
    assert_eq!(order.total_cents, 2190 + 999);
    assert_eq!(format_brl(order.total_cents), "R$ 31,89");
}

#[test]
fn funnel_step_purchases_build_single_item_orders() {
    let order = build_order(&FEE_OFFERS[0], &[]);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].id, "tax-release");
    assert_eq!(order.total_cents, 1990);
}
