use recarga_core::FunnelRoute;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/checkout")]
    Checkout,
    #[at("/confirm")]
    Confirm,
    #[at("/upsell")]
    Upsell1,
    #[at("/upsell-2")]
    Upsell2,
    #[at("/upsell-3")]
    Upsell3,
    #[at("/upsell-4")]
    Upsell4,
    #[at("/downsell")]
    Downsell,
    #[at("/success")]
    Success,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Navigation target for a resolver decision. The lifecycle only ever
    /// requests one of these fixed destinations.
    #[must_use]
    pub const fn from_funnel(route: FunnelRoute) -> Self {
        match route {
            FunnelRoute::Upsell1 => Self::Upsell1,
            FunnelRoute::Upsell2 => Self::Upsell2,
            FunnelRoute::Upsell3 => Self::Upsell3,
            FunnelRoute::Upsell4 => Self::Upsell4,
            FunnelRoute::Success => Self::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use recarga_core::FunnelRoute;
    use yew_router::Routable;

    #[test]
    fn funnel_routes_map_onto_fixed_paths() {
        assert_eq!(Route::from_funnel(FunnelRoute::Upsell1), Route::Upsell1);
        assert_eq!(Route::from_funnel(FunnelRoute::Upsell4), Route::Upsell4);
        assert_eq!(Route::from_funnel(FunnelRoute::Success), Route::Success);
    }

    #[test]
    fn paths_match_the_published_funnel() {
        assert_eq!(Route::Upsell1.to_path(), "/upsell");
        assert_eq!(Route::Upsell2.to_path(), "/upsell-2");
        assert_eq!(Route::Confirm.to_path(), "/confirm");
        assert_eq!(Route::Downsell.to_path(), "/downsell");
    }
}
