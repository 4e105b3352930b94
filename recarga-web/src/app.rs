use recarga_core::catalog;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{Checkout, Confirm, Home, NotFound, OfferPage, Success};
use crate::routes::Route;

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Checkout => html! { <Checkout /> },
        Route::Confirm => html! { <Confirm /> },
        Route::Upsell1 => html! {
            <OfferPage
                title="Deixe seu personagem lendário"
                subtitle="Skins exclusivas com desconto, só agora"
                products={catalog::SKIN_OFFERS}
                tag="upsell1-skins"
                decline_to={Route::Upsell2}
            />
        },
        Route::Upsell2 => html! {
            <OfferPage
                title="Dobre seus diamantes"
                subtitle="Oferta única para este pedido"
                products={catalog::COIN_UPSELL_OFFERS}
                tag="upsell2"
                decline_to={Route::Upsell3}
            />
        },
        Route::Upsell3 => html! {
            <OfferPage
                title="Status premium"
                subtitle="Benefícios permanentes na sua conta"
                products={catalog::PREMIUM_STATUS_OFFERS}
                tag="upsell3-premium"
                decline_to={Route::Upsell4}
            />
        },
        Route::Upsell4 => html! {
            <OfferPage
                title="Libere seus itens agora"
                subtitle="Taxa única de liberação imediata"
                products={catalog::FEE_OFFERS}
                tag="upsell4-tax"
                decline_to={Route::Success}
            />
        },
        Route::Downsell => html! {
            <OfferPage
                title="Uma última chance"
                subtitle="Bônus extra pelo menor preço da loja"
                products={catalog::DOWNSELL_OFFERS}
                tag="downsell"
                decline_to={Route::Upsell1}
            />
        },
        Route::Success => html! { <Success /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

/// Main application component providing browser routing
///
/// Sets up the router context for the entire application and renders the
/// funnel pages. This is the top-level component that gets mounted to the DOM.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
