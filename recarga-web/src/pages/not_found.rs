use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

/// Not-found page to show when routing fails to match a known view.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    let navigator = use_navigator();
    let go_home = Callback::from(move |_| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    });

    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{"Página não encontrada"}</h1>
            <p>{"O endereço que você acessou não existe ou expirou."}</p>
            <button type="button" onclick={go_home}>
                {"Voltar para a loja"}
            </button>
        </section>
    }
}
