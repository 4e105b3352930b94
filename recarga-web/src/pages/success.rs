use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;
use crate::storage;

/// Final page of the funnel. The diamonds are credited server-side once the
/// provider webhook lands, so this page only confirms and points back home.
#[function_component(Success)]
pub fn success() -> Html {
    let player_name = storage::load_player_name();
    let contact = storage::load_contact();

    let navigator = use_navigator();
    let back_to_store = Callback::from(move |_| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    });

    html! {
        <section class="panel success-screen" aria-live="polite">
            <img src="/assets/check.svg" alt="" class="success-icon" />
            <h1>{"Pagamento aprovado!"}</h1>
            {
                if let Some(name) = &player_name {
                    html! {
                        <p>
                            {"Os diamantes serão creditados na conta de "}
                            <strong>{ name.clone() }</strong>
                            {" em até 10 minutos."}
                        </p>
                    }
                } else {
                    html! { <p>{"Os diamantes serão creditados na sua conta em até 10 minutos."}</p> }
                }
            }
            {
                contact.map_or_else(Html::default, |c| {
                    html! {
                        <p class="muted">
                            {"Enviamos o comprovante para "}{ c.email }{"."}
                        </p>
                    }
                })
            }
            <button type="button" class="btn-primary" onclick={back_to_store}>
                {"Voltar para a loja"}
            </button>
        </section>
    }
}
