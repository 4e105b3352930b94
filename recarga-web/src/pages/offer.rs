use recarga_core::catalog::Product;
use recarga_core::checkout::{self, LineItem};
use recarga_core::{IntentRepository, PaymentIntent, tagged_external_id};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, CreatePaymentRequest, PaymentItem};
use crate::components::{Footer, Header};
use crate::routes::Route;
use crate::storage::{self, SessionIntentStore};
use crate::{dom, track};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub subtitle: AttrValue,
    /// Catalog slice this step sells. Single-offer steps get one entry.
    pub products: &'static [Product],
    /// Marker folded into the external id so the backend can tell which
    /// funnel step opened the charge.
    pub tag: &'static str,
    /// Where declining this step leads.
    pub decline_to: Route,
}

/// One step of the post-purchase offer chain. Accepting opens a fresh charge
/// for the picked offers and returns to the confirmation page; declining
/// moves straight to the next step.
#[function_component(OfferPage)]
pub fn offer_page(props: &Props) -> Html {
    let navigator = use_navigator();
    let selected = use_state(|| {
        if props.products.len() == 1 {
            vec![props.products[0].id]
        } else {
            Vec::new()
        }
    });
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_toggle = {
        let selected = selected.clone();
        Callback::from(move |id: &'static str| {
            let mut next = (*selected).clone();
            if let Some(pos) = next.iter().position(|s| *s == id) {
                next.remove(pos);
            } else {
                next.push(id);
            }
            selected.set(next);
        })
    };

    let on_decline = {
        let navigator = navigator.clone();
        let decline_to = props.decline_to.clone();
        Callback::from(move |_| {
            if let Some(nav) = navigator.as_ref() {
                nav.push(&decline_to);
            }
        })
    };

    let on_accept = {
        let navigator = navigator.clone();
        let selected = selected.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let products = props.products;
        let tag = props.tag;
        Callback::from(move |_| {
            if *submitting || selected.is_empty() {
                return;
            }
            let picked: Vec<&Product> = products
                .iter()
                .filter(|p| selected.contains(&p.id))
                .collect();
            let Some(first) = picked.first().copied() else {
                return;
            };

            let Some(contact) = storage::load_contact() else {
                // No contact on file means the main purchase never happened.
                if let Some(nav) = navigator.as_ref() {
                    nav.push(&Route::Home);
                }
                return;
            };

            let items: Vec<LineItem> = picked.iter().map(|p| LineItem::from_product(p)).collect();
            let total_cents: i64 = items.iter().map(|i| i.unit_price_cents).sum();

            submitting.set(true);
            let request = CreatePaymentRequest {
                name: contact.name,
                email: contact.email,
                phone: contact.phone,
                amount: total_cents,
                external_id: tagged_external_id(tag, dom::now_ms()),
                items: items
                    .iter()
                    .map(|i| PaymentItem {
                        id: i.id.clone(),
                        title: i.title.clone(),
                        unit_price: i.unit_price_cents,
                        quantity: i.quantity,
                    })
                    .collect(),
                utm_query: track::current_utm_query(),
            };

            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_payment(&request).await {
                    Ok(response) => {
                        let intent = PaymentIntent {
                            external_id: request.external_id.clone(),
                            created_at: dom::now_ms(),
                            product_id: first.id.to_string(),
                            player_name: storage::load_player_name().unwrap_or_default(),
                            amount: checkout::format_brl(total_cents),
                            original_amount: first.original_amount.to_string(),
                            bonus_amount: first.bonus_amount.to_string(),
                            total_amount: first.total_amount.to_string(),
                            instructions: response.instructions,
                            status: None,
                            provider_id: response.id,
                            amount_cents: total_cents,
                        };
                        if let Err(err) = SessionIntentStore.save(&intent) {
                            log::error!("could not persist payment: {err}");
                        }
                        submitting.set(false);
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Confirm);
                        }
                    }
                    Err(err) => {
                        submitting.set(false);
                        error.set(Some(format!("Erro no pagamento: {err}")));
                    }
                }
            });
        })
    };

    html! {
        <div class="page offer-page">
            <Header player_name={storage::load_player_name()} />
            <main id="main" role="main">
                <section class="panel offer-panel">
                    <h1>{ props.title.clone() }</h1>
                    <p class="offer-subtitle">{ props.subtitle.clone() }</p>
                    <div class="offer-grid">
                        { for props.products.iter().map(|p| {
                            let checked = selected.contains(&p.id);
                            let onclick = {
                                let on_toggle = on_toggle.clone();
                                let id = p.id;
                                Callback::from(move |_| on_toggle.emit(id))
                            };
                            html! {
                                <button
                                    type="button"
                                    class={classes!("offer-card", checked.then_some("offer-card-selected"))}
                                    onclick={onclick}
                                >
                                    <img src={p.image} alt={p.name} class="offer-image" />
                                    <span class="offer-name">{ p.name }</span>
                                    <span class="offer-price">{ p.formatted_price }</span>
                                </button>
                            }
                        }) }
                    </div>
                    {
                        (*error).as_ref().map_or_else(Html::default, |msg| html! {
                            <p class="form-error" role="alert">{ msg.clone() }</p>
                        })
                    }
                    <div class="offer-actions">
                        <button
                            type="button"
                            class="btn-primary"
                            disabled={*submitting || selected.is_empty()}
                            onclick={on_accept}
                        >
                            { if *submitting { "Gerando pagamento..." } else { "Sim, eu quero!" } }
                        </button>
                        <button type="button" class="btn-ghost" onclick={on_decline} disabled={*submitting}>
                            {"Não, obrigado"}
                        </button>
                    </div>
                </section>
            </main>
            <Footer />
        </div>
    }
}
