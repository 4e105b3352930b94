use recarga_core::catalog::{self, Product};
use recarga_core::checkout::{self, Contact, Order};
use recarga_core::{PaymentIntent, external_id};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, CreatePaymentRequest, PaymentItem};
use crate::components::{Footer, Header};
use crate::routes::Route;
use crate::storage::{self, SessionIntentStore};
use crate::{dom, track};
use recarga_core::IntentRepository;

fn payment_items(order: &Order) -> Vec<PaymentItem> {
    order
        .items
        .iter()
        .map(|item| PaymentItem {
            id: item.id.clone(),
            title: item.title.clone(),
            unit_price: item.unit_price_cents,
            quantity: item.quantity,
        })
        .collect()
}

fn input_value(e: &web_sys::InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
}

fn addon_row(
    product: &'static Product,
    checked: bool,
    on_toggle: Callback<&'static str>,
) -> Html {
    let onchange = {
        let on_toggle = on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(product.id))
    };
    html! {
        <label class="addon-row">
            <input type="checkbox" checked={checked} onchange={onchange} />
            <img src={product.image} alt="" class="addon-thumb" />
            <span class="addon-name">{ product.name }</span>
            <span class="addon-price">{ product.formatted_price }</span>
        </label>
    }
}

/// Checkout form: order summary, optional addons, and the contact details the
/// payment provider requires. Submitting opens the Pix charge and moves the
/// funnel to the confirmation page.
#[function_component(Checkout)]
pub fn checkout_page() -> Html {
    let navigator = use_navigator();
    let product = storage::load_selected_product()
        .as_deref()
        .and_then(catalog::find_product);

    let addons = use_state(storage::load_selected_addons);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    {
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        use_effect_with((), move |()| {
            if let Some(saved) = storage::load_contact() {
                name.set(saved.name);
                email.set(saved.email);
                phone.set(checkout::format_phone_input(&saved.phone));
            }
        });
    }

    // Without a selected pack there is nothing to charge for.
    {
        let navigator = navigator.clone();
        use_effect_with(product.is_none(), move |missing| {
            if *missing {
                if let Some(nav) = navigator.as_ref() {
                    nav.push(&Route::Home);
                }
            }
        });
    }
    let Some(product) = product else {
        return html! { <p class="muted" role="status">{"Carregando..."}</p> };
    };

    let selected_addons: Vec<&'static Product> = catalog::CHECKOUT_ADDONS
        .iter()
        .filter(|a| addons.contains(&a.id.to_string()))
        .collect();
    let order = checkout::build_order(product, &selected_addons);

    let on_toggle = {
        let addons = addons.clone();
        Callback::from(move |id: &'static str| {
            let mut next = (*addons).clone();
            if let Some(pos) = next.iter().position(|a| a == id) {
                next.remove(pos);
            } else {
                next.push(id.to_string());
            }
            storage::save_selected_addons(&next);
            addons.set(next);
        })
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            if let Some(v) = input_value(&e) {
                name.set(v);
            }
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            if let Some(v) = input_value(&e) {
                email.set(v);
            }
        })
    };
    let on_phone = {
        let phone = phone.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            if let Some(v) = input_value(&e) {
                phone.set(checkout::format_phone_input(&v));
            }
        })
    };

    let on_submit = {
        let navigator = navigator.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let order = order.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let contact = Contact {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                phone: Contact::sanitize_phone(&phone),
            };
            if let Err(err) = contact.validate() {
                error.set(Some(err.to_string()));
                return;
            }
            error.set(None);
            submitting.set(true);
            storage::save_contact(&contact);

            let request = CreatePaymentRequest {
                name: contact.name.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                amount: order.total_cents,
                external_id: external_id(dom::now_ms()),
                items: payment_items(&order),
                utm_query: track::current_utm_query(),
            };

            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            let order = order.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::create_payment(&request).await {
                    Ok(response) => {
                        let intent = PaymentIntent {
                            external_id: request.external_id.clone(),
                            created_at: dom::now_ms(),
                            product_id: product.id.to_string(),
                            player_name: storage::load_player_name().unwrap_or_default(),
                            amount: checkout::format_brl(order.total_cents),
                            original_amount: product.original_amount.to_string(),
                            bonus_amount: product.bonus_amount.to_string(),
                            total_amount: product.total_amount.to_string(),
                            instructions: response.instructions,
                            status: None,
                            provider_id: response.id,
                            amount_cents: order.total_cents,
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
        <div class="page checkout-page">
            <Header player_name={storage::load_player_name()} />
            <main id="main" role="main">
                <section class="panel order-panel">
                    <h2>{"Resumo do pedido"}</h2>
                    <ul class="order-items">
                        { for order.items.iter().map(|item| html! {
                            <li class="order-item">
                                <span>{ item.title.clone() }</span>
                                <span>{ checkout::format_brl(item.unit_price_cents) }</span>
                            </li>
                        }) }
                    </ul>
                    <p class="order-total">
                        {"Total: "}<strong>{ checkout::format_brl(order.total_cents) }</strong>
                    </p>
                </section>
                <section class="panel addons-panel">
                    <h2>{"Turbine sua recarga"}</h2>
                    { for catalog::CHECKOUT_ADDONS.iter().map(|a| {
                        let checked = addons.contains(&a.id.to_string());
                        addon_row(a, checked, on_toggle.clone())
                    }) }
                </section>
                <form class="panel contact-panel" onsubmit={on_submit}>
                    <h2>{"Seus dados"}</h2>
                    <label for="contact-name">{"Nome completo"}</label>
                    <input id="contact-name" type="text" value={(*name).clone()} oninput={on_name} />
                    <label for="contact-email">{"E-mail"}</label>
                    <input id="contact-email" type="email" value={(*email).clone()} oninput={on_email} />
                    <label for="contact-phone">{"Celular"}</label>
                    <input
                        id="contact-phone"
                        type="tel"
                        value={(*phone).clone()}
                        oninput={on_phone}
                        placeholder="(00) 0 0000-0000"
                    />
                    {
                        (*error).as_ref().map_or_else(Html::default, |msg| html! {
                            <p class="form-error" role="alert">{ msg.clone() }</p>
                        })
                    }
                    <button type="submit" class="btn-primary" disabled={*submitting}>
                        { if *submitting { "Gerando pagamento..." } else { "Pagar com Pix" } }
                    </button>
                </form>
            </main>
            <Footer />
        </div>
    }
}
