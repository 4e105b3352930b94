//! Payment confirmation page.
//!
//! Two clocks run while the charge is open: an async poll loop asking the
//! backend for the payment status with growing delays, and a one-second
//! interval driving the visible expiry countdown. Both feed the same
//! [`Lifecycle`] reducer, which is the only writer of the authoritative
//! status and decides the single navigation out of this page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use recarga_core::{
    IntentRepository, Lifecycle, LifecycleEvent, NextAction, PaymentIntent, PaymentStatus,
    PollSchedule, RedirectContext, Resolution, catalog, countdown, redirect,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{Footer, Header};
use crate::routes::Route;
use crate::storage::{self, SessionIntentStore};
use crate::{dom, track};

/// How long the expired/cancelled notice stays on screen before the page
/// returns to the funnel entry point.
const RETURN_DELAY_MS: i32 = 3_000;

/// How long the missing-payment notice stays on screen before the page
/// returns to the funnel entry point.
const MISSING_INTENT_DELAY_MS: i32 = 2_000;

/// Where an open charge lands when the visitor navigates back out of the
/// page instead of paying.
const ABANDON_ROUTE: Route = Route::Downsell;

fn initial_status(intent: &PaymentIntent) -> PaymentStatus {
    intent
        .status
        .as_deref()
        .map(PaymentStatus::parse)
        .unwrap_or_default()
}

fn settle_handler(
    navigator: Option<Navigator>,
    alive: Rc<Cell<bool>>,
    countdown_handle: Rc<Cell<Option<i32>>>,
    intent: &PaymentIntent,
) -> Rc<dyn Fn(Resolution)> {
    let external_id = intent.external_id.clone();
    let product_id = intent.product_id.clone();
    let amount_cents = intent.amount_cents;
    Rc::new(move |resolution: Resolution| {
        // A settled payment has no business keeping its intent around.
        SessionIntentStore.clear();
        if let Some(id) = countdown_handle.take() {
            dom::window().clear_interval_with_handle(id);
        }
        match resolution.action {
            NextAction::Proceed => {
                track::report_conversion(&external_id, amount_cents);
                let ctx = RedirectContext {
                    standalone_app: storage::load_selected_game()
                        .as_deref()
                        .is_some_and(catalog::game_is_standalone),
                };
                let target = Route::from_funnel(redirect::resolve(&product_id, &ctx));
                if let Some(nav) = navigator.as_ref() {
                    nav.push(&target);
                }
            }
            NextAction::ReturnToEntry => {
                // Leave the notice visible for a moment before going back.
                let navigator = navigator.clone();
                let alive = alive.clone();
                let back = Closure::once(move || {
                    if !alive.get() {
                        return;
                    }
                    if let Some(nav) = navigator.as_ref() {
                        nav.push(&Route::Home);
                    }
                });
                let _ = dom::window().set_timeout_with_callback_and_timeout_and_arguments_0(
                    back.as_ref().unchecked_ref(),
                    RETURN_DELAY_MS,
                );
                back.forget();
            }
        }
    })
}

#[function_component(Confirm)]
pub fn confirm() -> Html {
    let navigator = use_navigator();
    let intent = use_memo((), |()| {
        match recarga_core::load_valid_intent(&SessionIntentStore) {
            Ok(intent) => intent,
            Err(err) => {
                log::error!("stored payment is unusable: {err}");
                SessionIntentStore.clear();
                None
            }
        }
    });
    let status = use_state(PaymentStatus::default);
    let remaining = use_state(|| {
        (*intent).as_ref().map_or(0, |i| {
            countdown::seconds_remaining(i.created_at, dom::now_ms())
        })
    });
    let copied = use_state(|| false);

    let lifecycle = use_mut_ref(|| {
        Lifecycle::new((*intent).as_ref().map_or(PaymentStatus::Pending, initial_status))
    });
    let alive = use_memo((), |()| Cell::new(true));
    let countdown_handle: Rc<Cell<Option<i32>>> = use_memo((), |()| Cell::new(None));

    {
        let navigator = navigator.clone();
        let intent = intent.clone();
        let status = status.clone();
        let remaining = remaining.clone();
        let lifecycle = lifecycle.clone();
        let alive = alive.clone();
        let countdown_handle = countdown_handle.clone();
        use_effect_with((), move |()| {
            let back_guard: Rc<RefCell<Option<EventListener>>> = Rc::new(RefCell::new(None));
            let cleanup = {
                let alive = alive.clone();
                let countdown_handle = countdown_handle.clone();
                let back_guard = back_guard.clone();
                move || {
                    alive.set(false);
                    back_guard.borrow_mut().take();
                    if let Some(id) = countdown_handle.take() {
                        dom::window().clear_interval_with_handle(id);
                    }
                }
            };

            let Some(intent_value) = intent.as_ref() else {
                // Nothing to confirm: the page was reached without a usable
                // charge, either absent or rejected at load time. The notice
                // stays on screen for a moment before the page goes back.
                let alive = alive.clone();
                let back = Closure::once(move || {
                    if !alive.get() {
                        return;
                    }
                    if let Some(nav) = navigator.as_ref() {
                        nav.push(&Route::Home);
                    }
                });
                let _ = dom::window().set_timeout_with_callback_and_timeout_and_arguments_0(
                    back.as_ref().unchecked_ref(),
                    MISSING_INTENT_DELAY_MS,
                );
                back.forget();
                return cleanup;
            };

            status.set(lifecycle.borrow().status());

            let settle = settle_handler(
                navigator.clone(),
                alive.clone(),
                countdown_handle.clone(),
                intent_value,
            );

            // A charge the backend already reported as terminal settles on
            // entry, without starting either clock.
            let initial = lifecycle.borrow_mut().resolve_initial();
            if let Some(resolution) = initial {
                status.set(resolution.status);
                settle(resolution);
                return cleanup;
            }

            // Leaving through the back button abandons the charge into the
            // discounted retry offer. Two pushed history entries make the
            // first back press land on this page, where the popstate
            // listener takes over.
            {
                let window = dom::window();
                if let Ok(history) = window.history() {
                    let href = window.location().href().unwrap_or_default();
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
                }
                let alive = alive.clone();
                *back_guard.borrow_mut() =
                    Some(EventListener::new(&window, "popstate", move |_| {
                        if !alive.get() {
                            return;
                        }
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&ABANDON_ROUTE);
                        }
                    }));
            }

            // Expiry countdown, ticking once per second against wall clock.
            {
                let created_at = intent_value.created_at;
                let alive = alive.clone();
                let countdown_handle_inner = countdown_handle.clone();
                let lifecycle = lifecycle.clone();
                let status = status.clone();
                let remaining = remaining.clone();
                let settle = settle.clone();
                let tick = Closure::wrap(Box::new(move || {
                    if !alive.get() {
                        return;
                    }
                    let left = countdown::seconds_remaining(created_at, dom::now_ms());
                    remaining.set(left);
                    if left == 0 {
                        if let Some(id) = countdown_handle_inner.take() {
                            dom::window().clear_interval_with_handle(id);
                        }
                        let resolution =
                            lifecycle.borrow_mut().apply(LifecycleEvent::CountdownElapsed);
                        status.set(lifecycle.borrow().status());
                        if let Some(resolution) = resolution {
                            settle(resolution);
                        }
                    }
                }) as Box<dyn FnMut()>);
                if let Ok(id) = dom::window().set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    1_000,
                ) {
                    countdown_handle.set(Some(id));
                }
                tick.forget();
            }

            // Status poll loop. A request already in flight when the local
            // countdown fires still lands, which is the window in which a
            // late paid reply can override a local expiry.
            {
                let external_id = intent_value.external_id.clone();
                let alive = alive.clone();
                let lifecycle = lifecycle.clone();
                let status = status.clone();
                let settle = settle.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let mut schedule = PollSchedule::new();
                    while lifecycle.borrow().wants_polling() {
                        let Some(delay) = schedule.next_delay() else {
                            break;
                        };
                        TimeoutFuture::new(delay).await;
                        if !alive.get() {
                            return;
                        }
                        let event = match api::fetch_payment_status(&external_id).await {
                            Ok(parsed) => LifecycleEvent::Poll(parsed),
                            Err(err) => {
                                log::warn!("status query failed: {err}");
                                LifecycleEvent::PollFailed
                            }
                        };
                        if !alive.get() {
                            return;
                        }
                        let resolution = lifecycle.borrow_mut().apply(event);
                        status.set(lifecycle.borrow().status());
                        if let Some(resolution) = resolution {
                            settle(resolution);
                        }
                    }
                });
            }

            cleanup
        });
    }

    let Some(intent_value) = intent.as_ref() else {
        return html! { <MissingPayment /> };
    };

    let on_copy = {
        let code = intent_value.instructions.code.clone();
        let copied = copied.clone();
        Callback::from(move |_| {
            let clipboard = dom::window().navigator().clipboard();
            let _ = clipboard.write_text(&code);
            copied.set(true);
        })
    };

    html! {
        <div class="page confirm-page">
            <Header player_name={Some(intent_value.player_name.clone())} />
            <main id="main" role="main">
                <ConfirmView
                    intent={intent_value.clone()}
                    status={*status}
                    remaining={*remaining}
                    copied={*copied}
                    on_copy={on_copy}
                />
            </main>
            <Footer />
        </div>
    }
}

/// Shown when the page is reached without a usable stored charge. The
/// mounting effect schedules the return to the entry point.
#[function_component(MissingPayment)]
pub fn missing_payment() -> Html {
    html! {
        <div class="page confirm-page">
            <Header />
            <main id="main" role="main">
                <section class="panel confirm-panel">
                    <p class="confirm-warning" role="alert">
                        {"Dados de pagamento incompletos. Voltando para o início..."}
                    </p>
                </section>
            </main>
            <Footer />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ViewProps {
    pub intent: PaymentIntent,
    pub status: PaymentStatus,
    /// Seconds left on the expiry window.
    pub remaining: u64,
    pub copied: bool,
    pub on_copy: Callback<MouseEvent>,
}

/// Presentational half of the confirmation page, kept free of timers so it
/// renders the same under server-side rendering.
#[function_component(ConfirmView)]
pub fn confirm_view(props: &ViewProps) -> Html {
    let intent = &props.intent;
    let countdown_label = countdown::format_mm_ss(props.remaining);

    let notice = match props.status {
        PaymentStatus::Pending => html! {
            <p class="confirm-hint">
                {"Escaneie o QR Code ou copie o código para pagar. O pedido expira em "}
                <strong>{ countdown_label.clone() }</strong>
            </p>
        },
        PaymentStatus::Unknown => html! {
            <p class="confirm-warning" role="alert">
                {"Não conseguimos verificar seu pagamento agora. Se você já pagou, aguarde nesta página."}
            </p>
        },
        PaymentStatus::Paid => html! {
            <p class="confirm-success" role="status">{"Pagamento aprovado! Redirecionando..."}</p>
        },
        PaymentStatus::Expired => html! {
            <p class="confirm-warning" role="alert">
                {"O pagamento expirou. Você será redirecionado para gerar um novo pedido."}
            </p>
        },
        PaymentStatus::Cancelled => html! {
            <p class="confirm-warning" role="alert">
                {"O pagamento foi cancelado. Você será redirecionado."}
            </p>
        },
    };

    let show_instructions = matches!(
        props.status,
        PaymentStatus::Pending | PaymentStatus::Unknown
    );

    html! {
        <section class="panel confirm-panel" aria-live="polite">
            <h1>{"Pague com Pix para concluir"}</h1>
            <p class="confirm-summary">
                { format!(
                    "{} diamantes ({} + {} de bônus) para {}",
                    intent.total_amount, intent.original_amount, intent.bonus_amount,
                    intent.player_name,
                ) }
            </p>
            <p class="confirm-amount"><strong>{ intent.amount.clone() }</strong></p>
            { notice }
            {
                if show_instructions {
                    html! {
                        <div class="pix-box">
                            <img
                                src={format!("data:image/png;base64,{}", intent.instructions.qrcode_base64)}
                                alt="QR Code Pix"
                                class="pix-qrcode"
                            />
                            <div class="countdown" role="timer">
                                { format!("Tempo restante: {}", countdown::format_mm_ss(props.remaining)) }
                            </div>
                            <label for="pix-code" class="sr-only">{"Código Pix copia e cola"}</label>
                            <input id="pix-code" type="text" readonly={true} value={intent.instructions.code.clone()} />
                            <button type="button" class="btn-primary" onclick={props.on_copy.clone()}>
                                { if props.copied { "Código copiado!" } else { "Copiar código Pix" } }
                            </button>
                        </div>
                    }
                } else {
                    Html::default()
                }
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{ABANDON_ROUTE, initial_status};
    use crate::routes::Route;
    use recarga_core::{PaymentInstructions, PaymentIntent, PaymentStatus};
    use yew_router::Routable;

    fn sample_intent() -> PaymentIntent {
        PaymentIntent {
            external_id: "ff-123".to_string(),
            created_at: 1_700_000_000_000,
            product_id: "pack-1060".to_string(),
            player_name: "Jogador".to_string(),
            amount: "R$ 16,90".to_string(),
            original_amount: "1.060".to_string(),
            bonus_amount: "1.060".to_string(),
            total_amount: "2.120".to_string(),
            instructions: PaymentInstructions {
                code: "00020126pix".to_string(),
                qrcode_base64: "iVBORw0KGgo=".to_string(),
            },
            status: None,
            provider_id: None,
            amount_cents: 1690,
        }
    }

    #[test]
    fn stored_status_string_parses_with_pending_fallback() {
        let mut intent = sample_intent();
        intent.status = Some("paid".to_string());
        assert_eq!(initial_status(&intent), PaymentStatus::Paid);

        intent.status = Some("processing".to_string());
        assert_eq!(initial_status(&intent), PaymentStatus::Pending);

        intent.status = None;
        assert_eq!(initial_status(&intent), PaymentStatus::Pending);
    }

    #[test]
    fn shared_intent_reads_without_taking_ownership() {
        // The page holds the loaded intent behind a shared pointer and reads
        // it from several hook initializers.
        let shared: Rc<Option<PaymentIntent>> = Rc::new(Some(sample_intent()));
        let status = (*shared).as_ref().map_or(PaymentStatus::Pending, initial_status);
        assert_eq!(status, PaymentStatus::Pending);
        let created = (*shared).as_ref().map_or(0, |i| i.created_at);
        assert_eq!(created, 1_700_000_000_000);
        assert!((*shared).as_ref().is_some());

        let empty: Rc<Option<PaymentIntent>> = Rc::new(None);
        let status = (*empty).as_ref().map_or(PaymentStatus::Pending, initial_status);
        assert_eq!(status, PaymentStatus::Pending);
        assert_eq!((*empty).as_ref().map_or(0, |i| i.created_at), 0);
    }

    #[test]
    fn backing_out_of_an_open_charge_lands_on_the_discounted_retry() {
        assert_eq!(ABANDON_ROUTE, Route::Downsell);
        assert_eq!(ABANDON_ROUTE.to_path(), "/downsell");
    }

    #[test]
    fn expiry_window_matches_the_visible_countdown() {
        // The countdown the page renders starts from the same window the
        // reducer expires against.
        assert_eq!(recarga_core::EXPIRY_WINDOW_SECS, 900);
    }
}
