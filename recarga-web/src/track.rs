//! Best-effort conversion reporting.
//!
//! Analytics failures must never disturb the payment flow, so everything here
//! swallows its errors after logging them to the console.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::dom;

/// Campaign parameters from the current URL, forwarded verbatim to the
/// payment backend so conversions stay attributable.
#[must_use]
pub fn current_utm_query() -> Option<String> {
    let search = dom::window().location().search().ok()?;
    let trimmed = search.trim_start_matches('?');
    if trimmed.split('&').any(|pair| pair.starts_with("utm_")) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Report a confirmed purchase to the page-level analytics tag, if one is
/// installed. A missing or broken tag is logged and ignored.
pub fn report_conversion(external_id: &str, amount_cents: i64) {
    let window = dom::window();
    let Ok(gtag) = Reflect::get(&window, &JsValue::from_str("gtag")) else {
        return;
    };
    let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() else {
        return;
    };

    let params = Object::new();
    #[allow(clippy::cast_precision_loss)] // Purchase values stay far below 2^52 cents.
    let value = amount_cents as f64 / 100.0;
    let ok = Reflect::set(
        &params,
        &JsValue::from_str("transaction_id"),
        &JsValue::from_str(external_id),
    )
    .and_then(|_| Reflect::set(&params, &JsValue::from_str("value"), &JsValue::from_f64(value)))
    .and_then(|_| {
        Reflect::set(
            &params,
            &JsValue::from_str("currency"),
            &JsValue::from_str("BRL"),
        )
    });

    if ok.is_err() {
        dom::console_error("conversion params could not be assembled");
        return;
    }

    if let Err(err) = gtag.call3(
        &JsValue::UNDEFINED,
        &JsValue::from_str("event"),
        &JsValue::from_str("purchase"),
        &params,
    ) {
        dom::console_error(&format!(
            "conversion event rejected: {}",
            dom::js_error_message(&err)
        ));
    }
}
