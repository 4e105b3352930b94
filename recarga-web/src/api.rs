//! HTTP client for the payment backend.
//!
//! Two calls back the whole funnel: one POST that opens a Pix charge and one
//! GET that reports its current status. Both go through the same origin, so
//! no auth material ever reaches the browser.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use recarga_core::{PaymentInstructions, PaymentStatus};

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum WebApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server responded with status {0}")]
    Http(u16),
    #[error("Response decoding error: {0}")]
    Decode(String),
}

impl WebApiError {
    fn network(value: &JsValue) -> Self {
        Self::Network(dom::js_error_message(value))
    }
}

/// Line item forwarded to the payment provider.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "unitPrice")]
    pub unit_price: i64,
    pub quantity: u32,
}

/// Body of the charge-creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub amount: i64,
    #[serde(rename = "externalId")]
    pub external_id: String,
    pub items: Vec<PaymentItem>,
    #[serde(rename = "utmQuery", skip_serializing_if = "Option::is_none")]
    pub utm_query: Option<String>,
}

/// Payment data returned when a charge is opened.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentResponse {
    pub id: Option<String>,
    pub instructions: PaymentInstructions,
}

#[derive(Debug, Deserialize)]
struct CreatePaymentEnvelope {
    data: Option<CreatePaymentResponse>,
    #[serde(flatten)]
    direct: Option<CreatePaymentResponse>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: Option<String>,
}

/// Open a Pix charge for the assembled order.
///
/// # Errors
/// Returns an error when the request fails to reach the server, the server
/// rejects the charge, or the response body cannot be decoded.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn create_payment(
    request: &CreatePaymentRequest,
) -> Result<CreatePaymentResponse, WebApiError> {
    let body = serde_json::to_string(request).map_err(|e| WebApiError::Decode(e.to_string()))?;

    let response = dom::post_json("/api/create-payment", &body)
        .await
        .map_err(|e| WebApiError::network(&e))?;

    if !response.ok() {
        return Err(WebApiError::Http(response.status()));
    }

    let text = response_text(&response).await?;
    let envelope: CreatePaymentEnvelope =
        serde_json::from_str(&text).map_err(|e| WebApiError::Decode(e.to_string()))?;

    envelope
        .data
        .or(envelope.direct)
        .ok_or_else(|| WebApiError::Decode("payment payload missing from response".into()))
}

/// Ask the backend for the current status of a charge.
///
/// Unrecognized status strings come back as `Pending` so an API rollout of a
/// new intermediate state never strands the confirmation page.
///
/// # Errors
/// Returns an error when the request fails or the server responds with a
/// non-success status. Callers treat any error as a single unknown reading,
/// not a verdict on the payment.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_payment_status(external_id: &str) -> Result<PaymentStatus, WebApiError> {
    let params = web_sys::UrlSearchParams::new().map_err(|e| WebApiError::network(&e))?;
    params.append("externalId", external_id);
    let url = format!("/api/create-payment?{}", String::from(params.to_string()));

    let response = dom::fetch_response(&url)
        .await
        .map_err(|e| WebApiError::network(&e))?;

    if !response.ok() {
        return Err(WebApiError::Http(response.status()));
    }

    let text = response_text(&response).await?;
    let envelope: StatusEnvelope =
        serde_json::from_str(&text).map_err(|e| WebApiError::Decode(e.to_string()))?;

    Ok(envelope
        .status
        .as_deref()
        .map(PaymentStatus::parse)
        .unwrap_or_default())
}

#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn response_text(response: &web_sys::Response) -> Result<String, WebApiError> {
    let promise = response.text().map_err(|e| WebApiError::network(&e))?;
    let value = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| WebApiError::network(&e))?;
    value
        .as_string()
        .ok_or_else(|| WebApiError::Decode("response body was not text".into()))
}
