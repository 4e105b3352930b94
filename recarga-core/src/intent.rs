use serde::{Deserialize, Serialize};

/// Provider-specific payment instructions (Pix copy-paste payload and the
/// base64-encoded QR image). Opaque to the lifecycle beyond presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentInstructions {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub qrcode_base64: String,
}

/// One checkout attempt, persisted for the confirmation page.
///
/// Written once when the create-payment call succeeds, read back on page
/// (re)entry, and cleared exactly once when a terminal status is handled.
/// Display fields are pre-formatted at creation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Client-generated correlation id used as the polling key.
    pub external_id: String,
    /// Creation timestamp in epoch milliseconds; sole basis for expiry.
    pub created_at: i64,
    /// Identifier of the purchased product, used only for redirect routing.
    pub product_id: String,
    pub player_name: String,
    /// Formatted total, e.g. "R$ 16,90".
    pub amount: String,
    pub original_amount: String,
    pub bonus_amount: String,
    pub total_amount: String,
    pub instructions: PaymentInstructions,
    /// Raw status string as last reported by the provider, if any.
    #[serde(default)]
    pub status: Option<String>,
    /// Provider transaction id, used only for the conversion side effect.
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub amount_cents: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("payment intent has no external reference")]
    MissingReference,
    #[error("payment intent has no payment instructions")]
    MissingInstructions,
    #[error("payment intent has an invalid creation timestamp")]
    InvalidTimestamp,
}

impl PaymentIntent {
    /// Check the fields the confirmation lifecycle cannot run without.
    ///
    /// # Errors
    ///
    /// Returns the first missing requirement. The caller treats any error as
    /// fatal for the page: message plus delayed navigation to the funnel
    /// entry, never a retry.
    pub fn validate(&self) -> Result<(), IntentError> {
        if self.external_id.trim().is_empty() {
            return Err(IntentError::MissingReference);
        }
        if self.instructions.code.is_empty() || self.instructions.qrcode_base64.is_empty() {
            return Err(IntentError::MissingInstructions);
        }
        if self.created_at <= 0 {
            return Err(IntentError::InvalidTimestamp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IntentError, PaymentInstructions, PaymentIntent};

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
    fn valid_intent_passes() {
        assert_eq!(sample_intent().validate(), Ok(()));
    }

    #[test]
    fn blank_reference_is_rejected() {
        let mut intent = sample_intent();
        intent.external_id = "  ".to_string();
        assert_eq!(intent.validate(), Err(IntentError::MissingReference));
    }

    #[test]
    fn missing_instructions_are_rejected() {
        let mut intent = sample_intent();
        intent.instructions.qrcode_base64.clear();
        assert_eq!(intent.validate(), Err(IntentError::MissingInstructions));
    }

    #[test]
    fn non_positive_timestamp_is_rejected() {
        let mut intent = sample_intent();
        intent.created_at = 0;
        assert_eq!(intent.validate(), Err(IntentError::InvalidTimestamp));
    }

    #[test]
    fn intent_round_trips_through_json() {
        let intent = sample_intent();
        let json = serde_json::to_string(&intent).expect("serialize");
        let back: PaymentIntent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, intent);
    }

    #[test]
    fn legacy_records_without_optional_fields_still_load() {
        let json = r#"{
            "external_id": "ff-9",
            "created_at": 5,
            "product_id": "pack-1060",
            "player_name": "x",
            "amount": "R$ 1,00",
            "original_amount": "",
            "bonus_amount": "",
            "total_amount": "",
            "instructions": { "code": "abc", "qrcode_base64": "def" }
        }"#;
        let intent: PaymentIntent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(intent.status, None);
        assert_eq!(intent.amount_cents, 0);
        assert_eq!(intent.validate(), Ok(()));
    }
}
