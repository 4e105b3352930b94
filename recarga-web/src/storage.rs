//! Browser persistence for the checkout funnel.
//!
//! The payment intent survives a page refresh through `sessionStorage`; the
//! lighter funnel selections (chosen game and pack, player id, addons,
//! contact info)
//! live in `localStorage` so they carry across tabs.

use gloo::storage::{LocalStorage, SessionStorage, Storage};
use recarga_core::{Contact, IntentRepository, PaymentIntent};

const INTENT_KEY: &str = "recarga.payment";
const PRODUCT_KEY: &str = "recarga.product";
const PLAYER_KEY: &str = "recarga.player";
const ADDONS_KEY: &str = "recarga.addons";
const CONTACT_KEY: &str = "recarga.contact";
const GAME_KEY: &str = "recarga.game";

/// Intent store backed by `sessionStorage`.
pub struct SessionIntentStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntentRepository for SessionIntentStore {
    type Error = WebStorageError;

    fn load(&self) -> Result<Option<PaymentIntent>, Self::Error> {
        match SessionStorage::get(INTENT_KEY) {
            Ok(intent) => Ok(Some(intent)),
            Err(_) => Ok(None), // No pending payment stored
        }
    }

    fn save(&self, intent: &PaymentIntent) -> Result<(), Self::Error> {
        SessionStorage::set(INTENT_KEY, intent)
            .map_err(|e| WebStorageError::Storage(format!("{e:?}")))
    }

    fn clear(&self) {
        SessionStorage::delete(INTENT_KEY);
    }
}

/// Remember which diamond pack the player picked on the home page.
pub fn save_selected_product(product_id: &str) {
    let _ = LocalStorage::set(PRODUCT_KEY, product_id);
}

#[must_use]
pub fn load_selected_product() -> Option<String> {
    LocalStorage::get(PRODUCT_KEY).ok()
}

pub fn save_player_name(name: &str) {
    let _ = LocalStorage::set(PLAYER_KEY, name);
}

#[must_use]
pub fn load_player_name() -> Option<String> {
    LocalStorage::get(PLAYER_KEY).ok()
}

/// Addon ids ticked on the checkout page.
pub fn save_selected_addons(addons: &[String]) {
    let _ = LocalStorage::set(ADDONS_KEY, addons);
}

#[must_use]
pub fn load_selected_addons() -> Vec<String> {
    LocalStorage::get(ADDONS_KEY).unwrap_or_default()
}

pub fn save_contact(contact: &Contact) {
    let _ = LocalStorage::set(CONTACT_KEY, contact);
}

#[must_use]
pub fn load_contact() -> Option<Contact> {
    LocalStorage::get(CONTACT_KEY).ok()
}

/// Game title picked on the home page. The post-payment resolver keys its
/// upsell short-circuit on this selection.
pub fn save_selected_game(game_id: &str) {
    let _ = LocalStorage::set(GAME_KEY, game_id);
}

#[must_use]
pub fn load_selected_game() -> Option<String> {
    LocalStorage::get(GAME_KEY).ok()
}
