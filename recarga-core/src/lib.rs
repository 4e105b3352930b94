//! Recarga Funnel Engine
//!
//! Platform-agnostic core for the Recarga checkout funnel: the payment
//! confirmation lifecycle (status model, poll schedule, expiry countdown,
//! reconciling state machine), the post-payment redirect resolver and the
//! product catalog. No UI and no browser dependencies; everything here is
//! testable natively.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod checkout;
pub mod countdown;
pub mod intent;
pub mod lifecycle;
pub mod poller;
pub mod redirect;
pub mod status;

// Re-export commonly used types
pub use catalog::{
    CHECKOUT_ADDONS, COIN_UPSELL_OFFERS, DEFAULT_GAME_ID, DIAMOND_PACKS, DOWNSELL_OFFERS,
    FEE_OFFERS, GAMES, Game, OfferCategory, PREMIUM_STATUS_OFFERS, Product, SKIN_OFFERS,
    category_of, find_game, find_product, game_is_standalone,
};
pub use checkout::{
    Contact, ContactError, LineItem, Order, build_order, external_id, format_brl,
    format_phone_input, tagged_external_id,
};
pub use countdown::{EXPIRY_WINDOW_SECS, format_mm_ss, seconds_remaining};
pub use intent::{IntentError, PaymentInstructions, PaymentIntent};
pub use lifecycle::{Authority, Lifecycle, LifecycleEvent, NextAction, Resolution};
pub use poller::{INITIAL_DELAY_MS, MAX_ATTEMPTS, MAX_DELAY_MS, PollSchedule};
pub use redirect::{FunnelRoute, RedirectContext, resolve};
pub use status::PaymentStatus;

/// Storage abstraction for the persisted payment intent.
///
/// The confirmation page is the intent's only writer: saved once when the
/// create-payment call succeeds, read on (re)entry, cleared exactly once on
/// terminal resolution. Platform implementations live outside this crate
/// (the web crate backs it with browser session storage).
pub trait IntentRepository {
    type Error: std::error::Error + 'static;

    /// Load the persisted intent, `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error when a record exists but cannot be decoded; callers
    /// treat that the same as a missing intent (fatal for the page).
    fn load(&self) -> Result<Option<PaymentIntent>, Self::Error>;

    /// Persist the intent for the confirmation page.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    fn save(&self, intent: &PaymentIntent) -> Result<(), Self::Error>;

    /// Remove the intent. Idempotent.
    fn clear(&self);
}

/// Load the stored intent and check it is usable for confirmation.
///
/// # Errors
///
/// Returns an error when the repository fails or when a stored record is
/// missing a field the lifecycle cannot run without. Callers treat both the
/// same way: clear the store and leave the confirmation page.
pub fn load_valid_intent<R>(repo: &R) -> Result<Option<PaymentIntent>, anyhow::Error>
where
    R: IntentRepository,
    R::Error: Into<anyhow::Error>,
{
    match repo.load().map_err(Into::into)? {
        Some(intent) => {
            intent.validate()?;
            Ok(Some(intent))
        }
        None => Ok(None),
    }
}
