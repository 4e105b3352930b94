pub mod checkout;
pub mod confirm;
pub mod home;
pub mod not_found;
pub mod offer;
pub mod success;

pub use checkout::Checkout;
pub use confirm::Confirm;
pub use home::Home;
pub use not_found::NotFound;
pub use offer::OfferPage;
pub use success::Success;
