//! Order assembly and customer field validation for the checkout form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One line of a create-payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

impl LineItem {
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.name.to_string(),
            unit_price_cents: product.price_cents,
            quantity: 1,
        }
    }
}

/// The items of one checkout attempt plus its total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub items: Vec<LineItem>,
    pub total_cents: i64,
}

/// Main product first, then any selected add-ons, single quantity each.
#[must_use]
pub fn build_order(main: &Product, addons: &[&Product]) -> Order {
    let mut items = Vec::with_capacity(1 + addons.len());
    items.push(LineItem::from_product(main));
    items.extend(addons.iter().map(|p| LineItem::from_product(p)));
    let total_cents = items
        .iter()
        .map(|i| i.unit_price_cents * i64::from(i.quantity))
        .sum();
    Order { items, total_cents }
}

/// Format integer cents as Brazilian currency, e.g. `R$ 1.234,56`.
#[must_use]
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let reais = cents / 100;
    let centavos = cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}R$ {grouped},{centavos:02}")
}

/// Client-generated correlation id for the main checkout.
#[must_use]
pub fn external_id(now_ms: i64) -> String {
    format!("ff-{now_ms}")
}

/// Correlation id for a funnel-step purchase, tagged with the step so the
/// records stay distinguishable server-side.
#[must_use]
pub fn tagged_external_id(tag: &str, now_ms: i64) -> String {
    format!("ff-{tag}-{now_ms}")
}

/// Customer contact fields captured on the checkout form and reused by the
/// upsell steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    /// Digits only, mask already stripped.
    pub phone: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("informe nome e sobrenome")]
    IncompleteName,
    #[error("formato de e-mail inválido")]
    InvalidEmail,
    #[error("número de telefone inválido")]
    InvalidPhone,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

impl Contact {
    /// Strip the input mask from a phone field.
    #[must_use]
    pub fn sanitize_phone(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }

    /// # Errors
    ///
    /// Returns the first failing field: full name needs at least two words,
    /// the e-mail must have a plausible shape, the phone must be the eleven
    /// digits of a Brazilian mobile number.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().split_whitespace().count() < 2 {
            return Err(ContactError::IncompleteName);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        if self.phone.len() != 11 || !self.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactError::InvalidPhone);
        }
        Ok(())
    }
}

/// Progressive input mask for the phone field: `(00) 0 0000-0000`.
#[must_use]
pub fn format_phone_input(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(11)
        .collect();
    let mut out = String::with_capacity(16);
    for (idx, ch) in digits.iter().enumerate() {
        match idx {
            0 => {
                out.push('(');
                out.push(*ch);
            }
            2 => {
                out.push_str(") ");
                out.push(*ch);
            }
            3 => {
                out.push(' ');
                out.push(*ch);
            }
            7 => {
                out.push('-');
                out.push(*ch);
            }
            _ => out.push(*ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        Contact, ContactError, build_order, external_id, format_brl, format_phone_input,
        tagged_external_id,
    };
    use crate::catalog::{CHECKOUT_ADDONS, DIAMOND_PACKS};

    #[test]
    fn order_totals_main_product_and_addons() {
        let main = &DIAMOND_PACKS[0];
        let addons = [&CHECKOUT_ADDONS[0], &CHECKOUT_ADDONS[2]];
        let order = build_order(main, &addons);
        assert_eq!(order.items.len(), 3);
        assert_eq!(order.items[0].id, "pack-1060");
        assert_eq!(order.total_cents, 1690 + 999 + 499);
    }

    #[test]
    fn brl_formatting_groups_thousands() {
        assert_eq!(format_brl(1690), "R$ 16,90");
        assert_eq!(format_brl(123_456), "R$ 1.234,56");
        assert_eq!(format_brl(100_000_000), "R$ 1.000.000,00");
        assert_eq!(format_brl(5), "R$ 0,05");
        assert_eq!(format_brl(-990), "-R$ 9,90");
    }

    #[test]
    fn external_ids_carry_the_timestamp() {
        assert_eq!(external_id(1_700_000_000_123), "ff-1700000000123");
        assert_eq!(
            tagged_external_id("upsell1-skins", 7),
            "ff-upsell1-skins-7"
        );
    }

    fn valid_contact() -> Contact {
        Contact {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "11987654321".to_string(),
        }
    }

    #[test]
    fn valid_contact_passes() {
        assert_eq!(valid_contact().validate(), Ok(()));
    }

    #[test]
    fn single_word_name_is_rejected() {
        let mut c = valid_contact();
        c.name = "Maria".to_string();
        assert_eq!(c.validate(), Err(ContactError::IncompleteName));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut c = valid_contact();
        c.email = "maria-at-example".to_string();
        assert_eq!(c.validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut c = valid_contact();
        c.phone = "1198765".to_string();
        assert_eq!(c.validate(), Err(ContactError::InvalidPhone));
    }

    #[test]
    fn phone_mask_strips_and_formats() {
        assert_eq!(Contact::sanitize_phone("(11) 9 8765-4321"), "11987654321");
        assert_eq!(format_phone_input("11987654321"), "(11) 9 8765-4321");
        assert_eq!(format_phone_input("119"), "(11) 9");
        assert_eq!(format_phone_input(""), "");
        // Extra digits are dropped rather than overflowing the mask.
        assert_eq!(format_phone_input("119876543210000"), "(11) 9 8765-4321");
    }
}
