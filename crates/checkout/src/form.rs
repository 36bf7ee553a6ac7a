//! Values the customer types at checkout.

use monster_burger_core::PaymentMethod;
use monster_burger_core::mask::only_digits;
use serde::{Deserialize, Serialize};

/// Who is ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Full name as typed.
    #[serde(default)]
    pub full_name: String,
    /// Phone, usually already masked as `(DD) DDDDD-DDDD`.
    #[serde(default)]
    pub phone: String,
}

impl CustomerInfo {
    /// Phone reduced to its digits.
    #[must_use]
    pub fn phone_digits(&self) -> String {
        only_digits(&self.phone)
    }

    /// Copy with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

/// Where the order goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    /// CEP, usually masked as `DDDDD-DDD`.
    #[serde(default, alias = "cep")]
    pub postal_code: String,
    /// Street name.
    #[serde(default)]
    pub street: String,
    /// House or unit number.
    #[serde(default)]
    pub number: String,
    /// District (bairro).
    #[serde(default)]
    pub district: String,
    /// Apartment, block, reference point. Empty when not given.
    #[serde(default)]
    pub complement: String,
}

impl DeliveryAddress {
    /// Postal code reduced to its digits.
    #[must_use]
    pub fn postal_code_digits(&self) -> String {
        only_digits(&self.postal_code)
    }

    /// Copy with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            postal_code: self.postal_code.trim().to_owned(),
            street: self.street.trim().to_owned(),
            number: self.number.trim().to_owned(),
            district: self.district.trim().to_owned(),
            complement: self.complement.trim().to_owned(),
        }
    }

    /// Whether both addresses point at the same place.
    ///
    /// Postal codes compare by digits; text fields compare trimmed and
    /// case-insensitively. Name and phone are not part of the identity.
    #[must_use]
    pub fn same_place(&self, other: &Self) -> bool {
        fn norm(s: &str) -> String {
            s.trim().to_lowercase()
        }

        self.postal_code_digits() == other.postal_code_digits()
            && norm(&self.street) == norm(&other.street)
            && norm(&self.number) == norm(&other.number)
            && norm(&self.district) == norm(&other.district)
            && norm(&self.complement) == norm(&other.complement)
    }
}

/// Chosen payment method plus the "change for" amount used with cash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSelection {
    /// Selected method.
    #[serde(default)]
    pub method: PaymentMethod,
    /// Amount the courier should bring change for, as typed (`50,00`).
    /// Kept while another method is selected, only used with cash.
    #[serde(default, alias = "cashChange")]
    pub change_for: String,
}

impl PaymentSelection {
    /// Select `method` without a change amount.
    #[must_use]
    pub const fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            change_for: String::new(),
        }
    }

    /// Cash, with change for `amount`.
    #[must_use]
    pub fn cash(change_for: impl Into<String>) -> Self {
        Self {
            method: PaymentMethod::Cash,
            change_for: change_for.into(),
        }
    }

    /// The trimmed change amount when paying cash and one was given.
    #[must_use]
    pub fn cash_change(&self) -> Option<&str> {
        if !self.method.requires_change() {
            return None;
        }
        let change = self.change_for.trim();
        (!change.is_empty()).then_some(change)
    }
}
