//! Payment methods accepted at checkout.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How the customer pays for the order.
///
/// Card and cash are both settled on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Instant bank transfer (Pix).
    #[default]
    Pix,
    /// Credit or debit card on delivery.
    Card,
    /// Cash on delivery; the courier needs to know what to bring as change.
    Cash,
}

impl PaymentMethod {
    /// Every method, in the order a storefront lists them.
    pub const ALL: [Self; 3] = [Self::Pix, Self::Card, Self::Cash];

    /// Label used in the order message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pix => "Pix",
            Self::Card => "Cartão (crédito/débito)",
            Self::Cash => "Dinheiro",
        }
    }

    /// Whether the method needs a "change for" amount before checkout.
    #[must_use]
    pub const fn requires_change(self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
