//! Checkout errors.
//!
//! Submitting is the only checkout operation that can be refused. Refusal
//! never has side effects: nothing is persisted and no link is produced.

use thiserror::Error;

use crate::validation::Step;

/// Why an order could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// One or more steps are not complete yet.
    #[error("Checkout incomplete, missing: {}", join_steps(.missing))]
    Incomplete {
        /// Steps still to complete, in display order.
        missing: Vec<Step>,
    },
}

fn join_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_display() {
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Cart is empty");

        let err = CheckoutError::Incomplete {
            missing: vec![Step::Contact, Step::Payment],
        };
        assert_eq!(err.to_string(), "Checkout incomplete, missing: contact, payment");
    }
}
