//! Checkout completion steps.
//!
//! Each step is a pure function of the current field values and is evaluated
//! on every read. Steps are independent: a later step can be complete while an
//! earlier one is not.

use core::fmt;

use monster_burger_core::mask::POSTAL_CODE_DIGITS;

use crate::form::{CustomerInfo, DeliveryAddress, PaymentSelection};

/// Minimum phone digits: area code plus an 8-digit landline.
pub const MIN_PHONE_DIGITS: usize = 10;

/// One of the three things a customer must complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Name and phone.
    Contact,
    /// Postal code, street, number, district.
    Address,
    /// Payment method, plus change amount for cash.
    Payment,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contact => "contact",
            Self::Address => "address",
            Self::Payment => "payment",
        })
    }
}

/// Non-empty trimmed name and at least ten phone digits.
#[must_use]
pub fn contact_complete(customer: &CustomerInfo) -> bool {
    !customer.full_name.trim().is_empty() && customer.phone_digits().len() >= MIN_PHONE_DIGITS
}

/// Eight-digit postal code and non-empty street, number and district.
#[must_use]
pub fn address_complete(address: &DeliveryAddress) -> bool {
    address.postal_code_digits().len() == POSTAL_CODE_DIGITS
        && !address.street.trim().is_empty()
        && !address.number.trim().is_empty()
        && !address.district.trim().is_empty()
}

/// Anything but cash, or cash with a change amount.
#[must_use]
pub fn payment_complete(payment: &PaymentSelection) -> bool {
    !payment.method.requires_change() || !payment.change_for.trim().is_empty()
}

/// Completion state of every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSteps {
    /// Contact step.
    pub contact: bool,
    /// Address step.
    pub address: bool,
    /// Payment step.
    pub payment: bool,
}

impl CheckoutSteps {
    /// Evaluate all steps against the current values.
    #[must_use]
    pub fn evaluate(
        customer: &CustomerInfo,
        address: &DeliveryAddress,
        payment: &PaymentSelection,
    ) -> Self {
        Self {
            contact: contact_complete(customer),
            address: address_complete(address),
            payment: payment_complete(payment),
        }
    }

    /// Whether every step is complete.
    #[must_use]
    pub const fn all_complete(&self) -> bool {
        self.contact && self.address && self.payment
    }

    /// Steps still missing, in display order.
    #[must_use]
    pub fn missing(&self) -> Vec<Step> {
        [
            (Step::Contact, self.contact),
            (Step::Address, self.address),
            (Step::Payment, self.payment),
        ]
        .into_iter()
        .filter_map(|(step, done)| (!done).then_some(step))
        .collect()
    }
}

/// The order can be sent: there is something in the cart and every step is
/// complete.
#[must_use]
pub const fn submit_eligible(has_items: bool, steps: &CheckoutSteps) -> bool {
    has_items && steps.all_complete()
}

#[cfg(test)]
mod tests {
    use monster_burger_core::PaymentMethod;

    use super::*;

    fn customer(name: &str, phone: &str) -> CustomerInfo {
        CustomerInfo {
            full_name: name.to_string(),
            phone: phone.to_string(),
        }
    }

    fn address(cep: &str, street: &str, number: &str, district: &str) -> DeliveryAddress {
        DeliveryAddress {
            postal_code: cep.to_string(),
            street: street.to_string(),
            number: number.to_string(),
            district: district.to_string(),
            complement: String::new(),
        }
    }

    #[test]
    fn test_contact_requires_name_and_ten_digits() {
        assert!(contact_complete(&customer("Ana", "(64) 3222-1111")));
        assert!(contact_complete(&customer("Ana", "(64) 99966-3524")));
        assert!(!contact_complete(&customer("   ", "(64) 99966-3524")));
        assert!(!contact_complete(&customer("Ana", "(64) 3222-111")));
    }

    #[test]
    fn test_address_requires_full_postal_code() {
        assert!(address_complete(&address("75800-000", "Rua A", "1", "Centro")));
        assert!(!address_complete(&address("75800-00", "Rua A", "1", "Centro")));
    }

    #[test]
    fn test_address_requires_text_fields() {
        assert!(!address_complete(&address("75800-000", " ", "1", "Centro")));
        assert!(!address_complete(&address("75800-000", "Rua A", "", "Centro")));
        assert!(!address_complete(&address("75800-000", "Rua A", "1", "")));
    }

    #[test]
    fn test_payment_cash_needs_change() {
        assert!(payment_complete(&PaymentSelection::new(PaymentMethod::Pix)));
        assert!(payment_complete(&PaymentSelection::new(PaymentMethod::Card)));
        assert!(!payment_complete(&PaymentSelection::new(PaymentMethod::Cash)));
        assert!(!payment_complete(&PaymentSelection::cash("  ")));
        assert!(payment_complete(&PaymentSelection::cash("50")));
    }

    #[test]
    fn test_steps_are_independent() {
        let steps = CheckoutSteps::evaluate(
            &customer("", ""),
            &address("", "", "", ""),
            &PaymentSelection::new(PaymentMethod::Pix),
        );
        assert!(!steps.contact);
        assert!(!steps.address);
        assert!(steps.payment);
        assert_eq!(steps.missing(), vec![Step::Contact, Step::Address]);
    }

    #[test]
    fn test_submit_eligibility() {
        let complete = CheckoutSteps {
            contact: true,
            address: true,
            payment: true,
        };
        assert!(submit_eligible(true, &complete));
        assert!(!submit_eligible(false, &complete));

        let cash_without_change = CheckoutSteps {
            payment: false,
            ..complete
        };
        assert!(!submit_eligible(true, &cash_without_change));
    }
}
