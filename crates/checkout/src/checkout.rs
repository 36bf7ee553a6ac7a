//! Checkout state.
//!
//! A [`Checkout`] is opened from a [`CheckoutHandoff`] and holds the form the
//! customer fills in. Inputs pass through the masks in
//! [`monster_burger_core::mask`] as they are set; completion steps, totals and
//! the message are recomputed from the current values on every read.
//!
//! With an [`AddressBook`] the customer can reuse a saved address, and every
//! submitted address is remembered. Without one the checkout always collects
//! a new address and the message uses the layout without a CEP line.

use monster_burger_core::mask::{
    mask_amount, mask_house_number, mask_phone, mask_postal_code,
};
use monster_burger_core::{AddressId, PaymentMethod};
use tracing::instrument;

use crate::address_book::{AddressBook, UpsertOutcome};
use crate::cart::{CartSnapshot, CheckoutHandoff};
use crate::error::{CheckoutError, Result};
use crate::form::{CustomerInfo, DeliveryAddress, PaymentSelection};
use crate::message::{MessagingTarget, OrderDetails, build_order_message};
use crate::validation::{CheckoutSteps, submit_eligible};

/// Where the delivery details come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressMode {
    /// A saved address is active and filled the form.
    Saved(AddressId),
    /// The customer types a new address.
    New,
}

/// A successfully submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The order message as plain text.
    pub message: String,
    /// Deep link to open.
    pub link: String,
    /// What happened to the address book, when there is one.
    pub saved_address: Option<UpsertOutcome>,
}

/// Checkout form and its derived state.
#[derive(Debug)]
pub struct Checkout {
    order: CheckoutHandoff,
    customer: CustomerInfo,
    address: DeliveryAddress,
    payment: PaymentSelection,
    address_mode: AddressMode,
    book: Option<AddressBook>,
    target: MessagingTarget,
}

impl Checkout {
    /// Open a checkout without an address book.
    #[must_use]
    pub fn new(order: CheckoutHandoff, target: MessagingTarget) -> Self {
        Self {
            order,
            customer: CustomerInfo::default(),
            address: DeliveryAddress::default(),
            payment: PaymentSelection::default(),
            address_mode: AddressMode::New,
            book: None,
            target,
        }
    }

    /// Open a checkout backed by `book`. If the book has an active address
    /// the form starts filled with it.
    #[must_use]
    pub fn with_address_book(
        order: CheckoutHandoff,
        target: MessagingTarget,
        book: AddressBook,
    ) -> Self {
        let mut checkout = Self::new(order, target);
        if let Some(saved) = book.selected() {
            checkout.customer = saved.contact();
            checkout.address = saved.address();
            checkout.address_mode = AddressMode::Saved(saved.id.clone());
        }
        checkout.book = Some(book);
        checkout
    }

    // =========================================================================
    // Form input
    // =========================================================================

    /// Set the customer's name as typed.
    pub fn set_full_name(&mut self, name: &str) {
        name.clone_into(&mut self.customer.full_name);
    }

    /// Set the phone, masked as `(DD) DDDDD-DDDD`.
    pub fn set_phone(&mut self, phone: &str) {
        self.customer.phone = mask_phone(phone);
    }

    /// Set the CEP, masked as `DDDDD-DDD`.
    pub fn set_postal_code(&mut self, postal_code: &str) {
        self.address.postal_code = mask_postal_code(postal_code);
    }

    /// Set the street as typed.
    pub fn set_street(&mut self, street: &str) {
        street.clone_into(&mut self.address.street);
    }

    /// Set the house number, digits only.
    pub fn set_number(&mut self, number: &str) {
        self.address.number = mask_house_number(number);
    }

    /// Set the district as typed.
    pub fn set_district(&mut self, district: &str) {
        district.clone_into(&mut self.address.district);
    }

    /// Set the complement as typed.
    pub fn set_complement(&mut self, complement: &str) {
        complement.clone_into(&mut self.address.complement);
    }

    /// Choose a payment method. A change amount typed earlier is kept.
    pub const fn select_payment(&mut self, method: PaymentMethod) {
        self.payment.method = method;
    }

    /// Set the cash "change for" amount, masked as `DDDDDD,DD`.
    pub fn set_change_for(&mut self, amount: &str) {
        self.payment.change_for = mask_amount(amount);
    }

    // =========================================================================
    // Saved addresses
    // =========================================================================

    /// Reuse a saved address: it becomes active and fills the contact and
    /// delivery fields. Unknown ids, or having no book, leave everything as
    /// is and return `false`.
    pub fn select_saved_address(&mut self, id: &AddressId) -> bool {
        let Some(book) = self.book.as_mut() else {
            return false;
        };
        if !book.select(id) {
            return false;
        }
        if let Some(saved) = book.get(id) {
            self.customer = saved.contact();
            self.address = saved.address();
        }
        self.address_mode = AddressMode::Saved(id.clone());
        true
    }

    /// Switch to typing a new address: clears the active selection and the
    /// contact and delivery fields.
    pub fn use_new_address(&mut self) {
        if let Some(book) = self.book.as_mut() {
            book.clear_selection();
        }
        self.address_mode = AddressMode::New;
        self.customer = CustomerInfo::default();
        self.address = DeliveryAddress::default();
    }

    /// Delete a saved address. Deleting the active one switches to new-address
    /// mode and keeps the fields already filled. Unknown ids return `false`.
    pub fn delete_saved_address(&mut self, id: &AddressId) -> bool {
        let Some(book) = self.book.as_mut() else {
            return false;
        };
        if !book.delete(id) {
            return false;
        }
        if self.address_mode == AddressMode::Saved(id.clone()) {
            self.address_mode = AddressMode::New;
        }
        true
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Contact fields.
    #[must_use]
    pub const fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Delivery fields.
    #[must_use]
    pub const fn address(&self) -> &DeliveryAddress {
        &self.address
    }

    /// Payment fields.
    #[must_use]
    pub const fn payment(&self) -> &PaymentSelection {
        &self.payment
    }

    /// Where the delivery details come from.
    #[must_use]
    pub const fn address_mode(&self) -> &AddressMode {
        &self.address_mode
    }

    /// The address book, if this checkout has one.
    #[must_use]
    pub const fn address_book(&self) -> Option<&AddressBook> {
        self.book.as_ref()
    }

    /// Items and resolved amounts.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.order.snapshot()
    }

    /// Order-level note, if it is not blank.
    #[must_use]
    pub fn order_note(&self) -> Option<&str> {
        self.order.trimmed_note()
    }

    /// Completion state of each step.
    #[must_use]
    pub fn steps(&self) -> CheckoutSteps {
        CheckoutSteps::evaluate(&self.customer, &self.address, &self.payment)
    }

    /// Whether the order can be sent right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        submit_eligible(!self.order.items.is_empty(), &self.steps())
    }

    /// The order message for the current values.
    #[must_use]
    pub fn message(&self) -> String {
        let cart = self.snapshot();
        build_order_message(&OrderDetails {
            cart: &cart,
            order_note: self.order_note(),
            customer: &self.customer,
            address: &self.address,
            payment: &self.payment,
            include_postal_code: self.book.is_some(),
        })
    }

    /// Deep link for the current values.
    #[must_use]
    pub fn link(&self) -> String {
        self.target.link(&self.message())
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Send the order: remember the address (when there is a book) and return
    /// the message and link to open.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or `CheckoutError::Incomplete` when
    /// the order cannot be sent yet. Nothing is persisted in that case.
    #[instrument(skip(self), fields(items = self.order.items.len()))]
    pub fn submit(&mut self) -> Result<Submission> {
        if self.order.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let steps = self.steps();
        if !steps.all_complete() {
            return Err(CheckoutError::Incomplete {
                missing: steps.missing(),
            });
        }

        let message = self.message();
        let link = self.target.link(&message);

        let saved_address = self.book.as_mut().map(|book| {
            let outcome = book.upsert(&self.customer, &self.address);
            self.address_mode = AddressMode::Saved(outcome.id().clone());
            outcome
        });

        tracing::info!(
            total = %self.snapshot().total,
            payment = ?self.payment.method,
            "Order submitted"
        );

        Ok(Submission {
            message,
            link,
            saved_address,
        })
    }
}
