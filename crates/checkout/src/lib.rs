//! Monster Burger Checkout - Cart and checkout flow as a library.
//!
//! The flow has two halves that meet once:
//!
//! 1. [`cart::Cart`] manages line items and derives subtotal, fee and total.
//!    Finishing the order produces a [`cart::CheckoutHandoff`].
//! 2. [`checkout::Checkout`] takes the handoff, collects contact, delivery and
//!    payment details, tracks the three completion steps, and on submission
//!    returns the order message and the WhatsApp link to open.
//!
//! Saved addresses live in an [`address_book::AddressBook`] on top of the
//! [`storage::KeyValueStore`] port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address_book;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod form;
pub mod message;
pub mod storage;
pub mod validation;

pub use address_book::{AddressBook, SavedAddress, UpsertOutcome};
pub use cart::{Cart, CartSnapshot, CheckoutHandoff, LineItem};
pub use checkout::{AddressMode, Checkout, Submission};
pub use config::{CheckoutConfig, ConfigError};
pub use error::CheckoutError;
pub use form::{CustomerInfo, DeliveryAddress, PaymentSelection};
pub use message::MessagingTarget;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use validation::{CheckoutSteps, Step};
