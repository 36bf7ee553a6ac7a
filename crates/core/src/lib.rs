//! Monster Burger Core - Shared domain types.
//!
//! This crate provides common types used by the ordering components:
//! - `checkout` - Cart manager, checkout validation, address book, order message
//! - `cli` - Command-line front end driving the cart and checkout flow
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no clocks other than the one passed in. This keeps it lightweight and
//! allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, prices, and payment methods
//! - [`mask`] - Input normalizers (digit extraction, phone/postal-code/amount masks)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod mask;
pub mod types;

pub use types::*;
