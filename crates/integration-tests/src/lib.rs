//! Integration tests for the Monster Burger cart and checkout.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p monster-burger-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to handoff to checkout to order message
//! - `address_book` - Saved addresses across sessions on a file store
//!
//! Everything runs in-process against the in-memory and file stores; no
//! external services are needed.
