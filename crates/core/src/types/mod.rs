//! Core types for Monster Burger.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod payment;
pub mod price;

pub use id::*;
pub use payment::PaymentMethod;
pub use price::{Price, format_brl};
