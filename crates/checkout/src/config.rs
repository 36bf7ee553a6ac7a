//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHECKOUT_WHATSAPP_RECIPIENT` - Store number receiving orders, digits only
//!   (default: 5564999663524)
//! - `CHECKOUT_MESSAGING_BASE_URL` - Click-to-chat base URL (default: <https://wa.me>)
//! - `CHECKOUT_DELIVERY_FEE` - Flat delivery fee in Reais, `5` or `5,50` (default: 5)
//! - `CHECKOUT_STORAGE_PATH` - JSON file backing the address book
//!   (default: .monster-burger/storage.json)

use std::path::PathBuf;
use std::str::FromStr;

use monster_burger_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::message::{DEFAULT_MESSAGING_BASE_URL, DEFAULT_RECIPIENT, MessagingTarget};

const DEFAULT_DELIVERY_FEE: &str = "5";
const DEFAULT_STORAGE_PATH: &str = ".monster-burger/storage.json";

/// Recipient numbers carry a country code, so at least 10 and at most 15
/// digits (E.164).
const MIN_RECIPIENT_DIGITS: usize = 10;
const MAX_RECIPIENT_DIGITS: usize = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Where orders are sent.
    pub messaging: MessagingTarget,
    /// Flat delivery fee charged on non-empty carts.
    pub delivery_fee: Price,
    /// File backing the address book.
    pub storage_path: PathBuf,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            messaging: MessagingTarget::default(),
            delivery_fee: Price::from_reais(5),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let recipient = parse_recipient(
            "CHECKOUT_WHATSAPP_RECIPIENT",
            &get_or_default("CHECKOUT_WHATSAPP_RECIPIENT", DEFAULT_RECIPIENT),
        )?;
        let base_url = parse_base_url(
            "CHECKOUT_MESSAGING_BASE_URL",
            &get_or_default("CHECKOUT_MESSAGING_BASE_URL", DEFAULT_MESSAGING_BASE_URL),
        )?;
        let delivery_fee = parse_fee(
            "CHECKOUT_DELIVERY_FEE",
            &get_or_default("CHECKOUT_DELIVERY_FEE", DEFAULT_DELIVERY_FEE),
        )?;
        let storage_path =
            PathBuf::from(get_or_default("CHECKOUT_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            messaging: MessagingTarget {
                base_url,
                recipient,
            },
            delivery_fee,
            storage_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.into())
}

/// Validate a recipient phone number: digits only, 10 to 15 of them.
fn parse_recipient(key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(key, "must contain digits only"));
    }
    if !(MIN_RECIPIENT_DIGITS..=MAX_RECIPIENT_DIGITS).contains(&value.len()) {
        return Err(invalid(
            key,
            format!(
                "must have {MIN_RECIPIENT_DIGITS} to {MAX_RECIPIENT_DIGITS} digits (got {})",
                value.len()
            ),
        ));
    }
    Ok(value.to_string())
}

/// Validate the messaging base URL and drop any trailing slash.
fn parse_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| invalid(key, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(key, format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() {
        return Err(invalid(key, "must not carry a query string"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Parse a non-negative fee written with `,` or `.` as decimal separator.
fn parse_fee(key: &str, value: &str) -> Result<Price, ConfigError> {
    let normalized = value.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized).map_err(|e| invalid(key, e.to_string()))?;
    if amount.is_sign_negative() {
        return Err(invalid(key, "must not be negative"));
    }
    Ok(Price::new(amount))
}
