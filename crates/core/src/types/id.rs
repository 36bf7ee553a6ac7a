//! Identifiers for cart items and saved addresses.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a cart line item: the menu entry it was added from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Identifier of a saved delivery address.
///
/// Generated as `<unix millis>_<random hex>`: unique enough for one customer on
/// one device without any central counter. Ids read back from storage are kept
/// verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    /// Generate a fresh identifier stamped with `now`.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: u64 = rand::random();
        Self(format!("{}_{suffix:x}", now.timestamp_millis()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AddressId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AddressId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AddressId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for AddressId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_item_id_conversions() {
        let id = ItemId::from(7);
        assert_eq!(id.as_u32(), 7);
        assert_eq!(u32::from(id), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_item_id_serde_transparent() {
        let json = serde_json::to_string(&ItemId::new(3)).unwrap();
        assert_eq!(json, "3");
        let parsed: ItemId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, ItemId::new(3));
    }

    #[test]
    fn test_address_id_carries_timestamp_prefix() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = AddressId::generate(now);
        let (millis, suffix) = id.as_str().split_once('_').unwrap();
        assert_eq!(millis, "1700000000123");
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_address_id_unique_within_same_millisecond() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let ids: HashSet<AddressId> = (0..1000).map(|_| AddressId::generate(now)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_address_id_keeps_foreign_ids_verbatim() {
        let parsed: AddressId = serde_json::from_str("\"legacy-id\"").unwrap();
        assert_eq!(parsed.as_str(), "legacy-id");
    }
}
