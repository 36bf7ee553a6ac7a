//! Saved delivery addresses.
//!
//! The book is a JSON array under [`ADDRESSES_KEY`] plus the active address id
//! under [`SELECTED_ADDRESS_KEY`], both in a [`KeyValueStore`]. Storage is
//! best-effort in both directions: anything unreadable loads as empty, and a
//! failed write is logged while the in-memory book keeps the change for the
//! rest of the session.

use chrono::{DateTime, Utc};
use monster_burger_core::AddressId;
use serde::{Deserialize, Serialize};

use crate::form::{CustomerInfo, DeliveryAddress};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the saved address list.
pub const ADDRESSES_KEY: &str = "mb_checkout_addresses_v1";

/// Storage key of the active address id.
pub const SELECTED_ADDRESS_KEY: &str = "mb_checkout_selected_address_v1";

/// A delivery address remembered from an earlier order, together with the
/// contact details it was sent with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    /// Generated identifier.
    pub id: AddressId,
    /// Customer name used with this address.
    #[serde(default)]
    pub full_name: String,
    /// Customer phone used with this address.
    #[serde(default)]
    pub phone: String,
    /// CEP.
    #[serde(rename = "cep")]
    pub postal_code: String,
    /// Street name.
    pub street: String,
    /// House or unit number.
    pub number: String,
    /// District.
    pub district: String,
    /// Complement; empty when not given.
    #[serde(default)]
    pub complement: String,
    /// Creation (or last reuse) time. Milliseconds since the epoch on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl SavedAddress {
    fn from_parts(
        id: AddressId,
        contact: &CustomerInfo,
        address: &DeliveryAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        let contact = contact.trimmed();
        let address = address.trimmed();
        Self {
            id,
            full_name: contact.full_name,
            phone: contact.phone,
            postal_code: address.postal_code,
            street: address.street,
            number: address.number,
            district: address.district,
            complement: address.complement,
            created_at,
        }
    }

    /// The delivery address part.
    #[must_use]
    pub fn address(&self) -> DeliveryAddress {
        DeliveryAddress {
            postal_code: self.postal_code.clone(),
            street: self.street.clone(),
            number: self.number.clone(),
            district: self.district.clone(),
            complement: self.complement.clone(),
        }
    }

    /// The contact part.
    #[must_use]
    pub fn contact(&self) -> CustomerInfo {
        CustomerInfo {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
        }
    }

    /// One-line summary, e.g. `Rua das Flores, 12 - Centro (75800-000)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}, {} - {} ({})",
            self.street, self.number, self.district, self.postal_code
        );
        if !self.complement.is_empty() {
            line.push_str(" · ");
            line.push_str(&self.complement);
        }
        line
    }
}

/// Result of [`AddressBook::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new entry was added at the front of the book.
    Inserted(AddressId),
    /// An entry for the same place already existed and was refreshed.
    Updated(AddressId),
}

impl UpsertOutcome {
    /// Id of the inserted or refreshed entry.
    #[must_use]
    pub const fn id(&self) -> &AddressId {
        match self {
            Self::Inserted(id) | Self::Updated(id) => id,
        }
    }
}

/// Read the saved address list, newest first.
///
/// Returns an empty list when the key is absent, unreadable, not JSON, or not
/// a JSON array. Entries that are null or do not look like an address are
/// skipped.
#[must_use]
pub fn load(store: &dyn KeyValueStore) -> Vec<SavedAddress> {
    let raw = match store.get(ADDRESSES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read saved addresses");
            return Vec::new();
        }
    };

    let values = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(_) => {
            tracing::warn!("Saved addresses are not a list, ignoring them");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Saved addresses are not valid JSON, ignoring them");
            return Vec::new();
        }
    };

    let mut addresses: Vec<SavedAddress> = values
        .into_iter()
        .filter(|value| !value.is_null())
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed saved address");
                None
            }
        })
        .collect();

    addresses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    addresses
}

/// Overwrite the saved address list with a single write.
///
/// # Errors
///
/// Returns `StorageError` if the list cannot be encoded or written.
pub fn save(store: &dyn KeyValueStore, addresses: &[SavedAddress]) -> Result<(), StorageError> {
    let json = serde_json::to_string(addresses).map_err(StorageError::Encode)?;
    store.set(ADDRESSES_KEY, &json)
}

/// Read the active address id, if any.
fn load_selected(store: &dyn KeyValueStore) -> Option<AddressId> {
    match store.get(SELECTED_ADDRESS_KEY) {
        Ok(Some(id)) if !id.is_empty() => Some(AddressId::from(id)),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read selected address");
            None
        }
    }
}

/// Saved addresses plus the active selection, backed by a store.
pub struct AddressBook {
    store: Box<dyn KeyValueStore>,
    addresses: Vec<SavedAddress>,
    selected: Option<AddressId>,
}

impl std::fmt::Debug for AddressBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressBook")
            .field("addresses", &self.addresses)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl AddressBook {
    /// Load the book from `store`.
    ///
    /// A stored selection pointing at an address that no longer exists is
    /// treated as no selection.
    pub fn open(store: impl KeyValueStore + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        let addresses = load(store.as_ref());
        let selected =
            load_selected(store.as_ref()).filter(|id| addresses.iter().any(|a| &a.id == id));

        tracing::debug!(
            count = addresses.len(),
            selected = ?selected,
            "Address book loaded"
        );

        Self {
            store,
            addresses,
            selected,
        }
    }

    /// Saved addresses. Newest first as loaded; refreshed entries keep their
    /// position until the next load.
    #[must_use]
    pub fn addresses(&self) -> &[SavedAddress] {
        &self.addresses
    }

    /// Number of saved addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Look up a saved address.
    #[must_use]
    pub fn get(&self, id: &AddressId) -> Option<&SavedAddress> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    /// Id of the active address.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&AddressId> {
        self.selected.as_ref()
    }

    /// The active address.
    #[must_use]
    pub fn selected(&self) -> Option<&SavedAddress> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Remember the address an order was just sent to, using the current time.
    pub fn upsert(&mut self, contact: &CustomerInfo, address: &DeliveryAddress) -> UpsertOutcome {
        self.upsert_at(contact, address, Utc::now())
    }

    /// Remember the address an order was just sent to.
    ///
    /// An entry for the same place is replaced in place, keeping its id and
    /// taking `now` as its timestamp; otherwise a new entry is put in front.
    /// Either way the entry becomes the active selection.
    pub fn upsert_at(
        &mut self,
        contact: &CustomerInfo,
        address: &DeliveryAddress,
        now: DateTime<Utc>,
    ) -> UpsertOutcome {
        let outcome = if let Some(existing) = self
            .addresses
            .iter_mut()
            .find(|saved| saved.address().same_place(address))
        {
            *existing = SavedAddress::from_parts(existing.id.clone(), contact, address, now);
            UpsertOutcome::Updated(existing.id.clone())
        } else {
            let id = AddressId::generate(now);
            self.addresses
                .insert(0, SavedAddress::from_parts(id.clone(), contact, address, now));
            UpsertOutcome::Inserted(id)
        };

        tracing::info!(outcome = ?outcome, "Saved delivery address");

        self.persist_list();
        self.selected = Some(outcome.id().clone());
        self.persist_selection();
        outcome
    }

    /// Make `id` the active address. Unknown ids are ignored and `false` is
    /// returned.
    pub fn select(&mut self, id: &AddressId) -> bool {
        if self.get(id).is_none() {
            tracing::debug!(address_id = %id, "Ignoring selection of unknown address");
            return false;
        }
        self.selected = Some(id.clone());
        self.persist_selection();
        true
    }

    /// Forget the active address.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.persist_selection();
    }

    /// Delete a saved address, clearing the selection if it was active.
    /// Unknown ids are ignored and `false` is returned.
    pub fn delete(&mut self, id: &AddressId) -> bool {
        let before = self.addresses.len();
        self.addresses.retain(|a| &a.id != id);
        if self.addresses.len() == before {
            return false;
        }

        self.persist_list();
        if self.selected.as_ref() == Some(id) {
            self.clear_selection();
        }
        true
    }

    fn persist_list(&self) {
        if let Err(e) = save(self.store.as_ref(), &self.addresses) {
            tracing::warn!(error = %e, "Failed to persist saved addresses");
        }
    }

    fn persist_selection(&self) {
        let result = match &self.selected {
            Some(id) => self.store.set(SELECTED_ADDRESS_KEY, id.as_str()),
            None => self.store.remove(SELECTED_ADDRESS_KEY),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist selected address");
        }
    }
}
