//! Saved-address commands.

use monster_burger_checkout::{AddressBook, CheckoutConfig, JsonFileStore};
use monster_burger_core::AddressId;

use super::{CommandError, emit};

fn open(config: &CheckoutConfig) -> AddressBook {
    AddressBook::open(JsonFileStore::new(config.storage_path.clone()))
}

/// Print saved addresses, newest first. The active one is marked with `*`.
pub fn list(config: &CheckoutConfig) {
    emit(&render(&open(config)));
}

/// Make an address the active one.
pub fn select(id: &str, config: &CheckoutConfig) -> Result<(), CommandError> {
    let mut book = open(config);
    if !book.select(&AddressId::from(id)) {
        return Err(CommandError::UnknownAddress(id.to_string()));
    }
    tracing::info!(id, "Address selected");
    Ok(())
}

/// Forget the active address.
pub fn clear(config: &CheckoutConfig) {
    open(config).clear_selection();
    tracing::info!("Address selection cleared");
}

/// Delete a saved address.
pub fn delete(id: &str, config: &CheckoutConfig) -> Result<(), CommandError> {
    let mut book = open(config);
    if !book.delete(&AddressId::from(id)) {
        return Err(CommandError::UnknownAddress(id.to_string()));
    }
    tracing::info!(id, "Address deleted");
    Ok(())
}

fn render(book: &AddressBook) -> String {
    if book.is_empty() {
        return "Nenhum endereço salvo.".to_string();
    }
    book.addresses()
        .iter()
        .map(|saved| {
            let marker = if book.selected_id() == Some(&saved.id) { '*' } else { ' ' };
            format!(
                "{marker} {}  {}  {} {}",
                saved.id,
                saved.summary(),
                saved.full_name,
                saved.phone
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use monster_burger_checkout::{CustomerInfo, DeliveryAddress, MemoryStore};

    use super::*;

    #[test]
    fn test_render_empty_book() {
        let book = AddressBook::open(MemoryStore::new());
        assert_eq!(render(&book), "Nenhum endereço salvo.");
    }

    #[test]
    fn test_render_marks_selection() {
        let mut book = AddressBook::open(MemoryStore::new());
        let contact = CustomerInfo {
            full_name: "Ana".into(),
            phone: "(64) 99999-0000".into(),
        };
        let first = DeliveryAddress {
            postal_code: "75800-000".into(),
            street: "Rua A".into(),
            number: "12".into(),
            district: "Centro".into(),
            complement: String::new(),
        };
        let second = DeliveryAddress {
            street: "Rua B".into(),
            ..first.clone()
        };
        let older = Utc.timestamp_millis_opt(1_000).unwrap();
        let newer = Utc.timestamp_millis_opt(2_000).unwrap();
        let first_id = book.upsert_at(&contact, &first, older).id().clone();
        book.upsert_at(&contact, &second, newer);
        assert!(book.select(&first_id));

        let text = render(&book);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.first().unwrap().starts_with("  "));
        assert!(lines.first().unwrap().contains("Rua B, 12 - Centro (75800-000)"));
        assert!(lines.get(1).unwrap().starts_with(&format!("* {first_id}")));
    }
}
