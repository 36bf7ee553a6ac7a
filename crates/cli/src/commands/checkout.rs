//! Checkout command: fill the form from an order file, then build or submit
//! the order.
//!
//! An order file looks like:
//!
//! ```yaml
//! cart:                 # the handoff written by `mb-cli cart export`
//!   items:
//!     - { id: 1, name: Monster Burger, price: "32", qty: 1 }
//!   deliveryFee: "5"
//! savedAddress: 1700000000000_3fa2c1   # optional, reuse a saved address
//! customer: { fullName: Ana, phone: "64999990000" }
//! address: { cep: "75800000", street: Rua A, number: "12", district: Centro }
//! payment: { method: CASH, changeFor: "50" }
//! ```
//!
//! `address` always means a new address; `customer` alone overrides the
//! contact of whatever address is active.
//!
//! The form works on an in-memory copy of the address book. The copy is only
//! written back to the storage file after a successful submission, so a dry
//! run or a refused order leaves the file as it was.

use std::fmt::Write as _;
use std::path::Path;

use monster_burger_checkout::address_book::{ADDRESSES_KEY, SELECTED_ADDRESS_KEY};
use monster_burger_checkout::{
    AddressBook, Checkout, CheckoutConfig, CheckoutHandoff, CheckoutSteps, CustomerInfo,
    DeliveryAddress, JsonFileStore, KeyValueStore, MemoryStore, PaymentSelection, UpsertOutcome,
};
use monster_burger_core::AddressId;
use serde::Deserialize;

use super::{CommandError, emit, read_document};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderFile {
    cart: CheckoutHandoff,
    #[serde(default)]
    saved_address: Option<AddressId>,
    #[serde(default)]
    customer: Option<CustomerInfo>,
    #[serde(default)]
    address: Option<DeliveryAddress>,
    #[serde(default)]
    payment: PaymentSelection,
}

/// Run the checkout for an order file.
pub fn run(order: &Path, dry_run: bool, config: &CheckoutConfig) -> Result<(), CommandError> {
    let file: OrderFile = read_document(order)?;
    let persistent = JsonFileStore::new(config.storage_path.clone());
    let draft = MemoryStore::new();
    copy_book(&persistent, &draft);

    let book = AddressBook::open(draft.clone());
    let mut checkout = Checkout::with_address_book(file.cart, config.messaging.clone(), book);

    fill(&mut checkout, file.saved_address, file.customer, file.address, &file.payment)?;

    emit(&render_steps(&checkout.steps()));

    if dry_run {
        emit(&checkout.message());
        emit(&checkout.link());
        return Ok(());
    }

    let submission = checkout.submit()?;
    copy_book(&draft, &persistent);
    emit(&submission.message);
    emit(&submission.link);
    if let Some(outcome) = &submission.saved_address {
        emit(&describe_outcome(outcome));
    }
    Ok(())
}

/// Copy both address-book keys from `from` to `to`. Keys missing or
/// unreadable in `from` are removed from `to`; failures are logged.
fn copy_book(from: &dyn KeyValueStore, to: &dyn KeyValueStore) {
    for key in [ADDRESSES_KEY, SELECTED_ADDRESS_KEY] {
        let value = from.get(key).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Unreadable address book entry");
            None
        });
        let result = match value {
            Some(value) => to.set(key, &value),
            None => to.remove(key),
        };
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to copy address book entry");
        }
    }
}

fn fill(
    checkout: &mut Checkout,
    saved_address: Option<AddressId>,
    customer: Option<CustomerInfo>,
    address: Option<DeliveryAddress>,
    payment: &PaymentSelection,
) -> Result<(), CommandError> {
    if let Some(id) = saved_address {
        if !checkout.select_saved_address(&id) {
            return Err(CommandError::UnknownAddress(id.into_inner()));
        }
    }

    if let Some(address) = address {
        checkout.use_new_address();
        checkout.set_postal_code(&address.postal_code);
        checkout.set_street(&address.street);
        checkout.set_number(&address.number);
        checkout.set_district(&address.district);
        checkout.set_complement(&address.complement);
    }

    if let Some(customer) = customer {
        checkout.set_full_name(&customer.full_name);
        checkout.set_phone(&customer.phone);
    }

    checkout.select_payment(payment.method);
    checkout.set_change_for(&payment.change_for);
    Ok(())
}

fn render_steps(steps: &CheckoutSteps) -> String {
    let mark = |done: bool| if done { "ok" } else { "pendente" };
    let mut out = String::new();
    let _ = writeln!(out, "Seus dados: {}", mark(steps.contact));
    let _ = writeln!(out, "Entrega:    {}", mark(steps.address));
    let _ = write!(out, "Pagamento:  {}", mark(steps.payment));
    out
}

fn describe_outcome(outcome: &UpsertOutcome) -> String {
    match outcome {
        UpsertOutcome::Inserted(id) => format!("Endereço salvo ({id})"),
        UpsertOutcome::Updated(id) => format!("Endereço atualizado ({id})"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use monster_burger_checkout::{MessagingTarget, Step};
    use monster_burger_core::PaymentMethod;
    use tempfile::{TempDir, tempdir};

    use super::*;

    const ORDER: &str = r#"
cart:
  items:
    - { id: 1, name: X, price: "10", qty: 2 }
  deliveryFee: "5"
customer: { fullName: Ana, phone: "64999990000" }
address: { cep: "75800000", street: Rua A, number: "12", district: Centro }
payment: { method: CASH, changeFor: "50" }
"#;

    fn checkout_for(file: OrderFile) -> Checkout {
        let book = AddressBook::open(MemoryStore::new());
        let mut checkout =
            Checkout::with_address_book(file.cart, MessagingTarget::default(), book);
        fill(
            &mut checkout,
            file.saved_address,
            file.customer,
            file.address,
            &file.payment,
        )
        .unwrap();
        checkout
    }

    #[test]
    fn test_order_file_fills_form() {
        let file: OrderFile = serde_yaml::from_str(ORDER).unwrap();
        let checkout = checkout_for(file);

        assert_eq!(checkout.customer().phone, "(64) 99999-0000");
        assert_eq!(checkout.address().postal_code, "75800-000");
        assert_eq!(checkout.payment().method, PaymentMethod::Cash);
        assert!(checkout.can_submit());
    }

    #[test]
    fn test_missing_change_blocks_submission() {
        let file: OrderFile =
            serde_yaml::from_str(&ORDER.replace("changeFor: \"50\"", "changeFor: \"\"")).unwrap();
        let mut checkout = checkout_for(file);

        let err = checkout.submit().unwrap_err();
        assert_eq!(
            err,
            monster_burger_checkout::CheckoutError::Incomplete {
                missing: vec![Step::Payment]
            }
        );
    }

    #[test]
    fn test_unknown_saved_address_is_an_error() {
        let file: OrderFile =
            serde_yaml::from_str(&format!("{ORDER}savedAddress: nope\n")).unwrap();
        let book = AddressBook::open(MemoryStore::new());
        let mut checkout =
            Checkout::with_address_book(file.cart, MessagingTarget::default(), book);

        let result = fill(
            &mut checkout,
            file.saved_address,
            file.customer,
            file.address,
            &file.payment,
        );
        assert!(matches!(result, Err(CommandError::UnknownAddress(id)) if id == "nope"));
    }

    #[test]
    fn test_render_steps() {
        let steps = CheckoutSteps {
            contact: true,
            address: false,
            payment: true,
        };
        assert_eq!(
            render_steps(&steps),
            "Seus dados: ok\nEntrega:    pendente\nPagamento:  ok"
        );
    }

    fn config_in(dir: &TempDir) -> CheckoutConfig {
        CheckoutConfig {
            storage_path: dir.path().join("storage.json"),
            ..CheckoutConfig::default()
        }
    }

    fn write_order(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn stored_book(config: &CheckoutConfig) -> (Option<String>, Option<String>) {
        let store = JsonFileStore::new(config.storage_path.clone());
        (
            store.get(ADDRESSES_KEY).unwrap(),
            store.get(SELECTED_ADDRESS_KEY).unwrap(),
        )
    }

    #[test]
    fn test_submit_saves_address_to_file() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir);

        run(&write_order(&dir, "order.yaml", ORDER), false, &config).unwrap();

        let (list, selected) = stored_book(&config);
        assert!(list.unwrap().contains("Rua A"));
        assert!(selected.is_some());
    }

    #[test]
    fn test_dry_run_and_refused_submit_leave_file_untouched() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir);
        run(&write_order(&dir, "first.yaml", ORDER), false, &config).unwrap();
        let before = stored_book(&config);

        let other = ORDER.replace("Rua A", "Rua B");
        run(&write_order(&dir, "dry.yaml", &other), true, &config).unwrap();
        assert_eq!(stored_book(&config), before);

        let refused = other.replace("changeFor: \"50\"", "changeFor: \"\"");
        let result = run(&write_order(&dir, "refused.yaml", &refused), false, &config);
        assert!(matches!(result, Err(CommandError::Checkout(_))));
        assert_eq!(stored_book(&config), before);
    }
}
