//! Cart commands: show a cart with its totals, or export its checkout handoff.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use monster_burger_checkout::{Cart, CartSnapshot, CheckoutConfig, LineItem};
use monster_burger_core::{ItemId, Price};
use serde::Deserialize;

use super::{CommandError, emit, read_document};

/// A cart as written in a file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartFile {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default, alias = "orderObs")]
    note: Option<String>,
}

/// Quantity edits applied before showing a cart.
#[derive(Debug, Default)]
pub struct Edits {
    pub increment: Vec<u32>,
    pub decrement: Vec<u32>,
    pub remove: Vec<u32>,
}

/// Print a cart's items and totals.
pub fn show(
    path: Option<&Path>,
    edits: &Edits,
    config: &CheckoutConfig,
) -> Result<(), CommandError> {
    let mut cart = load_cart(path, config)?;

    for id in &edits.increment {
        cart.increment(ItemId::new(*id));
    }
    for id in &edits.decrement {
        cart.decrement(ItemId::new(*id));
    }
    for id in &edits.remove {
        cart.remove(ItemId::new(*id));
    }

    emit(&render(&cart.snapshot()));
    Ok(())
}

/// Write the checkout handoff for a cart as pretty JSON.
pub fn export(
    path: Option<&Path>,
    note: Option<String>,
    out: Option<&Path>,
    config: &CheckoutConfig,
) -> Result<(), CommandError> {
    let mut cart = load_cart(path, config)?;
    if let Some(note) = note {
        cart.set_note(note);
    }

    let json = serde_json::to_string_pretty(&cart.handoff())?;
    match out {
        Some(out) => {
            fs::write(out, json).map_err(|source| CommandError::Io {
                path: out.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %out.display(), items = cart.items().len(), "Handoff written");
        }
        None => emit(&json),
    }
    Ok(())
}

fn load_cart(path: Option<&Path>, config: &CheckoutConfig) -> Result<Cart, CommandError> {
    let Some(path) = path else {
        return Ok(demo_cart(config.delivery_fee));
    };
    let file: CartFile = read_document(path)?;

    let mut cart = Cart::new(config.delivery_fee);
    for item in file.items {
        let id = item.id;
        if !cart.add(item) {
            tracing::warn!(%id, "Duplicate item id in cart file, keeping the first");
        }
    }
    if let Some(note) = file.note {
        cart.set_note(note);
    }
    Ok(cart)
}

/// The cart a new session starts with.
fn demo_cart(delivery_fee: Price) -> Cart {
    Cart::with_items(
        delivery_fee,
        [
            LineItem::new(ItemId::new(1), "Monster Burger", Price::from_reais(32), 1)
                .with_subtitle("+ Bacon Extra, + Cheddar Extra")
                .with_note("Ponto: Ao ponto")
                .with_image(
                    "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=200&q=80",
                ),
            LineItem::new(ItemId::new(2), "Batata Rústica c/ Cheddar", Price::from_reais(18), 1)
                .with_subtitle("Porção individual")
                .with_image(
                    "https://images.unsplash.com/photo-1573080496219-bb080dd4f877?w=200&q=80",
                ),
            LineItem::new(ItemId::new(3), "Coca-Cola Lata", Price::from_reais(6), 2)
                .with_subtitle("350ml")
                .with_image(
                    "https://images.unsplash.com/photo-1554866585-cd94860890b7?w=200&q=80",
                ),
        ],
    )
}

fn render(snapshot: &CartSnapshot) -> String {
    let mut out = String::new();
    if snapshot.is_empty() {
        out.push_str("Seu carrinho está vazio.\n");
    }
    for item in &snapshot.items {
        let _ = writeln!(
            out,
            "[{}] {}x {}  {}",
            item.id,
            item.quantity,
            item.name,
            item.line_total()
        );
        if let Some(subtitle) = &item.subtitle {
            let _ = writeln!(out, "      {subtitle}");
        }
        if let Some(note) = &item.note {
            let _ = writeln!(out, "      Obs: {note}");
        }
    }
    let _ = writeln!(out, "Subtotal: {}", snapshot.subtotal);
    let _ = writeln!(out, "Entrega:  {}", snapshot.delivery_fee);
    let _ = write!(out, "Total:    {}", snapshot.total);
    out
}
