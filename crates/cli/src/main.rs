//! Monster Burger CLI - Cart, checkout and saved-address tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the demo cart, or a cart file, with its totals
//! mb-cli cart show
//! mb-cli cart show --cart cart.yaml --increment 3 --remove 2
//!
//! # Turn a cart file into the handoff a checkout reads
//! mb-cli cart export --cart cart.yaml --note "Sem cebola" --out handoff.json
//!
//! # Validate an order file and print the WhatsApp link (saves the address)
//! mb-cli checkout --order order.yaml
//!
//! # Manage saved addresses
//! mb-cli addresses list
//! mb-cli addresses select 1700000000000_3fa2c1
//! mb-cli addresses clear
//! mb-cli addresses delete 1700000000000_3fa2c1
//! ```
//!
//! # Commands
//!
//! - `cart` - Show or export a cart
//! - `checkout` - Validate an order and build the WhatsApp message
//! - `addresses` - List, select, clear or delete saved addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use monster_burger_checkout::CheckoutConfig;

mod commands;

#[derive(Parser)]
#[command(name = "mb-cli")]
#[command(version, about = "Monster Burger ordering tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or export a cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate an order file and build the WhatsApp message and link
    Checkout {
        /// Order file (YAML or JSON)
        #[arg(short, long)]
        order: PathBuf,

        /// Print the message without saving the address
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage saved delivery addresses
    Addresses {
        #[command(subcommand)]
        action: AddressAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print items and totals
    Show {
        /// Cart file (YAML or JSON); the demo menu is used when omitted
        #[arg(short, long)]
        cart: Option<PathBuf>,

        /// Add one unit of an item (repeatable)
        #[arg(long, value_name = "ID")]
        increment: Vec<u32>,

        /// Remove one unit of an item, never below 1 (repeatable)
        #[arg(long, value_name = "ID")]
        decrement: Vec<u32>,

        /// Remove an item (repeatable)
        #[arg(long, value_name = "ID")]
        remove: Vec<u32>,
    },
    /// Write the checkout handoff as JSON
    Export {
        /// Cart file (YAML or JSON); the demo menu is used when omitted
        #[arg(short, long)]
        cart: Option<PathBuf>,

        /// Order note, overriding the one in the cart file
        #[arg(short, long)]
        note: Option<String>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List saved addresses, newest first
    List,
    /// Make an address the active one
    Select {
        /// Address id
        id: String,
    },
    /// Forget the active address
    Clear,
    /// Delete a saved address
    Delete {
        /// Address id
        id: String,
    },
}

fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "monster_burger_cli=info,monster_burger_checkout=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CheckoutConfig::from_env()?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show {
                cart,
                increment,
                decrement,
                remove,
            } => {
                let edits = commands::cart::Edits {
                    increment,
                    decrement,
                    remove,
                };
                commands::cart::show(cart.as_deref(), &edits, &config)?;
            }
            CartAction::Export { cart, note, out } => {
                commands::cart::export(cart.as_deref(), note, out.as_deref(), &config)?;
            }
        },
        Commands::Checkout { order, dry_run } => {
            commands::checkout::run(&order, dry_run, &config)?;
        }
        Commands::Addresses { action } => match action {
            AddressAction::List => commands::addresses::list(&config),
            AddressAction::Select { id } => commands::addresses::select(&id, &config)?,
            AddressAction::Clear => commands::addresses::clear(&config),
            AddressAction::Delete { id } => commands::addresses::delete(&id, &config)?,
        },
    }
    Ok(())
}
