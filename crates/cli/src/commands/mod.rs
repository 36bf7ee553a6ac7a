//! CLI command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use monster_burger_checkout::CheckoutError;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod addresses;
pub mod cart;
pub mod checkout;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// An input or output file could not be accessed.
    #[error("Cannot access {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid YAML/JSON for the expected shape.
    #[error("Invalid file {path}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// The order cannot be submitted yet.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// No saved address has the given id.
    #[error("No saved address with id {0}")]
    UnknownAddress(String),
}

/// Read a YAML (or JSON) file into `T`.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let raw = fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| CommandError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
fn emit(text: &str) {
    println!("{text}");
}
