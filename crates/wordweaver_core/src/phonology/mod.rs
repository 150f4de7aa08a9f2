//! Phoneme catalog, phoneme values and user inventories.
//!
//! # Responsibility
//! - Hold the static mnemonic <-> IPA symbol tables.
//! - Build validated, per-category phoneme inventories from user input.
//!
//! # Invariants
//! - Catalog data is immutable after first use.
//! - Within one category a code maps to exactly one symbol and back.
//! - `PhonemeCategory::Consonant` is derived; no phoneme is stored under it
//!   directly.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod category;
pub mod inventory;
pub mod phoneme;

pub use catalog::{CatalogEntry, PhonemeCatalog};
pub use category::PhonemeCategory;
pub use inventory::{Inventory, InventoryEntry};
pub use phoneme::Phoneme;

pub type PhonologyResult<T> = Result<T, PhonologyError>;

/// Errors raised while resolving phonemes or building inventories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhonologyError {
    /// Code or symbol has no catalog entry in the requested category.
    UnknownPhoneme {
        text: String,
        category: PhonemeCategory,
    },
    /// Mixed or wrongly categorized inventory input.
    InvalidInventory(String),
    /// Catalog table declares the same code twice within a category.
    DuplicateCode {
        code: &'static str,
        category: PhonemeCategory,
    },
    /// Catalog table maps two codes to the same symbol within a category.
    DuplicateSymbol {
        symbol: &'static str,
        category: PhonemeCategory,
    },
}

impl Display for PhonologyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPhoneme { text, category } => {
                write!(f, "unknown {category} phoneme `{text}`")
            }
            Self::InvalidInventory(message) => write!(f, "invalid inventory: {message}"),
            Self::DuplicateCode { code, category } => {
                write!(f, "catalog declares {category} code `{code}` more than once")
            }
            Self::DuplicateSymbol { symbol, category } => {
                write!(
                    f,
                    "catalog maps more than one {category} code to symbol `{symbol}`"
                )
            }
        }
    }
}

impl Error for PhonologyError {}
