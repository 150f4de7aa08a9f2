//! Constrained syllable and word generation.
//!
//! # Responsibility
//! - Model syllable templates as ordered constraint slots.
//! - Sample syllables and words from a bound inventory with an injected RNG.
//!
//! # Invariants
//! - Every category referenced by a bound pattern is non-empty in the
//!   inventory; checked when binding, never during generation.
//! - The inventory is borrowed immutably for the generator's lifetime.

use crate::phonology::PhonemeCategory;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod constraint;
pub mod engine;
pub mod settings;
pub mod word;

pub use constraint::{ConstraintPattern, PhonemeConstraint};
pub use engine::{Generator, Syllables};
pub use settings::GenerationSettings;
pub use word::{Syllable, Word};

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// A pattern references a category with no phonemes in the inventory.
    EmptyCategory(PhonemeCategory),
    /// Template text could not be parsed into a constraint pattern.
    InvalidPattern(String),
}

impl Display for GeneratorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory(category) => {
                write!(f, "inventory has no phonemes of category {category}")
            }
            Self::InvalidPattern(message) => write!(f, "invalid syllable pattern: {message}"),
        }
    }
}

impl Error for GeneratorError {}
