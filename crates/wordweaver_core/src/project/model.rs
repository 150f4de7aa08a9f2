//! Project aggregate: name, inventories and lexicon.
//!
//! # Responsibility
//! - Own the complete language state persisted in a `.wwproj` file.
//! - Enforce the length limits imposed by the binary layout.
//!
//! # Invariants
//! - `validate()` is the single gate for file-format limits; the codec calls
//!   it before writing any byte.
//! - Inventory buckets stay duplicate-free (enforced by `Inventory`).

use crate::phonology::{Inventory, Phoneme, PhonemeCatalog, PhonemeCategory, PhonologyResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Maximum UTF-8 byte length of a project name (2-byte length prefix).
pub const MAX_NAME_BYTES: usize = u16::MAX as usize;
/// Maximum entries per inventory category (1-byte count).
pub const MAX_CATEGORY_PHONEMES: usize = u8::MAX as usize;
/// Maximum lexicon word count (3-byte count).
pub const MAX_LEXICON_WORDS: usize = 0x00FF_FFFF;
/// Maximum UTF-8 byte length of one lexicon word (1-byte length prefix).
pub const MAX_WORD_BYTES: usize = u8::MAX as usize;

/// Starter pulmonic consonants for new projects.
pub const DEFAULT_PULMONIC_CODES: &[&str] = &["p", "b", "n", "t", "d", "k", "f", "h", "rt", "l"];
/// Starter vowels for new projects.
pub const DEFAULT_VOWEL_CODES: &[&str] = &["a", "e", "i", "o", "u"];

/// Limit violations detected by [`Project::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    NameTooLong { bytes: usize },
    TooManyPhonemes { category: PhonemeCategory, count: usize },
    LexiconTooLarge { count: usize },
    WordTooLong { index: usize, bytes: usize },
    EmptyWord { index: usize },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooLong { bytes } => write!(
                f,
                "project name is {bytes} bytes; at most {MAX_NAME_BYTES} are allowed"
            ),
            Self::TooManyPhonemes { category, count } => write!(
                f,
                "{category} inventory has {count} phonemes; at most {MAX_CATEGORY_PHONEMES} are allowed"
            ),
            Self::LexiconTooLarge { count } => write!(
                f,
                "lexicon has {count} words; at most {MAX_LEXICON_WORDS} are allowed"
            ),
            Self::WordTooLong { index, bytes } => write!(
                f,
                "lexicon word #{index} is {bytes} bytes; at most {MAX_WORD_BYTES} are allowed"
            ),
            Self::EmptyWord { index } => write!(f, "lexicon word #{index} is empty"),
        }
    }
}

impl Error for ProjectValidationError {}

/// In-memory language project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    file: Option<PathBuf>,
    inventory: Inventory,
    lexicon: Vec<String>,
}

impl Project {
    /// Creates an empty project with no associated file.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            inventory: Inventory::new(),
            lexicon: Vec::new(),
        }
    }

    /// Creates a project seeded with the starter inventory.
    pub fn with_defaults(catalog: &PhonemeCatalog, name: impl Into<String>) -> PhonologyResult<Self> {
        let mut inventory = Inventory::from_codes(
            catalog,
            PhonemeCategory::PulmonicConsonant,
            DEFAULT_PULMONIC_CODES,
        )?;
        inventory.merge(&Inventory::from_codes(
            catalog,
            PhonemeCategory::Vowel,
            DEFAULT_VOWEL_CODES,
        )?)?;
        Ok(Self::new(name).with_inventory(inventory))
    }

    /// Replaces the inventory, builder style.
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Replaces the lexicon, builder style. Limits are checked on save.
    pub fn with_lexicon<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lexicon = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Binds or clears the save target.
    pub fn set_file(&mut self, file: Option<PathBuf>) {
        self.file = file;
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory access for editing operations.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn pulmonic_consonants(&self) -> &[Phoneme] {
        self.inventory.phonemes(PhonemeCategory::PulmonicConsonant)
    }

    pub fn non_pulmonic_consonants(&self) -> &[Phoneme] {
        self.inventory
            .phonemes(PhonemeCategory::NonPulmonicConsonant)
    }

    pub fn vowels(&self) -> &[Phoneme] {
        self.inventory.phonemes(PhonemeCategory::Vowel)
    }

    pub fn lexicon(&self) -> &[String] {
        &self.lexicon
    }

    /// Appends a word unless it is already present.
    ///
    /// # Errors
    /// - `EmptyWord`, `WordTooLong` or `LexiconTooLarge` when the word would
    ///   make the project unsavable.
    pub fn add_word(&mut self, word: impl Into<String>) -> Result<bool, ProjectValidationError> {
        let word = word.into();
        let index = self.lexicon.len();
        validate_word(index, &word)?;
        if self.lexicon.contains(&word) {
            return Ok(false);
        }
        if index >= MAX_LEXICON_WORDS {
            return Err(ProjectValidationError::LexiconTooLarge { count: index + 1 });
        }
        self.lexicon.push(word);
        Ok(true)
    }

    /// Removes a word. Returns whether it was present.
    pub fn remove_word(&mut self, word: &str) -> bool {
        match self.lexicon.iter().position(|candidate| candidate == word) {
            Some(index) => {
                self.lexicon.remove(index);
                true
            }
            None => false,
        }
    }

    /// Checks every limit of the on-disk layout.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.len() > MAX_NAME_BYTES {
            return Err(ProjectValidationError::NameTooLong {
                bytes: self.name.len(),
            });
        }
        for category in PhonemeCategory::CONCRETE {
            let count = self.inventory.len(category);
            if count > MAX_CATEGORY_PHONEMES {
                return Err(ProjectValidationError::TooManyPhonemes { category, count });
            }
        }
        if self.lexicon.len() > MAX_LEXICON_WORDS {
            return Err(ProjectValidationError::LexiconTooLarge {
                count: self.lexicon.len(),
            });
        }
        for (index, word) in self.lexicon.iter().enumerate() {
            validate_word(index, word)?;
        }
        Ok(())
    }
}

fn validate_word(index: usize, word: &str) -> Result<(), ProjectValidationError> {
    if word.is_empty() {
        return Err(ProjectValidationError::EmptyWord { index });
    }
    if word.len() > MAX_WORD_BYTES {
        return Err(ProjectValidationError::WordTooLong {
            index,
            bytes: word.len(),
        });
    }
    Ok(())
}
