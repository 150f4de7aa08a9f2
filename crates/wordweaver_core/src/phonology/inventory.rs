//! Per-category phoneme inventories.
//!
//! # Responsibility
//! - Build inventories from tagged user input.
//! - Provide the add/remove/list operations used by inventory editors.
//!
//! # Invariants
//! - Each category bucket is ordered by insertion and duplicate-free.
//! - The `Consonant` bucket mirrors pulmonic and non-pulmonic insertions and
//!   is never written directly.

use super::catalog::PhonemeCatalog;
use super::category::PhonemeCategory;
use super::phoneme::Phoneme;
use super::{PhonologyError, PhonologyResult};
use std::collections::BTreeMap;

/// One raw inventory input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEntry {
    /// Mnemonic code still to resolve through the catalog.
    RawCode(String),
    /// Phoneme already resolved by the caller.
    Resolved(Phoneme),
}

impl From<&str> for InventoryEntry {
    fn from(value: &str) -> Self {
        Self::RawCode(value.to_string())
    }
}

impl From<Phoneme> for InventoryEntry {
    fn from(value: Phoneme) -> Self {
        Self::Resolved(value)
    }
}

/// Mapping from category to an ordered, duplicate-free phoneme list.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    buckets: BTreeMap<PhonemeCategory, Vec<Phoneme>>,
}

impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        PhonemeCategory::CONCRETE
            .iter()
            .all(|category| self.phonemes(*category) == other.phonemes(*category))
    }
}

impl Eq for Inventory {}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single-category inventory from tagged entries.
    ///
    /// # Contract
    /// - All `RawCode` entries: each is resolved for `category`.
    /// - All `Resolved` entries: each must already belong to `category`.
    /// - Mixed input is rejected.
    /// - Repeated phonemes are kept once, at their first position.
    ///
    /// # Errors
    /// - `UnknownPhoneme` for the first unresolvable code (no silent drop).
    /// - `InvalidInventory` for mixed input, wrong categories or a derived
    ///   target category.
    pub fn from_entries(
        catalog: &PhonemeCatalog,
        category: PhonemeCategory,
        entries: impl IntoIterator<Item = InventoryEntry>,
    ) -> PhonologyResult<Self> {
        ensure_concrete(category)?;
        let entries: Vec<InventoryEntry> = entries.into_iter().collect();

        let raw_count = entries
            .iter()
            .filter(|entry| matches!(entry, InventoryEntry::RawCode(_)))
            .count();
        if raw_count != 0 && raw_count != entries.len() {
            return Err(PhonologyError::InvalidInventory(format!(
                "{category} inventory mixes raw codes and resolved phonemes"
            )));
        }

        let mut inventory = Self::new();
        for entry in entries {
            let phoneme = match entry {
                InventoryEntry::RawCode(code) => catalog.resolve(code.trim(), category)?,
                InventoryEntry::Resolved(phoneme) => {
                    if phoneme.category() != category {
                        return Err(PhonologyError::InvalidInventory(format!(
                            "phoneme `{}` is a {}, expected {category}",
                            phoneme.symbol(),
                            phoneme.category()
                        )));
                    }
                    phoneme
                }
            };
            inventory.insert(phoneme)?;
        }
        Ok(inventory)
    }

    /// Builds a single-category inventory from mnemonic codes.
    pub fn from_codes<S: AsRef<str>>(
        catalog: &PhonemeCatalog,
        category: PhonemeCategory,
        codes: &[S],
    ) -> PhonologyResult<Self> {
        Self::from_entries(
            catalog,
            category,
            codes
                .iter()
                .map(|code| InventoryEntry::RawCode(code.as_ref().to_string())),
        )
    }

    /// Adds a phoneme at the end of its category bucket.
    ///
    /// Returns `Ok(false)` when the phoneme is already present.
    pub fn insert(&mut self, phoneme: Phoneme) -> PhonologyResult<bool> {
        ensure_concrete(phoneme.category())?;
        let bucket = self.buckets.entry(phoneme.category()).or_default();
        if bucket.contains(&phoneme) {
            return Ok(false);
        }
        bucket.push(phoneme.clone());
        if phoneme.category().satisfies(PhonemeCategory::Consonant) {
            self.buckets
                .entry(PhonemeCategory::Consonant)
                .or_default()
                .push(phoneme);
        }
        Ok(true)
    }

    /// Removes a phoneme from its bucket. Returns whether it was present.
    pub fn remove(&mut self, phoneme: &Phoneme) -> PhonologyResult<bool> {
        ensure_concrete(phoneme.category())?;
        let removed = remove_from(self.buckets.get_mut(&phoneme.category()), phoneme);
        if removed && phoneme.category().satisfies(PhonemeCategory::Consonant) {
            remove_from(self.buckets.get_mut(&PhonemeCategory::Consonant), phoneme);
        }
        Ok(removed)
    }

    /// Adds a phoneme given by mnemonic code or symbol.
    pub fn add_by_text(
        &mut self,
        catalog: &PhonemeCatalog,
        text: &str,
        category: PhonemeCategory,
    ) -> PhonologyResult<bool> {
        ensure_concrete(category)?;
        let phoneme = catalog.lookup(text, category)?;
        self.insert(phoneme)
    }

    /// Removes a phoneme given by mnemonic code or symbol.
    pub fn remove_by_text(
        &mut self,
        catalog: &PhonemeCatalog,
        text: &str,
        category: PhonemeCategory,
    ) -> PhonologyResult<bool> {
        ensure_concrete(category)?;
        let phoneme = catalog.lookup(text, category)?;
        self.remove(&phoneme)
    }

    /// Inserts every phoneme of `other`, keeping this inventory's order first.
    pub fn merge(&mut self, other: &Inventory) -> PhonologyResult<()> {
        for category in PhonemeCategory::CONCRETE {
            for phoneme in other.phonemes(category) {
                self.insert(phoneme.clone())?;
            }
        }
        Ok(())
    }

    /// Replaces one concrete category bucket with `phonemes`.
    pub fn replace_category(
        &mut self,
        category: PhonemeCategory,
        phonemes: &Inventory,
    ) -> PhonologyResult<()> {
        ensure_concrete(category)?;
        for phoneme in self.phonemes(category).to_vec() {
            self.remove(&phoneme)?;
        }
        for phoneme in phonemes.phonemes(category) {
            self.insert(phoneme.clone())?;
        }
        Ok(())
    }

    /// Ordered phonemes of `category`; empty slice when none.
    pub fn phonemes(&self, category: PhonemeCategory) -> &[Phoneme] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mnemonic codes of `category`, in order.
    pub fn codes(&self, category: PhonemeCategory) -> Vec<&str> {
        self.phonemes(category).iter().map(Phoneme::code).collect()
    }

    /// IPA symbols of `category`, in order.
    pub fn symbols(&self, category: PhonemeCategory) -> Vec<&str> {
        self.phonemes(category).iter().map(Phoneme::symbol).collect()
    }

    pub fn contains(&self, phoneme: &Phoneme) -> bool {
        self.phonemes(phoneme.category()).contains(phoneme)
    }

    pub fn len(&self, category: PhonemeCategory) -> usize {
        self.phonemes(category).len()
    }

    /// Returns whether every concrete bucket is empty.
    pub fn is_empty(&self) -> bool {
        PhonemeCategory::CONCRETE
            .iter()
            .all(|category| self.phonemes(*category).is_empty())
    }
}

fn ensure_concrete(category: PhonemeCategory) -> PhonologyResult<()> {
    if category.is_concrete() {
        Ok(())
    } else {
        Err(PhonologyError::InvalidInventory(format!(
            "{category} is a derived bucket and cannot be edited directly"
        )))
    }
}

fn remove_from(bucket: Option<&mut Vec<Phoneme>>, phoneme: &Phoneme) -> bool {
    match bucket {
        Some(bucket) => match bucket.iter().position(|candidate| candidate == phoneme) {
            Some(index) => {
                bucket.remove(index);
                true
            }
            None => false,
        },
        None => false,
    }
}
