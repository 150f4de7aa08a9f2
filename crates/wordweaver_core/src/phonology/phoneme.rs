//! Resolved phoneme value.
//!
//! # Invariants
//! - A `Phoneme` only exists for a code/symbol pair present in a catalog.
//! - Equality and hashing use `(symbol, category)`; the mnemonic code is
//!   display metadata.

use super::catalog::PhonemeCatalog;
use super::category::PhonemeCategory;
use super::PhonologyResult;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// One phoneme resolved through the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Phoneme {
    code: String,
    category: PhonemeCategory,
    symbol: String,
}

impl Phoneme {
    /// Resolves `code` in `category` through `catalog`.
    ///
    /// # Errors
    /// - `PhonologyError::UnknownPhoneme` when the code is absent.
    pub fn resolve(
        catalog: &PhonemeCatalog,
        code: &str,
        category: PhonemeCategory,
    ) -> PhonologyResult<Self> {
        catalog.resolve(code, category)
    }

    pub(crate) fn from_parts(
        code: impl Into<String>,
        category: PhonemeCategory,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            category,
            symbol: symbol.into(),
        }
    }

    /// Mnemonic ASCII code, e.g. `ng`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Concrete category this phoneme belongs to.
    pub fn category(&self) -> PhonemeCategory {
        self.category
    }

    /// IPA symbol or short cluster, e.g. `ŋ`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl PartialEq for Phoneme {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.category == other.category
    }
}

impl Eq for Phoneme {}

impl Hash for Phoneme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.category.hash(state);
    }
}

impl Display for Phoneme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::Phoneme;
    use crate::phonology::PhonemeCategory;

    #[test]
    fn equality_ignores_code_but_not_category() {
        let a = Phoneme::from_parts("x1", PhonemeCategory::PulmonicConsonant, "x");
        let b = Phoneme::from_parts("x2", PhonemeCategory::PulmonicConsonant, "x");
        let c = Phoneme::from_parts("x1", PhonemeCategory::Vowel, "x");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
