//! Generated syllables and words.

use crate::phonology::Phoneme;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Ordered phonemes of one generated syllable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Syllable {
    phonemes: Vec<Phoneme>,
}

impl Syllable {
    pub fn new(phonemes: Vec<Phoneme>) -> Self {
        Self { phonemes }
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    pub fn len(&self) -> usize {
        self.phonemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }

    /// Concatenated phoneme symbols.
    pub fn render(&self) -> String {
        self.phonemes.iter().map(Phoneme::symbol).collect()
    }
}

impl Display for Syllable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for phoneme in &self.phonemes {
            f.write_str(phoneme.symbol())?;
        }
        Ok(())
    }
}

/// Ordered syllables of one generated word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Word {
    syllables: Vec<Syllable>,
}

impl Word {
    pub fn new(syllables: Vec<Syllable>) -> Self {
        Self { syllables }
    }

    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    /// Total phoneme count across all syllables.
    pub fn phoneme_count(&self) -> usize {
        self.syllables.iter().map(Syllable::len).sum()
    }

    /// Surface form, syllable-major, with `separator` between syllables.
    pub fn render(&self, separator: &str) -> String {
        self.syllables
            .iter()
            .map(Syllable::render)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(""))
    }
}

#[cfg(test)]
mod tests {
    use super::{Syllable, Word};
    use crate::phonology::{PhonemeCatalog, PhonemeCategory};

    #[test]
    fn render_joins_syllables_with_separator() {
        let catalog = PhonemeCatalog::builtin();
        let ng = catalog.resolve("ng", PhonemeCategory::PulmonicConsonant).unwrap();
        let a = catalog.resolve("a", PhonemeCategory::Vowel).unwrap();
        let word = Word::new(vec![
            Syllable::new(vec![ng.clone(), a.clone()]),
            Syllable::new(vec![a]),
            Syllable::default(),
        ]);

        assert_eq!(word.render(""), "ŋaa");
        assert_eq!(word.render("."), "ŋa.a.");
        assert_eq!(word.to_string(), "ŋaa");
        assert_eq!(word.phoneme_count(), 3);
    }
}
