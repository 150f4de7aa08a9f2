//! Syllable constraint slots and patterns.
//!
//! Template notation: one letter per slot (`C` consonant, `P` pulmonic
//! consonant, `N` non-pulmonic consonant, `V` vowel); a letter in
//! parentheses is optional. `"(C)V(C)"` is an optional onset, a nucleus and
//! an optional coda.

use super::{GeneratorError, GeneratorResult};
use crate::phonology::PhonemeCategory;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\s*(?:\(\s*[A-Za-z]\s*\)|[A-Za-z]))+\s*$").expect("valid template regex")
});
static SLOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*([A-Za-z])\s*\)|([A-Za-z])").expect("valid slot regex"));

/// One required or optional slot in a syllable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhonemeConstraint {
    pub category: PhonemeCategory,
    #[serde(default)]
    pub optional: bool,
}

impl PhonemeConstraint {
    /// Slot that is always filled.
    pub fn required(category: PhonemeCategory) -> Self {
        Self {
            category,
            optional: false,
        }
    }

    /// Slot filled about half of the time.
    pub fn optional(category: PhonemeCategory) -> Self {
        Self {
            category,
            optional: true,
        }
    }
}

impl Display for PhonemeConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let letter = category_letter(self.category);
        if self.optional {
            write!(f, "({letter})")
        } else {
            write!(f, "{letter}")
        }
    }
}

/// Ordered slots describing one syllable structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintPattern {
    slots: Vec<PhonemeConstraint>,
}

impl ConstraintPattern {
    pub fn new(slots: Vec<PhonemeConstraint>) -> Self {
        Self { slots }
    }

    /// Parses template notation such as `"(C)V(C)"`.
    ///
    /// # Errors
    /// - `InvalidPattern` for empty input, unbalanced parentheses or unknown
    ///   slot letters.
    pub fn parse(template: &str) -> GeneratorResult<Self> {
        if !TEMPLATE_RE.is_match(template) {
            return Err(GeneratorError::InvalidPattern(format!(
                "`{}` is not a slot template",
                template.trim()
            )));
        }

        let mut slots = Vec::new();
        for captures in SLOT_RE.captures_iter(template) {
            let (letter, optional) = match (captures.get(1), captures.get(2)) {
                (Some(inner), _) => (inner.as_str(), true),
                (None, Some(bare)) => (bare.as_str(), false),
                (None, None) => continue,
            };
            let category = letter_category(letter).ok_or_else(|| {
                GeneratorError::InvalidPattern(format!(
                    "unknown slot letter `{letter}` (expected C, P, N or V)"
                ))
            })?;
            slots.push(PhonemeConstraint { category, optional });
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[PhonemeConstraint] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that are always filled.
    pub fn required_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.optional).count()
    }

    /// Distinct categories referenced by this pattern, in slot order.
    pub fn categories(&self) -> Vec<PhonemeCategory> {
        let mut categories = Vec::new();
        for slot in &self.slots {
            if !categories.contains(&slot.category) {
                categories.push(slot.category);
            }
        }
        categories
    }
}

impl From<Vec<PhonemeConstraint>> for ConstraintPattern {
    fn from(value: Vec<PhonemeConstraint>) -> Self {
        Self::new(value)
    }
}

impl Display for ConstraintPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

fn letter_category(letter: &str) -> Option<PhonemeCategory> {
    match letter.to_ascii_uppercase().as_str() {
        "C" => Some(PhonemeCategory::Consonant),
        "P" => Some(PhonemeCategory::PulmonicConsonant),
        "N" => Some(PhonemeCategory::NonPulmonicConsonant),
        "V" => Some(PhonemeCategory::Vowel),
        _ => None,
    }
}

fn category_letter(category: PhonemeCategory) -> char {
    match category {
        PhonemeCategory::Consonant => 'C',
        PhonemeCategory::PulmonicConsonant => 'P',
        PhonemeCategory::NonPulmonicConsonant => 'N',
        PhonemeCategory::Vowel => 'V',
    }
}
