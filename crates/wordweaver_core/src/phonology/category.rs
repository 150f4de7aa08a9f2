//! Phoneme category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Phonological category of a phoneme or constraint slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhonemeCategory {
    /// Any consonant. Only used for constraint matching; both consonant
    /// subtypes fold into this bucket.
    Consonant,
    /// Consonant produced with lung airflow.
    PulmonicConsonant,
    /// Consonant produced without lung airflow (clicks, implosives, ejectives).
    NonPulmonicConsonant,
    /// Vowel.
    Vowel,
}

impl PhonemeCategory {
    /// Categories a phoneme can actually belong to, in file order.
    pub const CONCRETE: [PhonemeCategory; 3] = [
        PhonemeCategory::PulmonicConsonant,
        PhonemeCategory::NonPulmonicConsonant,
        PhonemeCategory::Vowel,
    ];

    /// Returns whether phonemes can be stored under this category directly.
    pub fn is_concrete(self) -> bool {
        !matches!(self, Self::Consonant)
    }

    /// Returns whether a phoneme of category `self` satisfies a slot of
    /// category `slot`.
    pub fn satisfies(self, slot: PhonemeCategory) -> bool {
        self == slot
            || (slot == Self::Consonant
                && matches!(self, Self::PulmonicConsonant | Self::NonPulmonicConsonant))
    }

    /// Stable snake_case label, identical to the serde representation.
    pub fn label(self) -> &'static str {
        match self {
            Self::Consonant => "consonant",
            Self::PulmonicConsonant => "pulmonic_consonant",
            Self::NonPulmonicConsonant => "non_pulmonic_consonant",
            Self::Vowel => "vowel",
        }
    }

    /// Parses a label produced by [`PhonemeCategory::label`].
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "consonant" => Some(Self::Consonant),
            "pulmonic_consonant" => Some(Self::PulmonicConsonant),
            "non_pulmonic_consonant" => Some(Self::NonPulmonicConsonant),
            "vowel" => Some(Self::Vowel),
            _ => None,
        }
    }
}

impl Display for PhonemeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Consonant => "consonant",
            Self::PulmonicConsonant => "pulmonic consonant",
            Self::NonPulmonicConsonant => "non-pulmonic consonant",
            Self::Vowel => "vowel",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PhonemeCategory;

    #[test]
    fn consonant_subtypes_satisfy_generic_consonant_slot() {
        assert!(PhonemeCategory::PulmonicConsonant.satisfies(PhonemeCategory::Consonant));
        assert!(PhonemeCategory::NonPulmonicConsonant.satisfies(PhonemeCategory::Consonant));
        assert!(!PhonemeCategory::Vowel.satisfies(PhonemeCategory::Consonant));
        assert!(!PhonemeCategory::PulmonicConsonant.satisfies(PhonemeCategory::Vowel));
    }

    #[test]
    fn labels_roundtrip() {
        for category in [
            PhonemeCategory::Consonant,
            PhonemeCategory::PulmonicConsonant,
            PhonemeCategory::NonPulmonicConsonant,
            PhonemeCategory::Vowel,
        ] {
            assert_eq!(PhonemeCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(PhonemeCategory::from_label("click"), None);
    }
}
