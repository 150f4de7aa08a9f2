//! Preview generation settings supplied by the shell.

use serde::{Deserialize, Serialize};

const DEFAULT_SYLLABLES_PER_WORD: usize = 2;
const DEFAULT_WORD_COUNT: usize = 10;

/// Caller-tunable knobs for a generation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub syllables_per_word: usize,
    pub word_count: usize,
    /// Inserted between syllables when rendering.
    pub separator: String,
    /// Fixed seed for reproducible previews; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            syllables_per_word: DEFAULT_SYLLABLES_PER_WORD,
            word_count: DEFAULT_WORD_COUNT,
            separator: String::new(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GenerationSettings;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: GenerationSettings =
            serde_json::from_value(serde_json::json!({ "word_count": 3, "seed": 7 })).unwrap();
        assert_eq!(settings.word_count, 3);
        assert_eq!(settings.syllables_per_word, 2);
        assert_eq!(settings.separator, "");
        assert_eq!(settings.seed, Some(7));
    }
}
