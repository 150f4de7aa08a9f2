//! Seeded syllable/word sampler.
//!
//! # Responsibility
//! - Select the constraint pattern for each syllable position.
//! - Fill pattern slots by uniform sampling from the bound inventory.
//!
//! # Invariants
//! - Binding (`with_rng`, `constrain`) rejects empty categories up front.
//! - `syllables(n)` yields exactly `n` items and restarts on every call.
//! - All randomness comes from the generator-owned `rng`.

use super::constraint::ConstraintPattern;
use super::settings::GenerationSettings;
use super::word::{Syllable, Word};
use super::{GeneratorError, GeneratorResult};
use crate::phonology::Inventory;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Probability that an optional slot is filled.
const OPTIONAL_SLOT_PROBABILITY: f64 = 0.5;

/// Phoneme generator bound to one inventory and a set of patterns.
///
/// Syllable 0 of every word uses `primary`. With secondary patterns
/// `[S0, S1, ..]`, syllable 1 uses `S0`, syllable 2 uses `S1` and so on; the
/// last secondary pattern repeats for all remaining syllables. Without
/// secondary patterns every syllable uses `primary`.
pub struct Generator<'inv, R: Rng = StdRng> {
    inventory: &'inv Inventory,
    primary: ConstraintPattern,
    secondary: Vec<ConstraintPattern>,
    rng: R,
}

impl<'inv> Generator<'inv, StdRng> {
    /// Binds a generator with a deterministic seed.
    pub fn seeded(
        inventory: &'inv Inventory,
        primary: ConstraintPattern,
        secondary: Vec<ConstraintPattern>,
        seed: u64,
    ) -> GeneratorResult<Self> {
        Self::with_rng(inventory, primary, secondary, StdRng::seed_from_u64(seed))
    }

    /// Binds a generator seeded from OS entropy.
    pub fn from_entropy(
        inventory: &'inv Inventory,
        primary: ConstraintPattern,
        secondary: Vec<ConstraintPattern>,
    ) -> GeneratorResult<Self> {
        Self::with_rng(inventory, primary, secondary, StdRng::from_entropy())
    }

    /// Binds a generator using the seed policy of `settings`.
    pub fn for_settings(
        inventory: &'inv Inventory,
        primary: ConstraintPattern,
        secondary: Vec<ConstraintPattern>,
        settings: &GenerationSettings,
    ) -> GeneratorResult<Self> {
        match settings.seed {
            Some(seed) => Self::seeded(inventory, primary, secondary, seed),
            None => Self::from_entropy(inventory, primary, secondary),
        }
    }
}

impl<'inv, R: Rng> Generator<'inv, R> {
    /// Binds a generator with a caller-provided random source.
    ///
    /// # Errors
    /// - `EmptyCategory` when any pattern slot references a category without
    ///   phonemes in `inventory`.
    pub fn with_rng(
        inventory: &'inv Inventory,
        primary: ConstraintPattern,
        secondary: Vec<ConstraintPattern>,
        rng: R,
    ) -> GeneratorResult<Self> {
        validate_patterns(inventory, &primary, &secondary)?;
        debug!(
            "event=generator_bind module=generator status=ok primary={} secondary_count={}",
            primary,
            secondary.len()
        );
        Ok(Self {
            inventory,
            primary,
            secondary,
            rng,
        })
    }

    /// Replaces the bound patterns after validating them.
    ///
    /// On error the previous patterns stay in place.
    pub fn constrain(
        &mut self,
        primary: ConstraintPattern,
        secondary: Vec<ConstraintPattern>,
    ) -> GeneratorResult<()> {
        validate_patterns(self.inventory, &primary, &secondary)?;
        self.primary = primary;
        self.secondary = secondary;
        Ok(())
    }

    pub fn inventory(&self) -> &'inv Inventory {
        self.inventory
    }

    pub fn primary(&self) -> &ConstraintPattern {
        &self.primary
    }

    pub fn secondary(&self) -> &[ConstraintPattern] {
        &self.secondary
    }

    /// Pattern used for the syllable at 0-based position `index`.
    pub fn pattern_for(&self, index: usize) -> &ConstraintPattern {
        select_pattern(&self.primary, &self.secondary, index)
    }

    /// Lazily generates exactly `n` syllables.
    pub fn syllables(&mut self, n: usize) -> Syllables<'_, 'inv, R> {
        Syllables {
            generator: self,
            index: 0,
            count: n,
        }
    }

    /// Generates `word_count` words of `syllables_per_word` syllables each.
    pub fn words(&mut self, syllables_per_word: usize, word_count: usize) -> Vec<Word> {
        (0..word_count)
            .map(|_| Word::new(self.syllables(syllables_per_word).collect()))
            .collect()
    }

    /// Renders preview strings according to `settings`.
    pub fn preview(&mut self, settings: &GenerationSettings) -> Vec<String> {
        self.words(settings.syllables_per_word, settings.word_count)
            .iter()
            .map(|word| word.render(&settings.separator))
            .collect()
    }

    fn sample_syllable(&mut self, index: usize) -> Syllable {
        let pattern = select_pattern(&self.primary, &self.secondary, index);
        let mut phonemes = Vec::with_capacity(pattern.len());
        for slot in pattern.slots() {
            if slot.optional && !self.rng.gen_bool(OPTIONAL_SLOT_PROBABILITY) {
                continue;
            }
            if let Some(phoneme) = self
                .inventory
                .phonemes(slot.category)
                .choose(&mut self.rng)
            {
                phonemes.push(phoneme.clone());
            }
        }
        Syllable::new(phonemes)
    }
}

/// Finite, lazily evaluated syllable sequence.
pub struct Syllables<'g, 'inv, R: Rng> {
    generator: &'g mut Generator<'inv, R>,
    index: usize,
    count: usize,
}

impl<R: Rng> Iterator for Syllables<'_, '_, R> {
    type Item = Syllable;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let syllable = self.generator.sample_syllable(self.index);
        self.index += 1;
        Some(syllable)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Syllables<'_, '_, R> {}

fn select_pattern<'p>(
    primary: &'p ConstraintPattern,
    secondary: &'p [ConstraintPattern],
    index: usize,
) -> &'p ConstraintPattern {
    if index == 0 {
        return primary;
    }
    match secondary.get(index - 1).or_else(|| secondary.last()) {
        Some(pattern) => pattern,
        None => primary,
    }
}

fn validate_patterns(
    inventory: &Inventory,
    primary: &ConstraintPattern,
    secondary: &[ConstraintPattern],
) -> GeneratorResult<()> {
    for pattern in std::iter::once(primary).chain(secondary) {
        for category in pattern.categories() {
            if inventory.phonemes(category).is_empty() {
                warn!(
                    "event=generator_bind module=generator status=error error_code=empty_category category={}",
                    category.label()
                );
                return Err(GeneratorError::EmptyCategory(category));
            }
        }
    }
    Ok(())
}
