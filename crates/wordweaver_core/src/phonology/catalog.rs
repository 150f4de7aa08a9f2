//! Static mnemonic <-> IPA symbol catalog.
//!
//! # Responsibility
//! - Translate mnemonic codes to IPA symbols and back, per category.
//! - Expose the articulation grid (manner x place, height x backness) used by
//!   inventory selectors.
//!
//! # Invariants
//! - Built once per process and never mutated.
//! - Within one category codes are unique and symbols are unique, so
//!   `reverse_resolve(resolve(code).symbol) == code` for every code.

use super::category::PhonemeCategory;
use super::phoneme::Phoneme;
use super::{PhonologyError, PhonologyResult};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One cell value of a catalog table: `(row, column, code, symbol)`.
pub type TableCell = (&'static str, &'static str, &'static str, &'static str);

/// Declarative source table for one phoneme category.
#[derive(Debug, Clone, Copy)]
pub struct CatalogTable {
    pub category: PhonemeCategory,
    /// Row labels in display order (manner, mechanism or height).
    pub rows: &'static [&'static str],
    /// Column labels in display order (place or backness).
    pub columns: &'static [&'static str],
    pub cells: &'static [TableCell],
}

/// Indexed catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub symbol: &'static str,
    pub category: PhonemeCategory,
    pub row: &'static str,
    pub column: &'static str,
}

impl CatalogEntry {
    /// Builds the phoneme value for this entry.
    pub fn phoneme(&self) -> Phoneme {
        Phoneme::from_parts(self.code, self.category, self.symbol)
    }
}

#[derive(Debug, Clone, Default)]
struct Layout {
    rows: &'static [&'static str],
    columns: &'static [&'static str],
}

/// Immutable lookup tables between mnemonic codes and IPA symbols.
#[derive(Debug, Clone, Default)]
pub struct PhonemeCatalog {
    entries: Vec<CatalogEntry>,
    by_code: HashMap<(PhonemeCategory, &'static str), usize>,
    by_symbol: HashMap<(PhonemeCategory, &'static str), usize>,
    layouts: BTreeMap<PhonemeCategory, Layout>,
}

static BUILTIN: Lazy<PhonemeCatalog> = Lazy::new(|| PhonemeCatalog::index(BUILTIN_TABLES));

impl PhonemeCatalog {
    /// Returns the process-wide built-in catalog.
    pub fn builtin() -> &'static PhonemeCatalog {
        &BUILTIN
    }

    /// Builds a catalog from declarative tables.
    ///
    /// # Errors
    /// - `DuplicateCode` when a category declares a code twice.
    /// - `DuplicateSymbol` when two codes of a category share a symbol.
    /// - `InvalidInventory` when a table targets the derived consonant bucket.
    pub fn from_tables(tables: &[CatalogTable]) -> PhonologyResult<Self> {
        let mut codes = HashSet::new();
        let mut symbols = HashSet::new();
        for table in tables {
            if !table.category.is_concrete() {
                return Err(PhonologyError::InvalidInventory(format!(
                    "catalog table cannot target derived category {}",
                    table.category
                )));
            }
            for &(_, _, code, symbol) in table.cells {
                if !codes.insert((table.category, code)) {
                    return Err(PhonologyError::DuplicateCode {
                        code,
                        category: table.category,
                    });
                }
                if !symbols.insert((table.category, symbol)) {
                    return Err(PhonologyError::DuplicateSymbol {
                        symbol,
                        category: table.category,
                    });
                }
            }
        }
        Ok(Self::index(tables))
    }

    fn index(tables: &[CatalogTable]) -> Self {
        let mut catalog = Self::default();
        for table in tables {
            catalog.layouts.insert(
                table.category,
                Layout {
                    rows: table.rows,
                    columns: table.columns,
                },
            );
            for &(row, column, code, symbol) in table.cells {
                let position = catalog.entries.len();
                catalog.entries.push(CatalogEntry {
                    code,
                    symbol,
                    category: table.category,
                    row,
                    column,
                });
                catalog
                    .by_code
                    .entry((table.category, code))
                    .or_insert(position);
                catalog
                    .by_symbol
                    .entry((table.category, symbol))
                    .or_insert(position);
            }
        }
        catalog
    }

    /// Resolves a mnemonic code to a phoneme.
    ///
    /// `PhonemeCategory::Consonant` searches pulmonic then non-pulmonic.
    pub fn resolve(&self, code: &str, category: PhonemeCategory) -> PhonologyResult<Phoneme> {
        self.find(&self.by_code, code, category)
            .map(CatalogEntry::phoneme)
            .ok_or_else(|| unknown(code, category))
    }

    /// Maps an IPA symbol back to its mnemonic code.
    pub fn reverse_resolve(
        &self,
        symbol: &str,
        category: PhonemeCategory,
    ) -> PhonologyResult<&'static str> {
        self.find(&self.by_symbol, symbol, category)
            .map(|entry| entry.code)
            .ok_or_else(|| unknown(symbol, category))
    }

    /// Resolves an IPA symbol to a phoneme.
    pub fn resolve_symbol(
        &self,
        symbol: &str,
        category: PhonemeCategory,
    ) -> PhonologyResult<Phoneme> {
        self.find(&self.by_symbol, symbol, category)
            .map(CatalogEntry::phoneme)
            .ok_or_else(|| unknown(symbol, category))
    }

    /// Resolves user text given either as a code or as a symbol.
    ///
    /// Codes take precedence when a string is valid as both.
    pub fn lookup(&self, text: &str, category: PhonemeCategory) -> PhonologyResult<Phoneme> {
        let text = text.trim();
        self.find(&self.by_code, text, category)
            .or_else(|| self.find(&self.by_symbol, text, category))
            .map(CatalogEntry::phoneme)
            .ok_or_else(|| unknown(text, category))
    }

    /// Entries of `category` in table order.
    pub fn entries(&self, category: PhonemeCategory) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.category.satisfies(category))
    }

    /// Row labels for a concrete category; empty when none are declared.
    pub fn rows(&self, category: PhonemeCategory) -> &'static [&'static str] {
        self.layouts
            .get(&category)
            .map(|layout| layout.rows)
            .unwrap_or(&[])
    }

    /// Column labels for a concrete category; empty when none are declared.
    pub fn columns(&self, category: PhonemeCategory) -> &'static [&'static str] {
        self.layouts
            .get(&category)
            .map(|layout| layout.columns)
            .unwrap_or(&[])
    }

    /// Entries of one grid cell, e.g. (`plosive`, `velar`) -> `k`, `g`.
    pub fn cell(&self, category: PhonemeCategory, row: &str, column: &str) -> Vec<&CatalogEntry> {
        self.entries(category)
            .filter(|entry| entry.row == row && entry.column == column)
            .collect()
    }

    /// Number of entries in `category`.
    pub fn len(&self, category: PhonemeCategory) -> usize {
        self.entries(category).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(
        &self,
        index: &HashMap<(PhonemeCategory, &'static str), usize>,
        key: &str,
        category: PhonemeCategory,
    ) -> Option<&CatalogEntry> {
        search_order(category)
            .iter()
            .find_map(|candidate| index.get(&(*candidate, key)))
            .and_then(|position| self.entries.get(*position))
    }
}

fn search_order(category: PhonemeCategory) -> &'static [PhonemeCategory] {
    match category {
        PhonemeCategory::Consonant => &[
            PhonemeCategory::PulmonicConsonant,
            PhonemeCategory::NonPulmonicConsonant,
        ],
        PhonemeCategory::PulmonicConsonant => &[PhonemeCategory::PulmonicConsonant],
        PhonemeCategory::NonPulmonicConsonant => &[PhonemeCategory::NonPulmonicConsonant],
        PhonemeCategory::Vowel => &[PhonemeCategory::Vowel],
    }
}

fn unknown(text: &str, category: PhonemeCategory) -> PhonologyError {
    PhonologyError::UnknownPhoneme {
        text: text.to_string(),
        category,
    }
}

const MANNERS: &[&str] = &[
    "nasal",
    "plosive",
    "trill",
    "tap",
    "fricative",
    "lateral-fricative",
    "approximant",
    "lateral-approximant",
];

const PLACES: &[&str] = &[
    "bi-labial",
    "labio-dental",
    "dental",
    "alveolar",
    "post-alveolar",
    "retroflex",
    "palatal",
    "velar",
    "uvular",
    "pharyngeal",
    "glottal",
];

const PULMONIC_CELLS: &[TableCell] = &[
    ("plosive", "bi-labial", "p", "p"),
    ("plosive", "bi-labial", "b", "b"),
    ("plosive", "alveolar", "t", "t"),
    ("plosive", "post-alveolar", "d", "d"),
    ("plosive", "retroflex", "tr", "ʈ"),
    ("plosive", "retroflex", "dr", "ɖ"),
    ("plosive", "palatal", "c", "c"),
    ("plosive", "palatal", "cr", "ɟ"),
    ("plosive", "velar", "k", "k"),
    ("plosive", "velar", "g", "g"),
    ("plosive", "uvular", "kv", "q"),
    ("plosive", "uvular", "gv", "ɢ"),
    ("plosive", "glottal", "gh", "ʔ"),
    ("nasal", "bi-labial", "m", "m"),
    ("nasal", "labio-dental", "mn", "ɱ"),
    ("nasal", "post-alveolar", "n", "n"),
    ("nasal", "retroflex", "ng1", "ɳ"),
    ("nasal", "palatal", "ng2", "ɲ"),
    ("nasal", "velar", "ng", "ŋ"),
    ("nasal", "uvular", "nh", "ɴ"),
    ("trill", "bi-labial", "br", "ʙ"),
    ("trill", "post-alveolar", "r", "r"),
    ("trill", "uvular", "rr", "ʀ"),
    ("tap", "labio-dental", "vt", "ⱱ"),
    ("tap", "post-alveolar", "rt", "ɾ"),
    ("tap", "retroflex", "rf", "ɽ"),
    ("fricative", "bi-labial", "ph", "ɸ"),
    ("fricative", "bi-labial", "phv", "β"),
    ("fricative", "labio-dental", "f", "f"),
    ("fricative", "labio-dental", "v", "v"),
    ("fricative", "dental", "th", "θ"),
    ("fricative", "dental", "thv", "ð"),
    ("fricative", "alveolar", "s", "s"),
    ("fricative", "alveolar", "z", "z"),
    ("fricative", "post-alveolar", "sh", "ʃ"),
    ("fricative", "post-alveolar", "zh", "ʒ"),
    ("fricative", "retroflex", "sr", "ʂ"),
    ("fricative", "retroflex", "zr", "ʐ"),
    ("fricative", "palatal", "cx", "ç"),
    ("fricative", "palatal", "jx", "ʝ"),
    ("fricative", "velar", "x", "x"),
    ("fricative", "velar", "xz", "ɣ"),
    ("fricative", "uvular", "fx", "χ"),
    ("fricative", "uvular", "fr", "ʁ"),
    ("fricative", "pharyngeal", "fh", "ħ"),
    ("fricative", "pharyngeal", "fg", "ʕ"),
    ("fricative", "glottal", "h", "h"),
    ("fricative", "glottal", "hr", "ɦ"),
    ("lateral-fricative", "dental", "lf", "ɬ"),
    ("lateral-fricative", "post-alveolar", "lz", "ɮ"),
    ("approximant", "labio-dental", "vr", "ʋ"),
    ("approximant", "post-alveolar", "rq", "ɹ"),
    ("approximant", "retroflex", "rh", "ɻ"),
    ("approximant", "palatal", "j", "j"),
    ("approximant", "velar", "rw", "ɰ"),
    ("lateral-approximant", "post-alveolar", "l", "l"),
    ("lateral-approximant", "retroflex", "lh", "ɭ"),
    ("lateral-approximant", "palatal", "lj", "ʎ"),
    ("lateral-approximant", "velar", "lw", "ʟ"),
];

const MECHANISMS: &[&str] = &["click", "implosive", "ejective"];

const NON_PULMONIC_PLACES: &[&str] = &[
    "bi-labial",
    "dental",
    "alveolar",
    "post-alveolar",
    "palatal",
    "velar",
    "uvular",
    "alveolar-lateral",
];

const NON_PULMONIC_CELLS: &[TableCell] = &[
    ("click", "bi-labial", "pc", "ʘ"),
    ("click", "dental", "tc", "ǀ"),
    ("click", "post-alveolar", "rc", "ǃ"),
    ("click", "palatal", "jc", "ǂ"),
    ("click", "alveolar-lateral", "lc", "ǁ"),
    ("implosive", "bi-labial", "bi", "ɓ"),
    ("implosive", "alveolar", "di", "ɗ"),
    ("implosive", "palatal", "ji", "ʄ"),
    ("implosive", "velar", "gi", "ɠ"),
    ("implosive", "uvular", "qi", "ʛ"),
    ("ejective", "bi-labial", "pe", "pʼ"),
    ("ejective", "alveolar", "te", "tʼ"),
    ("ejective", "alveolar", "se", "sʼ"),
    ("ejective", "velar", "ke", "kʼ"),
];

const HEIGHTS: &[&str] = &[
    "close",
    "medial-close-mid",
    "close-mid",
    "mid",
    "open-mid",
    "medial-open-mid",
    "open",
];

const BACKNESS: &[&str] = &["front", "central", "back"];

const VOWEL_CELLS: &[TableCell] = &[
    ("close", "front", "i", "i"),
    ("close", "front", "y", "y"),
    ("close", "central", "iu", "ɨ"),
    ("close", "central", "uu", "ʉ"),
    ("close", "back", "uv", "ɯ"),
    ("close", "back", "u", "u"),
    ("medial-close-mid", "front", "ie", "ɪ"),
    ("medial-close-mid", "front", "ye", "ʏ"),
    ("medial-close-mid", "back", "ue", "ʊ"),
    ("close-mid", "front", "e", "e"),
    ("close-mid", "front", "ey", "ø"),
    ("close-mid", "central", "eu", "ɘ"),
    ("close-mid", "central", "uy", "ɵ"),
    ("close-mid", "back", "oe", "ɤ"),
    ("close-mid", "back", "o", "o"),
    ("mid", "central", "ux", "ə"),
    ("open-mid", "front", "eh", "ɛ"),
    ("open-mid", "front", "ehy", "œ"),
    ("open-mid", "central", "ea", "ɜ"),
    ("open-mid", "central", "eay", "ɞ"),
    ("open-mid", "back", "uh", "ʌ"),
    ("open-mid", "back", "uhy", "ɔ"),
    ("medial-open-mid", "front", "ae", "æ"),
    ("medial-open-mid", "central", "ah", "ɐ"),
    ("open", "front", "a", "a"),
    ("open", "front", "ay", "ɶ"),
    ("open", "back", "ao", "ɑ"),
    ("open", "back", "aoy", "ɒ"),
];

/// Tables backing [`PhonemeCatalog::builtin`].
pub const BUILTIN_TABLES: &[CatalogTable] = &[
    CatalogTable {
        category: PhonemeCategory::PulmonicConsonant,
        rows: MANNERS,
        columns: PLACES,
        cells: PULMONIC_CELLS,
    },
    CatalogTable {
        category: PhonemeCategory::NonPulmonicConsonant,
        rows: MECHANISMS,
        columns: NON_PULMONIC_PLACES,
        cells: NON_PULMONIC_CELLS,
    },
    CatalogTable {
        category: PhonemeCategory::Vowel,
        rows: HEIGHTS,
        columns: BACKNESS,
        cells: VOWEL_CELLS,
    },
];

#[cfg(test)]
mod tests {
    use super::{CatalogTable, PhonemeCatalog, BUILTIN_TABLES};
    use crate::phonology::{PhonemeCategory, PhonologyError};

    #[test]
    fn builtin_tables_have_no_duplicates() {
        assert!(PhonemeCatalog::from_tables(BUILTIN_TABLES).is_ok());
    }

    #[test]
    fn grid_cells_reference_declared_labels() {
        for table in BUILTIN_TABLES {
            for &(row, column, code, _) in table.cells {
                assert!(table.rows.contains(&row), "{code}: unknown row {row}");
                assert!(
                    table.columns.contains(&column),
                    "{code}: unknown column {column}"
                );
            }
        }
    }

    #[test]
    fn from_tables_rejects_duplicate_symbol() {
        const CELLS: &[super::TableCell] = &[("open", "front", "a", "a"), ("open", "front", "aa", "a")];
        let tables = [CatalogTable {
            category: PhonemeCategory::Vowel,
            rows: &["open"],
            columns: &["front"],
            cells: CELLS,
        }];
        let err = PhonemeCatalog::from_tables(&tables).unwrap_err();
        assert_eq!(
            err,
            PhonologyError::DuplicateSymbol {
                symbol: "a",
                category: PhonemeCategory::Vowel,
            }
        );
    }

    #[test]
    fn from_tables_rejects_duplicate_code() {
        const CELLS: &[super::TableCell] = &[("open", "front", "a", "a"), ("close", "front", "a", "i")];
        let tables = [CatalogTable {
            category: PhonemeCategory::Vowel,
            rows: &["open", "close"],
            columns: &["front"],
            cells: CELLS,
        }];
        let err = PhonemeCatalog::from_tables(&tables).unwrap_err();
        assert!(matches!(err, PhonologyError::DuplicateCode { code: "a", .. }));
    }

    #[test]
    fn from_tables_rejects_derived_category() {
        let tables = [CatalogTable {
            category: PhonemeCategory::Consonant,
            rows: &[],
            columns: &[],
            cells: &[],
        }];
        let err = PhonemeCatalog::from_tables(&tables).unwrap_err();
        assert!(matches!(err, PhonologyError::InvalidInventory(_)));
    }

    #[test]
    fn consonant_lookup_spans_both_subtypes() {
        let catalog = PhonemeCatalog::builtin();
        let click = catalog.resolve("tc", PhonemeCategory::Consonant).unwrap();
        assert_eq!(click.category(), PhonemeCategory::NonPulmonicConsonant);
        let stop = catalog.resolve("p", PhonemeCategory::Consonant).unwrap();
        assert_eq!(stop.category(), PhonemeCategory::PulmonicConsonant);
    }
}
