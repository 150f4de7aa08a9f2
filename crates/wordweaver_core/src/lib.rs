//! Core domain logic for Wordweaver.
//! This crate is the single source of truth for phonology, generation and
//! project-file invariants.

pub mod generator;
pub mod logging;
pub mod phonology;
pub mod project;

pub use generator::{
    ConstraintPattern, GenerationSettings, Generator, GeneratorError, GeneratorResult,
    PhonemeConstraint, Syllable, Syllables, Word,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use phonology::{
    CatalogEntry, Inventory, InventoryEntry, Phoneme, PhonemeCatalog, PhonemeCategory,
    PhonologyError, PhonologyResult,
};
pub use project::{
    default_file_name, open_project, save_project, save_project_as, CodecError, CodecResult,
    Project, ProjectCodec, ProjectValidationError, PROJECT_FILE_EXTENSION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
