//! Project model and `.wwproj` persistence.
//!
//! # Responsibility
//! - Hold the full language state owned by one editing session.
//! - Encode/decode that state with an exact, versioned byte layout.
//!
//! # Invariants
//! - A project that fails `validate()` is never written.
//! - Decode failures never expose a partially built project.

pub mod codec;
pub mod file;
pub mod model;

pub use codec::{CodecError, CodecResult, ProjectCodec, FORMAT_VERSION, MAGIC};
pub use file::{
    default_file_name, open_project, save_project, save_project_as, PROJECT_FILE_EXTENSION,
};
pub use model::{
    Project, ProjectValidationError, DEFAULT_PULMONIC_CODES, DEFAULT_VOWEL_CODES,
    MAX_CATEGORY_PHONEMES, MAX_LEXICON_WORDS, MAX_NAME_BYTES, MAX_WORD_BYTES,
};
