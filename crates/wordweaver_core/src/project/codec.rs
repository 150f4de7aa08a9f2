//! `.wwproj` binary codec.
//!
//! Layout (big-endian, unsigned):
//!
//! ```text
//! magic        u32   0x87AFFA87
//! version      u8    0x01
//! name_len     u16   + name (UTF-8)
//! pulmonic     u8    count, then count x (u8 len + UTF-8 symbol)
//! non_pulmonic u8    count, then entries as above
//! vowels       u8    count, then entries as above
//! lexicon      u24   count, then count x (u8 len + UTF-8 word)
//! ```
//!
//! # Invariants
//! - Phoneme entries carry the IPA symbol, never the mnemonic code.
//! - Decoding either returns a complete project or an error; no partial
//!   state escapes.
//! - Only the variable-length entry form is read or written.

use super::model::{Project, ProjectValidationError};
use crate::phonology::{Inventory, PhonemeCatalog, PhonemeCategory};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{ErrorKind, Read, Write};

/// File signature.
pub const MAGIC: u32 = 0x87AF_FA87;
/// Current and only supported format version.
pub const FORMAT_VERSION: u8 = 0x01;

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode/decode and file persistence errors.
#[derive(Debug)]
pub enum CodecError {
    /// Save requested on a project without an associated file.
    UnassociatedFile,
    /// Bad magic number, unknown version or inconsistent content.
    CorruptFormat(String),
    /// Decoded symbol has no catalog entry in its category.
    UnknownSymbol {
        symbol: String,
        category: PhonemeCategory,
    },
    /// Input ended while reading `field`.
    Truncated { field: &'static str },
    /// `field` bytes are not valid UTF-8.
    InvalidUtf8 { field: &'static str },
    /// `field` does not fit its length prefix.
    FieldTooLong { field: &'static str, len: usize },
    Validation(ProjectValidationError),
    Io(std::io::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnassociatedFile => write!(f, "project has no associated file"),
            Self::CorruptFormat(message) => write!(f, "corrupt project file: {message}"),
            Self::UnknownSymbol { symbol, category } => {
                write!(f, "unknown {category} symbol `{symbol}` in project file")
            }
            Self::Truncated { field } => write!(f, "project file truncated while reading {field}"),
            Self::InvalidUtf8 { field } => write!(f, "project file {field} is not valid UTF-8"),
            Self::FieldTooLong { field, len } => {
                write!(f, "{field} is {len} bytes and does not fit its length prefix")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for CodecError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<std::io::Error> for CodecError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Binary codec bound to the catalog used for symbol reverse lookup.
#[derive(Debug, Clone, Copy)]
pub struct ProjectCodec<'c> {
    catalog: &'c PhonemeCatalog,
}

impl<'c> ProjectCodec<'c> {
    pub fn new(catalog: &'c PhonemeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c PhonemeCatalog {
        self.catalog
    }

    /// Encodes `project` into a new buffer.
    pub fn encode(&self, project: &Project) -> CodecResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode_to(project, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes `project` to `writer`.
    ///
    /// # Errors
    /// - `Validation` when the project exceeds a layout limit; nothing is
    ///   written in that case.
    /// - `Io` when the writer fails.
    pub fn encode_to<W: Write>(&self, project: &Project, writer: &mut W) -> CodecResult<()> {
        project.validate()?;

        writer.write_all(&MAGIC.to_be_bytes())?;
        writer.write_all(&[FORMAT_VERSION])?;

        let name = project.name.as_bytes();
        writer.write_all(&(name.len() as u16).to_be_bytes())?;
        writer.write_all(name)?;

        for category in PhonemeCategory::CONCRETE {
            let phonemes = project.inventory().phonemes(category);
            writer.write_all(&[phonemes.len() as u8])?;
            for phoneme in phonemes {
                write_short_string(writer, "phoneme symbol", phoneme.symbol())?;
            }
        }

        let count = project.lexicon().len() as u32;
        writer.write_all(&count.to_be_bytes()[1..])?;
        for word in project.lexicon() {
            write_short_string(writer, "lexicon word", word)?;
        }

        debug!(
            "event=project_encode module=codec status=ok phonemes={} words={}",
            PhonemeCategory::CONCRETE
                .iter()
                .map(|category| project.inventory().len(*category))
                .sum::<usize>(),
            project.lexicon().len()
        );
        Ok(())
    }

    /// Decodes a complete project from `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> CodecResult<Project> {
        let mut reader = bytes;
        self.decode_from(&mut reader)
    }

    /// Decodes a complete project from `reader`.
    ///
    /// The returned project has no associated file.
    ///
    /// # Errors
    /// - `CorruptFormat` for a wrong magic number, unknown version, duplicate
    ///   phonemes or trailing bytes.
    /// - `UnknownSymbol` when a phoneme symbol is absent from the catalog.
    /// - `Truncated` / `InvalidUtf8` for malformed fields.
    pub fn decode_from<R: Read>(&self, reader: &mut R) -> CodecResult<Project> {
        let result = self.decode_inner(reader);
        if let Err(err) = &result {
            warn!(
                "event=project_decode module=codec status=error error_code={}",
                error_code(err)
            );
        }
        result
    }

    fn decode_inner<R: Read>(&self, reader: &mut R) -> CodecResult<Project> {
        let magic = u32::from_be_bytes(read_array(reader, "magic number")?);
        if magic != MAGIC {
            return Err(CodecError::CorruptFormat(format!(
                "bad magic number {magic:#010X}"
            )));
        }
        let [version] = read_array::<_, 1>(reader, "format version")?;
        if version != FORMAT_VERSION {
            return Err(CodecError::CorruptFormat(format!(
                "unsupported format version {version:#04X}"
            )));
        }

        let name_len = u16::from_be_bytes(read_array(reader, "name length")?);
        let name = read_string(reader, usize::from(name_len), "name")?;

        let mut inventory = Inventory::new();
        for category in PhonemeCategory::CONCRETE {
            let [count] = read_array::<_, 1>(reader, "phoneme count")?;
            for _ in 0..count {
                let [len] = read_array::<_, 1>(reader, "phoneme length")?;
                let symbol = read_string(reader, usize::from(len), "phoneme symbol")?;
                let phoneme = self
                    .catalog
                    .resolve_symbol(&symbol, category)
                    .map_err(|_| CodecError::UnknownSymbol {
                        symbol: symbol.clone(),
                        category,
                    })?;
                let inserted = inventory
                    .insert(phoneme)
                    .map_err(|err| CodecError::CorruptFormat(err.to_string()))?;
                if !inserted {
                    return Err(CodecError::CorruptFormat(format!(
                        "duplicate {category} symbol `{symbol}`"
                    )));
                }
            }
        }

        let [high, mid, low] = read_array::<_, 3>(reader, "lexicon count")?;
        let word_count = u32::from_be_bytes([0, high, mid, low]) as usize;
        let mut lexicon = Vec::with_capacity(word_count.min(4096));
        for _ in 0..word_count {
            let [len] = read_array::<_, 1>(reader, "word length")?;
            lexicon.push(read_string(reader, usize::from(len), "lexicon word")?);
        }

        let mut probe = [0u8; 1];
        if read_some(reader, &mut probe)? != 0 {
            return Err(CodecError::CorruptFormat(
                "unexpected bytes after lexicon".to_string(),
            ));
        }

        debug!(
            "event=project_decode module=codec status=ok words={}",
            lexicon.len()
        );
        Ok(Project::new(name)
            .with_inventory(inventory)
            .with_lexicon(lexicon))
    }
}

fn write_short_string<W: Write>(writer: &mut W, field: &'static str, value: &str) -> CodecResult<()> {
    let bytes = value.as_bytes();
    let len = u8::try_from(bytes.len()).map_err(|_| CodecError::FieldTooLong {
        field,
        len: bytes.len(),
    })?;
    writer.write_all(&[len])?;
    writer.write_all(bytes)?;
    Ok(())
}

fn read_array<R: Read, const N: usize>(reader: &mut R, field: &'static str) -> CodecResult<[u8; N]> {
    let mut buffer = [0u8; N];
    read_exact(reader, &mut buffer, field)?;
    Ok(buffer)
}

fn read_string<R: Read>(reader: &mut R, len: usize, field: &'static str) -> CodecResult<String> {
    let mut buffer = vec![0u8; len];
    read_exact(reader, &mut buffer, field)?;
    String::from_utf8(buffer).map_err(|_| CodecError::InvalidUtf8 { field })
}

fn read_exact<R: Read>(reader: &mut R, buffer: &mut [u8], field: &'static str) -> CodecResult<()> {
    reader.read_exact(buffer).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => CodecError::Truncated { field },
        _ => CodecError::Io(err),
    })
}

fn read_some<R: Read>(reader: &mut R, buffer: &mut [u8]) -> CodecResult<usize> {
    loop {
        match reader.read(buffer) {
            Ok(read) => return Ok(read),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(CodecError::Io(err)),
        }
    }
}

pub(crate) fn error_code(err: &CodecError) -> &'static str {
    match err {
        CodecError::UnassociatedFile => "unassociated_file",
        CodecError::CorruptFormat(_) => "corrupt_format",
        CodecError::UnknownSymbol { .. } => "unknown_symbol",
        CodecError::Truncated { .. } => "truncated",
        CodecError::InvalidUtf8 { .. } => "invalid_utf8",
        CodecError::FieldTooLong { .. } => "field_too_long",
        CodecError::Validation(_) => "validation_failed",
        CodecError::Io(_) => "io_error",
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecError, ProjectCodec, FORMAT_VERSION, MAGIC};
    use crate::phonology::{Inventory, PhonemeCatalog, PhonemeCategory};
    use crate::project::Project;

    fn header() -> Vec<u8> {
        let mut bytes = MAGIC.to_be_bytes().to_vec();
        bytes.push(FORMAT_VERSION);
        bytes
    }

    #[test]
    fn decode_reports_truncated_field() {
        let codec = ProjectCodec::new(PhonemeCatalog::builtin());
        let mut bytes = header();
        bytes.extend_from_slice(&[0x00, 0x05, b'a', b'b']);
        let err = codec.decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { field: "name" }));
    }

    #[test]
    fn decode_rejects_invalid_utf8_name() {
        let codec = ProjectCodec::new(PhonemeCatalog::builtin());
        let mut bytes = header();
        bytes.extend_from_slice(&[0x00, 0x01, 0xFF, 0, 0, 0, 0, 0, 0]);
        let err = codec.decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8 { field: "name" }));
    }

    #[test]
    fn decode_rejects_duplicate_symbols() {
        let codec = ProjectCodec::new(PhonemeCatalog::builtin());
        let mut bytes = header();
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes.extend_from_slice(&[0x02, 0x01, b'p', 0x01, b'p']);
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);
        let err = codec.decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::CorruptFormat(_)));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let codec = ProjectCodec::new(PhonemeCatalog::builtin());
        let mut bytes = codec.encode(&Project::new("x")).unwrap();
        bytes.push(0x00);
        let err = codec.decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::CorruptFormat(_)));
    }

    #[test]
    fn decoded_symbols_carry_catalog_codes() {
        let catalog = PhonemeCatalog::builtin();
        let codec = ProjectCodec::new(catalog);
        let inventory =
            Inventory::from_codes(catalog, PhonemeCategory::PulmonicConsonant, &["ng", "gh"]).unwrap();
        let bytes = codec
            .encode(&Project::new("codes").with_inventory(inventory))
            .unwrap();

        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(
            decoded.inventory().codes(PhonemeCategory::PulmonicConsonant),
            vec!["ng", "gh"]
        );
    }
}
