//! FFI use-case API for the desktop shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Carry project state across the boundary as plain snapshots.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through envelope `message` fields.
//! - Snapshots list codes, never symbols, so Dart never re-implements the
//!   catalog.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use wordweaver_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_project,
    ping as ping_inner, save_project, save_project_as, ConstraintPattern, GenerationSettings,
    Generator, GeneratorResult, Inventory, LoggingConfig, PhonemeCatalog, PhonemeCategory,
    PhonologyResult, Project, ProjectCodec,
};

const PREVIEW_DEFAULT_WORDS: u32 = 10;
const PREVIEW_WORDS_MAX: u32 = 200;
const PREVIEW_SYLLABLES_MAX: u32 = 8;
static TEMPLATE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(&LoggingConfig::new(level, log_dir)) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One selectable cell of the phoneme picker grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub code: String,
    pub symbol: String,
    /// Manner, mechanism or height label.
    pub row: String,
    /// Place or backness label.
    pub column: String,
}

/// Plain project state passed between Dart and Rust.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectSnapshot {
    pub name: String,
    /// Associated `.wwproj` path, if the project was opened or saved.
    pub file_path: Option<String>,
    pub pulmonic_consonants: Vec<String>,
    pub non_pulmonic_consonants: Vec<String>,
    pub vowels: Vec<String>,
    pub lexicon: Vec<String>,
}

/// Response envelope for project-level calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Resulting project state; `None` on failure.
    pub snapshot: Option<ProjectSnapshot>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ProjectResponse {
    fn success(message: impl Into<String>, snapshot: ProjectSnapshot) -> Self {
        Self {
            ok: true,
            snapshot: Some(snapshot),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            snapshot: None,
            message: message.into(),
        }
    }
}

/// Preview knobs as sent from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSettings {
    pub syllables_per_word: u32,
    pub word_count: u32,
    pub separator: String,
    pub seed: Option<u64>,
}

/// Response envelope for generation previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResponse {
    pub ok: bool,
    /// Rendered words; empty on failure.
    pub words: Vec<String>,
    pub message: String,
    /// Effective word count after clamping.
    pub applied_word_count: u32,
}

/// Lists catalog entries for one category label.
///
/// `category` is a snake_case label such as `pulmonic_consonant`.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Unknown labels yield an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_entries(category: String) -> Vec<CatalogItem> {
    let Some(category) = PhonemeCategory::from_label(&category) else {
        return Vec::new();
    };
    PhonemeCatalog::builtin()
        .entries(category)
        .map(|entry| CatalogItem {
            code: entry.code.to_string(),
            symbol: entry.symbol.to_string(),
            row: entry.row.to_string(),
            column: entry.column.to_string(),
        })
        .collect()
}

/// Creates a new unsaved project.
///
/// Starts from the `.wwproj` named by `WORDWEAVER_TEMPLATE_PATH` when it
/// decodes, otherwise from the built-in starter inventory.
///
/// # FFI contract
/// - Sync call; may read one small file.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn project_new(name: String) -> ProjectResponse {
    let name = name.trim().to_string();
    let catalog = PhonemeCatalog::builtin();

    if let Some(template) = resolve_template_path() {
        match open_project(&ProjectCodec::new(catalog), template) {
            Ok(mut project) => {
                project.name = name;
                project.set_file(None);
                return ProjectResponse::success(
                    "Project created from template.",
                    snapshot_of(&project),
                );
            }
            Err(err) => warn!(
                "event=project_new module=ffi status=fallback reason=template_unreadable error={}",
                err
            ),
        }
    }

    match Project::with_defaults(catalog, name) {
        Ok(project) => ProjectResponse::success("Project created.", snapshot_of(&project)),
        Err(err) => ProjectResponse::failure(format!("project_new failed: {err}")),
    }
}

/// Opens a `.wwproj` file.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn project_open(path: String) -> ProjectResponse {
    let codec = ProjectCodec::new(PhonemeCatalog::builtin());
    match open_project(&codec, path.trim()) {
        Ok(project) => ProjectResponse::success("Project opened.", snapshot_of(&project)),
        Err(err) => ProjectResponse::failure(format!("project_open failed: {err}")),
    }
}

/// Saves a snapshot.
///
/// `path = None` saves to `snapshot.file_path`; `Some` binds a new path.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics.
/// - Returns the snapshot with its updated `file_path` on success.
#[flutter_rust_bridge::frb(sync)]
pub fn project_save(snapshot: ProjectSnapshot, path: Option<String>) -> ProjectResponse {
    let mut project = match project_of(&snapshot) {
        Ok(project) => project,
        Err(err) => return ProjectResponse::failure(format!("project_save failed: {err}")),
    };
    let codec = ProjectCodec::new(PhonemeCatalog::builtin());
    let result = match normalize_path(path) {
        Some(path) => save_project_as(&codec, &mut project, path),
        None => save_project(&codec, &project),
    };
    match result {
        Ok(()) => ProjectResponse::success("Project saved.", snapshot_of(&project)),
        Err(err) => ProjectResponse::failure(format!("project_save failed: {err}")),
    }
}

/// Adds a phoneme, given by code or symbol, to one inventory category.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
/// - Adding an existing phoneme succeeds without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn inventory_add(snapshot: ProjectSnapshot, category: String, text: String) -> ProjectResponse {
    edit_inventory(snapshot, &category, "inventory_add", |inventory, category| {
        inventory.add_by_text(PhonemeCatalog::builtin(), &text, category)
    })
}

/// Removes a phoneme, given by code or symbol, from one inventory category.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn inventory_remove(
    snapshot: ProjectSnapshot,
    category: String,
    text: String,
) -> ProjectResponse {
    edit_inventory(snapshot, &category, "inventory_remove", |inventory, category| {
        inventory.remove_by_text(PhonemeCatalog::builtin(), &text, category)
    })
}

/// Generates preview words from syllable templates such as `C(C)V(N)`.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
/// - Word count is clamped to `[1, 200]`; syllables per word to `[1, 8]`.
/// - Same snapshot, templates and seed produce the same words.
#[flutter_rust_bridge::frb(sync)]
pub fn generate_preview(
    snapshot: ProjectSnapshot,
    primary: String,
    secondary: Vec<String>,
    settings: PreviewSettings,
) -> PreviewResponse {
    let applied_word_count = normalize_word_count(settings.word_count);
    let failure = |message: String| PreviewResponse {
        ok: false,
        words: Vec::new(),
        message,
        applied_word_count,
    };

    let project = match project_of(&snapshot) {
        Ok(project) => project,
        Err(err) => return failure(format!("generate_preview failed: {err}")),
    };
    let generation = GenerationSettings {
        syllables_per_word: settings.syllables_per_word.clamp(1, PREVIEW_SYLLABLES_MAX) as usize,
        word_count: applied_word_count as usize,
        separator: settings.separator,
        seed: settings.seed,
    };

    match preview_words(project.inventory(), &primary, &secondary, &generation) {
        Ok(words) => PreviewResponse {
            ok: true,
            message: format!("Generated {} word(s).", words.len()),
            words,
            applied_word_count,
        },
        Err(err) => failure(format!("generate_preview failed: {err}")),
    }
}

fn preview_words(
    inventory: &Inventory,
    primary: &str,
    secondary: &[String],
    settings: &GenerationSettings,
) -> GeneratorResult<Vec<String>> {
    let primary = ConstraintPattern::parse(primary)?;
    let secondary = secondary
        .iter()
        .map(|template| ConstraintPattern::parse(template))
        .collect::<GeneratorResult<Vec<_>>>()?;
    let mut generator = Generator::for_settings(inventory, primary, secondary, settings)?;
    Ok(generator.preview(settings))
}

fn edit_inventory(
    snapshot: ProjectSnapshot,
    category: &str,
    operation: &str,
    edit: impl FnOnce(&mut Inventory, PhonemeCategory) -> PhonologyResult<bool>,
) -> ProjectResponse {
    let Some(category) = PhonemeCategory::from_label(category) else {
        return ProjectResponse::failure(format!(
            "{operation} failed: unknown category `{}`",
            category.trim()
        ));
    };
    let mut project = match project_of(&snapshot) {
        Ok(project) => project,
        Err(err) => return ProjectResponse::failure(format!("{operation} failed: {err}")),
    };
    match edit(project.inventory_mut(), category) {
        Ok(true) => ProjectResponse::success("Inventory updated.", snapshot_of(&project)),
        Ok(false) => ProjectResponse::success("No change.", snapshot_of(&project)),
        Err(err) => ProjectResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn project_of(snapshot: &ProjectSnapshot) -> PhonologyResult<Project> {
    let catalog = PhonemeCatalog::builtin();
    let mut inventory = Inventory::new();
    for (category, codes) in [
        (PhonemeCategory::PulmonicConsonant, &snapshot.pulmonic_consonants),
        (PhonemeCategory::NonPulmonicConsonant, &snapshot.non_pulmonic_consonants),
        (PhonemeCategory::Vowel, &snapshot.vowels),
    ] {
        inventory.merge(&Inventory::from_codes(catalog, category, codes)?)?;
    }
    let mut project = Project::new(snapshot.name.clone())
        .with_inventory(inventory)
        .with_lexicon(snapshot.lexicon.iter().cloned());
    project.set_file(normalize_path(snapshot.file_path.clone()).map(PathBuf::from));
    Ok(project)
}

fn snapshot_of(project: &Project) -> ProjectSnapshot {
    let codes = |category: PhonemeCategory| -> Vec<String> {
        project
            .inventory()
            .codes(category)
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    ProjectSnapshot {
        name: project.name.clone(),
        file_path: project.file().map(|path| path.display().to_string()),
        pulmonic_consonants: codes(PhonemeCategory::PulmonicConsonant),
        non_pulmonic_consonants: codes(PhonemeCategory::NonPulmonicConsonant),
        vowels: codes(PhonemeCategory::Vowel),
        lexicon: project.lexicon().to_vec(),
    }
}

fn normalize_path(path: Option<String>) -> Option<String> {
    path.map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn normalize_word_count(count: u32) -> u32 {
    match count {
        0 => PREVIEW_DEFAULT_WORDS,
        value if value > PREVIEW_WORDS_MAX => PREVIEW_WORDS_MAX,
        value => value,
    }
}

fn resolve_template_path() -> Option<PathBuf> {
    TEMPLATE_PATH
        .get_or_init(|| {
            let raw = std::env::var("WORDWEAVER_TEMPLATE_PATH").ok()?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::{
        catalog_entries, core_version, generate_preview, init_logging, inventory_add,
        inventory_remove, ping, project_new, project_open, project_save, PreviewSettings,
        ProjectSnapshot,
    };

    fn settings(word_count: u32, seed: Option<u64>) -> PreviewSettings {
        PreviewSettings {
            syllables_per_word: 2,
            word_count,
            separator: ".".to_string(),
            seed,
        }
    }

    fn starter() -> ProjectSnapshot {
        ProjectSnapshot {
            name: "Starter".to_string(),
            pulmonic_consonants: vec!["p".into(), "t".into(), "k".into()],
            vowels: vec!["a".into(), "i".into()],
            ..ProjectSnapshot::default()
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn catalog_entries_lists_vowel_grid() {
        let vowels = catalog_entries("vowel".to_string());
        assert!(vowels.iter().any(|item| item.code == "ux" && item.symbol == "ə"));
        assert!(vowels.iter().all(|item| !item.row.is_empty()));
        assert!(catalog_entries("glide".to_string()).is_empty());
    }

    #[test]
    fn project_new_uses_starter_inventory() {
        let response = project_new("  Fresh  ".to_string());
        assert!(response.ok, "{}", response.message);
        let snapshot = response.snapshot.expect("snapshot on success");
        assert_eq!(snapshot.name, "Fresh");
        assert!(snapshot.file_path.is_none());
        assert_eq!(snapshot.vowels, vec!["a", "e", "i", "o", "u"]);
    }

    #[test]
    fn inventory_edits_accept_codes_and_symbols() {
        let added = inventory_add(starter(), "pulmonic_consonant".to_string(), "ŋ".to_string());
        assert!(added.ok, "{}", added.message);
        let snapshot = added.snapshot.expect("snapshot on success");
        assert_eq!(snapshot.pulmonic_consonants, vec!["p", "t", "k", "ng"]);

        let removed = inventory_remove(snapshot, "pulmonic_consonant".to_string(), "p".to_string());
        let snapshot = removed.snapshot.expect("snapshot on success");
        assert_eq!(snapshot.pulmonic_consonants, vec!["t", "k", "ng"]);

        let unknown = inventory_add(starter(), "vowel".to_string(), "zz".to_string());
        assert!(!unknown.ok);
        assert!(unknown.snapshot.is_none());
    }

    #[test]
    fn save_requires_a_path_then_round_trips() {
        let unsaved = project_save(starter(), None);
        assert!(!unsaved.ok);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("starter.wwproj").display().to_string();
        let saved = project_save(starter(), Some(path.clone()));
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(
            saved.snapshot.as_ref().and_then(|s| s.file_path.clone()),
            Some(path.clone())
        );

        let opened = project_open(path.clone());
        assert!(opened.ok, "{}", opened.message);
        let snapshot = opened.snapshot.expect("snapshot on success");
        assert_eq!(snapshot.pulmonic_consonants, starter().pulmonic_consonants);
        assert_eq!(snapshot.file_path, Some(path));
    }

    #[test]
    fn seeded_preview_is_reproducible_and_clamped() {
        let first = generate_preview(starter(), "CV".to_string(), vec![], settings(500, Some(9)));
        let second = generate_preview(starter(), "CV".to_string(), vec![], settings(500, Some(9)));
        assert!(first.ok, "{}", first.message);
        assert_eq!(first.applied_word_count, 200);
        assert_eq!(first.words.len(), 200);
        assert_eq!(first.words, second.words);
    }

    #[test]
    fn preview_reports_empty_category_and_bad_template() {
        let empty = generate_preview(starter(), "CVN".to_string(), vec![], settings(3, Some(1)));
        assert!(!empty.ok);
        assert!(empty.words.is_empty());

        let malformed = generate_preview(starter(), "C(V".to_string(), vec![], settings(3, Some(1)));
        assert!(!malformed.ok);
    }
}
