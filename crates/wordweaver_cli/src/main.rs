//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wordweaver_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use wordweaver_core::{
    ConstraintPattern, GenerationSettings, Generator, PhonemeCatalog, Project,
};

const PREVIEW_SEED: u64 = 0x5EED;

fn main() {
    println!("wordweaver_core ping={}", wordweaver_core::ping());
    println!("wordweaver_core version={}", wordweaver_core::core_version());

    match preview() {
        Ok(words) => println!("wordweaver_core preview={}", words.join(" ")),
        Err(err) => {
            eprintln!("wordweaver_core preview failed: {err}");
            std::process::exit(1);
        }
    }
}

fn preview() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let project = Project::with_defaults(PhonemeCatalog::builtin(), "Smoke")?;
    let settings = GenerationSettings {
        word_count: 5,
        separator: ".".to_string(),
        seed: Some(PREVIEW_SEED),
        ..GenerationSettings::default()
    };
    let mut generator = Generator::for_settings(
        project.inventory(),
        ConstraintPattern::parse("CV(C)")?,
        vec![ConstraintPattern::parse("CV")?],
        &settings,
    )?;
    Ok(generator.preview(&settings))
}
