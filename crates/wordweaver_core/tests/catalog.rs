use wordweaver_core::{PhonemeCatalog, PhonemeCategory, PhonologyError};

#[test]
fn every_code_round_trips_through_its_symbol() {
    let catalog = PhonemeCatalog::builtin();
    for category in PhonemeCategory::CONCRETE {
        assert!(catalog.len(category) > 0, "{category} table is empty");
        for entry in catalog.entries(category) {
            let phoneme = catalog.resolve(entry.code, category).unwrap();
            assert_eq!(phoneme.symbol(), entry.symbol);
            assert_eq!(
                catalog.reverse_resolve(phoneme.symbol(), category).unwrap(),
                entry.code
            );
        }
    }
}

#[test]
fn known_codes_resolve_to_expected_symbols() {
    let catalog = PhonemeCatalog::builtin();
    let cases = [
        ("ng", PhonemeCategory::PulmonicConsonant, "ŋ"),
        ("gh", PhonemeCategory::PulmonicConsonant, "ʔ"),
        ("rt", PhonemeCategory::PulmonicConsonant, "ɾ"),
        ("tc", PhonemeCategory::NonPulmonicConsonant, "ǀ"),
        ("bi", PhonemeCategory::NonPulmonicConsonant, "ɓ"),
        ("ux", PhonemeCategory::Vowel, "ə"),
        ("uv", PhonemeCategory::Vowel, "ɯ"),
    ];
    for (code, category, symbol) in cases {
        assert_eq!(catalog.resolve(code, category).unwrap().symbol(), symbol);
    }
}

#[test]
fn resolution_is_scoped_by_category() {
    let catalog = PhonemeCatalog::builtin();
    let err = catalog.resolve("a", PhonemeCategory::PulmonicConsonant).unwrap_err();
    assert_eq!(
        err,
        PhonologyError::UnknownPhoneme {
            text: "a".to_string(),
            category: PhonemeCategory::PulmonicConsonant,
        }
    );
    assert!(catalog.resolve_symbol("ǀ", PhonemeCategory::Vowel).is_err());
}

#[test]
fn generic_consonant_spans_both_subtypes() {
    let catalog = PhonemeCatalog::builtin();
    let pulmonic = catalog.resolve("p", PhonemeCategory::Consonant).unwrap();
    let click = catalog.resolve("tc", PhonemeCategory::Consonant).unwrap();
    assert_eq!(pulmonic.category(), PhonemeCategory::PulmonicConsonant);
    assert_eq!(click.category(), PhonemeCategory::NonPulmonicConsonant);
    assert_eq!(
        catalog.len(PhonemeCategory::Consonant),
        catalog.len(PhonemeCategory::PulmonicConsonant)
            + catalog.len(PhonemeCategory::NonPulmonicConsonant)
    );
}

#[test]
fn grid_labels_address_every_entry() {
    let catalog = PhonemeCatalog::builtin();
    for category in PhonemeCategory::CONCRETE {
        let rows = catalog.rows(category);
        let columns = catalog.columns(category);
        for entry in catalog.entries(category) {
            assert!(rows.contains(&entry.row), "{} row {}", entry.code, entry.row);
            assert!(columns.contains(&entry.column), "{} column {}", entry.code, entry.column);
            assert!(catalog
                .cell(category, entry.row, entry.column)
                .contains(&entry));
        }
    }
    assert!(catalog.rows(PhonemeCategory::Consonant).is_empty());
}

#[test]
fn catalog_entries_serialize_with_snake_case_categories() {
    let catalog = PhonemeCatalog::builtin();
    let entry = catalog
        .entries(PhonemeCategory::NonPulmonicConsonant)
        .next()
        .unwrap();
    let value = serde_json::to_value(entry).unwrap();
    assert_eq!(value["category"], "non_pulmonic_consonant");
}
