use wordweaver_core::{
    ConstraintPattern, GenerationSettings, Generator, GeneratorError, Inventory,
    PhonemeCatalog, PhonemeCategory, PhonemeConstraint,
};

fn inventory() -> Inventory {
    let catalog = PhonemeCatalog::builtin();
    let mut inventory =
        Inventory::from_codes(catalog, PhonemeCategory::PulmonicConsonant, &["p", "t", "k", "ng"])
            .unwrap();
    inventory
        .merge(&Inventory::from_codes(catalog, PhonemeCategory::Vowel, &["a", "i", "u"]).unwrap())
        .unwrap();
    inventory
}

fn pattern(template: &str) -> ConstraintPattern {
    ConstraintPattern::parse(template).unwrap()
}

#[test]
fn binding_rejects_categories_without_phonemes() {
    let inventory = inventory();
    let err = Generator::seeded(&inventory, pattern("CV"), vec![pattern("NV")], 1)
        .err()
        .unwrap();
    assert_eq!(err, GeneratorError::EmptyCategory(PhonemeCategory::NonPulmonicConsonant));
}

#[test]
fn failed_constrain_keeps_previous_patterns() {
    let inventory = inventory();
    let mut generator = Generator::seeded(&inventory, pattern("CV"), vec![], 1).unwrap();
    let err = generator.constrain(pattern("NV"), vec![]).unwrap_err();
    assert!(matches!(err, GeneratorError::EmptyCategory(_)));
    assert_eq!(generator.primary(), &pattern("CV"));

    generator.constrain(pattern("V"), vec![pattern("PV")]).unwrap();
    assert_eq!(generator.primary(), &pattern("V"));
    assert_eq!(generator.secondary(), &[pattern("PV")]);
}

#[test]
fn syllables_yields_exactly_n() {
    let inventory = inventory();
    let mut generator = Generator::seeded(&inventory, pattern("C(V)"), vec![], 3).unwrap();
    for n in [0, 1, 7, 64] {
        let syllables = generator.syllables(n);
        assert_eq!(syllables.len(), n);
        assert_eq!(syllables.count(), n);
    }
}

#[test]
fn slot_counts_stay_within_pattern_bounds() {
    let inventory = inventory();
    let template = pattern("(C)C(V)V(C)");
    let required = template.required_count();
    let max = template.len();
    assert_eq!((required, max), (2, 5));

    let mut generator = Generator::seeded(&inventory, template, vec![], 11).unwrap();
    for syllable in generator.syllables(2_000) {
        assert!((required..=max).contains(&syllable.len()), "{}", syllable.render());
        for phoneme in syllable.phonemes() {
            assert!(inventory.contains(phoneme));
        }
    }
}

#[test]
fn optional_slot_inclusion_is_about_half() {
    let inventory = inventory();
    let mut generator = Generator::seeded(&inventory, pattern("V(C)"), vec![], 20_240_601).unwrap();
    let draws = 10_000;
    let included = generator
        .syllables(draws)
        .filter(|syllable| syllable.len() == 2)
        .count();
    let ratio = included as f64 / draws as f64;
    assert!((0.47..=0.53).contains(&ratio), "ratio {ratio}");
}

#[test]
fn mandatory_slots_follow_category_order() {
    let inventory = inventory();
    let mut generator = Generator::seeded(&inventory, pattern("CVC"), vec![], 5).unwrap();
    for syllable in generator.syllables(200) {
        let categories: Vec<PhonemeCategory> =
            syllable.phonemes().iter().map(|p| p.category()).collect();
        assert_eq!(
            categories,
            vec![
                PhonemeCategory::PulmonicConsonant,
                PhonemeCategory::Vowel,
                PhonemeCategory::PulmonicConsonant,
            ]
        );
    }
}

#[test]
fn same_seed_same_words() {
    let inventory = inventory();
    let render = |seed| {
        let mut generator =
            Generator::seeded(&inventory, pattern("CV(C)"), vec![pattern("V")], seed).unwrap();
        generator
            .words(3, 25)
            .iter()
            .map(|word| word.render("."))
            .collect::<Vec<_>>()
    };
    assert_eq!(render(42), render(42));
    assert_ne!(render(42), render(43));
}

#[test]
fn syllable_position_selects_pattern() {
    let inventory = inventory();
    let primary = pattern("CVC");
    let s0 = pattern("V");
    let s1 = pattern("CV");
    let mut generator =
        Generator::seeded(&inventory, primary.clone(), vec![s0.clone(), s1.clone()], 8).unwrap();

    let expected = [&primary, &s0, &s1, &s1, &s1];
    for (index, want) in expected.iter().enumerate() {
        assert_eq!(generator.pattern_for(index), *want);
    }

    let word: Vec<usize> = generator.syllables(5).map(|s| s.len()).collect();
    assert_eq!(word, vec![3, 1, 2, 2, 2]);
}

#[test]
fn generic_consonant_slots_draw_from_both_subtypes() {
    let catalog = PhonemeCatalog::builtin();
    let mut inventory =
        Inventory::from_codes(catalog, PhonemeCategory::PulmonicConsonant, &["p"]).unwrap();
    inventory
        .merge(&Inventory::from_codes(catalog, PhonemeCategory::NonPulmonicConsonant, &["tc"]).unwrap())
        .unwrap();
    let slots = ConstraintPattern::new(vec![PhonemeConstraint::required(PhonemeCategory::Consonant)]);
    let mut generator = Generator::seeded(&inventory, slots, vec![], 2).unwrap();

    let symbols: std::collections::HashSet<String> =
        generator.syllables(200).map(|s| s.render()).collect();
    assert!(symbols.contains("p"));
    assert!(symbols.contains("ǀ"));
}

#[test]
fn preview_renders_with_settings() {
    let inventory = inventory();
    let settings = GenerationSettings {
        syllables_per_word: 3,
        word_count: 4,
        separator: "-".to_string(),
        seed: Some(99),
    };
    let mut generator =
        Generator::for_settings(&inventory, pattern("CV"), vec![], &settings).unwrap();
    let words = generator.preview(&settings);
    assert_eq!(words.len(), 4);
    for word in words {
        assert_eq!(word.matches('-').count(), 2, "{word}");
    }
}

#[test]
fn patterns_serialize_as_slot_lists() {
    let value = serde_json::to_value(pattern("C(V)")).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "category": "consonant", "optional": false },
            { "category": "vowel", "optional": true },
        ])
    );
}
