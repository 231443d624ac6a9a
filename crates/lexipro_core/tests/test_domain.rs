//! Tests for [`lexipro_core::domain`]

use lexipro_core::domain::{
    CefrLevel, ChatRole, ChatTurn, TokenUsage, UsageCounters, VocabularyRecord, WordCategory,
};
use lexipro_core::themes::suggested_themes;

fn record(term: &str) -> VocabularyRecord {
    VocabularyRecord {
        term: term.to_string(),
        category: WordCategory::Noun,
        definition: "définition".to_string(),
        english_gloss: "gloss".to_string(),
        native_gloss: "anlam".to_string(),
        example1: "Premier exemple.".to_string(),
        example2: "Deuxième exemple.".to_string(),
    }
}

// ── CEFR levels ───────────────────────────────────────────────────────────────

#[test]
fn cefr_level_parses_case_insensitively() {
    assert_eq!("b1".parse::<CefrLevel>().unwrap(), CefrLevel::B1);
    assert_eq!(" C2 ".parse::<CefrLevel>().unwrap(), CefrLevel::C2);
}

#[test]
fn cefr_level_rejects_unknown_tiers() {
    assert!("B3".parse::<CefrLevel>().is_err());
    assert!("".parse::<CefrLevel>().is_err());
}

#[test]
fn cefr_level_display_round_trips() {
    for level in CefrLevel::ALL {
        assert_eq!(level.to_string().parse::<CefrLevel>().unwrap(), level);
    }
}

// ── Word categories ───────────────────────────────────────────────────────────

#[test]
fn word_category_uses_french_wire_labels() {
    let json = serde_json::to_string(&WordCategory::Expression).unwrap();
    assert_eq!(json, "\"Structure/Expression\"");

    let parsed: WordCategory = serde_json::from_str("\"Adjectif\"").unwrap();
    assert_eq!(parsed, WordCategory::Adjective);
}

#[test]
fn vocabulary_record_deserializes_model_field_names() {
    let json = r#"{
        "term": "journal",
        "category": "Nom",
        "definition": "Publication périodique.",
        "english": "newspaper",
        "turkish": "gazete",
        "example1": "Je lis le journal.",
        "example2": "Le journal paraît chaque matin."
    }"#;
    let parsed: VocabularyRecord = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.term, "journal");
    assert_eq!(parsed.category, WordCategory::Noun);
    assert_eq!(parsed.english_gloss, "newspaper");
    assert_eq!(parsed.native_gloss, "gazete");
}

// ── Chat turns ────────────────────────────────────────────────────────────────

#[test]
fn chat_turn_constructors_set_roles() {
    assert_eq!(ChatTurn::user("salut").role, ChatRole::User);
    assert_eq!(ChatTurn::assistant("bonjour").role, ChatRole::Assistant);
}

#[test]
fn transcript_labels_are_uppercase() {
    assert_eq!(ChatRole::User.transcript_label(), "USER");
    assert_eq!(ChatRole::Assistant.transcript_label(), "ASSISTANT");
}

// ── Usage counters ────────────────────────────────────────────────────────────

#[test]
fn usage_counters_overwrite_last_and_accumulate_totals() {
    let mut counters = UsageCounters::default();

    counters.record(&TokenUsage {
        input_tokens: 120,
        output_tokens: 450,
    });
    assert_eq!(counters.last_input_tokens, 120);
    assert_eq!(counters.last_output_tokens, 450);
    assert_eq!(counters.total_input_tokens, 120);
    assert_eq!(counters.total_output_tokens, 450);

    counters.record(&TokenUsage {
        input_tokens: 30,
        output_tokens: 70,
    });
    // "last" is overwritten, not accumulated.
    assert_eq!(counters.last_input_tokens, 30);
    assert_eq!(counters.last_output_tokens, 70);
    // Totals only ever increase.
    assert_eq!(counters.total_input_tokens, 150);
    assert_eq!(counters.total_output_tokens, 520);
}

#[test]
fn usage_totals_saturate_instead_of_wrapping() {
    let mut counters = UsageCounters {
        total_input_tokens: u64::MAX - 5,
        ..Default::default()
    };
    counters.record(&TokenUsage {
        input_tokens: 10,
        output_tokens: 0,
    });
    assert_eq!(counters.total_input_tokens, u64::MAX);
}

// ── Theme catalog ─────────────────────────────────────────────────────────────

#[test]
fn every_level_offers_ten_themes() {
    for level in CefrLevel::ALL {
        assert_eq!(suggested_themes(level).len(), 10, "level {}", level);
    }
}

#[test]
fn b1_suggestions_include_les_medias() {
    assert!(suggested_themes(CefrLevel::B1).contains(&"Les médias"));
}

#[test]
fn records_are_value_comparable() {
    assert_eq!(record("maison"), record("maison"));
    assert_ne!(record("maison"), record("journal"));
}
