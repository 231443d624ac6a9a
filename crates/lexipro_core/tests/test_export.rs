//! Tests for [`lexipro_core::export`]

use chrono::{TimeZone, Utc};
use lexipro_core::domain::{CefrLevel, ChatTurn, VocabularyRecord, WordCategory};
use lexipro_core::export::{
    transcript_filename, transcript_to_text, vocabulary_filename, vocabulary_from_csv,
    vocabulary_to_csv, CSV_HEADERS,
};

fn sample_records() -> Vec<VocabularyRecord> {
    vec![
        VocabularyRecord {
            term: "journal".to_string(),
            category: WordCategory::Noun,
            definition: "Publication périodique d'information.".to_string(),
            english_gloss: "newspaper".to_string(),
            native_gloss: "gazete".to_string(),
            example1: "Je lis le journal tous les matins.".to_string(),
            example2: "Ce journal paraît le dimanche.".to_string(),
        },
        VocabularyRecord {
            term: "diffuser".to_string(),
            category: WordCategory::Verb,
            definition: "Transmettre une émission, une information.".to_string(),
            english_gloss: "to broadcast".to_string(),
            native_gloss: "yayınlamak".to_string(),
            example1: "La radio diffuse les nouvelles.".to_string(),
            example2: "L'émission sera diffusée demain.".to_string(),
        },
    ]
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[test]
fn csv_starts_with_header_in_field_order() {
    let csv = vocabulary_to_csv(&sample_records());
    let first_line = csv.lines().next().unwrap();
    assert_eq!(first_line, CSV_HEADERS.join(","));
}

#[test]
fn csv_round_trips_same_records_in_same_order() {
    let records = sample_records();
    let csv = vocabulary_to_csv(&records);
    let reparsed = vocabulary_from_csv(&csv).unwrap();
    assert_eq!(reparsed, records);
}

#[test]
fn csv_round_trips_delimiters_quotes_and_newlines() {
    let mut records = sample_records();
    records[0].definition = "Publication \"périodique\", d'information.".to_string();
    records[1].example1 = "Première ligne.\nDeuxième ligne.".to_string();

    let csv = vocabulary_to_csv(&records);
    let reparsed = vocabulary_from_csv(&csv).unwrap();
    assert_eq!(reparsed, records);
}

#[test]
fn csv_rejects_foreign_header() {
    let err = vocabulary_from_csv("a,b,c\n1,2,3\n");
    assert!(err.is_err());
}

#[test]
fn csv_rejects_unknown_category() {
    let mut csv = String::from("term,category,definition,english,turkish,example1,example2\n");
    csv.push_str("mot,Interjection,def,gloss,anlam,ex1,ex2\n");
    assert!(vocabulary_from_csv(&csv).is_err());
}

#[test]
fn empty_list_exports_header_only() {
    let csv = vocabulary_to_csv(&[]);
    assert_eq!(csv.lines().count(), 1);
    assert_eq!(vocabulary_from_csv(&csv).unwrap(), Vec::new());
}

// ── Filenames ─────────────────────────────────────────────────────────────────

#[test]
fn vocabulary_filename_encodes_level_and_topic() {
    assert_eq!(
        vocabulary_filename(CefrLevel::B1, "Les médias"),
        "vocabulaire_B1_Les médias.csv"
    );
}

#[test]
fn vocabulary_filename_strips_path_separators() {
    let name = vocabulary_filename(CefrLevel::A2, "La ville/Les transports");
    assert_eq!(name, "vocabulaire_A2_La ville-Les transports.csv");
}

#[test]
fn transcript_filename_encodes_timestamp() {
    let at = Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 5).unwrap();
    assert_eq!(transcript_filename(at), "transcription_20260807_143005.txt");
}

// ── Transcript ────────────────────────────────────────────────────────────────

#[test]
fn transcript_writes_one_line_per_turn() {
    let turns = vec![
        ChatTurn::assistant("Bonjour ! Prêt ?"),
        ChatTurn::user("Oui, parlons des médias."),
    ];
    let text = transcript_to_text(&turns);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["ASSISTANT: Bonjour ! Prêt ?", "USER: Oui, parlons des médias."]
    );
}

#[test]
fn transcript_flattens_multiline_replies() {
    let turns = vec![ChatTurn::assistant("Ligne une.\nLigne deux.")];
    let text = transcript_to_text(&turns);
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text, "ASSISTANT: Ligne une. Ligne deux.\n");
}
