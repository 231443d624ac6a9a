//! crates/lexipro_core/src/export.rs
//!
//! Pure helpers for the two exported artifacts: the delimited-text (CSV)
//! rendering of a vocabulary list and the plain-text chat transcript.
//! The CSV reader exists so an exported list can be re-imported losslessly.

use chrono::{DateTime, Utc};

use crate::domain::{CefrLevel, ChatTurn, VocabularyRecord, WordCategory};

/// Column order of the CSV artifact, matching `VocabularyRecord` field order.
pub const CSV_HEADERS: [&str; 7] = [
    "term",
    "category",
    "definition",
    "english",
    "turkish",
    "example1",
    "example2",
];

/// Errors raised while re-parsing an exported CSV document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV document is missing the header row")]
    MissingHeader,
    #[error("CSV header does not match the vocabulary column layout")]
    HeaderMismatch,
    #[error("CSV record {0} has {1} fields, expected {2}")]
    FieldCount(usize, usize, usize),
    #[error("CSV record {0} has unknown category '{1}'")]
    UnknownCategory(usize, String),
    #[error("CSV document ends inside a quoted field")]
    UnterminatedQuote,
}

/// Renders the vocabulary list as a CSV document with a header row.
pub fn vocabulary_to_csv(records: &[VocabularyRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, CSV_HEADERS.iter().copied());
    for record in records {
        write_row(
            &mut out,
            [
                record.term.as_str(),
                record.category.as_str(),
                record.definition.as_str(),
                record.english_gloss.as_str(),
                record.native_gloss.as_str(),
                record.example1.as_str(),
                record.example2.as_str(),
            ]
            .into_iter(),
        );
    }
    out
}

/// Parses a CSV document previously produced by [`vocabulary_to_csv`].
pub fn vocabulary_from_csv(text: &str) -> Result<Vec<VocabularyRecord>, ExportError> {
    let mut rows = parse_rows(text)?.into_iter();
    let header = rows.next().ok_or(ExportError::MissingHeader)?;
    if header != CSV_HEADERS {
        return Err(ExportError::HeaderMismatch);
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        if row.len() != CSV_HEADERS.len() {
            return Err(ExportError::FieldCount(
                index + 1,
                row.len(),
                CSV_HEADERS.len(),
            ));
        }
        let mut fields = row.into_iter();
        let term = fields.next().unwrap_or_default();
        let category_label = fields.next().unwrap_or_default();
        let category: WordCategory = category_label
            .parse()
            .map_err(|_| ExportError::UnknownCategory(index + 1, category_label))?;
        records.push(VocabularyRecord {
            term,
            category,
            definition: fields.next().unwrap_or_default(),
            english_gloss: fields.next().unwrap_or_default(),
            native_gloss: fields.next().unwrap_or_default(),
            example1: fields.next().unwrap_or_default(),
            example2: fields.next().unwrap_or_default(),
        });
    }
    Ok(records)
}

/// Filename for the CSV artifact, encoding the level and topic.
pub fn vocabulary_filename(level: CefrLevel, topic: &str) -> String {
    format!("vocabulaire_{}_{}.csv", level, sanitize_component(topic))
}

/// Renders the chat history as plain text, one `ROLE: content` line per turn.
pub fn transcript_to_text(turns: &[ChatTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        out.push_str(turn.role.transcript_label());
        out.push_str(": ");
        // Keep the one-line-per-turn shape even for multi-line replies.
        out.push_str(&turn.content.replace(['\r', '\n'], " "));
        out.push('\n');
    }
    out
}

/// Filename for the transcript artifact, encoding the generation timestamp.
pub fn transcript_filename(generated_at: DateTime<Utc>) -> String {
    format!(
        "transcription_{}.txt",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect()
}

fn write_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, ExportError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(ExportError::UnterminatedQuote);
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
