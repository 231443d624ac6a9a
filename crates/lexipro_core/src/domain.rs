//! crates/lexipro_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any provider SDK or transport format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A CEFR proficiency tier, `A1` (lowest) through `C2` (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// Every tier, lowest to highest.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("'{}' is not a CEFR level", other)),
        }
    }
}

/// Grammatical category of a vocabulary entry.
///
/// The wire labels are the French ones the model is instructed to emit, so
/// the same labels appear in JSON payloads and in the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordCategory {
    #[serde(rename = "Nom")]
    Noun,
    #[serde(rename = "Verbe")]
    Verb,
    #[serde(rename = "Adjectif")]
    Adjective,
    #[serde(rename = "Adverbe")]
    Adverb,
    #[serde(rename = "Structure/Expression")]
    Expression,
}

impl WordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCategory::Noun => "Nom",
            WordCategory::Verb => "Verbe",
            WordCategory::Adjective => "Adjectif",
            WordCategory::Adverb => "Adverbe",
            WordCategory::Expression => "Structure/Expression",
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Nom" => Ok(WordCategory::Noun),
            "Verbe" => Ok(WordCategory::Verb),
            "Adjectif" => Ok(WordCategory::Adjective),
            "Adverbe" => Ok(WordCategory::Adverb),
            "Structure/Expression" => Ok(WordCategory::Expression),
            other => Err(format!("'{}' is not a word category", other)),
        }
    }
}

/// One lexical entry produced by the vocabulary generator.
///
/// Records are immutable once created; the whole list is replaced on each
/// new topic selection, never merged or appended. The serde keys `english`
/// and `turkish` match the JSON field names the model is instructed to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub term: String,
    pub category: WordCategory,
    /// Definition in the target language (French).
    pub definition: String,
    #[serde(rename = "english")]
    pub english_gloss: String,
    #[serde(rename = "turkish")]
    pub native_gloss: String,
    pub example1: String,
    pub example2: String,
}

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Uppercase label used by the transcript export.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            ChatRole::User => "USER",
            ChatRole::Assistant => "ASSISTANT",
        }
    }
}

/// A single turn of the tutor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Token counts reported by the provider for one generative call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Accumulated token usage for the lifetime of the user session.
///
/// `last_*` fields are overwritten by each call; `total_*` fields only ever
/// increase. There is no reset operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub last_input_tokens: u64,
    pub last_output_tokens: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
}

impl UsageCounters {
    /// Records the usage of one successful generative call.
    ///
    /// Failed calls report no usage and must not be recorded.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.last_input_tokens = usage.input_tokens;
        self.last_output_tokens = usage.output_tokens;
        self.total_input_tokens = self.total_input_tokens.saturating_add(usage.input_tokens);
        self.total_output_tokens = self.total_output_tokens.saturating_add(usage.output_tokens);
    }
}

/// The outcome of one vocabulary generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyBatch {
    pub records: Vec<VocabularyRecord>,
    /// Usage metadata, when the provider reported it.
    pub usage: Option<TokenUsage>,
}

/// The outcome of one tutor chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorReply {
    pub content: String,
    /// Usage metadata, when the provider reported it.
    pub usage: Option<TokenUsage>,
}
