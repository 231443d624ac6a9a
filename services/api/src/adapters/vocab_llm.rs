//! services/api/src/adapters/vocab_llm.rs
//!
//! This module contains the adapter for the vocabulary-generating LLM.
//! It implements the `VocabularyGenerationService` port from the `core` crate.

const PROMPT_TEMPLATE: &str = r#"Génère une liste exhaustive de vocabulaire français pour le niveau {level} sur le thème "{topic}".
Réponds EXCLUSIVEMENT sous forme d'un tableau JSON. Chaque élément doit contenir les champs :
term, category (Nom, Verbe, Adjectif, Adverbe, Structure/Expression), definition (en français),
english, turkish, example1 (français), example2 (français).
N'ajoute aucun texte en dehors du tableau JSON."#;

use async_openai::{
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use lexipro_core::{
    domain::{CefrLevel, TokenUsage, VocabularyBatch, VocabularyRecord},
    ports::{PortError, PortResult, VocabularyGenerationService},
};
use regex::Regex;
use std::sync::OnceLock;

use super::{classify_provider_error, client_with_key};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `VocabularyGenerationService` using an
/// OpenAI-compatible LLM.
///
/// The adapter holds only the model name; a client is built per call from the
/// credential the caller resolved, so a key changed mid-session takes effect
/// on the very next call.
#[derive(Clone)]
pub struct OpenAiVocabAdapter {
    model: String,
}

impl OpenAiVocabAdapter {
    /// Creates a new `OpenAiVocabAdapter`.
    pub fn new(model: String) -> Self {
        Self { model }
    }
}

//=========================================================================================
// Response Parsing
//=========================================================================================

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence regex is valid")
    })
}

/// Extracts the JSON payload from raw model output.
///
/// The model may wrap its reply in a fenced code block and surround it with
/// commentary; only the first fenced block is treated as payload. A reply
/// with no fence at all is returned whole, so bare JSON still parses.
pub fn extract_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    match fence_regex().captures(trimmed) {
        Some(caps) => caps.get(1).map(|m| m.as_str().trim()).unwrap_or(trimmed),
        None => trimmed,
    }
}

/// Parses raw model output into vocabulary records.
///
/// Malformed JSON is a terminal failure for the call; there is no retry or
/// repair pass.
pub fn parse_vocabulary(raw: &str) -> PortResult<Vec<VocabularyRecord>> {
    let payload = extract_json_payload(raw);
    serde_json::from_str::<Vec<VocabularyRecord>>(payload)
        .map_err(|e| PortError::MalformedResponse(e.to_string()))
}

//=========================================================================================
// `VocabularyGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl VocabularyGenerationService for OpenAiVocabAdapter {
    /// Generates the vocabulary list with exactly one synchronous provider
    /// request; no retries, no streaming.
    async fn generate_vocabulary(
        &self,
        credential: &str,
        level: CefrLevel,
        topic: &str,
    ) -> PortResult<VocabularyBatch> {
        let prompt = PROMPT_TEMPLATE
            .replace("{level}", level.as_str())
            .replace("{topic}", topic);

        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let client = client_with_key(credential);
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| classify_provider_error(e))?;

        let usage = response.usage.as_ref().map(|u| TokenUsage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Vocabulary LLM response contained no text content.".to_string(),
                )
            })?;

        let records = parse_vocabulary(&text)?;
        Ok(VocabularyBatch { records, usage })
    }
}
