//! services/api/src/adapters/tts.rs
//!
//! This module contains the adapter for the Text-to-Speech (TTS) service.
//! It implements the `TextToSpeechService` port from the `core` crate.

use async_openai::{
    error::OpenAIError,
    types::audio::{CreateSpeechRequest, SpeechModel, Voice},
};
use async_trait::async_trait;
use lexipro_core::ports::{PortError, PortResult, TextToSpeechService};

use super::{classify_provider_error, client_with_key};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `TextToSpeechService` port using the OpenAI TTS API.
///
/// Stateless: one request per invocation, no caching of generated audio.
#[derive(Clone)]
pub struct OpenAiTtsAdapter {
    model: SpeechModel,
    voice: Voice,
}

impl OpenAiTtsAdapter {
    /// Creates a new `OpenAiTtsAdapter`.
    pub fn new(model: SpeechModel, voice: Voice) -> Self {
        Self { model, voice }
    }
}

//=========================================================================================
// `TextToSpeechService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextToSpeechService for OpenAiTtsAdapter {
    /// Generates a vector of audio data (`Vec<u8>`) from the given text.
    async fn synthesize_speech(&self, credential: &str, text: &str) -> PortResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(PortError::Unexpected(
                "Cannot synthesize speech for empty text.".to_string(),
            ));
        }

        let request = CreateSpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
            ..Default::default()
        };

        let client = client_with_key(credential);
        let response = client
            .audio()
            .speech()
            .create(request)
            .await
            .map_err(|e: OpenAIError| classify_provider_error(e))?;

        // The response contains a `bytes` field. We call `.to_vec()` on that field.
        Ok(response.bytes.to_vec())
    }
}
