//! services/api/src/adapters/tutor_llm.rs
//!
//! This module contains the adapter for the conversational tutor LLM.
//! It implements the `TutorChatService` port from the `core` crate.
//!
//! The adapter is stateless: the caller replays the system instruction and
//! the confirmed turn history on every send, and owns appending the confirmed
//! exchange afterwards.

use async_openai::{
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use lexipro_core::{
    domain::{ChatRole, ChatTurn, TokenUsage, TutorReply},
    ports::{PortError, PortResult, TutorChatService},
};

use super::{classify_provider_error, client_with_key};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TutorChatService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTutorAdapter {
    model: String,
}

impl OpenAiTutorAdapter {
    /// Creates a new `OpenAiTutorAdapter`.
    pub fn new(model: String) -> Self {
        Self { model }
    }
}

fn turn_to_message(turn: &ChatTurn) -> Result<ChatCompletionRequestMessage, PortError> {
    match turn.role {
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map(Into::into)
            .map_err(|e| PortError::Unexpected(e.to_string())),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content.as_str())
            .build()
            .map(Into::into)
            .map_err(|e| PortError::Unexpected(e.to_string())),
    }
}

//=========================================================================================
// `TutorChatService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TutorChatService for OpenAiTutorAdapter {
    /// Sends one user message within the replayed conversational context and
    /// returns the tutor's reply.
    async fn send_message(
        &self,
        credential: &str,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> PortResult<TutorReply> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(history.len() + 2);
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_instruction)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );
        for turn in history {
            messages.push(turn_to_message(turn)?);
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );

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

        // Extract the text content from the first choice in the response.
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Tutor LLM response contained no text content.".to_string())
            })?;

        Ok(TutorReply {
            content,
            usage,
        })
    }
}
