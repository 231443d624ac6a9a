//! crates/lexipro_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like provider APIs.

use async_trait::async_trait;

use crate::domain::{CefrLevel, ChatTurn, TutorReply, VocabularyBatch};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Provider failures are classified into this taxonomy at the adapter
/// boundary so the rest of the application never sees SDK error types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    /// No credential could be resolved; the call was refused before reaching
    /// the provider.
    #[error("No API key is configured")]
    MissingCredential,
    /// The provider rejected the credential at call time.
    #[error("The provider rejected the API key: {0}")]
    InvalidCredential(String),
    /// The provider signalled quota or rate-limit exhaustion.
    #[error("Quota or rate limit exceeded: {0}")]
    QuotaExceeded(String),
    /// The reply was not parseable as the expected JSON payload.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
    /// A transport-level failure before a provider verdict was received.
    #[error("Network error: {0}")]
    Network(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The non-fatal, user-visible diagnostic for this failure.
    ///
    /// Every external-call failure is converted into one of these messages
    /// at the call site; nothing propagates as an unhandled fault.
    pub fn user_diagnostic(&self) -> String {
        match self {
            PortError::MissingCredential => {
                "Aucune clé API n'est configurée. Entrez votre clé pour commencer.".to_string()
            }
            PortError::InvalidCredential(_) => {
                "Votre clé API a été refusée. Vérifiez votre clé et réessayez.".to_string()
            }
            PortError::QuotaExceeded(_) => {
                "Votre quota API est épuisé. Attendez un moment ou vérifiez vos limites."
                    .to_string()
            }
            PortError::MalformedResponse(_) => {
                "La réponse du modèle n'a pas pu être interprétée. Relancez la génération."
                    .to_string()
            }
            PortError::Network(_) => {
                "Le service de génération est injoignable. Vérifiez votre connexion et réessayez."
                    .to_string()
            }
            PortError::Unexpected(detail) => {
                format!("Une erreur inattendue s'est produite : {}", detail)
            }
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// One-shot structured vocabulary generation.
///
/// The credential is passed explicitly on every call so the most current key
/// is always used; implementations must not cache it.
#[async_trait]
pub trait VocabularyGenerationService: Send + Sync {
    /// Generates the vocabulary list for one level/topic selection.
    ///
    /// Exactly one provider request per call; no retries, no streaming.
    async fn generate_vocabulary(
        &self,
        credential: &str,
        level: CefrLevel,
        topic: &str,
    ) -> PortResult<VocabularyBatch>;
}

/// Stateless transport for one tutor exchange.
///
/// The caller owns the conversational context: the system instruction and
/// the confirmed turn history are replayed on every send, and the caller
/// appends the confirmed exchange afterwards.
#[async_trait]
pub trait TutorChatService: Send + Sync {
    async fn send_message(
        &self,
        credential: &str,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> PortResult<TutorReply>;
}

/// Speech synthesis for a single term, one request per invocation.
#[async_trait]
pub trait TextToSpeechService: Send + Sync {
    /// Generates audio data from a string of text.
    async fn synthesize_speech(&self, credential: &str, text: &str) -> PortResult<Vec<u8>>;
}
