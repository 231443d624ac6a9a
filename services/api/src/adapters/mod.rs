//! services/api/src/adapters/mod.rs
//!
//! Provider adapters implementing the core service ports, plus the shared
//! error classification that maps SDK failures onto the `PortError` taxonomy.

pub mod tts;
pub mod tutor_llm;
pub mod vocab_llm;

pub use tts::OpenAiTtsAdapter;
pub use tutor_llm::OpenAiTutorAdapter;
pub use vocab_llm::OpenAiVocabAdapter;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use lexipro_core::ports::PortError;

/// Builds a client bound to the given credential.
///
/// A fresh client is constructed for every call so the most recently resolved
/// key is always the one used; adapters never cache a credential.
pub(crate) fn client_with_key(credential: &str) -> Client<OpenAIConfig> {
    Client::with_config(OpenAIConfig::new().with_api_key(credential))
}

/// Classifies a provider SDK failure into the port error taxonomy.
///
/// Authentication rejections and quota exhaustion get their own variants so
/// the user sees the matching remediation message; transport failures map to
/// `Network`; everything else is `Unexpected`.
pub fn classify_provider_error(err: OpenAIError) -> PortError {
    match err {
        OpenAIError::ApiError(api) => {
            let mut haystack = api.message.to_lowercase();
            if let Some(code) = &api.code {
                haystack.push(' ');
                haystack.push_str(&code.to_lowercase());
            }
            if let Some(kind) = &api.r#type {
                haystack.push(' ');
                haystack.push_str(&kind.to_lowercase());
            }

            if haystack.contains("api_key_invalid")
                || haystack.contains("invalid_api_key")
                || haystack.contains("incorrect api key")
                || haystack.contains("authentication")
                || haystack.contains("unauthorized")
            {
                PortError::InvalidCredential(api.message)
            } else if haystack.contains("insufficient_quota")
                || haystack.contains("quota")
                || haystack.contains("rate_limit")
                || haystack.contains("rate limit")
            {
                PortError::QuotaExceeded(api.message)
            } else {
                PortError::Unexpected(api.message)
            }
        }
        OpenAIError::Reqwest(e) => PortError::Network(e.to_string()),
        other => PortError::Unexpected(other.to_string()),
    }
}
