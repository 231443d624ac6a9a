//! services/api/src/credentials.rs
//!
//! Resolution of the effective API key from its three sources.
//!
//! Precedence, highest first: a key the user entered during this session, the
//! key captured in persisted configuration at startup, a live lookup of the
//! process environment. Resolution is pure apart from the environment read,
//! performs no validation and no caching, and is cheap enough to run before
//! every provider call. Validity is only discovered when a call is made.

use crate::config::Config;
use serde::Serialize;
use utoipa::ToSchema;

/// The fixed name shared by the persisted secret and the environment variable.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Which source supplied the effective credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// Entered by the user in the current session.
    UserProvided,
    /// Found in persisted application configuration at startup.
    Configured,
    /// Found in the process environment at resolution time.
    Environment,
}

/// Resolves the effective credential, if any.
///
/// Returns the first present value in precedence order together with its
/// source, so the presentation layer can disable the generation action when
/// nothing resolves.
pub fn resolve(
    session_key: Option<&str>,
    config: &Config,
) -> Option<(String, CredentialSource)> {
    if let Some(key) = session_key.filter(|k| !k.trim().is_empty()) {
        return Some((key.to_string(), CredentialSource::UserProvided));
    }
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        return Some((key.to_string(), CredentialSource::Configured));
    }
    if let Ok(key) = std::env::var(API_KEY_VAR) {
        if !key.trim().is_empty() {
            return Some((key, CredentialSource::Environment));
        }
    }
    None
}
