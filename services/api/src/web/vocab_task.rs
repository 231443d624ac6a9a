//! services/api/src/web/vocab_task.rs
//!
//! Orchestration of one vocabulary generation attempt. Fails soft: provider
//! and parse failures come back as an empty record list plus a user-visible
//! diagnostic, never as an error to the web layer.

use crate::web::state::AppState;
use lexipro_core::{
    domain::{CefrLevel, VocabularyRecord},
    ports::PortError,
};
use tracing::{info, warn};

/// What one generation attempt produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub records: Vec<VocabularyRecord>,
    /// Non-fatal, user-visible diagnostic when the attempt failed or was
    /// refused.
    pub diagnostic: Option<String>,
}

impl GenerationOutcome {
    fn refused(diagnostic: String) -> Self {
        Self {
            records: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }
}

/// Runs one generation attempt for the given level/topic selection.
///
/// A request with no resolvable credential or an empty topic is refused
/// before it becomes an attempt: nothing is cleared and no provider call is
/// made. Once the attempt proceeds, the previous vocabulary, chat history and
/// tutor session are discarded unconditionally, then exactly one provider
/// call decides the outcome.
pub async fn generate_vocabulary(
    app: &AppState,
    level: CefrLevel,
    topic: &str,
) -> GenerationOutcome {
    let topic = topic.trim();
    let mut session = app.session.lock().await;

    if topic.is_empty() {
        return GenerationOutcome::refused(
            "Choisissez un thème ou entrez un sujet personnalisé.".to_string(),
        );
    }
    let Some((credential, source)) = app.resolve_credential(&session) else {
        return GenerationOutcome::refused(PortError::MissingCredential.user_diagnostic());
    };

    info!(%level, topic, credential_source = ?source, "generating vocabulary");
    session.reset_for_generation(level, topic);

    match app
        .vocab_adapter
        .generate_vocabulary(&credential, level, topic)
        .await
    {
        Ok(batch) => {
            if let Some(usage) = &batch.usage {
                session.usage.record(usage);
            }
            info!(records = batch.records.len(), "vocabulary generated");
            session.vocabulary = batch.records.clone();
            GenerationOutcome {
                records: batch.records,
                diagnostic: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "vocabulary generation failed");
            GenerationOutcome {
                records: Vec::new(),
                diagnostic: Some(e.user_diagnostic()),
            }
        }
    }
}
