//! services/api/src/web/chat_task.rs
//!
//! Orchestration of the tutor session state machine: lazy activation when the
//! chat surface is first viewed after a successful generation, and the
//! send-turn exchange with its partial-failure semantics.

use crate::web::state::{AppState, SessionState, TutorSession};
use lexipro_core::{
    domain::ChatTurn,
    ports::PortError,
};
use tracing::{info, warn};

/// What one send attempt produced.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The tutor's reply turn, absent when the send failed.
    pub reply: Option<ChatTurn>,
    /// Non-fatal, user-visible diagnostic when the send failed or was refused.
    pub diagnostic: Option<String>,
}

impl ChatOutcome {
    fn refused(diagnostic: String) -> Self {
        Self {
            reply: None,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Returns the display history, activating the tutor session first when a
/// successful generation is waiting for its chat surface to be viewed.
pub async fn view_chat(app: &AppState) -> Vec<ChatTurn> {
    let mut session = app.session.lock().await;
    activate_if_ready(&mut session);
    session.chat_history.clone()
}

/// Sends one user turn through the active tutor session.
///
/// The user turn is appended to the display history before the provider call
/// and is kept on failure; no assistant turn is appended and the session
/// handle is preserved so the same turn can be retried.
pub async fn send_turn(app: &AppState, message: &str) -> ChatOutcome {
    let message = message.trim();
    let mut session = app.session.lock().await;

    if message.is_empty() {
        return ChatOutcome::refused("Écrivez un message avant d'envoyer.".to_string());
    }
    if !activate_if_ready(&mut session) {
        return ChatOutcome::refused(
            "Générez d'abord une liste de vocabulaire pour démarrer le tuteur.".to_string(),
        );
    }

    session.chat_history.push(ChatTurn::user(message));

    let Some((credential, _)) = app.resolve_credential(&session) else {
        return ChatOutcome::refused(PortError::MissingCredential.user_diagnostic());
    };
    // The handle owns replay context; snapshot it for the call.
    let (instruction, history) = match &session.tutor {
        Some(tutor) => (
            tutor.system_instruction().to_string(),
            tutor.history().to_vec(),
        ),
        None => {
            return ChatOutcome::refused(
                "Générez d'abord une liste de vocabulaire pour démarrer le tuteur.".to_string(),
            )
        }
    };

    match app
        .tutor_adapter
        .send_message(&credential, &instruction, &history, message)
        .await
    {
        Ok(reply) => {
            if let Some(usage) = &reply.usage {
                session.usage.record(usage);
            }
            if let Some(tutor) = session.tutor.as_mut() {
                tutor.record_exchange(message, &reply.content);
            }
            let turn = ChatTurn::assistant(reply.content);
            session.chat_history.push(turn.clone());
            ChatOutcome {
                reply: Some(turn),
                diagnostic: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "tutor exchange failed");
            ChatOutcome {
                reply: None,
                diagnostic: Some(e.user_diagnostic()),
            }
        }
    }
}

/// The uninitialized → active transition.
///
/// Fires when vocabulary from a successful generation is present and no
/// session exists yet: builds the handle and appends the local-only welcome
/// turn. Returns whether a session is active afterwards.
fn activate_if_ready(session: &mut SessionState) -> bool {
    if session.tutor.is_some() {
        return true;
    }
    let (Some(level), Some(topic)) = (session.level, session.topic.clone()) else {
        return false;
    };
    if session.vocabulary.is_empty() {
        return false;
    }

    info!(%level, topic, "activating tutor session");
    session.tutor = Some(TutorSession::new(level, &topic, &session.vocabulary));
    session
        .chat_history
        .push(ChatTurn::assistant(TutorSession::welcome_message(
            level, &topic,
        )));
    true
}
