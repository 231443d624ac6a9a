//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the single user session it owns.

use crate::config::Config;
use crate::credentials::{self, CredentialSource};
use lexipro_core::{
    domain::{CefrLevel, ChatTurn, UsageCounters, VocabularyRecord},
    ports::{TextToSpeechService, TutorChatService, VocabularyGenerationService},
};
use std::sync::Arc;
use tokio::sync::Mutex;

const SYSTEM_INSTRUCTION_TEMPLATE: &str = r#"Tu es un enseignant de français expert. L'utilisateur a un niveau {level}.
Le thème est "{topic}". Vocabulaire : {vocabulary}.
1. Fais la conversation en français.
2. Fais utiliser le vocabulaire ci-dessus.
3. Corrige poliment les erreurs.
4. Donne une brève explication en turc quand c'est nécessaire."#;

const WELCOME_TEMPLATE: &str = "Bonjour ! Je suis ravi de vous aider à pratiquer votre français au niveau {level} sur le thème '{topic}'. Prêt ?";

/// How many generated terms are quoted in the tutor's system instruction.
const VOCABULARY_PREVIEW_TERMS: usize = 10;

//=========================================================================================
// AppState (Shared Across All Handlers)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The session mutex both owns all mutable session state and serializes
/// provider calls: exactly one generative call is ever in flight.
pub struct AppState {
    pub config: Arc<Config>,
    pub vocab_adapter: Arc<dyn VocabularyGenerationService>,
    pub tutor_adapter: Arc<dyn TutorChatService>,
    pub tts_adapter: Arc<dyn TextToSpeechService>,
    pub session: Mutex<SessionState>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        vocab_adapter: Arc<dyn VocabularyGenerationService>,
        tutor_adapter: Arc<dyn TutorChatService>,
        tts_adapter: Arc<dyn TextToSpeechService>,
    ) -> Self {
        Self {
            config,
            vocab_adapter,
            tutor_adapter,
            tts_adapter,
            session: Mutex::new(SessionState::default()),
        }
    }

    /// Resolves the effective credential for the given session snapshot.
    pub fn resolve_credential(
        &self,
        session: &SessionState,
    ) -> Option<(String, CredentialSource)> {
        credentials::resolve(session.user_api_key.as_deref(), &self.config)
    }
}

//=========================================================================================
// TutorSession (Provider-Side Conversational Handle)
//=========================================================================================

/// The stateful conversational handle, bound to one level/topic/vocabulary
/// selection at creation.
///
/// Its history holds confirmed exchanges only and is the sole source of truth
/// for replay context. The displayed chat list is a projection of the same
/// story; it differs only in carrying the local welcome turn and any user
/// turn whose send failed.
#[derive(Debug, Clone)]
pub struct TutorSession {
    system_instruction: String,
    history: Vec<ChatTurn>,
}

impl TutorSession {
    /// Creates a handle seeded with a system instruction embedding the level,
    /// the topic and a preview of the first generated terms.
    pub fn new(level: CefrLevel, topic: &str, vocabulary: &[VocabularyRecord]) -> Self {
        let preview = vocabulary
            .iter()
            .take(VOCABULARY_PREVIEW_TERMS)
            .map(|record| record.term.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let system_instruction = SYSTEM_INSTRUCTION_TEMPLATE
            .replace("{level}", level.as_str())
            .replace("{topic}", topic)
            .replace("{vocabulary}", &preview);
        Self {
            system_instruction,
            history: Vec::new(),
        }
    }

    /// The assistant welcome turn shown when the session activates.
    /// Purely local; it is never sent to the model.
    pub fn welcome_message(level: CefrLevel, topic: &str) -> String {
        WELCOME_TEMPLATE
            .replace("{level}", level.as_str())
            .replace("{topic}", topic)
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Confirmed exchanges replayed to the model on every send.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Appends one confirmed user/assistant exchange to the replay context.
    pub fn record_exchange(&mut self, user: &str, assistant: &str) {
        self.history.push(ChatTurn::user(user));
        self.history.push(ChatTurn::assistant(assistant));
    }
}

//=========================================================================================
// SessionState (The Single Logical User Session)
//=========================================================================================

/// All mutable state owned by the one logical user session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Key explicitly entered by the user this session, highest-precedence
    /// credential source.
    pub user_api_key: Option<String>,
    pub level: Option<CefrLevel>,
    pub topic: Option<String>,
    pub vocabulary: Vec<VocabularyRecord>,
    /// Display history, including the local welcome turn and any user turn
    /// whose send failed.
    pub chat_history: Vec<ChatTurn>,
    /// At most one active tutor session; `None` is the uninitialized state.
    pub tutor: Option<TutorSession>,
    pub usage: UsageCounters,
}

impl SessionState {
    /// Prepares the session for a generation attempt.
    ///
    /// Vocabulary, chat history and the tutor handle are invalidated together
    /// before the provider call, so a failed generation still discards the
    /// previous conversation. Usage counters survive.
    pub fn reset_for_generation(&mut self, level: CefrLevel, topic: &str) {
        self.level = Some(level);
        self.topic = Some(topic.to_string());
        self.vocabulary.clear();
        self.chat_history.clear();
        self.tutor = None;
    }
}
