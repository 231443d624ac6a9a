pub mod domain;
pub mod export;
pub mod ports;
pub mod themes;

pub use domain::{
    CefrLevel, ChatRole, ChatTurn, TokenUsage, TutorReply, UsageCounters, VocabularyBatch,
    VocabularyRecord, WordCategory,
};
pub use ports::{
    PortError, PortResult, TextToSpeechService, TutorChatService, VocabularyGenerationService,
};
