pub mod chat_task;
pub mod rest;
pub mod state;
pub mod vocab_task;

// Re-export the handlers to make them easily accessible to the binary that
// will build the web server router.
pub use rest::{
    credential_status_handler, export_transcript_handler, export_vocabulary_handler,
    generate_vocabulary_handler, send_chat_handler, set_credential_handler, speech_handler,
    themes_handler, usage_handler, view_chat_handler, vocabulary_handler,
};
pub use state::AppState;
