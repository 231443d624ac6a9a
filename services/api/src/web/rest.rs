//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::credentials::CredentialSource;
use crate::web::{chat_task, state::AppState, vocab_task};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use lexipro_core::{
    domain::{CefrLevel, ChatTurn, VocabularyRecord},
    export,
    ports::PortError,
    themes,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        set_credential_handler,
        credential_status_handler,
        themes_handler,
        generate_vocabulary_handler,
        vocabulary_handler,
        export_vocabulary_handler,
        view_chat_handler,
        send_chat_handler,
        export_transcript_handler,
        usage_handler,
        speech_handler,
    ),
    components(
        schemas(
            SetCredentialRequest,
            CredentialStatusResponse,
            CredentialSource,
            ThemesResponse,
            GenerateVocabularyRequest,
            VocabularyRecordPayload,
            VocabularyResponse,
            ChatTurnPayload,
            ChatHistoryResponse,
            SendChatRequest,
            ChatReplyResponse,
            UsageResponse,
            SpeechRequest,
        )
    ),
    tags(
        (name = "LexiPro API", description = "API endpoints for the CEFR French vocabulary and tutor service.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Stores or clears the key entered by the user for this session.
#[derive(Deserialize, ToSchema)]
pub struct SetCredentialRequest {
    /// The key to use for this session; empty or absent clears it.
    api_key: Option<String>,
}

/// Whether a credential currently resolves, and from which source.
#[derive(Serialize, ToSchema)]
pub struct CredentialStatusResponse {
    configured: bool,
    source: Option<CredentialSource>,
}

/// Suggested themes for one CEFR level.
#[derive(Serialize, ToSchema)]
pub struct ThemesResponse {
    level: String,
    themes: Vec<String>,
}

/// A level/topic selection to generate vocabulary for.
#[derive(Deserialize, ToSchema)]
pub struct GenerateVocabularyRequest {
    /// CEFR level, `A1` through `C2`.
    level: String,
    topic: String,
}

/// One vocabulary entry as rendered to the client.
#[derive(Serialize, ToSchema)]
pub struct VocabularyRecordPayload {
    term: String,
    category: String,
    definition: String,
    english: String,
    turkish: String,
    example1: String,
    example2: String,
}

impl From<&VocabularyRecord> for VocabularyRecordPayload {
    fn from(record: &VocabularyRecord) -> Self {
        Self {
            term: record.term.clone(),
            category: record.category.to_string(),
            definition: record.definition.clone(),
            english: record.english_gloss.clone(),
            turkish: record.native_gloss.clone(),
            example1: record.example1.clone(),
            example2: record.example2.clone(),
        }
    }
}

/// The fail-soft result of a generation attempt.
#[derive(Serialize, ToSchema)]
pub struct VocabularyResponse {
    records: Vec<VocabularyRecordPayload>,
    /// Present when the attempt failed or was refused.
    diagnostic: Option<String>,
}

/// One displayed chat turn.
#[derive(Serialize, ToSchema)]
pub struct ChatTurnPayload {
    role: String,
    content: String,
}

impl From<&ChatTurn> for ChatTurnPayload {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role.transcript_label().to_lowercase(),
            content: turn.content.clone(),
        }
    }
}

/// The displayed chat history.
#[derive(Serialize, ToSchema)]
pub struct ChatHistoryResponse {
    turns: Vec<ChatTurnPayload>,
}

/// One user message for the tutor.
#[derive(Deserialize, ToSchema)]
pub struct SendChatRequest {
    message: String,
}

/// The fail-soft result of a send attempt.
#[derive(Serialize, ToSchema)]
pub struct ChatReplyResponse {
    reply: Option<ChatTurnPayload>,
    /// Present when the send failed; the user turn stays recorded.
    diagnostic: Option<String>,
}

/// The four usage counters.
#[derive(Serialize, ToSchema)]
pub struct UsageResponse {
    last_input_tokens: u64,
    last_output_tokens: u64,
    total_input_tokens: u64,
    total_output_tokens: u64,
}

/// Text to synthesize, typically a single term.
#[derive(Deserialize, ToSchema)]
pub struct SpeechRequest {
    text: String,
}

fn port_error_status(error: &PortError) -> StatusCode {
    match error {
        PortError::MissingCredential => StatusCode::CONFLICT,
        PortError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
        PortError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        PortError::MalformedResponse(_) | PortError::Network(_) => StatusCode::BAD_GATEWAY,
        PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

//=========================================================================================
// Credential Handlers
//=========================================================================================

/// Store or clear the session API key.
#[utoipa::path(
    put,
    path = "/credential",
    request_body = SetCredentialRequest,
    responses(
        (status = 200, description = "Session key updated", body = CredentialStatusResponse)
    )
)]
pub async fn set_credential_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SetCredentialRequest>,
) -> Json<CredentialStatusResponse> {
    let mut session = app_state.session.lock().await;
    session.user_api_key = payload
        .api_key
        .filter(|key| !key.trim().is_empty())
        .map(|key| key.trim().to_string());

    let source = app_state
        .resolve_credential(&session)
        .map(|(_, source)| source);
    Json(CredentialStatusResponse {
        configured: source.is_some(),
        source,
    })
}

/// Report whether a credential resolves, so the client can gate the
/// generation action.
#[utoipa::path(
    get,
    path = "/credential",
    responses(
        (status = 200, description = "Current credential status", body = CredentialStatusResponse)
    )
)]
pub async fn credential_status_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<CredentialStatusResponse> {
    let session = app_state.session.lock().await;
    let source = app_state
        .resolve_credential(&session)
        .map(|(_, source)| source);
    Json(CredentialStatusResponse {
        configured: source.is_some(),
        source,
    })
}

//=========================================================================================
// Vocabulary Handlers
//=========================================================================================

/// List the suggested themes for a CEFR level.
#[utoipa::path(
    get,
    path = "/themes/{level}",
    params(("level" = String, Path, description = "CEFR level, A1 through C2")),
    responses(
        (status = 200, description = "Suggested themes", body = ThemesResponse),
        (status = 400, description = "Not a CEFR level")
    )
)]
pub async fn themes_handler(
    Path(level): Path<String>,
) -> Result<Json<ThemesResponse>, (StatusCode, String)> {
    let level: CefrLevel = level
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;
    Ok(Json(ThemesResponse {
        level: level.to_string(),
        themes: themes::suggested_themes(level)
            .iter()
            .map(|theme| theme.to_string())
            .collect(),
    }))
}

/// Generate a new vocabulary list for a level/topic selection.
///
/// Fails soft: provider and parse failures come back as an empty record list
/// plus a diagnostic. Any attempt that reaches the provider discards the
/// previous vocabulary, chat history and tutor session first.
#[utoipa::path(
    post,
    path = "/vocabulary",
    request_body = GenerateVocabularyRequest,
    responses(
        (status = 200, description = "Generation outcome", body = VocabularyResponse),
        (status = 400, description = "Not a CEFR level")
    )
)]
pub async fn generate_vocabulary_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<GenerateVocabularyRequest>,
) -> Result<Json<VocabularyResponse>, (StatusCode, String)> {
    let level: CefrLevel = payload
        .level
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    let outcome = vocab_task::generate_vocabulary(&app_state, level, &payload.topic).await;
    Ok(Json(VocabularyResponse {
        records: outcome.records.iter().map(Into::into).collect(),
        diagnostic: outcome.diagnostic,
    }))
}

/// Return the current vocabulary list.
#[utoipa::path(
    get,
    path = "/vocabulary",
    responses(
        (status = 200, description = "Current vocabulary list", body = VocabularyResponse)
    )
)]
pub async fn vocabulary_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<VocabularyResponse> {
    let session = app_state.session.lock().await;
    Json(VocabularyResponse {
        records: session.vocabulary.iter().map(Into::into).collect(),
        diagnostic: None,
    })
}

/// Download the current vocabulary list as CSV.
#[utoipa::path(
    get,
    path = "/vocabulary/export",
    responses(
        (status = 200, description = "CSV document, column order = record field order"),
        (status = 404, description = "No vocabulary has been generated")
    )
)]
pub async fn export_vocabulary_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = app_state.session.lock().await;
    if session.vocabulary.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            "No vocabulary has been generated yet.".to_string(),
        ));
    }
    let (Some(level), Some(topic)) = (session.level, session.topic.as_deref()) else {
        return Err((
            StatusCode::NOT_FOUND,
            "No vocabulary has been generated yet.".to_string(),
        ));
    };

    let filename = export::vocabulary_filename(level, topic);
    let body = export::vocabulary_to_csv(&session.vocabulary);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

//=========================================================================================
// Chat Handlers
//=========================================================================================

/// Return the displayed chat history.
///
/// Viewing the chat after a successful generation activates the tutor
/// session, which appends its welcome turn.
#[utoipa::path(
    get,
    path = "/chat",
    responses(
        (status = 200, description = "Displayed chat history", body = ChatHistoryResponse)
    )
)]
pub async fn view_chat_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<ChatHistoryResponse> {
    let turns = chat_task::view_chat(&app_state).await;
    Json(ChatHistoryResponse {
        turns: turns.iter().map(Into::into).collect(),
    })
}

/// Send one user turn to the tutor.
///
/// Fails soft: on a provider failure the user turn stays recorded, no
/// assistant turn is appended and the session survives for a retry.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = SendChatRequest,
    responses(
        (status = 200, description = "Send outcome", body = ChatReplyResponse)
    )
)]
pub async fn send_chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SendChatRequest>,
) -> Json<ChatReplyResponse> {
    let outcome = chat_task::send_turn(&app_state, &payload.message).await;
    Json(ChatReplyResponse {
        reply: outcome.reply.as_ref().map(Into::into),
        diagnostic: outcome.diagnostic,
    })
}

/// Download the chat history as a plain-text transcript.
#[utoipa::path(
    get,
    path = "/chat/export",
    responses(
        (status = 200, description = "Transcript, one `ROLE: content` line per turn"),
        (status = 404, description = "No conversation to export")
    )
)]
pub async fn export_transcript_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = app_state.session.lock().await;
    if session.chat_history.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            "No conversation to export yet.".to_string(),
        ));
    }

    let filename = export::transcript_filename(Utc::now());
    let body = export::transcript_to_text(&session.chat_history);
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

//=========================================================================================
// Usage and Speech Handlers
//=========================================================================================

/// Return the session's usage counters.
#[utoipa::path(
    get,
    path = "/usage",
    responses(
        (status = 200, description = "Usage counters", body = UsageResponse)
    )
)]
pub async fn usage_handler(State(app_state): State<Arc<AppState>>) -> Json<UsageResponse> {
    let session = app_state.session.lock().await;
    Json(UsageResponse {
        last_input_tokens: session.usage.last_input_tokens,
        last_output_tokens: session.usage.last_output_tokens,
        total_input_tokens: session.usage.total_input_tokens,
        total_output_tokens: session.usage.total_output_tokens,
    })
}

/// Synthesize speech audio for a single term.
///
/// Stateless: one provider request per press, no caching of generated audio.
/// Speech calls report no token usage.
#[utoipa::path(
    post,
    path = "/speech",
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "MP3 audio bytes"),
        (status = 409, description = "No API key is configured"),
        (status = 502, description = "The provider call failed")
    )
)]
pub async fn speech_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SpeechRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let credential = {
        let session = app_state.session.lock().await;
        app_state.resolve_credential(&session).map(|(key, _)| key)
    };
    let Some(credential) = credential else {
        let error = PortError::MissingCredential;
        return Err((port_error_status(&error), error.user_diagnostic()));
    };

    match app_state
        .tts_adapter
        .synthesize_speech(&credential, &payload.text)
        .await
    {
        Ok(audio) => Ok(([(header::CONTENT_TYPE, "audio/mpeg".to_string())], audio)),
        Err(e) => {
            warn!(error = %e, "speech synthesis failed");
            Err((port_error_status(&e), e.user_diagnostic()))
        }
    }
}
