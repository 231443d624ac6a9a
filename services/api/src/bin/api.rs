//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{OpenAiTtsAdapter, OpenAiTutorAdapter, OpenAiVocabAdapter},
    config::Config,
    error::ApiError,
    web::{
        credential_status_handler, export_transcript_handler, export_vocabulary_handler,
        generate_vocabulary_handler, rest::ApiDoc, send_chat_handler, set_credential_handler,
        speech_handler, themes_handler, usage_handler, view_chat_handler, vocabulary_handler,
        AppState,
    },
};
use async_openai::types::audio::{SpeechModel, Voice};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    // Adapters hold no credential: the effective key is resolved per call so a
    // key entered or corrected mid-session takes effect on the next request.
    let vocab_adapter = Arc::new(OpenAiVocabAdapter::new(config.vocab_model.clone()));
    let tutor_adapter = Arc::new(OpenAiTutorAdapter::new(config.tutor_model.clone()));

    let tts_voice = match config.tts_voice.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => {
            return Err(ApiError::Internal(format!(
                "Invalid TTS voice specified in config: '{}'",
                config.tts_voice
            )))
        }
    };
    let tts_adapter = Arc::new(OpenAiTtsAdapter::new(SpeechModel::Tts1, tts_voice));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        config.clone(),
        vocab_adapter,
        tutor_adapter,
        tts_adapter,
    ));

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().map_err(
            |e| ApiError::Internal(format!("Invalid CORS origin: {}", e)),
        )?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/credential",
            put(set_credential_handler).get(credential_status_handler),
        )
        .route("/themes/{level}", get(themes_handler))
        .route(
            "/vocabulary",
            post(generate_vocabulary_handler).get(vocabulary_handler),
        )
        .route("/vocabulary/export", get(export_vocabulary_handler))
        .route("/chat", post(send_chat_handler).get(view_chat_handler))
        .route("/chat/export", get(export_transcript_handler))
        .route("/usage", get(usage_handler))
        .route("/speech", post(speech_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
