//! HTTP Endpoints
//!
//! REST API for the legal-assistant backend.

use axum::{
    body::Bytes,
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kontrak_core::{AnalysisReport, Error, Expert, Language};

use crate::metrics::{metrics_handler, record_request};
use crate::session::{ChatMessage, ChatSession, InsertChatMessage, MessageRole};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        // Chat sessions
        .route("/api/chat/session", post(create_session))
        .route("/api/chat/session/:id", get(get_session))
        .route("/api/chat/session/:id/messages", get(get_messages))
        .route("/api/chat/message", post(post_message))
        // Contract analysis
        .route("/api/analyze-contract", post(analyze_contract))
        // Speech transcription
        .route("/api/transcribe", post(transcribe))
        // Expert recommendations
        .route("/api/experts/recommend", post(recommend_experts))
        .route("/api/legal-topics", get(legal_topics))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Terminal pipeline errors mapped onto HTTP responses.
///
/// Internal detail goes to the log; the response body carries only the
/// user-facing message.
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_caller_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if self.0.is_caller_error() {
            tracing::warn!(error = %self.0, "request rejected");
        } else {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(serde_json::json!({ "detail": self.0.user_message() })),
        )
            .into_response()
    }
}

/// Create-session request
#[derive(Debug, Deserialize)]
struct InsertChatSession {
    id: String,
    title: String,
}

/// POST /api/chat/session
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<InsertChatSession>,
) -> Json<ChatSession> {
    Json(state.sessions.create_session(request.id, request.title))
}

/// GET /api/chat/session/:id
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, StatusCode> {
    state
        .sessions
        .get_session(&id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// GET /api/chat/session/:id/messages
async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<ChatMessage>> {
    Json(state.sessions.messages(&id))
}

/// Chat exchange returned by the message endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatExchange {
    user_message: ChatMessage,
    assistant_message: ChatMessage,
}

/// POST /api/chat/message
async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<InsertChatMessage>,
) -> Result<Json<ChatExchange>, ApiError> {
    let session_id = request.session_id.clone();
    let document_context = request.document_context.clone();
    let content = request.content.clone();

    let user_message = state.sessions.add_message(request);

    let result = state
        .advisor
        .advise(&content, document_context.as_deref(), None)
        .await;
    record_request("chat", result.is_ok());
    let answer = result?;

    let references = if answer.references.is_empty() {
        None
    } else {
        serde_json::to_string(&answer.references).ok()
    };

    let assistant_message = state.sessions.add_message(InsertChatMessage {
        session_id,
        role: MessageRole::Assistant,
        content: answer.answer,
        document_context: references,
    });

    Ok(Json(ChatExchange {
        user_message,
        assistant_message,
    }))
}

/// Analyze-contract request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeContractRequest {
    #[serde(default)]
    document_text: String,
}

/// POST /api/analyze-contract
async fn analyze_contract(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeContractRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let result = state.analyzer.analyze_document(&request.document_text).await;
    record_request("analyze_contract", result.is_ok());
    Ok(Json(result?))
}

/// Transcribe query parameters
#[derive(Debug, Deserialize)]
struct TranscribeParams {
    #[serde(default = "default_transcribe_language")]
    language: String,
}

fn default_transcribe_language() -> String {
    "en-US".to_string()
}

/// Transcription response
#[derive(Debug, Serialize)]
struct TranscribeResponse {
    transcript: String,
}

/// POST /api/transcribe?language=ms-MY
///
/// Raw audio bytes in the body. Blocks until the transcription job reaches a
/// terminal state.
async fn transcribe(
    State(state): State<AppState>,
    Query(params): Query<TranscribeParams>,
    body: Bytes,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let result = state
        .transcription
        .transcribe(body.to_vec(), &params.language)
        .await;
    record_request("transcribe", result.is_ok());
    Ok(Json(TranscribeResponse {
        transcript: result?,
    }))
}

/// Recommend-experts request
#[derive(Debug, Deserialize)]
struct RecommendRequest {
    prompt: String,
}

/// POST /api/experts/recommend
async fn recommend_experts(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<Vec<Expert>> {
    let experts = state.recommender.recommend(&request.prompt).await;
    record_request("recommend_experts", true);
    Json(experts)
}

/// GET /api/legal-topics
///
/// Static starter topics for the chat frontend.
async fn legal_topics() -> Json<serde_json::Value> {
    Json(serde_json::json!([
        { "id": "wages", "name": "Wages & Salary", "query": "What are the rules on salary payment in Malaysia?" },
        { "id": "working-hours", "name": "Working Hours", "query": "What are the legal working hours under the Employment Act 1955?" },
        { "id": "termination", "name": "Termination", "query": "What notice period applies when terminating employment?" },
        { "id": "leave", "name": "Leave Entitlements", "query": "What annual and sick leave am I entitled to?" },
        { "id": "contracts", "name": "Employment Contracts", "query": "What must an employment contract contain in Malaysia?" },
        { "id": "unions", "name": "Trade Unions", "query": "What are my rights regarding trade union membership?" }
    ]))
}

/// GET /health
///
/// Reports which deployment identifiers are configured. The server is
/// degraded (not down) without them: endpoints that need a missing
/// identifier fail individually with a configuration error.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let aws = &state.settings.aws;
    let mut checks = serde_json::Map::new();

    let mut check = |name: &str, configured: bool| {
        checks.insert(
            name.to_string(),
            serde_json::json!({ "status": if configured { "ok" } else { "unconfigured" } }),
        );
        configured
    };

    let model_ok = check("model", aws.model_id.is_some());
    check("knowledge_base", aws.knowledge_base_id.is_some());
    check("transcription_bucket", aws.s3_bucket.is_some());

    // The model is the only hard dependency of the core endpoints.
    let status = if model_ok { "healthy" } else { "degraded" };
    let status_code = if model_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks
        })),
    )
}

/// GET /ready
async fn readiness_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "sessions": state.sessions.session_count(),
        "language_targets": [Language::English.code(), Language::Malay.code()],
    }))
}
