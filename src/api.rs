//! HTTP surface
//!
//! One pipeline serves every endpoint variant; the handlers differ only in
//! transport (query vs body), output shape (binary, inline JSON, URL JSON,
//! structured JSON), and statefulness (one-shot vs conversational).

use crate::analysis::AudioAnalysis;
use crate::config::Delivery;
use crate::conversation::ConversationTurn;
use crate::gateway::Gateway;
use crate::Error;
use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct AppState {
    pub gateway: Gateway,
    pub public_base_url: String,
    pub admin_token: Option<String>,
    pub default_delivery: Delivery,
}

/// Build the router with tracing and CORS layers applied.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/generate/image", get(generate_image_query))
        .route("/v1/generate/image", post(generate_image_body))
        .route("/v1/generate", post(generate_json))
        .route("/v1/analyze/audio", post(analyze_audio))
        .route("/v1/chat", post(chat))
        .route("/v1/artifacts/{id}", get(get_artifact))
        .route("/v1/artifacts", delete(clear_artifacts))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Error wrapper mapping the domain taxonomy onto HTTP statuses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::MissingPrompt | Error::UnsupportedFormat(_) | Error::Config(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Fetch(_) | Error::Backend(_) | Error::EmptyGeneration => StatusCode::BAD_GATEWAY,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Io(_) | Error::Serialization(_) | Error::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateParams {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
}

fn prompt_of(params: &GenerateParams) -> &str {
    params.prompt.as_deref().unwrap_or("")
}

/// Shape (a): raw binary response, query-string transport.
async fn generate_image_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
) -> ApiResult<Response> {
    generate_image(&state, &params).await
}

/// Shape (a): raw binary response, JSON-body transport.
async fn generate_image_body(
    State(state): State<Arc<AppState>>,
    Json(params): Json<GenerateParams>,
) -> ApiResult<Response> {
    generate_image(&state, &params).await
}

async fn generate_image(state: &AppState, params: &GenerateParams) -> ApiResult<Response> {
    let result = state
        .gateway
        .generate(prompt_of(params), params.image_url.as_deref())
        .await?;

    // This shape only delivers binary; a text-only result is unusable here.
    let media = result.media.ok_or(Error::EmptyGeneration)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, media.mime_type)],
        media.data,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateJsonResponse {
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

/// Shapes (b): JSON with the media inline as base64 or referenced by URL.
async fn generate_json(
    State(state): State<Arc<AppState>>,
    Json(params): Json<GenerateParams>,
) -> ApiResult<Json<GenerateJsonResponse>> {
    let delivery = match params.delivery.as_deref() {
        Some(raw) => Delivery::parse(raw)?,
        None => state.default_delivery,
    };

    let result = state
        .gateway
        .generate(prompt_of(&params), params.image_url.as_deref())
        .await?;

    let mut response = GenerateJsonResponse {
        text: result.text,
        image_base64: None,
        image_url: None,
    };

    if let Some(media) = result.media {
        match delivery {
            Delivery::Inline => {
                use base64::Engine as _;
                response.image_base64 =
                    Some(base64::engine::general_purpose::STANDARD.encode(&media.data));
            }
            Delivery::Url => {
                let id = state
                    .gateway
                    .artifacts()
                    .put(&media.data, &media.mime_type)
                    .await?;
                response.image_url = Some(format!(
                    "{}/v1/artifacts/{}",
                    state.public_base_url.trim_end_matches('/'),
                    id
                ));
            }
        }
    }

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeAudioParams {
    #[serde(default)]
    pub prompt: Option<String>,
    pub audio_url: String,
}

/// Shape (c): structured audio-analysis JSON.
async fn analyze_audio(
    State(state): State<Arc<AppState>>,
    Json(params): Json<AnalyzeAudioParams>,
) -> ApiResult<Json<AudioAnalysis>> {
    let analysis = state
        .gateway
        .analyze_audio(params.prompt.as_deref(), &params.audio_url)
        .await?;
    Ok(Json(analysis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParams {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    response: String,
    updated_history: Vec<ConversationTurn>,
}

/// Shape (d): conversational turn with caller-threaded history.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ChatParams>,
) -> ApiResult<Json<ChatResponse>> {
    let prompt = params.prompt.as_deref().unwrap_or("");
    let (response, updated_history) = state.gateway.chat(params.history, prompt).await?;

    Ok(Json(ChatResponse {
        response,
        updated_history,
    }))
}

/// Serve stored artifact bytes with their original content type.
async fn get_artifact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let (bytes, mime_type) = state.gateway.artifacts().get(&id).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type)],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: usize,
}

/// Administrative wipe, gated behind the configured bearer token.
async fn clear_artifacts(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
) -> Response {
    let Some(expected) = state.admin_token.as_deref() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "admin operations are disabled" })),
        )
            .into_response();
    };

    if bearer_token(&headers) != Some(expected) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid or missing admin token" })),
        )
            .into_response();
    }

    let cleared = state.gateway.artifacts().clear_all().await;
    Json(ClearResponse { cleared }).into_response()
}
