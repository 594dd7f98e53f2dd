//! Route handlers: health, generation relay, and the two record CRUD sets.
//!
//! Handlers never interpret provider payloads — `/api/generate` returns the
//! upstream JSON body exactly as received.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::inference::provider_for;
use crate::server::AppState;
use crate::server::auth::CurrentUser;
use crate::server::error::{ApiError, ApiJson};
use crate::store::{Programme, ProgrammeDraft, Script, ScriptDraft};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Generate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

pub async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(body): ApiJson<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let model = body
        .model
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("model is required".to_string()))?;
    let prompt = body
        .prompt
        .ok_or_else(|| ApiError::BadRequest("prompt is required".to_string()))?;

    let provider = provider_for(&model, &state.config)?;
    info!(
        "generate: user={} provider={} prompt_len={}",
        user.0,
        provider.name(),
        prompt.len()
    );

    let response = provider.generate(&prompt).await?;
    Ok(Json(response))
}

// ============================================================================
// Programmes
// ============================================================================

pub async fn list_programmes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<Vec<Programme>> {
    Json(state.programmes.list(&user.0))
}

pub async fn create_programme(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(draft): ApiJson<ProgrammeDraft>,
) -> (StatusCode, Json<Programme>) {
    let programme = state.programmes.create(&user.0, draft);
    (StatusCode::CREATED, Json(programme))
}

pub async fn update_programme(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<ProgrammeDraft>,
) -> Result<Json<Programme>, ApiError> {
    Ok(Json(state.programmes.update(&user.0, &id, draft)?))
}

pub async fn delete_programme(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.programmes.delete(&user.0, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Scripts (mirror of programmes)
// ============================================================================

pub async fn list_scripts(State(state): State<AppState>, user: CurrentUser) -> Json<Vec<Script>> {
    Json(state.scripts.list(&user.0))
}

pub async fn create_script(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(draft): ApiJson<ScriptDraft>,
) -> (StatusCode, Json<Script>) {
    let script = state.scripts.create(&user.0, draft);
    (StatusCode::CREATED, Json(script))
}

pub async fn update_script(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<ScriptDraft>,
) -> Result<Json<Script>, ApiError> {
    Ok(Json(state.scripts.update(&user.0, &id, draft)?))
}

pub async fn delete_script(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.scripts.delete(&user.0, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
