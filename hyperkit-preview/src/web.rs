//! HTTP routes.
//!
//! - `POST /build` — prompt → generated, bundled, stored project
//! - `POST /generate` — prompt → source files only, nothing stored
//! - `GET /serve/{projectId}/{*path}` — serve a stored file (SPA fallback)
//! - `GET /health` — store size and uptime

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::bundle;
use crate::error::ApiError;
use crate::resolver::{self, INDEX_HTML};
use crate::scaffold;
use crate::server::SharedState;
use crate::store::{self, StoredProject};
use crate::sweeper;

const NOT_A_PROJECT: &str = "Sorry, I can only help with project generation. \
    Please describe a web application you'd like me to create.";

/// Build the axum router.
pub fn router(state: Arc<SharedState>) -> Router {
    let api = Router::new()
        .route("/build", post(build))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Preview responses are never cached and readable from any origin,
    // including the 404 bodies.
    let serve = Router::new()
        .route("/serve/{project_id}", get(serve_index))
        .route("/serve/{project_id}/{*path}", get(serve_file))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    api.merge(serve)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
}

/// A panicking handler still answers with the usual 500 body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    ApiError::Internal(format!("Handler panicked: {detail}")).into_response()
}

/// Pull a usable prompt out of a request body.
fn validate_prompt(
    payload: Result<Json<Value>, JsonRejection>,
    max_len: usize,
) -> Result<String, ApiError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::Validation("Invalid JSON body".to_string())
    })?;
    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Prompt is required".to_string()))?;
    if prompt.chars().count() > max_len {
        return Err(ApiError::Validation(format!(
            "Prompt exceeds {max_len} characters"
        )));
    }
    Ok(prompt.to_string())
}

async fn build(
    State(state): State<Arc<SharedState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let prompt = validate_prompt(payload, state.config.max_prompt_len)?;

    let now = store::now_ms();
    sweeper::sweep_expired(state.store.as_ref(), now, state.config.max_age_ms());

    let project_id = store::new_project_id(now);
    tracing::info!(project_id = %project_id, prompt = %prompt, "Generating project");

    let source = state.generator.generate(&prompt);
    if source.is_empty() {
        return Err(ApiError::Internal(format!(
            "Failed to build project: generator produced no files for {project_id}"
        )));
    }

    let built = match bundle::bundle(&source) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(
                project_id = %project_id,
                error = %e,
                "Bundle failed, returning source files"
            );
            let body = json!({
                "error": format!("Failed to build project: {e}"),
                "fallback": true,
                "files": source,
            });
            return Ok(Json(body).into_response());
        }
    };

    state
        .store
        .set(&project_id, StoredProject::new(built.clone(), now));
    sweeper::enforce_capacity(state.store.as_ref(), state.config.max_projects, &project_id);
    tracing::info!(project_id = %project_id, files = built.len(), "Project stored");

    let body = json!({
        "projectId": project_id,
        "files": built,
        "success": true,
    });
    Ok(Json(body).into_response())
}

async fn generate(
    State(state): State<Arc<SharedState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let prompt = validate_prompt(payload, state.config.max_prompt_len)?;
    if !scaffold::is_project_prompt(&prompt) {
        return Err(ApiError::Validation(NOT_A_PROJECT.to_string()));
    }

    let files = state.generator.generate(&prompt);
    let content = files
        .iter()
        .find(|f| f.path == INDEX_HTML)
        .map(|f| f.content.clone())
        .unwrap_or_default();
    Ok(Json(json!({
        "content": content,
        "projectFiles": files,
        "success": true,
    })))
}

async fn serve_index(
    State(state): State<Arc<SharedState>>,
    Path(project_id): Path<String>,
) -> Result<Response, ApiError> {
    respond_with_file(&state, &project_id, INDEX_HTML)
}

async fn serve_file(
    State(state): State<Arc<SharedState>>,
    Path((project_id, path)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    respond_with_file(&state, &project_id, &path)
}

fn respond_with_file(
    state: &SharedState,
    project_id: &str,
    path: &str,
) -> Result<Response, ApiError> {
    let file = resolver::resolve(state.store.as_ref(), project_id, path)?;
    if file.fallback {
        tracing::debug!(project_id = %project_id, path = %path, "Serving index.html fallback");
    }
    Ok(([(header::CONTENT_TYPE, file.content_type)], file.content).into_response())
}

#[derive(Serialize)]
struct HealthResponse {
    projects: usize,
    uptime_secs: u64,
    retention_secs: u64,
}

async fn health(State(state): State<Arc<SharedState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        projects: state.store.len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        retention_secs: state.config.retention_secs,
    })
}
