//! # HTTP boundary
//!
//! Accepts connections, routes requests, sets CORS headers, and serializes
//! JSON responses. Control flow per request:
//!
//! ```text
//! listener → preflight short-circuit → auth extractor → handler
//!                                                     → (provider adapter | record store)
//! ```
//!
//! Routing is purely structural: literal paths plus a single trailing-id
//! segment for the record routes.

pub mod auth;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use log::info;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::core::config::ResolvedConfig;
use crate::store::{MemoryStore, Programme, Script};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ResolvedConfig>,
    pub programmes: Arc<MemoryStore<Programme>>,
    pub scripts: Arc<MemoryStore<Script>>,
}

impl AppState {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config: Arc::new(config),
            programmes: Arc::new(MemoryStore::new()),
            scripts: Arc::new(MemoryStore::new()),
        }
    }
}

/// Responds 204 to any OPTIONS request ahead of routing, so preflights
/// succeed even for paths that would otherwise 404 or 405. Headers are set
/// here because this layer is outermost and the CORS layer never sees the
/// short-circuited request.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        );
        return response;
    }
    next.run(request).await
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

/// Assembles the full router. Exposed separately from [`serve`] so tests can
/// drive it in-process.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Method routers fall back to the same JSON 404 so an unlisted method on
    // a known path never surfaces a bare 405.
    Router::new()
        .route("/api/health", get(handlers::health).fallback(not_found))
        .route("/api/generate", post(handlers::generate).fallback(not_found))
        .route(
            "/api/programmes",
            get(handlers::list_programmes)
                .post(handlers::create_programme)
                .fallback(not_found),
        )
        .route(
            "/api/programmes/{id}",
            put(handlers::update_programme)
                .delete(handlers::delete_programme)
                .fallback(not_found),
        )
        .route(
            "/api/scripts",
            get(handlers::list_scripts)
                .post(handlers::create_script)
                .fallback(not_found),
        )
        .route(
            "/api/scripts/{id}",
            put(handlers::update_script)
                .delete(handlers::delete_script)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(cors)
        .layer(middleware::from_fn(preflight))
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!("Listening on {}", bound);
    axum::serve(listener, build_router(state)).await
}
