//! Route definitions for the DocVault HTTP API.
//!
//! `/ping` sits at the root; everything else is mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room left in a request body for the non-file form parts.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .server
        .max_upload_bytes()
        .saturating_add(FORM_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(document_routes());

    Router::new()
        .route("/ping", get(handlers::health::ping))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, sign-in, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/auth", post(handlers::auth::sign_in))
        .route("/auth/{token}", delete(handlers::auth::logout))
}

/// Document upload, listing, retrieval, check, delete
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/docs",
            post(handlers::document::upload_document).get(handlers::document::list_documents),
        )
        .route(
            "/docs/{id}",
            get(handlers::document::get_document)
                .head(handlers::document::check_document)
                .delete(handlers::document::delete_document),
        )
}
