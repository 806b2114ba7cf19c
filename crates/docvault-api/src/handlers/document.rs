//! Document handlers: upload, list, get, check, delete.

use std::collections::BTreeMap;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::types::DocumentFilter;
use docvault_entity::document::DocumentWithGrants;
use docvault_service::document::UploadOutcome;

use crate::dto::request::DocumentQuery;
use crate::dto::response::{ApiResponse, DocumentList, acknowledged};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, UploadForm};
use crate::state::AppState;

/// Document ids that are not UUIDs cannot name a document.
fn parse_document_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::document_not_found())
}

/// POST /api/docs
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    UploadForm(upload): UploadForm,
) -> Result<Json<ApiResponse<UploadOutcome>>, ApiError> {
    let outcome = state.document_service.upload(&auth, upload).await?;
    Ok(Json(ApiResponse::data(outcome)))
}

/// GET /api/docs?login=&key=&value=&limit=&page=
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DocumentQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<DocumentList>>, ApiError> {
    let filter = DocumentFilter::parse(query.key.as_deref(), query.value.as_deref());
    let docs = state
        .document_service
        .list(
            &auth,
            query.login.as_deref(),
            filter.as_ref(),
            pagination.into_list_params(),
        )
        .await?;

    Ok(Json(ApiResponse::data(DocumentList { docs })))
}

/// GET /api/docs/{id}
///
/// JSON for plain documents; the stored bytes, typed with the document's
/// mime, for file documents.
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_document_id(&id)?;
    let found: DocumentWithGrants = state.document_service.get(&auth, id).await?;

    if !found.document.is_file {
        return Ok(Json(ApiResponse::data(found)).into_response());
    }

    let stream = state.document_service.open_file(&found.document).await?;
    let content_type = HeaderValue::from_str(&found.document.mime)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));

    Ok(([(header::CONTENT_TYPE, content_type)], Body::from_stream(stream)).into_response())
}

/// HEAD /api/docs/{id}
pub async fn check_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_document_id(&id)?;
    state.document_service.check(&auth, id).await?;
    Ok(Json(ApiResponse::empty()))
}

/// DELETE /api/docs/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<BTreeMap<String, bool>>>, ApiError> {
    let id = parse_document_id(&raw_id)?;
    state.document_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::response(acknowledged(&raw_id))))
}
