//! Journal entry handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::api::dto::{CreateEntryRequest, EntryResponse, UpdateEntryRequest};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;

/// `POST /api/journals`
#[utoipa::path(
    post,
    path = "/api/journals",
    tag = "journals",
    operation_id = "journals.create",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Missing or invalid content"),
        (status = 409, description = "Duplicate content and date"),
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateEntryRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let entry = state.journal.create_entry(req.into()).await?;
    Ok((StatusCode::CREATED, Json(EntryResponse::from(entry))))
}

/// `GET /api/journals`
#[utoipa::path(
    get,
    path = "/api/journals",
    tag = "journals",
    operation_id = "journals.list",
    responses(
        (status = 200, description = "All entries, newest first", body = [EntryResponse]),
    )
)]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<EntryResponse>>> {
    let entries = state.journal.list_entries().await?;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

/// `GET /api/journals/{id}`
#[utoipa::path(
    get,
    path = "/api/journals/{id}",
    tag = "journals",
    operation_id = "journals.get",
    params(("id" = String, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry found", body = EntryResponse),
        (status = 404, description = "Entry not found"),
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>> {
    let entry = state.journal.get_entry(&id).await?;
    Ok(Json(entry.into()))
}

/// `PATCH /api/journals/{id}`
#[utoipa::path(
    patch,
    path = "/api/journals/{id}",
    tag = "journals",
    operation_id = "journals.update",
    params(("id" = String, Path, description = "Entry ID")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Invalid update"),
        (status = 404, description = "Entry not found"),
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateEntryRequest>,
) -> Result<Json<EntryResponse>> {
    req.validate()?;
    let entry = state.journal.update_entry(&id, req.into()).await?;
    Ok(Json(entry.into()))
}
