//! Community handlers: feed, reactions and comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::api::dto::{
    CommentResponse, CreateCommentRequest, CreateReactionRequest, FeedItemResponse, FeedQuery,
    ReactionResponse,
};
use crate::api::extractors::{AppJson, AppQuery};
use crate::api::AppState;
use crate::error::{JournalError, Result};

/// `GET /api/community/feed`
#[utoipa::path(
    get,
    path = "/api/community/feed",
    tag = "community",
    operation_id = "community.feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Shared entries with reactions and comments", body = [FeedItemResponse]),
    )
)]
pub async fn get_feed(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FeedQuery>,
) -> Result<Json<Vec<FeedItemResponse>>> {
    let order = query.order().map_err(JournalError::Validation)?;
    let items = state.community.feed(order).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// `POST /api/journals/{id}/reactions`
#[utoipa::path(
    post,
    path = "/api/journals/{id}/reactions",
    tag = "community",
    operation_id = "community.react",
    params(("id" = String, Path, description = "Entry ID")),
    request_body = CreateReactionRequest,
    responses(
        (status = 201, description = "Reaction recorded", body = ReactionResponse),
        (status = 400, description = "Entry is not shared"),
        (status = 404, description = "Entry not found"),
    )
)]
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<CreateReactionRequest>,
) -> Result<impl IntoResponse> {
    let reaction = state
        .community
        .add_reaction(&id, req.reaction_type, req.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ReactionResponse::from(reaction))))
}

/// `GET /api/journals/{id}/comments`
#[utoipa::path(
    get,
    path = "/api/journals/{id}/comments",
    tag = "community",
    operation_id = "community.comments.list",
    params(("id" = String, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = [CommentResponse]),
        (status = 404, description = "Entry not found"),
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>> {
    let comments = state.community.list_comments(&id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// `POST /api/journals/{id}/comments`
#[utoipa::path(
    post,
    path = "/api/journals/{id}/comments",
    tag = "community",
    operation_id = "community.comments.create",
    params(("id" = String, Path, description = "Entry ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Invalid comment or entry not shared"),
        (status = 404, description = "Entry not found"),
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let comment = state
        .community
        .add_comment(&id, &req.content, req.author)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// `POST /api/comments/{id}/like`
#[utoipa::path(
    post,
    path = "/api/comments/{id}/like",
    tag = "community",
    operation_id = "community.comments.like",
    params(("id" = String, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommentResponse>> {
    let comment = state.community.like_comment(&id).await?;
    Ok(Json(comment.into()))
}
