use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::insights;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MindScript API",
        version = "1.0.0",
        description = "AI-assisted journaling: mood analysis, reflection prompts, insights and a community feed.",
    ),
    paths(
        handlers::health::health_check,
        handlers::analysis::analyze_entry,
        handlers::entries::create_entry,
        handlers::entries::list_entries,
        handlers::entries::get_entry,
        handlers::entries::update_entry,
        handlers::insights::get_insights,
        handlers::community::get_feed,
        handlers::community::add_reaction,
        handlers::community::list_comments,
        handlers::community::add_comment,
        handlers::community::like_comment,
    ),
    components(schemas(
        // Domain enums
        models::Mood,
        models::ReactionType,
        models::Analysis,
        // Entries
        dto::AnalyzeRequest,
        dto::CreateEntryRequest,
        dto::UpdateEntryRequest,
        dto::EntryResponse,
        // Community
        dto::CreateReactionRequest,
        dto::CreateCommentRequest,
        dto::ReactionResponse,
        dto::CommentResponse,
        dto::ReactionCountResponse,
        dto::FeedItemResponse,
        // Insights
        insights::DashboardSummary,
        insights::MoodCount,
        insights::ThemeCount,
        insights::DailyMood,
        insights::MoodTrend,
        insights::Suggestion,
        insights::SuggestionKind,
        insights::Achievement,
        // Health
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "journals", description = "Journal entries and AI analysis"),
        (name = "insights", description = "Mood statistics and suggestions"),
        (name = "community", description = "Shared entries, reactions and comments"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
