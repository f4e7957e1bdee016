use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::api::dto::InsightsQuery;
use crate::api::extractors::AppQuery;
use crate::api::AppState;
use crate::error::Result;
use crate::insights::{DashboardSummary, DEFAULT_TOP_THEMES};

const MAX_TOP_THEMES: usize = 50;

/// `GET /api/journals/insights`
#[utoipa::path(
    get,
    path = "/api/journals/insights",
    tag = "insights",
    operation_id = "journals.insights",
    params(InsightsQuery),
    responses(
        (status = 200, description = "Dashboard statistics over all entries", body = DashboardSummary),
    )
)]
pub async fn get_insights(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<InsightsQuery>,
) -> Result<Json<DashboardSummary>> {
    let top = query
        .top
        .unwrap_or(DEFAULT_TOP_THEMES)
        .min(MAX_TOP_THEMES);
    let today = Utc::now().date_naive();

    Ok(Json(state.journal.dashboard(today, top).await?))
}
