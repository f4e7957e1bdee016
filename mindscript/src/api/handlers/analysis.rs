use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::dto::AnalyzeRequest;
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;
use crate::models::Analysis;

/// Response header carrying how the analysis was produced.
pub const ANALYSIS_STATUS_HEADER: &str = "x-analysis-status";

/// `POST /api/journals/analyze`
///
/// Always answers with `{summary, prompts, mood}` for non-blank content. When
/// the model could not be used the fixed fallback value is returned and the
/// `X-Analysis-Status` header says why (`fallback` or `unavailable`).
#[utoipa::path(
    post,
    path = "/api/journals/analyze",
    tag = "journals",
    operation_id = "journals.analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis of the draft entry", body = Analysis,
            headers(("x-analysis-status" = String, description = "generated, fallback or unavailable"))),
        (status = 400, description = "Missing content"),
    )
)]
pub async fn analyze_entry(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalyzeRequest>,
) -> Result<impl IntoResponse> {
    let outcome = state.journal.analyze(req.content.as_deref()).await?;

    Ok((
        [(
            ANALYSIS_STATUS_HEADER,
            HeaderValue::from_static(outcome.status.as_str()),
        )],
        Json(outcome.analysis),
    ))
}
