use serde::Deserialize;

/// Query parameters for `GET /api/journals/insights`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct InsightsQuery {
    /// Number of top themes to return (default 5, max 50).
    pub top: Option<usize>,
}
