//! Journal entry request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /api/journals/analyze`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    /// Draft entry text to analyse.
    pub content: Option<String>,
}

/// Request body for `POST /api/journals`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Entry text. Required and non-blank.
    #[validate(length(max = 100_000))]
    pub content: Option<String>,
    /// `positive`, `negative`, `neutral`, `mixed` or free text. Blank means none.
    #[validate(length(max = 100))]
    pub mood: Option<String>,
    #[validate(length(max = 5_000))]
    pub ai_summary: Option<String>,
    #[validate(length(max = 50))]
    pub themes: Option<Vec<String>>,
    pub shared: Option<bool>,
    pub user_id: Option<String>,
    /// Entry timestamp; the time of the request when omitted.
    pub date: Option<DateTime<Utc>>,
}

/// Request body for `PATCH /api/journals/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    #[validate(length(max = 100_000))]
    pub content: Option<String>,
    /// `positive`, `negative`, `neutral`, `mixed` or free text. Blank means none.
    #[validate(length(max = 100))]
    pub mood: Option<String>,
    #[validate(length(max = 5_000))]
    pub ai_summary: Option<String>,
    #[validate(length(max = 50))]
    pub themes: Option<Vec<String>>,
    pub shared: Option<bool>,
    pub user_id: Option<String>,
}

impl From<CreateEntryRequest> for models::NewJournalEntry {
    fn from(req: CreateEntryRequest) -> Self {
        Self {
            content: req.content,
            mood: req.mood,
            ai_summary: req.ai_summary,
            themes: req.themes,
            shared: req.shared,
            user_id: req.user_id,
            date: req.date,
        }
    }
}

impl From<UpdateEntryRequest> for models::JournalEntryPatch {
    fn from(req: UpdateEntryRequest) -> Self {
        Self {
            content: req.content,
            mood: req.mood,
            ai_summary: req.ai_summary,
            themes: req.themes,
            shared: req.shared,
            user_id: req.user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A stored journal entry.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Entry ID (nanoid, 21 chars).
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub themes: Vec<String>,
    pub shared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<models::JournalEntry> for EntryResponse {
    fn from(entry: models::JournalEntry) -> Self {
        Self {
            id: entry.id,
            content: entry.content,
            mood: entry.mood,
            ai_summary: entry.ai_summary,
            themes: entry.themes,
            shared: entry.shared,
            user_id: entry.user_id,
            date: entry.date,
        }
    }
}
