//! Community (reactions, comments, feed) DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entries::EntryResponse;
use crate::models::{self, FeedOrder, ReactionType};

/// Request body for `POST /api/journals/{id}/reactions`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReactionRequest {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub user_id: Option<String>,
}

/// Request body for `POST /api/journals/{id}/comments`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(max = 2000))]
    pub content: String,
    /// Display name; defaults to "You".
    #[validate(length(max = 100))]
    pub author: Option<String>,
}

/// Query parameters for `GET /api/community/feed`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct FeedQuery {
    /// `recent` (default) or `popular`.
    pub order: Option<String>,
}

impl FeedQuery {
    pub fn order(&self) -> Result<FeedOrder, String> {
        match self.order.as_deref() {
            None | Some("") => Ok(FeedOrder::default()),
            Some(raw) => raw.parse(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: String,
    pub entry_id: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<models::Reaction> for ReactionResponse {
    fn from(r: models::Reaction) -> Self {
        Self {
            id: r.id,
            entry_id: r.entry_id,
            reaction_type: r.reaction_type,
            user_id: r.user_id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub entry_id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: i64,
}

impl From<models::Comment> for CommentResponse {
    fn from(c: models::Comment) -> Self {
        Self {
            id: c.id,
            entry_id: c.entry_id,
            author: c.author,
            content: c.content,
            timestamp: c.timestamp,
            likes: c.likes,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ReactionCountResponse {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub count: u64,
}

/// A shared entry with its reactions and comments.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemResponse {
    pub entry: EntryResponse,
    pub reactions: Vec<ReactionCountResponse>,
    pub total_reactions: u64,
    pub comments: Vec<CommentResponse>,
}

impl From<models::FeedItem> for FeedItemResponse {
    fn from(item: models::FeedItem) -> Self {
        let total_reactions = item.total_reactions();
        Self {
            entry: item.entry.into(),
            reactions: item
                .reactions
                .into_iter()
                .map(|r| ReactionCountResponse {
                    reaction_type: r.reaction_type,
                    count: r.count,
                })
                .collect(),
            total_reactions,
            comments: item.comments.into_iter().map(Into::into).collect(),
        }
    }
}
