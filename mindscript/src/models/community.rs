use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JournalEntry, ReactionType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    pub id: String,
    pub entry_id: String,
    pub reaction_type: ReactionType,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub entry_id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionCount {
    pub reaction_type: ReactionType,
    pub count: u64,
}

/// A shared entry together with its social activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub entry: JournalEntry,
    pub reactions: Vec<ReactionCount>,
    pub comments: Vec<Comment>,
}

impl FeedItem {
    pub fn total_reactions(&self) -> u64 {
        self.reactions.iter().map(|r| r.count).sum()
    }
}

/// Expand sparse per-type counts into one count per reaction type, zeros included.
pub fn reaction_counts(raw: &[(ReactionType, u64)]) -> Vec<ReactionCount> {
    ReactionType::ALL
        .iter()
        .map(|reaction_type| ReactionCount {
            reaction_type: *reaction_type,
            count: raw
                .iter()
                .filter(|(t, _)| t == reaction_type)
                .map(|(_, c)| *c)
                .sum(),
        })
        .collect()
}
