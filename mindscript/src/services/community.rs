use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use crate::db::DatabaseBackend;
use crate::error::{JournalError, Result};
use crate::models::{
    reaction_counts, Comment, FeedItem, FeedOrder, JournalEntry, Reaction, ReactionCount,
    ReactionType,
};

pub const DEFAULT_COMMENT_AUTHOR: &str = "You";
pub const MAX_COMMENT_CHARS: usize = 2000;

/// Reactions, comments and the shared-entry feed.
pub struct CommunityService {
    db: Arc<dyn DatabaseBackend>,
}

impl CommunityService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    pub async fn feed(&self, order: FeedOrder) -> Result<Vec<FeedItem>> {
        let entries = self.db.list_shared_entries().await?;

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let reactions = self.reaction_counts(&entry.id).await?;
            let comments = self.db.list_comments(&entry.id).await?;
            items.push(FeedItem {
                entry,
                reactions,
                comments,
            });
        }

        if order == FeedOrder::Popular {
            // Entries arrive newest first; a stable sort keeps that as the tie-break.
            items.sort_by_key(|item| std::cmp::Reverse(item.total_reactions()));
        }

        Ok(items)
    }

    pub async fn add_reaction(
        &self,
        entry_id: &str,
        reaction_type: ReactionType,
        user_id: Option<String>,
    ) -> Result<Reaction> {
        self.shared_entry(entry_id).await?;

        let reaction = Reaction {
            id: nanoid!(),
            entry_id: entry_id.to_string(),
            reaction_type,
            user_id,
            created_at: Utc::now(),
        };
        self.db.create_reaction(&reaction).await?;
        tracing::debug!(entry_id, reaction = %reaction_type, "Reaction added");

        Ok(reaction)
    }

    pub async fn reaction_counts(&self, entry_id: &str) -> Result<Vec<ReactionCount>> {
        let raw = self.db.count_reactions(entry_id).await?;
        Ok(reaction_counts(&raw))
    }

    pub async fn add_comment(
        &self,
        entry_id: &str,
        content: &str,
        author: Option<String>,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(JournalError::Validation("content is required".to_string()));
        }
        if content.chars().count() > MAX_COMMENT_CHARS {
            return Err(JournalError::Validation(format!(
                "content must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }
        self.shared_entry(entry_id).await?;

        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string());

        let comment = Comment {
            id: nanoid!(),
            entry_id: entry_id.to_string(),
            author,
            content: content.to_string(),
            timestamp: Utc::now(),
            likes: 0,
        };
        self.db.create_comment(&comment).await?;
        tracing::debug!(entry_id, comment_id = %comment.id, "Comment added");

        Ok(comment)
    }

    pub async fn list_comments(&self, entry_id: &str) -> Result<Vec<Comment>> {
        self.entry(entry_id).await?;
        self.db.list_comments(entry_id).await
    }

    pub async fn like_comment(&self, comment_id: &str) -> Result<Comment> {
        self.db
            .like_comment(comment_id)
            .await?
            .ok_or_else(|| JournalError::NotFound(format!("Comment {comment_id} not found")))
    }

    async fn entry(&self, entry_id: &str) -> Result<JournalEntry> {
        self.db
            .get_entry_by_id(entry_id)
            .await?
            .ok_or_else(|| JournalError::NotFound(format!("Journal entry {entry_id} not found")))
    }

    async fn shared_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        let entry = self.entry(entry_id).await?;
        if !entry.shared {
            return Err(JournalError::Validation(format!(
                "Journal entry {entry_id} is not shared with the community"
            )));
        }
        Ok(entry)
    }
}
