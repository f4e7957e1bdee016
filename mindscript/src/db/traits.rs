use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, JournalEntry, JournalEntryPatch, Reaction, ReactionType};

/// Persistence for journal entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn create_entry(&self, entry: &JournalEntry) -> Result<()>;
    async fn get_entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>>;
    /// All entries, newest first.
    async fn list_entries(&self) -> Result<Vec<JournalEntry>>;
    /// Shared entries only, newest first.
    async fn list_shared_entries(&self) -> Result<Vec<JournalEntry>>;
    /// Returns the updated entry, or `None` when the id is unknown.
    async fn update_entry(
        &self,
        id: &str,
        patch: &JournalEntryPatch,
    ) -> Result<Option<JournalEntry>>;
}

#[async_trait]
pub trait ReactionStore: Send + Sync {
    async fn create_reaction(&self, reaction: &Reaction) -> Result<()>;
    async fn count_reactions(&self, entry_id: &str) -> Result<Vec<(ReactionType, u64)>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> Result<()>;
    /// Comments for one entry, oldest first.
    async fn list_comments(&self, entry_id: &str) -> Result<Vec<Comment>>;
    /// Atomically bump the like counter. `None` when the comment does not exist.
    async fn like_comment(&self, id: &str) -> Result<Option<Comment>>;
}

/// A complete database backend combining every store plus lifecycle operations.
#[async_trait]
pub trait DatabaseBackend: EntryStore + ReactionStore + CommentStore + Send + Sync {
    async fn sync(&self) -> Result<()>;
}
