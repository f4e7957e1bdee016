use crate::db::connection::Database;
use crate::db::repository::{CommentRepository, EntryRepository, ReactionRepository};
use crate::db::traits::{CommentStore, DatabaseBackend, EntryStore, ReactionStore};
use crate::error::Result;
use crate::models::{Comment, JournalEntry, JournalEntryPatch, Reaction, ReactionType};
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryStore for LibSqlBackend {
    async fn create_entry(&self, entry: &JournalEntry) -> Result<()> {
        let conn = self.db.connect()?;
        EntryRepository::create(&conn, entry).await
    }
    async fn get_entry_by_id(&self, id: &str) -> Result<Option<JournalEntry>> {
        let conn = self.db.connect()?;
        EntryRepository::get_by_id(&conn, id).await
    }
    async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let conn = self.db.connect()?;
        EntryRepository::list(&conn).await
    }
    async fn list_shared_entries(&self) -> Result<Vec<JournalEntry>> {
        let conn = self.db.connect()?;
        EntryRepository::list_shared(&conn).await
    }
    async fn update_entry(
        &self,
        id: &str,
        patch: &JournalEntryPatch,
    ) -> Result<Option<JournalEntry>> {
        let conn = self.db.connect()?;
        EntryRepository::update(&conn, id, patch).await
    }
}

#[async_trait]
impl ReactionStore for LibSqlBackend {
    async fn create_reaction(&self, reaction: &Reaction) -> Result<()> {
        let conn = self.db.connect()?;
        ReactionRepository::create(&conn, reaction).await
    }
    async fn count_reactions(&self, entry_id: &str) -> Result<Vec<(ReactionType, u64)>> {
        let conn = self.db.connect()?;
        ReactionRepository::count_by_entry(&conn, entry_id).await
    }
}

#[async_trait]
impl CommentStore for LibSqlBackend {
    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        let conn = self.db.connect()?;
        CommentRepository::create(&conn, comment).await
    }
    async fn list_comments(&self, entry_id: &str) -> Result<Vec<Comment>> {
        let conn = self.db.connect()?;
        CommentRepository::list_by_entry(&conn, entry_id).await
    }
    async fn like_comment(&self, id: &str) -> Result<Option<Comment>> {
        let conn = self.db.connect()?;
        CommentRepository::increment_likes(&conn, id).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
