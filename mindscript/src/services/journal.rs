use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use nanoid::nanoid;

use crate::analysis::JournalAnalyzer;
use crate::db::DatabaseBackend;
use crate::error::{JournalError, Result};
use crate::insights::DashboardSummary;
use crate::models::{
    normalize_mood_label, AnalysisOutcome, JournalEntry, JournalEntryPatch, NewJournalEntry,
};

fn require_content(content: Option<&str>) -> Result<&str> {
    match content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(JournalError::Validation("content is required".to_string())),
    }
}

/// Entry lifecycle and analysis.
pub struct JournalService {
    db: Arc<dyn DatabaseBackend>,
    analyzer: JournalAnalyzer,
}

impl JournalService {
    pub fn new(db: Arc<dyn DatabaseBackend>, analyzer: JournalAnalyzer) -> Self {
        Self { db, analyzer }
    }

    pub fn analyzer(&self) -> &JournalAnalyzer {
        &self.analyzer
    }

    /// Analyse draft text without storing anything. Only blank input is an error.
    pub async fn analyze(&self, content: Option<&str>) -> Result<AnalysisOutcome> {
        let content = require_content(content)?;
        let outcome = self.analyzer.analyze(content).await;
        tracing::info!(
            status = outcome.status.as_str(),
            mood = %outcome.analysis.mood,
            "Analysis complete"
        );
        Ok(outcome)
    }

    pub async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        let content = require_content(new_entry.content.as_deref())?.to_string();

        let mut entry = JournalEntry::new(nanoid!(), content);
        entry.mood = new_entry.mood.as_deref().and_then(normalize_mood_label);
        entry.ai_summary = new_entry.ai_summary.filter(|s| !s.trim().is_empty());
        entry.themes = new_entry.themes.unwrap_or_default();
        entry.shared = new_entry.shared.unwrap_or(false);
        entry.user_id = new_entry.user_id;
        entry.date = new_entry.date.unwrap_or_else(Utc::now);

        self.db.create_entry(&entry).await?;
        tracing::info!(entry_id = %entry.id, shared = entry.shared, "Journal entry created");

        Ok(entry)
    }

    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        self.db.list_entries().await
    }

    pub async fn get_entry(&self, id: &str) -> Result<JournalEntry> {
        self.db
            .get_entry_by_id(id)
            .await?
            .ok_or_else(|| JournalError::NotFound(format!("Journal entry {id} not found")))
    }

    pub async fn update_entry(&self, id: &str, patch: JournalEntryPatch) -> Result<JournalEntry> {
        if patch.content.is_some() {
            require_content(patch.content.as_deref())?;
        }

        let entry = self
            .db
            .update_entry(id, &patch)
            .await?
            .ok_or_else(|| JournalError::NotFound(format!("Journal entry {id} not found")))?;
        tracing::info!(entry_id = %id, "Journal entry updated");

        Ok(entry)
    }

    pub async fn dashboard(&self, today: NaiveDate, top_themes: usize) -> Result<DashboardSummary> {
        let entries = self.db.list_entries().await?;
        Ok(DashboardSummary::compute(&entries, today, top_themes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{Database, LibSqlBackend};
    use crate::llm::LlmProvider;
    use crate::models::{AnalysisStatus, Mood};
    use chrono::TimeZone;
    use tempfile::NamedTempFile;

    async fn setup_service() -> (JournalService, NamedTempFile) {
        let tmp = NamedTempFile::new().unwrap();
        let config = DatabaseConfig {
            url: format!("file:{}", tmp.path().display()),
            ..Default::default()
        };
        let db = Database::new(&config).await.unwrap();
        let backend: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(db));
        let analyzer = JournalAnalyzer::new(LlmProvider::unavailable("test"));
        (JournalService::new(backend, analyzer), tmp)
    }

    #[tokio::test]
    async fn test_create_requires_content() {
        let (service, _tmp) = setup_service().await;

        let err = service
            .create_entry(NewJournalEntry::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));

        let err = service
            .create_entry(NewJournalEntry {
                content: Some("   ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_sets_defaults() {
        let (service, _tmp) = setup_service().await;
        let before = Utc::now();

        let entry = service
            .create_entry(NewJournalEntry {
                content: Some("x".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(entry.content, "x");
        assert!(!entry.id.is_empty());
        assert!(!entry.shared);
        assert!(entry.themes.is_empty());
        assert!(entry.date >= before);

        let fetched = service.get_entry(&entry.id).await.unwrap();
        assert_eq!(fetched.content, "x");
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let (service, _tmp) = setup_service().await;
        for (content, day) in [("first", 1), ("third", 3), ("second", 2)] {
            service
                .create_entry(NewJournalEntry {
                    content: Some(content.to_string()),
                    date: Some(Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let contents: Vec<String> = service
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.content)
            .collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_get_and_update_missing_entry() {
        let (service, _tmp) = setup_service().await;

        assert!(matches!(
            service.get_entry("missing").await,
            Err(JournalError::NotFound(_))
        ));
        assert!(matches!(
            service
                .update_entry("missing", JournalEntryPatch::default())
                .await,
            Err(JournalError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_content() {
        let (service, _tmp) = setup_service().await;
        let entry = service
            .create_entry(NewJournalEntry {
                content: Some("keep me".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = service
            .update_entry(
                &entry.id,
                JournalEntryPatch {
                    content: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));

        let updated = service
            .update_entry(
                &entry.id,
                JournalEntryPatch {
                    mood: Some("positive".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.content, "keep me");
        assert_eq!(updated.known_mood(), Some(Mood::Positive));
    }

    #[tokio::test]
    async fn test_analyze_without_llm_falls_back() {
        let (service, _tmp) = setup_service().await;

        let outcome = service.analyze(Some("A calm day.")).await.unwrap();
        assert_eq!(outcome.analysis.summary, "Could not generate summary.");
        assert!(matches!(outcome.status, AnalysisStatus::Unavailable { .. }));

        assert!(service.analyze(None).await.is_err());
    }
}
