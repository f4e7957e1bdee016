use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Mood;

/// Trim a client-supplied mood. Known labels are stored lower-case, any other
/// text is kept as written and blank input means no mood.
pub fn normalize_mood_label(raw: &str) -> Option<String> {
    let label = raw.trim();
    if label.is_empty() {
        return None;
    }
    Some(match label.parse::<Mood>() {
        Ok(mood) => mood.to_string(),
        Err(_) => label.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    /// Mood as recorded: a known label or free text from the client.
    pub mood: Option<String>,
    pub ai_summary: Option<String>,
    pub themes: Vec<String>,
    pub shared: bool,
    pub user_id: Option<String>,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(id: String, content: String) -> Self {
        Self {
            id,
            content,
            mood: None,
            ai_summary: None,
            themes: Vec::new(),
            shared: false,
            user_id: None,
            date: Utc::now(),
        }
    }

    /// The mood as one of the known labels, `None` when absent or unrecognised.
    pub fn known_mood(&self) -> Option<Mood> {
        self.mood.as_deref().and_then(|m| m.parse().ok())
    }

    /// Calendar day (UTC) the entry belongs to.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn apply(&mut self, patch: JournalEntryPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(mood) = patch.mood {
            self.mood = normalize_mood_label(&mood);
        }
        if let Some(ai_summary) = patch.ai_summary {
            self.ai_summary = Some(ai_summary);
        }
        if let Some(themes) = patch.themes {
            self.themes = themes;
        }
        if let Some(shared) = patch.shared {
            self.shared = shared;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = Some(user_id);
        }
    }
}

/// Fields accepted when saving a new entry. Only `content` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub content: Option<String>,
    pub mood: Option<String>,
    pub ai_summary: Option<String>,
    pub themes: Option<Vec<String>>,
    pub shared: Option<bool>,
    pub user_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalEntryPatch {
    pub content: Option<String>,
    pub mood: Option<String>,
    pub ai_summary: Option<String>,
    pub themes: Option<Vec<String>>,
    pub shared: Option<bool>,
    pub user_id: Option<String>,
}

impl JournalEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.mood.is_none()
            && self.ai_summary.is_none()
            && self.themes.is_none()
            && self.shared.is_none()
            && self.user_id.is_none()
    }
}
