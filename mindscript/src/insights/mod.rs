//! Pure aggregation over journal entries: streaks, mood statistics and the
//! pattern-based suggestions shown on the dashboard.

mod patterns;
mod stats;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{JournalEntry, Mood};

pub use patterns::{
    achievements, dominant_mood, mood_trend, suggestions, Achievement, MoodTrend, Suggestion,
    SuggestionKind,
};
pub use stats::{
    average_mood, current_streak, longest_streak, mood_distribution, mood_score,
    theme_frequency, weekly_mood, DailyMood, MoodCount, ThemeCount, MISSING_MOOD_SCORE,
};

pub const DEFAULT_TOP_THEMES: usize = 5;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_entries: usize,
    pub shared_entries: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_mood: f64,
    pub dominant_mood: Mood,
    pub mood_trend: MoodTrend,
    pub mood_distribution: Vec<MoodCount>,
    pub top_themes: Vec<ThemeCount>,
    pub weekly_mood: Vec<DailyMood>,
    pub suggestions: Vec<Suggestion>,
    pub achievements: Vec<Achievement>,
}

impl DashboardSummary {
    pub fn compute(entries: &[JournalEntry], today: NaiveDate, top_themes: usize) -> Self {
        Self {
            total_entries: entries.len(),
            shared_entries: entries.iter().filter(|e| e.shared).count(),
            current_streak: current_streak(entries, today),
            longest_streak: longest_streak(entries),
            average_mood: average_mood(entries),
            dominant_mood: dominant_mood(entries),
            mood_trend: mood_trend(entries),
            mood_distribution: mood_distribution(entries),
            top_themes: theme_frequency(entries, top_themes),
            weekly_mood: weekly_mood(entries, today),
            suggestions: suggestions(entries),
            achievements: achievements(entries),
        }
    }
}
