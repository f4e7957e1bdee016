use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{JournalEntry, Mood};

/// Score used when an entry has no mood or one outside the known labels.
pub const MISSING_MOOD_SCORE: u8 = 2;

pub fn mood_score(mood: Option<Mood>) -> u8 {
    mood.map(Mood::score).unwrap_or(MISSING_MOOD_SCORE)
}

/// Mean mood score, 0 for an empty list.
pub fn average_mood(entries: &[JournalEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let total: u64 = entries.iter().map(|e| mood_score(e.known_mood()) as u64).sum();
    total as f64 / entries.len() as f64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: u64,
}

/// Entries per mood label, in `Mood::ALL` order. Entries without a mood are not counted.
pub fn mood_distribution(entries: &[JournalEntry]) -> Vec<MoodCount> {
    Mood::ALL
        .iter()
        .map(|mood| MoodCount {
            mood: *mood,
            count: entries.iter().filter(|e| e.known_mood() == Some(*mood)).count() as u64,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ThemeCount {
    pub theme: String,
    pub count: u64,
}

/// Most frequent themes, descending. Ties keep first-appearance order.
pub fn theme_frequency(entries: &[JournalEntry], top_n: usize) -> Vec<ThemeCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for theme in entries.iter().flat_map(|e| e.themes.iter()) {
        let count = counts.entry(theme.as_str()).or_insert(0);
        if *count == 0 {
            order.push(theme.clone());
        }
        *count += 1;
    }

    let mut themes: Vec<ThemeCount> = order
        .into_iter()
        .map(|theme| {
            let count = counts.get(theme.as_str()).copied().unwrap_or(0);
            ThemeCount { theme, count }
        })
        .collect();
    // Stable sort keeps first appearance among equal counts.
    themes.sort_by(|a, b| b.count.cmp(&a.count));
    themes.truncate(top_n);
    themes
}

fn entry_days(entries: &[JournalEntry]) -> BTreeSet<NaiveDate> {
    entries.iter().map(JournalEntry::day).collect()
}

/// Consecutive days with at least one entry, walking back from `today`.
/// No entry on `today` means a streak of 0.
pub fn current_streak(entries: &[JournalEntry], today: NaiveDate) -> u32 {
    let days = entry_days(entries);
    let mut streak = 0;
    let mut day = today;

    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }

    streak
}

/// Longest run of consecutive calendar days with entries.
pub fn longest_streak(entries: &[JournalEntry]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in entry_days(entries) {
        run = match previous {
            Some(prev) if day - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DailyMood {
    pub date: NaiveDate,
    /// Score of the latest entry that day, absent when nothing was written.
    pub score: Option<u8>,
}

/// The seven days ending at `today`, oldest first.
pub fn weekly_mood(entries: &[JournalEntry], today: NaiveDate) -> Vec<DailyMood> {
    (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let score = entries
                .iter()
                .filter(|e| e.day() == date)
                .max_by_key(|e| e.date)
                .map(|e| mood_score(e.known_mood()));
            DailyMood { date, score }
        })
        .collect()
}
