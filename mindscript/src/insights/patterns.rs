use serde::Serialize;

use super::stats::{mood_score, theme_frequency};
use crate::models::{JournalEntry, Mood};

const TREND_WINDOW: usize = 5;
const SUGGESTION_LIMIT: usize = 4;
const TOP_THEMES_FOR_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

/// Most frequent mood label; ties go to the label seen first. `Neutral` when no entry has a mood.
pub fn dominant_mood(entries: &[JournalEntry]) -> Mood {
    let mut seen: Vec<(Mood, usize)> = Vec::new();
    for mood in entries.iter().filter_map(JournalEntry::known_mood) {
        match seen.iter_mut().find(|(m, _)| *m == mood) {
            Some((_, count)) => *count += 1,
            None => seen.push((mood, 1)),
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, count) in seen {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood).unwrap_or(Mood::Neutral)
}

fn window_average(entries: &[&JournalEntry]) -> f64 {
    let total: u32 = entries.iter().map(|e| mood_score(e.known_mood()) as u32).sum();
    total as f64 / entries.len() as f64
}

/// Compare the five most recent entries against the five before them.
/// Fewer than six entries gives nothing to compare, so the trend is stable.
pub fn mood_trend(entries: &[JournalEntry]) -> MoodTrend {
    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    if sorted.len() <= TREND_WINDOW {
        return MoodTrend::Stable;
    }

    let recent = window_average(&sorted[..TREND_WINDOW]);
    let older_end = sorted.len().min(TREND_WINDOW * 2);
    let older = window_average(&sorted[TREND_WINDOW..older_end]);

    if recent > older {
        MoodTrend::Improving
    } else if recent < older {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Wellbeing,
    Growth,
    Balance,
    Stress,
    Support,
    Consistency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, title: &str, description: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

pub fn suggestions(entries: &[JournalEntry]) -> Vec<Suggestion> {
    let mood = dominant_mood(entries);
    let trend = mood_trend(entries);
    let top_themes = theme_frequency(entries, TOP_THEMES_FOR_SUGGESTIONS);
    let has_theme = |name: &str| top_themes.iter().any(|t| t.theme.eq_ignore_ascii_case(name));

    let mut out = Vec::new();

    if mood == Mood::Negative {
        out.push(Suggestion::new(
            SuggestionKind::Wellbeing,
            "Self-Care Focus",
            "Recent entries carry difficult emotions. Mindfulness practice or reaching out to people you trust may help.",
        ));
    }
    if mood == Mood::Positive {
        out.push(Suggestion::new(
            SuggestionKind::Growth,
            "Momentum Building",
            "You are in a good place. It is a fine moment to set a new goal or pick up something you have put off.",
        ));
    }
    if has_theme("work") {
        out.push(Suggestion::new(
            SuggestionKind::Balance,
            "Work-Life Balance",
            "Work comes up often in your writing. Reflect on where your boundaries are.",
        ));
    }
    if has_theme("stress") {
        out.push(Suggestion::new(
            SuggestionKind::Stress,
            "Stress Management",
            "Stress keeps recurring. Breathing exercises or physical activity can take the edge off.",
        ));
    }
    if trend == MoodTrend::Declining {
        out.push(Suggestion::new(
            SuggestionKind::Support,
            "Mood Support",
            "Your mood has dipped lately. That is normal, but consider extra self-care or professional support if it persists.",
        ));
    }
    out.push(Suggestion::new(
        SuggestionKind::Consistency,
        "Journaling Consistency",
        "Writing at the same time each day makes patterns easier to spot.",
    ));

    out.truncate(SUGGESTION_LIMIT);
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub unlocked: bool,
}

impl Achievement {
    fn unlocked(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            unlocked: true,
        }
    }

    fn locked(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            unlocked: false,
        }
    }
}

pub fn achievements(entries: &[JournalEntry]) -> Vec<Achievement> {
    let total = entries.len();
    let positive = entries
        .iter()
        .filter(|e| e.known_mood() == Some(Mood::Positive))
        .count();
    let shared = entries.iter().filter(|e| e.shared).count();

    let mut out = Vec::new();

    if total >= 1 {
        out.push(Achievement::unlocked(
            "First Entry",
            "Started your journaling journey",
        ));
    }
    if total >= 7 {
        out.push(Achievement::unlocked(
            "Weekly Warrior",
            "Completed 7 journal entries",
        ));
    }
    out.push(if total >= 30 {
        Achievement::unlocked("Monthly Master", "Completed 30 journal entries")
    } else {
        Achievement::locked(
            "Monthly Master",
            format!("Complete {} more entries", 30 - total),
        )
    });
    out.push(if positive >= 5 {
        Achievement::unlocked("Positivity Pro", "Had 5 positive mood entries")
    } else {
        Achievement::locked(
            "Positivity Pro",
            format!("Need {} more positive entries", 5 - positive),
        )
    });
    out.push(if shared >= 3 {
        Achievement::unlocked("Community Contributor", "Shared 3 entries with the community")
    } else {
        Achievement::locked(
            "Community Contributor",
            format!("Share {} more entries", 3 - shared),
        )
    });

    out
}
