use serde::{Deserialize, Serialize};

use super::Mood;

pub const FALLBACK_SUMMARY: &str = "Could not generate summary.";
pub const MISSING_SUMMARY: &str = "No summary generated.";

/// Normalized result of analysing one journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct Analysis {
    pub summary: String,
    pub prompts: Vec<String>,
    pub mood: Mood,
}

impl Analysis {
    /// The fixed value returned whenever no analysis could be produced.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            prompts: Vec::new(),
            mood: Mood::Neutral,
        }
    }
}

/// How an [`Analysis`] was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Parsed from a model reply.
    Generated,
    /// The upstream call or parsing failed.
    Fallback { reason: String },
    /// No LLM is configured.
    Unavailable { reason: String },
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Fallback { .. } => "fallback",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub status: AnalysisStatus,
}

impl AnalysisOutcome {
    pub fn generated(analysis: Analysis) -> Self {
        Self {
            analysis,
            status: AnalysisStatus::Generated,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            analysis: Analysis::fallback(),
            status: AnalysisStatus::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            analysis: Analysis::fallback(),
            status: AnalysisStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.status, AnalysisStatus::Generated)
    }
}
