//! Journal entry analysis backed by a chat-completion model.
//!
//! [`JournalAnalyzer::analyze`] never fails: any upstream or parsing problem
//! is logged and turned into [`Analysis::fallback`], with the reason kept in
//! the returned [`AnalysisOutcome`].

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{JournalError, Result};
use crate::llm::{prompts, CompletionOptions, LlmProvider};
use crate::models::{Analysis, AnalysisOutcome, Mood, MISSING_SUMMARY};

const DEFAULT_TEMPERATURE: f32 = 0.7;

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```json|```").expect("valid regex"))
}

/// Remove Markdown code-fence markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    code_fence().replace_all(text, "").trim().to_string()
}

/// Parse a raw model reply into a normalized [`Analysis`].
///
/// Missing or malformed fields fall back individually; only an unparsable
/// reply or a non-object value is an error.
pub fn parse_analysis(raw: &str) -> Result<Analysis> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| JournalError::Llm(format!("Failed to parse analysis JSON: {e}")))?;

    let Value::Object(map) = value else {
        return Err(JournalError::Llm(
            "Analysis reply was not a JSON object".to_string(),
        ));
    };

    let summary = map
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(MISSING_SUMMARY)
        .to_string();

    let prompts = map
        .get("prompts")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mood = map
        .get("mood")
        .and_then(Value::as_str)
        .map(normalize_mood)
        .unwrap_or(Mood::Neutral);

    Ok(Analysis {
        summary,
        prompts,
        mood,
    })
}

/// Lower-case the label and clamp it to positive, negative or neutral.
fn normalize_mood(label: &str) -> Mood {
    match label.parse::<Mood>() {
        Ok(mood @ (Mood::Positive | Mood::Negative)) => mood,
        _ => Mood::Neutral,
    }
}

#[derive(Clone, Debug)]
pub struct JournalAnalyzer {
    llm: LlmProvider,
    temperature: f32,
}

impl JournalAnalyzer {
    pub fn new(llm: LlmProvider) -> Self {
        let temperature = llm
            .config()
            .map(|c| c.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);
        Self { llm, temperature }
    }

    pub fn is_available(&self) -> bool {
        self.llm.is_available()
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.llm
    }

    pub async fn analyze(&self, content: &str) -> AnalysisOutcome {
        if !self.llm.is_available() {
            let reason = self.llm.unavailable_reason();
            tracing::debug!(reason = %reason, "Analysis skipped, LLM unavailable");
            return AnalysisOutcome::unavailable(reason);
        }

        let prompt = prompts::journal_analysis_prompt(content);
        let options = CompletionOptions {
            temperature: Some(self.temperature),
            ..Default::default()
        };

        let reply = match self.llm.complete(&prompt, Some(&options)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Analysis request failed, using fallback");
                return AnalysisOutcome::fallback(e.to_string());
            }
        };

        match parse_analysis(&reply) {
            Ok(analysis) => {
                tracing::debug!(mood = %analysis.mood, prompts = analysis.prompts.len(), "Entry analysed");
                AnalysisOutcome::generated(analysis)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    response_preview = %reply.chars().take(100).collect::<String>(),
                    "Analysis reply unusable, using fallback"
                );
                AnalysisOutcome::fallback(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_reply_is_normalized() {
        let raw = "```json\n{\"summary\":\"s\",\"prompts\":[\"a\",\"b\",\"c\"],\"mood\":\"POSITIVE\"}\n```";

        let analysis = parse_analysis(raw).unwrap();

        assert_eq!(
            analysis,
            Analysis {
                summary: "s".to_string(),
                prompts: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                mood: Mood::Positive,
            }
        );
    }

    #[test]
    fn test_bare_fence_without_language() {
        let raw = "```\n{\"summary\":\"ok\",\"prompts\":[],\"mood\":\"negative\"}\n```";
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.mood, Mood::Negative);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let analysis = parse_analysis("{}").unwrap();
        assert_eq!(analysis.summary, "No summary generated.");
        assert!(analysis.prompts.is_empty());
        assert_eq!(analysis.mood, Mood::Neutral);
    }

    #[test]
    fn test_wrong_field_types_use_defaults() {
        let analysis =
            parse_analysis(r#"{"summary": 42, "prompts": "reflect", "mood": null}"#).unwrap();
        assert_eq!(analysis.summary, "No summary generated.");
        assert!(analysis.prompts.is_empty());
        assert_eq!(analysis.mood, Mood::Neutral);
    }

    #[test]
    fn test_non_string_prompts_are_dropped() {
        let analysis = parse_analysis(r#"{"summary":"s","prompts":["a", 1, null, "b"]}"#).unwrap();
        assert_eq!(analysis.prompts, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_out_of_range_mood_becomes_neutral() {
        for label in ["mixed", "ecstatic", ""] {
            let raw = format!(r#"{{"summary":"s","prompts":[],"mood":"{label}"}}"#);
            assert_eq!(parse_analysis(&raw).unwrap().mood, Mood::Neutral, "{label}");
        }
    }

    #[test]
    fn test_unparsable_reply_errors() {
        assert!(parse_analysis("The entry sounds happy!").is_err());
        assert!(parse_analysis("[1, 2, 3]").is_err());
        assert!(parse_analysis("").is_err());
    }

    #[test]
    fn test_strip_code_fences_trims() {
        assert_eq!(strip_code_fences("  ```json {} ```  "), "{}");
        assert_eq!(strip_code_fences("plain"), "plain");
    }

    #[tokio::test]
    async fn test_unavailable_provider_returns_fallback() {
        let analyzer = JournalAnalyzer::new(LlmProvider::unavailable("No LLM configuration provided"));

        let outcome = analyzer.analyze("Today was fine.").await;

        assert_eq!(outcome.analysis, Analysis::fallback());
        assert_eq!(
            outcome.status,
            AnalysisStatus::Unavailable {
                reason: "No LLM configuration provided".to_string()
            }
        );
    }
}
