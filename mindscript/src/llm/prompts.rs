//! Prompt templates for LLM-powered features.
//!
//! Templates use plain `format!()` interpolation so a missing variable is a
//! compile-time error.

/// Build the prompt asking the model to analyse a single journal entry.
///
/// The model is asked for a short summary, three reflection prompts and a
/// coarse mood label, returned as a bare JSON object.
///
/// # Example
/// ```
/// use mindscript::llm::prompts::journal_analysis_prompt;
///
/// let prompt = journal_analysis_prompt("Went for a long walk by the river.");
/// assert!(prompt.contains("long walk"));
/// ```
pub fn journal_analysis_prompt(content: &str) -> String {
    format!(
        r#"Analyze the following journal entry.

1. Summarize it in 2-3 sentences.
2. Suggest 3 reflection prompts.
3. Classify the overall mood as one of: "positive", "negative", or "neutral".

Return ONLY valid JSON:
{{
  "summary": "...",
  "prompts": ["...", "...", "..."],
  "mood": "positive" | "negative" | "neutral"
}}

Journal entry:
{content}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_entry() {
        let prompt = journal_analysis_prompt("I finally finished the marathon!");

        assert!(prompt.ends_with("I finally finished the marathon!"));
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains("\"prompts\""));
        assert!(prompt.contains("\"mood\""));
    }

    #[test]
    fn test_analysis_prompt_keeps_braces_in_content() {
        let prompt = journal_analysis_prompt("{not json}");
        assert!(prompt.contains("{not json}"));
    }
}
