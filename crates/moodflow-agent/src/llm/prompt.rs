//! Prompt templates for the generative classifiers.
//!
//! Both prompts demand a bare JSON object and show its exact shape, so the
//! response can be recovered with [`super::extract_json_object`] even when the
//! model wraps it in prose or code fences.

use moodflow_core::types::{EmotionLabel, EventType};

/// Builder for emotion and event classification prompts.
#[derive(Debug, Clone)]
pub struct MoodPromptBuilder {
    /// Maximum message length (characters) copied into a prompt.
    max_content_length: usize,
}

impl Default for MoodPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodPromptBuilder {
    pub fn new() -> Self {
        Self {
            max_content_length: 2000,
        }
    }

    pub fn with_max_content_length(mut self, length: usize) -> Self {
        self.max_content_length = length;
        self
    }

    /// Six-way emotion classification of a mood sentence.
    pub fn build_emotion_prompt(&self, text: &str) -> String {
        let labels = EmotionLabel::ALL
            .iter()
            .map(EmotionLabel::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"Return JSON only.

Classify the emotion expressed in the sentence below.

Labels:
{labels}

Sentence:
{text}

JSON:
{{"label":"neutral"}}
"#,
            labels = labels,
            text = self.truncate_content(text)
        )
    }

    /// Impact classification of an incoming message on its reader.
    pub fn build_event_prompt(&self, text: &str) -> String {
        let describe = |t: EventType| match t {
            EventType::EnergyUp => "raises morale or energy",
            EventType::Pressure => "criticism, revision requests, workload",
            EventType::EnergyDown => "bad news",
            EventType::Neutral => "informational",
        };
        let labels = EventType::ALL
            .iter()
            .map(|t| format!("- {} ({})", t.as_str(), describe(*t)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Return JSON only.

Task:
Classify how the message below affects the person reading it.

Labels:
{labels}

JSON format:
{{"event_type":"neutral","intensity":0.0}}

Message:
{text}
"#,
            labels = labels,
            text = self.truncate_content(text)
        )
    }

    /// Truncate on a char boundary, preferring the last complete word.
    fn truncate_content(&self, content: &str) -> String {
        if content.chars().count() <= self.max_content_length {
            return content.to_string();
        }
        let truncated: String = content.chars().take(self.max_content_length).collect();
        match truncated.rfind(' ') {
            Some(last_space) => format!("{}...", &truncated[..last_space]),
            None => format!("{}...", truncated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_prompt_lists_labels() {
        let prompt = MoodPromptBuilder::new().build_emotion_prompt("bugün çok yorgunum");
        assert!(prompt.starts_with("Return JSON only."));
        assert!(prompt.contains("happiness, sadness, anger, fear, surprise, neutral"));
        assert!(prompt.contains("bugün çok yorgunum"));
        assert!(prompt.contains(r#"{"label":"neutral"}"#));
    }

    #[test]
    fn test_event_prompt_shape() {
        let prompt = MoodPromptBuilder::new().build_event_prompt("Toplantı 3'e alındı");
        assert!(prompt.contains("- energy_up (raises morale or energy)"));
        assert!(prompt.contains("- energy_down (bad news)"));
        assert!(prompt.contains(r#"{"event_type":"neutral","intensity":0.0}"#));
        assert!(prompt.trim_end().ends_with("Toplantı 3'e alındı"));
    }

    #[test]
    fn test_truncate_content_is_char_safe() {
        let builder = MoodPromptBuilder::new().with_max_content_length(10);
        assert_eq!(builder.truncate_content("kısa"), "kısa");

        let truncated = builder.truncate_content("çok güzel şeyler oldu bugün");
        assert_eq!(truncated, "çok güzel...");
        assert_eq!(builder.truncate_content("ğğğğğğğğğğğğ"), "ğğğğğğğğğğ...");
    }
}
