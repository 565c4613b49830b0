use serde::Deserialize;

use crate::progress::Tool;

/// What a chat message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleTool(Tool),
    RequestHint,
    SubmitAnswer(String),
    StatusQuery,
    SmallTalk,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolRule {
    pub tool: Tool,
    pub keywords: Vec<String>,
}

/// Keyword tables for classifying chat input. Loaded from the `[rules]`
/// section of `companion.toml` so they can be tuned without touching the
/// progression code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntentRules {
    pub answer_prefixes: Vec<String>,
    pub tools: Vec<ToolRule>,
    pub hint: Vec<String>,
    pub status: Vec<String>,
}

impl Default for IntentRules {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }
        IntentRules {
            answer_prefixes: words(&["answer:", "code:", "solution:", "réponse:"]),
            tools: vec![
                ToolRule {
                    tool: Tool::Flashlight,
                    keywords: words(&["flashlight", "torch", "torche"]),
                },
                ToolRule {
                    tool: Tool::UvLight,
                    keywords: words(&["uv", "ultraviolet", "blacklight", "lumière"]),
                },
            ],
            hint: words(&["hint", "help", "stuck", "clue", "indice", "aide", "bloqué"]),
            status: words(&["status", "statut", "progress", "où en"]),
        }
    }
}

fn tokens(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Single words match whole tokens; phrases match as substrings.
fn mentions(lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        if keyword.contains(' ') {
            lower.contains(&keyword)
        } else {
            tokens(lower).any(|t| t == keyword)
        }
    })
}

/// Case-insensitive in any script, so `RÉPONSE:` matches `réponse:`.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let count = prefix.chars().count();
    let end = text.char_indices().nth(count).map_or(text.len(), |(i, _)| i);
    let head = &text[..end];
    if head.chars().count() == count && head.to_lowercase() == prefix.to_lowercase() {
        Some(&text[end..])
    } else {
        None
    }
}

impl IntentRules {
    pub fn classify(&self, message: &str) -> Intent {
        let trimmed = message.trim();
        for prefix in &self.answer_prefixes {
            if let Some(rest) = strip_prefix_ignore_case(trimmed, prefix) {
                return Intent::SubmitAnswer(rest.trim().to_string());
            }
        }

        let lower = trimmed.to_lowercase();
        for rule in &self.tools {
            if mentions(&lower, &rule.keywords) {
                return Intent::ToggleTool(rule.tool);
            }
        }
        if mentions(&lower, &self.hint) {
            return Intent::RequestHint;
        }
        if mentions(&lower, &self.status) {
            return Intent::StatusQuery;
        }
        Intent::SmallTalk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_keywords_match_whole_words() {
        let rules = IntentRules::default();
        assert_eq!(
            rules.classify("Turn on the UV please"),
            Intent::ToggleTool(Tool::UvLight)
        );
        assert_eq!(
            rules.classify("allume la lumière"),
            Intent::ToggleTool(Tool::UvLight)
        );
        assert_eq!(
            rules.classify("grab the flashlight"),
            Intent::ToggleTool(Tool::Flashlight)
        );
        // "uv" inside another word is not a tool request
        assert_eq!(rules.classify("the vuvuzela again"), Intent::SmallTalk);
    }

    #[test]
    fn hint_and_status_requests() {
        let rules = IntentRules::default();
        assert_eq!(rules.classify("I'm stuck, K"), Intent::RequestHint);
        assert_eq!(rules.classify("un indice ?"), Intent::RequestHint);
        assert_eq!(rules.classify("status report"), Intent::StatusQuery);
        assert_eq!(rules.classify("Où en est l'enquête"), Intent::StatusQuery);
    }

    #[test]
    fn answer_prefix_wins_and_keeps_original_text() {
        let rules = IntentRules::default();
        assert_eq!(
            rules.classify("  Answer:  88-21 "),
            Intent::SubmitAnswer("88-21".to_string())
        );
        assert_eq!(
            rules.classify("code: uv"),
            Intent::SubmitAnswer("uv".to_string())
        );
    }

    #[test]
    fn accented_prefix_matches_in_capitals() {
        let rules = IntentRules::default();
        assert_eq!(
            rules.classify("RÉPONSE: bluefrost"),
            Intent::SubmitAnswer("bluefrost".to_string())
        );
        assert_eq!(
            rules.classify("Réponse : frost"),
            Intent::SmallTalk
        );
        assert_eq!(rules.classify("ré"), Intent::SmallTalk);
    }

    #[test]
    fn rules_load_from_toml() {
        let rules: IntentRules = toml::from_str(
            r#"
            hint = ["psst"]
            [[tools]]
            tool = "flashlight"
            keywords = ["lamp"]
            "#,
        )
        .unwrap();
        assert_eq!(rules.classify("psst"), Intent::RequestHint);
        assert_eq!(
            rules.classify("lamp on"),
            Intent::ToggleTool(Tool::Flashlight)
        );
        // unspecified tables fall back to defaults
        assert_eq!(
            rules.classify("answer: x"),
            Intent::SubmitAnswer("x".into())
        );
    }
}
