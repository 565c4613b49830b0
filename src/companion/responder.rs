use serde::Deserialize;
use thiserror::Error;

/// What the chat surface sends to a text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub current_day: u32,
    pub inventory: Vec<String>,
    pub completed_days: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response_text: String,
    /// The collaborator believes the player just cracked the current day.
    pub puzzle_solved_hint: bool,
}

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("responder unavailable: {0}")]
    Unavailable(String),
    #[error("responder timed out")]
    Timeout,
}

pub trait Responder {
    fn respond(&mut self, request: &ChatRequest) -> Result<ChatReply, ResponderError>;
}

/// A keyword-triggered line, optionally held back until a day is solved.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicLine {
    pub keywords: Vec<String>,
    pub reply: String,
    #[serde(default)]
    pub requires_day: Option<u32>,
    #[serde(default)]
    pub locked_reply: Option<String>,
}

/// Agent K's canned dialogue, from the `[lines]` section of
/// `companion.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CannedLines {
    pub uv_on: String,
    pub uv_off: String,
    pub flashlight_on: String,
    pub flashlight_off: String,
    pub solved: String,
    pub wrong_answer: String,
    pub already_solved: String,
    pub no_answer_needed: String,
    pub transmission_error: String,
    /// Progress report; `{day}`, `{total}` and `{solved}` are filled in.
    pub status: String,
    pub small_talk: Vec<String>,
    pub topics: Vec<TopicLine>,
}

impl Default for CannedLines {
    fn default() -> Self {
        CannedLines {
            uv_on: "*Ksshh* UV light on. Some secrets only show under ultraviolet.".into(),
            uv_off: "*Ksshh* UV off. Back to plain daylight.".into(),
            flashlight_on: "*Ksshh* Flashlight's on. Sweep the corners.".into(),
            flashlight_off: "*Ksshh* Flashlight off. Save the batteries.".into(),
            solved: "*Ksshh* That checks out. Evidence secured, kid.".into(),
            wrong_answer: "*Ksshh* Doesn't add up. Look again.".into(),
            already_solved: "*Ksshh* We closed that one already. Eyes forward.".into(),
            no_answer_needed: "*Ksshh* Nothing to type on this one. Just do the legwork.".into(),
            transmission_error: "*Ksshh* Transmission's breaking up. Say again, Inspector.".into(),
            status: "*Ksshh* Day {day} of {total}. {solved} days closed. We're moving, but the clock's running.".into(),
            small_talk: vec![
                "*Ksshh* Copy. Keep digging, Inspector.".into(),
                "*Ksshh* Interesting. What does that tell you?".into(),
                "*Ksshh* I could use a coffee. You find anything?".into(),
                "*Ksshh* Clock's ticking. The 24th is coming.".into(),
            ],
            topics: Vec::new(),
        }
    }
}

impl CannedLines {
    pub fn status_report(&self, day: u32, total: u32, solved: u32) -> String {
        self.status
            .replace("{day}", &day.to_string())
            .replace("{total}", &total.to_string())
            .replace("{solved}", &solved.to_string())
    }
}

fn mentions_any(lower: &str, keywords: &[String]) -> bool {
    let mut tokens = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty());
    tokens.any(|t| keywords.iter().any(|k| k.to_lowercase() == t))
}

/// Local stand-in for the remote dialogue service. Never fails and never
/// claims a puzzle was solved.
#[derive(Debug, Clone, Default)]
pub struct CannedResponder {
    lines: CannedLines,
    next_small_talk: usize,
}

impl CannedResponder {
    pub fn new(lines: CannedLines) -> Self {
        CannedResponder {
            lines,
            next_small_talk: 0,
        }
    }

    pub fn lines(&self) -> &CannedLines {
        &self.lines
    }

    fn topic_reply(&self, request: &ChatRequest) -> Option<String> {
        let lower = request.message.to_lowercase();
        let topic = self
            .lines
            .topics
            .iter()
            .find(|t| mentions_any(&lower, &t.keywords))?;
        let unlocked = topic
            .requires_day
            .map_or(true, |day| request.completed_days.contains(&day));
        if unlocked {
            Some(topic.reply.clone())
        } else {
            Some(
                topic
                    .locked_reply
                    .clone()
                    .unwrap_or_else(|| self.lines.wrong_answer.clone()),
            )
        }
    }
}

impl Responder for CannedResponder {
    fn respond(&mut self, request: &ChatRequest) -> Result<ChatReply, ResponderError> {
        let response_text = match self.topic_reply(request) {
            Some(reply) => reply,
            None if self.lines.small_talk.is_empty() => self.lines.transmission_error.clone(),
            None => {
                let index = self.next_small_talk % self.lines.small_talk.len();
                self.next_small_talk += 1;
                self.lines.small_talk[index].clone()
            }
        };
        Ok(ChatReply {
            response_text,
            puzzle_solved_hint: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, completed_days: Vec<u32>) -> ChatRequest {
        ChatRequest {
            message: message.into(),
            current_day: 3,
            inventory: Vec::new(),
            completed_days,
        }
    }

    #[test]
    fn small_talk_rotates() {
        let mut responder = CannedResponder::default();
        let first = responder.respond(&request("hey", vec![])).unwrap();
        let second = responder.respond(&request("hey", vec![])).unwrap();
        assert_ne!(first.response_text, second.response_text);
        assert!(!first.puzzle_solved_hint);
    }

    #[test]
    fn gated_topic_waits_for_its_day() {
        let lines = CannedLines {
            topics: vec![TopicLine {
                keywords: vec!["jack".into()],
                reply: "Jack Frost. We've got him now.".into(),
                requires_day: Some(18),
                locked_reply: Some("Easy. Not enough evidence yet.".into()),
            }],
            ..CannedLines::default()
        };
        let mut responder = CannedResponder::new(lines);
        let early = responder.respond(&request("is it Jack?", vec![1, 2])).unwrap();
        assert_eq!(early.response_text, "Easy. Not enough evidence yet.");
        let late = responder.respond(&request("is it Jack?", vec![18])).unwrap();
        assert_eq!(late.response_text, "Jack Frost. We've got him now.");
    }
}
