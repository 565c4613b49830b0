//! Agent K, the radio companion.
//!
//! The companion keeps its own transcript and only reaches progression
//! through [`ProgressActions`]. Its dialogue collaborator is optional: with
//! no remote responder, or when the remote one fails, the canned lines
//! answer instead.

pub mod intent;
pub mod responder;

use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

pub use intent::{Intent, IntentRules, ToolRule};
pub use responder::{
    CannedLines, CannedResponder, ChatReply, ChatRequest, Responder, ResponderError, TopicLine,
};

use crate::campaign::normalize_answer;
use crate::config::read_toml_or_default;
use crate::error::ConfigError;
use crate::progress::{DayStatus, ProgressActions, Tool};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub rules: IntentRules,
    pub lines: CannedLines,
}

impl CompanionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_toml_or_default(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Inspector,
    AgentK,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Whether free text carries `solution` (already normalized). Short
/// solutions must stand as their own word so "14" does not answer "4".
fn mentions_solution(message: &str, solution: &str) -> bool {
    if solution.chars().count() < 3 {
        message
            .split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '_'))
            .any(|word| !word.is_empty() && normalize_answer(word) == solution)
    } else {
        normalize_answer(message).contains(solution)
    }
}

pub struct Companion {
    rules: IntentRules,
    fallback: CannedResponder,
    remote: Option<Box<dyn Responder>>,
    transcript: Vec<ChatLine>,
}

impl Companion {
    pub fn new(config: CompanionConfig) -> Self {
        Companion {
            rules: config.rules,
            fallback: CannedResponder::new(config.lines),
            remote: None,
            transcript: Vec::new(),
        }
    }

    /// Routes small talk to `responder` first, keeping the canned lines as
    /// the fallback.
    pub fn with_responder(mut self, responder: Box<dyn Responder>) -> Self {
        self.remote = Some(responder);
        self
    }

    pub fn lines(&self) -> &CannedLines {
        self.fallback.lines()
    }

    pub fn transcript(&self) -> &[ChatLine] {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Handles one message from the inspector and returns Agent K's reply.
    pub fn handle<P: ProgressActions>(&mut self, progress: &mut P, message: &str) -> String {
        self.transcript.push(ChatLine {
            speaker: Speaker::Inspector,
            text: message.to_string(),
        });
        let intent = self.rules.classify(message);
        debug!("companion intent: {intent:?}");
        let reply = self.reply_to(progress, intent, message);
        self.transcript.push(ChatLine {
            speaker: Speaker::AgentK,
            text: reply.clone(),
        });
        reply
    }

    fn reply_to<P: ProgressActions>(
        &mut self,
        progress: &mut P,
        intent: Intent,
        message: &str,
    ) -> String {
        let day = progress.progress().current_day();
        let lines = self.fallback.lines().clone();

        match intent {
            Intent::ToggleTool(tool) => {
                progress.toggle_tool(tool);
                let lit = progress.progress().active_tool().is_active(tool);
                match (tool, lit) {
                    (Tool::UvLight, true) => lines.uv_on,
                    (Tool::UvLight, false) => lines.uv_off,
                    (Tool::Flashlight, true) => lines.flashlight_on,
                    (Tool::Flashlight, false) => lines.flashlight_off,
                }
            }
            Intent::RequestHint => match progress.next_hint(day) {
                Ok(hint) => format!("*Ksshh* {hint}"),
                Err(_) => lines.transmission_error,
            },
            Intent::SubmitAnswer(answer) => self.submit(progress, day, &answer, &lines),
            Intent::StatusQuery => {
                let summary = progress.progress().summary();
                lines.status_report(day, summary.total, summary.solved)
            }
            Intent::SmallTalk => {
                let store = progress.progress();
                let solution = match store.day_status(day) {
                    DayStatus::Active => store
                        .current_day_data()
                        .and_then(|d| d.solution())
                        .map(str::to_string),
                    DayStatus::Locked | DayStatus::Solved => None,
                };
                if let Some(solution) = solution {
                    if mentions_solution(message, &solution)
                        && progress.validate_answer(day, &solution)
                    {
                        return lines.solved;
                    }
                }
                self.converse(progress, day, message)
            }
        }
    }

    fn submit<P: ProgressActions>(
        &self,
        progress: &mut P,
        day: u32,
        answer: &str,
        lines: &CannedLines,
    ) -> String {
        let store = progress.progress();
        match store.day_status(day) {
            DayStatus::Solved => return lines.already_solved.clone(),
            DayStatus::Locked => return lines.transmission_error.clone(),
            DayStatus::Active => {}
        }
        let needs_answer = store
            .current_day_data()
            .is_some_and(|d| d.solution().is_some());
        if !needs_answer {
            return lines.no_answer_needed.clone();
        }
        if progress.validate_answer(day, answer) {
            lines.solved.clone()
        } else {
            lines.wrong_answer.clone()
        }
    }

    fn converse<P: ProgressActions>(
        &mut self,
        progress: &mut P,
        day: u32,
        message: &str,
    ) -> String {
        let store = progress.progress();
        let request = ChatRequest {
            message: message.to_string(),
            current_day: day,
            inventory: store.inventory().iter().map(|i| i.name.clone()).collect(),
            completed_days: store.completed_days(),
        };

        let reply = match self.remote.as_mut().map(|r| r.respond(&request)) {
            Some(Ok(reply)) => reply,
            Some(Err(e)) => {
                warn!("dialogue service failed, using canned reply: {e}");
                self.canned(&request)
            }
            None => self.canned(&request),
        };

        if reply.puzzle_solved_hint {
            debug!("dialogue service reports day {day} solved");
            if let Err(e) = progress.complete_day(day) {
                warn!("could not complete day {day} from chat: {e}");
            }
        }
        reply.response_text
    }

    fn canned(&mut self, request: &ChatRequest) -> ChatReply {
        match self.fallback.respond(request) {
            Ok(reply) => reply,
            Err(_) => ChatReply {
                response_text: self.fallback.lines().transmission_error.clone(),
                puzzle_solved_hint: false,
            },
        }
    }
}
