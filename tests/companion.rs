use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use red_protocol::companion::{
    CannedLines, ChatReply, ChatRequest, Companion, CompanionConfig, Responder, ResponderError,
    Speaker,
};
use red_protocol::progress::{ActiveTool, ProgressStore};
use red_protocol::{Campaign, Day, PuzzleKind, Session};

fn campaign() -> Arc<Campaign> {
    let days = vec![
        Day::new(
            1,
            PuzzleKind::UvLight,
            Some("88-21"),
            &["Some ink only shows under the right light.", "Try the UV."],
            Some("Code: 88-21"),
        ),
        Day::new(2, PuzzleKind::VisualSearch, None, &["Shake it gently."], None),
        Day::new(3, PuzzleKind::Decrypt, Some("FROST"), &["Five letters."], None),
    ];
    Arc::new(Campaign::from_days(days).unwrap())
}

fn companion() -> Companion {
    Companion::new(CompanionConfig::default())
}

struct Down;

impl Responder for Down {
    fn respond(&mut self, _request: &ChatRequest) -> Result<ChatReply, ResponderError> {
        Err(ResponderError::Timeout)
    }
}

/// Replies with a fixed line and records what it was asked.
struct Scripted {
    solved: bool,
    seen: Rc<RefCell<Vec<ChatRequest>>>,
}

impl Responder for Scripted {
    fn respond(&mut self, request: &ChatRequest) -> Result<ChatReply, ResponderError> {
        self.seen.borrow_mut().push(request.clone());
        Ok(ChatReply {
            response_text: "Nice work, kid.".into(),
            puzzle_solved_hint: self.solved,
        })
    }
}

#[test]
fn hints_come_in_order_then_repeat() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();

    let first = agent.handle(&mut store, "I'm stuck");
    let second = agent.handle(&mut store, "hint please");
    let third = agent.handle(&mut store, "another clue?");
    assert!(first.contains("Some ink only shows"));
    assert!(second.contains("Try the UV."));
    assert_eq!(second, third);
    assert_eq!(store.hints_seen(1), 2);
}

#[test]
fn tools_are_mutually_exclusive() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();
    let lines = CannedLines::default();

    assert_eq!(agent.handle(&mut store, "turn on the UV"), lines.uv_on);
    assert_eq!(store.active_tool(), ActiveTool::Uv);

    assert_eq!(agent.handle(&mut store, "flashlight"), lines.flashlight_on);
    assert_eq!(store.active_tool(), ActiveTool::Flashlight);

    assert_eq!(agent.handle(&mut store, "flashlight off"), lines.flashlight_off);
    assert_eq!(store.active_tool(), ActiveTool::None);
}

#[test]
fn prefixed_answer_solves_the_current_day() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();
    let lines = CannedLines::default();

    assert_eq!(agent.handle(&mut store, "answer: 1234"), lines.wrong_answer);
    assert!(!store.is_completed(1));
    assert_eq!(agent.handle(&mut store, "answer: 88 21"), lines.solved);
    assert!(store.is_completed(1));
    assert_eq!(agent.handle(&mut store, "code: 8821"), lines.already_solved);
}

#[test]
fn bare_solution_in_chat_also_counts() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();
    assert_eq!(agent.handle(&mut store, "88-21"), CannedLines::default().solved);
    assert!(store.is_completed(1));
}

#[test]
fn answer_inside_a_sentence_counts() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();
    let reply = agent.handle(&mut store, "I think the code is 88 21, K");
    assert_eq!(reply, CannedLines::default().solved);
    assert!(store.is_completed(1));

    store.set_current_day(2);
    store.complete_day(2).unwrap();
    store.set_current_day(3);
    assert_eq!(
        agent.handle(&mut store, "pretty sure it's frost."),
        CannedLines::default().solved
    );
    assert!(store.is_completed(3));
}

#[test]
fn short_answer_must_stand_alone() {
    let campaign = Campaign::from_days(vec![Day::new(
        1,
        PuzzleKind::ScratchReveal,
        Some("4"),
        &["Count the fingers."],
        None,
    )])
    .unwrap();
    let mut store = ProgressStore::new(Arc::new(campaign));
    let mut agent = companion();

    agent.handle(&mut store, "I counted 14 scratches on the door");
    assert!(!store.is_completed(1));
    agent.handle(&mut store, "only 4, one is missing");
    assert!(store.is_completed(1));
}

#[test]
fn interaction_day_has_nothing_to_type() {
    let mut store = ProgressStore::new(campaign());
    store.complete_day(1).unwrap();
    store.set_current_day(2);
    let mut agent = companion();
    assert_eq!(
        agent.handle(&mut store, "answer: bomb"),
        CannedLines::default().no_answer_needed
    );
    assert!(!store.is_completed(2));
}

#[test]
fn failing_service_falls_back_to_canned_lines() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion().with_responder(Box::new(Down));
    let reply = agent.handle(&mut store, "cold night, huh");
    assert!(CannedLines::default().small_talk.contains(&reply));
    assert_eq!(store.completed_days(), Vec::<u32>::new());
}

#[test]
fn service_can_declare_the_day_solved() {
    let mut session = Session::in_memory(campaign());
    let mut agent = companion().with_responder(Box::new(Scripted {
        solved: true,
        seen: Rc::default(),
    }));

    let reply = agent.handle(&mut session, "the ink says eighty-eight twenty-one");
    assert_eq!(reply, "Nice work, kid.");
    assert!(session.store().is_completed(1));
    assert!(session.store().is_unlocked(2));
}

#[test]
fn service_hears_about_the_case_so_far() {
    let mut store = ProgressStore::new(campaign());
    store.complete_day(1).unwrap();
    store.set_current_day(2);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut agent = companion().with_responder(Box::new(Scripted {
        solved: false,
        seen: Rc::clone(&seen),
    }));
    agent.handle(&mut store, "what now");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "what now");
    assert_eq!(seen[0].current_day, 2);
    assert_eq!(seen[0].inventory, vec!["Code: 88-21".to_string()]);
    assert_eq!(seen[0].completed_days, vec![1]);
    assert!(!store.is_completed(2));
}

#[test]
fn status_reports_the_day_count() {
    let mut store = ProgressStore::new(campaign());
    store.complete_day(1).unwrap();
    let mut agent = companion();
    let reply = agent.handle(&mut store, "status?");
    assert!(reply.contains("Day 1 of 3"));
    assert!(reply.contains("1 days closed"));
}

#[test]
fn status_line_comes_from_the_rules_file() {
    let config: CompanionConfig = toml::from_str(
        r#"
        [lines]
        status = "Day {day}/{total}, {solved} down."
        wrong_answer = "Nope."
        "#,
    )
    .unwrap();
    let mut store = ProgressStore::new(campaign());
    let mut agent = Companion::new(config);
    assert_eq!(agent.handle(&mut store, "status"), "Day 1/3, 0 down.");
    assert_eq!(agent.handle(&mut store, "answer: 0000"), "Nope.");
    assert_eq!(agent.lines().wrong_answer, "Nope.");
}

#[test]
fn transcript_records_both_sides() {
    let mut store = ProgressStore::new(campaign());
    let mut agent = companion();
    agent.handle(&mut store, "hello");
    let transcript = agent.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].speaker, Speaker::Inspector);
    assert_eq!(transcript[0].text, "hello");
    assert_eq!(transcript[1].speaker, Speaker::AgentK);

    agent.clear();
    assert!(agent.transcript().is_empty());
}
