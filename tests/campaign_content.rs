use std::path::{Path, PathBuf};
use std::sync::Arc;

use red_protocol::campaign::{act_title, load_day};
use red_protocol::progress::ProgressStore;
use red_protocol::puzzle::{widget_for, PuzzleWidget};
use red_protocol::{load_campaign, Campaign, CampaignError, Locale, PuzzleKind};

fn shipped_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("campaign")
}

fn shipped() -> Campaign {
    load_campaign(&shipped_dir()).unwrap()
}

#[test]
fn shipped_campaign_has_twenty_four_days() {
    let campaign = shipped();
    assert_eq!(campaign.len(), 24);
    let numbers: Vec<u32> = campaign.iter().map(|d| d.number()).collect();
    assert_eq!(numbers, (1..=24).collect::<Vec<_>>());
    for day in campaign.iter() {
        assert!(!day.hints().is_empty(), "day {} has no hints", day.number());
        assert!(!day.narrative(Locale::En).is_empty());
    }
}

#[test]
fn acts_split_eight_days_each() {
    let campaign = shipped();
    for act in 1..=3 {
        assert_eq!(campaign.days_in_act(act).count(), 8, "{}", act_title(act));
    }
}

#[test]
fn every_day_mounts_a_widget() {
    let campaign = shipped();
    for day in campaign.iter() {
        let widget = widget_for(Some(day));
        assert_ne!(widget, PuzzleWidget::Unavailable, "day {}", day.number());
    }
    assert_eq!(widget_for(campaign.get_day(25)), PuzzleWidget::Unavailable);
}

#[test]
fn interaction_days_have_no_typed_answer() {
    let campaign = shipped();
    for n in [7, 24] {
        let day = campaign.get_day(n).unwrap();
        assert_eq!(day.solution(), None);
        assert!(matches!(
            widget_for(Some(day)),
            PuzzleWidget::Interaction { .. }
        ));
    }
    assert_eq!(campaign.get_day(24).unwrap().kind(), PuzzleKind::Ending);
}

#[test]
fn black_box_is_a_five_digit_keypad() {
    let campaign = shipped();
    assert_eq!(
        widget_for(campaign.get_day(6)),
        PuzzleWidget::CodeEntry { digits: 5 }
    );
}

#[test]
fn solutions_are_stored_normalized() {
    let campaign = shipped();
    assert_eq!(campaign.get_day(3).unwrap().solution(), Some("8821"));
    assert!(campaign.is_solution(3, "8821"));
    assert!(campaign.is_solution(1, "BLUE_VIAL"));
}

#[test]
fn french_text_falls_back_to_english() {
    let campaign = shipped();
    let wreckage = campaign.get_day(1).unwrap();
    assert_eq!(wreckage.title(Locale::Fr), "L'Épave");
    assert_eq!(wreckage.title(Locale::En), "The Wreckage");

    let bare = red_protocol::Day::new(1, PuzzleKind::Code, Some("1"), &["h"], Some("Thing"));
    assert_eq!(bare.title(Locale::Fr), bare.title(Locale::En));
    assert_eq!(bare.reward_name(Locale::Fr), Some("Thing"));
}

#[test]
fn whole_campaign_can_be_played_through() {
    let campaign = Arc::new(shipped());
    let mut store = ProgressStore::new(Arc::clone(&campaign));
    for day in campaign.iter() {
        let n = day.number();
        let solved = match day.solution() {
            Some(answer) => store.validate_answer(n, answer),
            None => store.complete_day(n).is_ok(),
        };
        assert!(solved, "day {n}");
        assert!(store.is_completed(n));
    }
    assert!(store.is_campaign_complete());
    assert_eq!(store.inventory().len(), 24);
}

#[test]
fn campaign_with_a_gap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for n in [1, 3] {
        let source = shipped_dir().join(format!("day_{n:02}.toml"));
        std::fs::copy(&source, dir.path().join(format!("day_{n:02}.toml"))).unwrap();
    }
    match load_campaign(dir.path()) {
        Err(CampaignError::Gap { expected, found }) => assert_eq!((expected, found), (2, 3)),
        other => panic!("expected a gap error, got {other:?}"),
    }
}

#[test]
fn empty_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_campaign(dir.path()), Err(CampaignError::Empty)));
}

#[test]
fn malformed_day_names_its_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("day_01.toml");
    std::fs::write(&path, "[meta]\nday = \"one\"\n").unwrap();
    match load_day(&path) {
        Err(CampaignError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
