use log::debug;

use crate::campaign::{Day, PuzzleKind};
use crate::progress::{DayStatus, ProgressActions};

/// What the puzzle panel mounts for a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleWidget {
    /// Free-text answer box.
    AnswerEntry { prompt: &'static str },
    /// Fixed-length numeric lock that clears itself on a wrong code.
    CodeEntry { digits: usize },
    /// No typed answer; the player confirms the interaction.
    Interaction { prompt: &'static str },
    /// No content authored for this day.
    Unavailable,
}

/// The single signal a widget sends when the player finishes an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleOutcome {
    Answer(String),
    Interaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Solved,
    Rejected,
    /// The day is already solved, locked, or missing; input is dropped.
    Ignored,
}

fn prompt_for(kind: PuzzleKind) -> &'static str {
    match kind {
        PuzzleKind::VisualSearch => "Name what you found in the scene.",
        PuzzleKind::ScratchReveal => "Scratch away the frost. What's underneath?",
        PuzzleKind::UvLight => "Light it up (F2). Read off what glows.",
        PuzzleKind::RadioTuning => "Dial in the frequency.",
        PuzzleKind::Assembly => "Piece it together. Where does it point?",
        PuzzleKind::Code => "Enter the combination.",
        PuzzleKind::Cipher => "Decode the message.",
        PuzzleKind::FingerprintMatch => "Match the print.",
        PuzzleKind::AudioAnalysis => "Play it back. What do you hear?",
        PuzzleKind::NarrativeOnly => "Read the file, then press Enter.",
        PuzzleKind::MetaRealWorld => "Go find it. Report what you found.",
        PuzzleKind::Scanner => "Get past the scanner.",
        PuzzleKind::Maze => "Trace a clean path through the alarms.",
        PuzzleKind::Flashlight => "Sweep the dark (F3). What do you see?",
        PuzzleKind::Decrypt => "Guess the password.",
        PuzzleKind::ColorMix => "Match the exact shade.",
        PuzzleKind::SuspectElimination => "Name the one who fits all the evidence.",
        PuzzleKind::GpsPursuit => "Call the roadblock.",
        PuzzleKind::AimDisarm => "Steady. Take the shot at the weapon.",
        PuzzleKind::DialogueBranch => "Make him talk.",
        PuzzleKind::Repair => "Put it back together.",
        PuzzleKind::FinalSynthesis => "Use everything you collected.",
        PuzzleKind::Ending => "Press Enter to close the case.",
    }
}

/// Picks the widget for `day`. Days without a solution are interaction
/// puzzles whatever their mechanic; code locks with a numeric solution get
/// a fixed-width keypad.
pub fn widget_for(day: Option<&Day>) -> PuzzleWidget {
    let Some(day) = day else {
        return PuzzleWidget::Unavailable;
    };
    let prompt = prompt_for(day.kind());
    match (day.kind(), day.solution()) {
        (_, None) => PuzzleWidget::Interaction { prompt },
        (PuzzleKind::Code, Some(code)) if code.chars().all(|c| c.is_ascii_digit()) => {
            PuzzleWidget::CodeEntry { digits: code.len() }
        }
        (_, Some(_)) => PuzzleWidget::AnswerEntry { prompt },
    }
}

/// Routes a widget outcome into the progress store.
pub fn resolve<P: ProgressActions>(progress: &mut P, day: u32, outcome: PuzzleOutcome) -> Resolution {
    let store = progress.progress();
    let Some(record) = store.campaign().get_day(day) else {
        debug!("outcome for missing day {day} dropped");
        return Resolution::Ignored;
    };
    if store.day_status(day) != DayStatus::Active {
        debug!("outcome for day {day} dropped; day is not active");
        return Resolution::Ignored;
    }
    let needs_answer = record.solution().is_some();

    match outcome {
        PuzzleOutcome::Answer(answer) => {
            if progress.validate_answer(day, &answer) {
                Resolution::Solved
            } else {
                Resolution::Rejected
            }
        }
        PuzzleOutcome::Interaction if needs_answer => Resolution::Rejected,
        PuzzleOutcome::Interaction => match progress.complete_day(day) {
            Ok(()) => Resolution::Solved,
            Err(_) => Resolution::Ignored,
        },
    }
}
