pub mod adapter;

pub use adapter::{resolve, widget_for, PuzzleOutcome, PuzzleWidget, Resolution};
