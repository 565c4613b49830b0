//! Red Protocol: a 24-day noir investigation played in the terminal.
//!
//! The progression core (campaign table, progress store, hint cursors and
//! the puzzle adapter) is independent of the terminal front end in [`app`]
//! and [`ui`].

pub mod app;
pub mod campaign;
pub mod companion;
pub mod config;
pub mod error;
pub mod progress;
pub mod puzzle;
pub mod save;
pub mod session;
pub mod ui;

pub use campaign::{load_campaign, Campaign, Day, Locale, PuzzleKind};
pub use error::{CampaignError, ConfigError, ProgressError, SaveError};
pub use progress::{DayStatus, ProgressActions, ProgressEvent, ProgressStore, Tool};
pub use session::Session;
