pub mod loader;
pub mod table;
pub mod types;

pub use loader::{load_campaign, load_day};
pub use table::{normalize_answer, Campaign};
pub use types::{act_title, Day, Locale, PuzzleKind};
