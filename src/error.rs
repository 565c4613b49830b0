use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading or validating campaign content.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid campaign path pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("campaign has no days")]
    Empty,
    #[error("day {0} is defined more than once")]
    Duplicate(u32),
    #[error("day {expected} is missing (next authored day is {found})")]
    Gap { expected: u32, found: u32 },
    #[error("day {0} has no hints")]
    NoHints(u32),
    #[error("day {day} declares act {act}, expected 1..=3")]
    BadAct { day: u32, act: u8 },
}

/// Programmer errors at the progress store boundary.
///
/// Reachable player input never produces one of these; they mean a caller
/// referenced a day that is not in the campaign table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("day {0} is not part of the campaign")]
    UnknownDay(u32),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode save data: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("could not decode save data: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("could not replace save file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
