use crate::format::NoMatch;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaylogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    NoDateFormat(#[from] NoMatch),

    #[error("Daily notes directory not found: {}", .0.display())]
    DailyNotesDirMissing(PathBuf),

    #[error("No daily note files found in {}", .0.display())]
    NoDailyNotes(PathBuf),

    #[error("Vault not found at: {}", .0.display())]
    VaultMissing(PathBuf),

    #[error("No vault configured (run `daylog init --vault <path>`)")]
    VaultNotConfigured,

    #[error("Daily note does not exist for {0} (use --create-note to create it)")]
    NoteMissing(String),

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Invalid timeframe: {0}")]
    Timeframe(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("No git repositories found")]
    NoRepositories,

    #[error("No repositories had activity to log")]
    NothingLogged,

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DaylogError>;
