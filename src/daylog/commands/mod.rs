use crate::config::DaylogConfig;
use crate::format::{DateFormat, Vote};
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod detect;
pub mod init;
pub mod log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One project entry written to a daily note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEntry {
    pub project: String,
    pub note: PathBuf,
    pub commits: usize,
    pub files: usize,
}

/// What `detect` found in the daily notes directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub directory: PathBuf,
    pub sampled: usize,
    pub votes: Vec<Vote>,
    /// `None` when no note name matched any known format.
    pub detected: Option<DateFormat>,
    pub configured: DateFormat,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub logged: Vec<LoggedEntry>,
    pub detection: Option<Detection>,
    pub config: Option<DaylogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_detection(mut self, detection: Detection) -> Self {
        self.detection = Some(detection);
        self
    }

    pub fn with_config(mut self, config: DaylogConfig) -> Self {
        self.config = Some(config);
        self
    }
}
