//! # API Facade
//!
//! A thin layer over `commands/*.rs` and the single entry point for UI
//! clients. It turns loose user input (timeframe strings, optional paths)
//! into the typed values commands take, and builds the activity sources:
//! one repository for an explicit path, or every repository found under the
//! configured project directories.
//!
//! Nothing here prints or formats; every method returns `Result<CmdResult>`.

use crate::activity::GitRepository;
use crate::commands;
use crate::config::DaylogConfig;
use crate::error::Result;
use crate::timeframe::parse_timeframe;
use chrono::Local;
use std::path::{Path, PathBuf};

/// What `log` should record, as given by the user.
#[derive(Debug, Clone)]
pub struct LogRequest {
    /// Log only the repository containing this path.
    pub path: Option<PathBuf>,
    pub timeframe: String,
    pub git_summary: bool,
    pub project: Option<String>,
    pub create_note: bool,
}

impl Default for LogRequest {
    fn default() -> Self {
        Self {
            path: None,
            timeframe: "1h".to_string(),
            git_summary: false,
            project: None,
            create_note: false,
        }
    }
}

pub struct DaylogApi {
    config_dir: PathBuf,
    config: DaylogConfig,
}

impl DaylogApi {
    /// Loads the configuration stored in `config_dir`.
    pub fn new(config_dir: PathBuf) -> Result<Self> {
        let config = DaylogConfig::load(&config_dir)?;
        Ok(Self { config_dir, config })
    }

    pub fn with_config(config_dir: PathBuf, config: DaylogConfig) -> Self {
        Self { config_dir, config }
    }

    pub fn log(&self, request: &LogRequest) -> Result<commands::CmdResult> {
        let now = Local::now();
        let options = commands::log::LogOptions {
            since: parse_timeframe(&request.timeframe, now)?,
            now,
            git_summary: request.git_summary,
            project: request.project.clone(),
            create_note: request.create_note,
        };

        let skip_merges = self.config.git.ignore_merge_commits;
        let repos: Vec<GitRepository> = match &request.path {
            Some(path) => vec![GitRepository::find(path)?],
            None => GitRepository::discover(&self.config.project_directories()),
        }
        .into_iter()
        .map(|repo| repo.with_skip_merges(skip_merges))
        .collect();

        commands::log::run(&self.config, &repos, &options)
    }

    pub fn detect(&self) -> Result<commands::CmdResult> {
        commands::detect::run(&self.config)
    }

    pub fn init(&self, options: InitOptions) -> Result<commands::CmdResult> {
        commands::init::run(&self.config_dir, options)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings(&self) -> &DaylogConfig {
        &self.config
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::init::InitOptions;
pub use commands::{CmdMessage, CmdResult, Detection, LoggedEntry, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DaylogError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_log_rejects_bad_timeframe() {
        let temp = TempDir::new().unwrap();
        let api = DaylogApi::with_config(temp.path().to_path_buf(), DaylogConfig::default());
        let request = LogRequest {
            timeframe: "soon".to_string(),
            ..Default::default()
        };
        assert!(matches!(api.log(&request), Err(DaylogError::Timeframe(_))));
    }

    #[test]
    fn test_log_path_outside_repository() {
        let temp = TempDir::new().unwrap();
        let api = DaylogApi::with_config(temp.path().to_path_buf(), DaylogConfig::default());
        let request = LogRequest {
            path: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        // a temp dir nested inside some checkout would be found as a repository
        match api.log(&request) {
            Err(DaylogError::NotARepository(_)) | Err(DaylogError::VaultNotConfigured) => {}
            other => panic!("unexpected result: {:?}", other.map(|r| r.logged)),
        }
    }

    #[test]
    fn test_log_requires_configured_vault() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let api = DaylogApi::with_config(temp.path().to_path_buf(), DaylogConfig::default());
        let request = LogRequest {
            path: Some(repo),
            ..Default::default()
        };
        assert!(matches!(
            api.log(&request),
            Err(DaylogError::VaultNotConfigured)
        ));
    }

    #[test]
    fn test_log_with_no_discovered_repositories() {
        let temp = TempDir::new().unwrap();
        let mut config = DaylogConfig::default();
        config.projects.directories = vec![temp.path().join("empty")];
        let api = DaylogApi::with_config(temp.path().to_path_buf(), config);
        assert!(matches!(
            api.log(&LogRequest::default()),
            Err(DaylogError::NoRepositories)
        ));
    }

    #[test]
    fn test_new_reads_saved_config() {
        let temp = TempDir::new().unwrap();
        let mut config = DaylogConfig::default();
        config.git.max_commits = 2;
        config.save(temp.path()).unwrap();

        let api = DaylogApi::new(temp.path().to_path_buf()).unwrap();
        assert_eq!(api.settings().git.max_commits, 2);
        assert_eq!(api.config_dir(), temp.path());
    }

    #[test]
    fn test_detect_dispatches() {
        let temp = TempDir::new().unwrap();
        let daily = temp.path().join("Daily Notes");
        fs::create_dir_all(&daily).unwrap();
        fs::write(daily.join("2025-07-19.md"), "").unwrap();
        let mut config = DaylogConfig::default();
        config.vault.path = Some(temp.path().to_path_buf());

        let api = DaylogApi::with_config(temp.path().to_path_buf(), config);
        let result = api.detect().unwrap();
        assert!(result.detection.is_some());
    }
}
