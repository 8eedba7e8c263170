use crate::commands::{CmdMessage, CmdResult};
use crate::config::{expand_home, DaylogConfig};
use crate::error::{DaylogError, Result};
use crate::format::DateFormat;
use crate::vault::Vault;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub vault: PathBuf,
    pub projects: Vec<PathBuf>,
    pub daily_notes_dir: Option<String>,
    /// Forces a format instead of detecting it from existing notes.
    pub date_format: Option<DateFormat>,
}

/// Points daylog at a vault and saves the resulting configuration.
///
/// Values not given keep whatever the existing config file holds.
pub fn run(config_dir: &Path, options: InitOptions) -> Result<CmdResult> {
    let mut config = DaylogConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    let vault_path = expand_home(&options.vault);
    if !vault_path.is_dir() {
        return Err(DaylogError::VaultMissing(vault_path));
    }
    config.vault.path = Some(vault_path.clone());

    if let Some(dir) = options.daily_notes_dir {
        config.vault.daily_notes_dir = dir;
    }
    if !options.projects.is_empty() {
        config.projects.directories = options.projects.iter().map(|p| expand_home(p)).collect();
    }

    match options.date_format {
        Some(format) => config.vault.date_format = format,
        None => {
            let vault = Vault::new(
                vault_path,
                config.vault.daily_notes_dir.clone(),
                config.vault.date_format,
            );
            match vault.detect_format(config.vault.ambiguous_order) {
                Ok(format) => {
                    result.add_message(CmdMessage::info(format!(
                        "Detected date format {} from existing notes",
                        format
                    )));
                    config.vault.date_format = format;
                }
                Err(e) => {
                    debug!(error = %e, "date format detection failed during init");
                    result.add_message(CmdMessage::warning(format!(
                        "Could not detect date format ({}); using {}",
                        e, config.vault.date_format
                    )));
                }
            }
        }
    }

    config.save(config_dir)?;
    result.add_message(CmdMessage::success(format!(
        "Configuration saved to {}",
        DaylogConfig::path_in(config_dir).display()
    )));
    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        config_dir: PathBuf,
        vault: PathBuf,
    }

    fn fixture(notes: &[&str]) -> Fixture {
        let temp = TempDir::new().unwrap();
        let vault = temp.path().join("vault");
        let daily = vault.join("Daily Notes");
        fs::create_dir_all(&daily).unwrap();
        for note in notes {
            fs::write(daily.join(note), "").unwrap();
        }
        Fixture {
            config_dir: temp.path().join("config"),
            vault,
            _temp: temp,
        }
    }

    #[test]
    fn test_init_detects_format_and_saves() {
        let fx = fixture(&["July 18, 2025.md", "July 19, 2025.md"]);
        let result = run(
            &fx.config_dir,
            InitOptions {
                vault: fx.vault.clone(),
                projects: vec![PathBuf::from("/src")],
                ..Default::default()
            },
        )
        .unwrap();

        let saved = DaylogConfig::load(&fx.config_dir).unwrap();
        assert_eq!(Some(saved.clone()), result.config);
        assert_eq!(saved.vault.path, Some(fx.vault.clone()));
        assert_eq!(saved.vault.date_format, DateFormat::MonthNameDayYear);
        assert_eq!(saved.projects.directories, vec![PathBuf::from("/src")]);
        assert!(result
            .messages
            .iter()
            .all(|m| m.level != MessageLevel::Warning));
    }

    #[test]
    fn test_init_falls_back_with_warning() {
        let fx = fixture(&[]);
        let result = run(
            &fx.config_dir,
            InitOptions {
                vault: fx.vault.clone(),
                ..Default::default()
            },
        )
        .unwrap();

        let saved = DaylogConfig::load(&fx.config_dir).unwrap();
        assert_eq!(saved.vault.date_format, DateFormat::IsoDashWeekday);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    #[test]
    fn test_explicit_format_skips_detection() {
        let fx = fixture(&["2025-07-19.md"]);
        run(
            &fx.config_dir,
            InitOptions {
                vault: fx.vault.clone(),
                date_format: Some(DateFormat::IsoSlashed),
                daily_notes_dir: Some("Journal".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let saved = DaylogConfig::load(&fx.config_dir).unwrap();
        assert_eq!(saved.vault.date_format, DateFormat::IsoSlashed);
        assert_eq!(saved.vault.daily_notes_dir, "Journal");
    }

    #[test]
    fn test_init_keeps_unrelated_settings() {
        let fx = fixture(&["2025-07-19.md"]);
        let mut existing = DaylogConfig::default();
        existing.git.max_commits = 3;
        existing.save(&fx.config_dir).unwrap();

        run(
            &fx.config_dir,
            InitOptions {
                vault: fx.vault.clone(),
                ..Default::default()
            },
        )
        .unwrap();

        let saved = DaylogConfig::load(&fx.config_dir).unwrap();
        assert_eq!(saved.git.max_commits, 3);
        assert_eq!(saved.vault.date_format, DateFormat::Iso);
    }

    #[test]
    fn test_missing_vault_is_rejected() {
        let fx = fixture(&[]);
        let err = run(
            &fx.config_dir,
            InitOptions {
                vault: fx.vault.join("nope"),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DaylogError::VaultMissing(_)));
        assert!(!DaylogConfig::path_in(&fx.config_dir).exists());
    }
}
