use crate::commands::{CmdMessage, CmdResult};
use crate::config::DaylogConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = DaylogConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = DaylogConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = DaylogConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn test_show_all_defaults() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(DaylogConfig::default()));
    }

    #[test]
    fn test_set_then_show_key() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("git.max_commits".to_string(), "4".to_string()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "git.max_commits set to 4");

        let result = run(temp.path(), ConfigAction::ShowKey("git.max_commits".to_string())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(result.messages[0].content, "4");
    }

    #[test]
    fn test_set_normalizes_value() {
        let temp = TempDir::new().unwrap();
        let result = run(
            temp.path(),
            ConfigAction::Set("formatting.add_tags".to_string(), "rust,cli".to_string()),
        )
        .unwrap();
        assert_eq!(
            result.messages[0].content,
            "formatting.add_tags set to #rust,#cli"
        );
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let result = run(temp.path(), ConfigAction::ShowKey("nope".to_string())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(
            temp.path(),
            ConfigAction::Set("nope".to_string(), "x".to_string()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!DaylogConfig::path_in(temp.path()).exists());
    }
}
