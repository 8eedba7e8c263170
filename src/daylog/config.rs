use crate::error::{DaylogError, Result};
use crate::format::{DateFormat, DayMonthOrder};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.yaml";
pub const CONFIG_DIR_ENV: &str = "DAYLOG_CONFIG_DIR";

/// Every dotted key `get`/`set` understand, in display order.
pub const KEYS: &[&str] = &[
    "vault.path",
    "vault.daily_notes_dir",
    "vault.date_format",
    "vault.ambiguous_order",
    "projects.directories",
    "git.max_commits",
    "git.ignore_merge_commits",
    "formatting.section_title",
    "formatting.add_tags",
];

/// Configuration for daylog, stored in config.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaylogConfig {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub projects: ProjectsConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub formatting: FormattingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VaultConfig {
    pub path: Option<PathBuf>,
    pub daily_notes_dir: String,
    pub date_format: DateFormat,
    /// Reading used when day/month order cannot be told from the notes.
    pub ambiguous_order: DayMonthOrder,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: None,
            daily_notes_dir: "Daily Notes".to_string(),
            date_format: DateFormat::IsoDashWeekday,
            ambiguous_order: DayMonthOrder::MonthFirst,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Directories searched for repositories when `log` gets no path.
    pub directories: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    pub max_commits: usize,
    pub ignore_merge_commits: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            max_commits: 10,
            ignore_merge_commits: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormattingConfig {
    pub section_title: String,
    pub add_tags: Vec<String>,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            section_title: "Projects".to_string(),
            add_tags: vec!["#programming".to_string()],
        }
    }
}

/// Directory holding config.yaml: `$DAYLOG_CONFIG_DIR`, else the platform config dir.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "daylog", "daylog")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DaylogError::Config("could not determine config directory".to_string()))
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

fn join_list<T: AsRef<str>>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DaylogError::Config(format!(
            "{} expects true or false, got '{}'",
            key, value
        ))),
    }
}

impl DaylogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_yaml::to_string(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn path_in<P: AsRef<Path>>(config_dir: P) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILENAME)
    }

    /// Value of a dotted key as shown to the user. Lists are comma-joined.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "vault.path" => self
                .vault
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "vault.daily_notes_dir" => self.vault.daily_notes_dir.clone(),
            "vault.date_format" => self.vault.date_format.to_string(),
            "vault.ambiguous_order" => self.vault.ambiguous_order.to_string(),
            "projects.directories" => {
                let dirs: Vec<String> = self
                    .projects
                    .directories
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect();
                join_list(&dirs)
            }
            "git.max_commits" => self.git.max_commits.to_string(),
            "git.ignore_merge_commits" => self.git.ignore_merge_commits.to_string(),
            "formatting.section_title" => self.formatting.section_title.clone(),
            "formatting.add_tags" => join_list(&self.formatting.add_tags),
            _ => return None,
        };
        Some(value)
    }

    /// Sets a dotted key from its string form. Lists take comma-separated values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "vault.path" => {
                self.vault.path = (!value.is_empty()).then(|| expand_home(Path::new(value)));
            }
            "vault.daily_notes_dir" => self.vault.daily_notes_dir = value.to_string(),
            "vault.date_format" => self.vault.date_format = value.parse()?,
            "vault.ambiguous_order" => self.vault.ambiguous_order = value.parse()?,
            "projects.directories" => {
                self.projects.directories = split_list(value)
                    .iter()
                    .map(|d| expand_home(Path::new(d)))
                    .collect();
            }
            "git.max_commits" => {
                self.git.max_commits = value.parse().map_err(|_| {
                    DaylogError::Config(format!("{} expects a number, got '{}'", key, value))
                })?;
            }
            "git.ignore_merge_commits" => self.git.ignore_merge_commits = parse_bool(key, value)?,
            "formatting.section_title" => {
                if value.trim().is_empty() {
                    return Err(DaylogError::Config(format!("{} cannot be empty", key)));
                }
                self.formatting.section_title = value.to_string();
            }
            "formatting.add_tags" => {
                self.formatting.add_tags = split_list(value)
                    .into_iter()
                    .map(|tag| {
                        if tag.starts_with('#') {
                            tag
                        } else {
                            format!("#{}", tag)
                        }
                    })
                    .collect();
            }
            _ => return Err(DaylogError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Configured vault root, with `~` expanded.
    pub fn vault_path(&self) -> Result<PathBuf> {
        self.vault
            .path
            .as_deref()
            .map(expand_home)
            .ok_or(DaylogError::VaultNotConfigured)
    }

    /// Directories to discover repositories in; `~/projects` when none are set.
    pub fn project_directories(&self) -> Vec<PathBuf> {
        if self.projects.directories.is_empty() {
            return vec![expand_home(Path::new("~/projects"))];
        }
        self.projects
            .directories
            .iter()
            .map(|d| expand_home(d))
            .collect()
    }
}
