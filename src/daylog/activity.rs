//! # Activity Sources
//!
//! Logging needs, per project, the commits made since some instant and the
//! files they touched. [`ActivitySource`] is that seam: [`GitRepository`]
//! answers it by running `git`, and tests answer it with fixed data.
//!
//! Commit listings use `git log` with a unit-separator (`%x1f`) delimited
//! format so that commit subjects containing `|` or other punctuation
//! parse cleanly.

use crate::error::{DaylogError, Result};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use walkdir::WalkDir;

const FIELD_SEPARATOR: char = '\x1f';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
}

/// Where a project's recent activity comes from.
pub trait ActivitySource {
    /// Project name, used as the entry title unless overridden.
    fn name(&self) -> &str;

    /// Commits since `since`, newest first, at most `max`.
    fn commits(&self, since: DateTime<Local>, max: usize) -> Result<Vec<Commit>>;

    /// Paths changed since `since`, without duplicates.
    fn changed_files(&self, since: DateTime<Local>) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
    name: String,
    branch: Option<String>,
    skip_merges: bool,
}

impl GitRepository {
    /// The repository containing `start`, found by walking up to a `.git` entry.
    pub fn find(start: &Path) -> Result<Self> {
        let start = if start.is_absolute() {
            start.to_path_buf()
        } else {
            std::env::current_dir()?.join(start)
        };

        let mut current = start.as_path();
        loop {
            if current.join(".git").exists() {
                return Ok(Self::at(current));
            }
            match current.parent() {
                Some(parent) if parent != current => current = parent,
                _ => return Err(DaylogError::NotARepository(start)),
            }
        }
    }

    /// Every repository under `dirs`. Unreadable paths are skipped.
    pub fn discover(dirs: &[PathBuf]) -> Vec<Self> {
        let mut repos = Vec::new();
        for dir in dirs {
            let mut walker = WalkDir::new(dir).into_iter();
            while let Some(entry) = walker.next() {
                let Ok(entry) = entry else { continue };
                if entry.file_type().is_dir() && entry.file_name() == ".git" {
                    if let Some(repo_root) = entry.path().parent() {
                        repos.push(Self::at(repo_root));
                    }
                    walker.skip_current_dir();
                }
            }
        }
        debug!(count = repos.len(), "discovered repositories");
        repos
    }

    fn at(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut repo = Self {
            path: path.to_path_buf(),
            name,
            branch: None,
            skip_merges: true,
        };
        repo.branch = repo
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .ok()
            .map(|s| s.trim().to_string());
        repo
    }

    pub fn with_skip_merges(mut self, skip: bool) -> Self {
        self.skip_merges = skip;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        debug!(repo = %self.path.display(), ?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .map_err(|e| DaylogError::Git(format!("could not run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DaylogError::Git(format!(
                "git {} failed in {}: {}",
                args.first().unwrap_or(&""),
                self.path.display(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn since_arg(since: DateTime<Local>) -> String {
    format!("--since={}", since.to_rfc3339_opts(SecondsFormat::Secs, false))
}

impl ActivitySource for GitRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn commits(&self, since: DateTime<Local>, max: usize) -> Result<Vec<Commit>> {
        let since = since_arg(since);
        let max_count = format!("--max-count={}", max);
        let mut args = vec![
            "log",
            since.as_str(),
            max_count.as_str(),
            "--pretty=format:%H%x1f%s%x1f%an%x1f%aI",
        ];
        if self.skip_merges {
            args.push("--no-merges");
        }
        let output = self.git(&args)?;
        Ok(parse_log(&output))
    }

    fn changed_files(&self, since: DateTime<Local>) -> Result<Vec<String>> {
        let since = since_arg(since);
        let output = self.git(&["log", "--name-only", "--pretty=format:", since.as_str()])?;
        Ok(unique_lines(&output))
    }
}

/// Parses `git log` output in the `%H %s %an %aI` unit-separated format.
///
/// Lines without four fields or with an unparseable date are dropped.
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(FIELD_SEPARATOR);
            let id = fields.next()?;
            let message = fields.next()?;
            let author = fields.next()?;
            let timestamp = DateTime::parse_from_rfc3339(fields.next()?.trim()).ok()?;
            if fields.next().is_some() {
                return None;
            }
            Some(Commit {
                id: id.to_string(),
                message: message.to_string(),
                author: author.to_string(),
                timestamp,
            })
        })
        .collect()
}

fn unique_lines(output: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}
