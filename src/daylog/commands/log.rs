use crate::activity::ActivitySource;
use crate::commands::{CmdMessage, CmdResult, LoggedEntry};
use crate::config::DaylogConfig;
use crate::error::{DaylogError, Result};
use crate::summary::format_entry_body;
use crate::timeframe::format_time_range;
use crate::vault::{read_document, write_document, Vault};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub since: DateTime<Local>,
    pub now: DateTime<Local>,
    /// Also list changed files and the areas they belong to.
    pub git_summary: bool,
    /// Entry title to use instead of each source's name.
    pub project: Option<String>,
    pub create_note: bool,
}

/// Writes one entry per active source into today's daily note.
///
/// A source that fails is reported and skipped. The note is located (or
/// created) only once some source has commits to log.
pub fn run<S: ActivitySource>(
    config: &DaylogConfig,
    sources: &[S],
    options: &LogOptions,
) -> Result<CmdResult> {
    if sources.is_empty() {
        return Err(DaylogError::NoRepositories);
    }

    let vault = Vault::new(
        config.vault_path()?,
        config.vault.daily_notes_dir.clone(),
        config.vault.date_format,
    );
    if !vault.exists() {
        return Err(DaylogError::VaultMissing(vault.root().to_path_buf()));
    }
    let vault = vault.with_detected_format(config.vault.ambiguous_order);

    let mut session = Session {
        vault: &vault,
        config,
        options,
        time_range: format_time_range(options.since, options.now),
        note: None,
        result: CmdResult::default(),
    };

    for source in sources {
        match session.log_source(source) {
            Ok(Some(entry)) => {
                let mut summary = format!("Logged activity for {} (commits: {}", entry.project, entry.commits);
                if entry.files > 0 {
                    summary.push_str(&format!(", files: {}", entry.files));
                }
                summary.push(')');
                session.result.add_message(CmdMessage::success(summary));
                session.result.logged.push(entry);
            }
            Ok(None) => {
                session.result.add_message(CmdMessage::info(format!(
                    "No commits in {} since {}",
                    source.name(),
                    options.since.format("%b %-d %-I:%M%p")
                )));
            }
            Err(e @ DaylogError::NoteMissing(_)) => return Err(e),
            Err(e) => {
                session.result.add_message(CmdMessage::error(format!(
                    "Error logging {}: {}",
                    source.name(),
                    e
                )));
            }
        }
    }

    let mut result = session.result;
    if result.logged.is_empty() {
        return Err(DaylogError::NothingLogged);
    }
    result.add_message(CmdMessage::info(format!(
        "Logged {} of {} repositories",
        result.logged.len(),
        sources.len()
    )));
    Ok(result)
}

struct Session<'a> {
    vault: &'a Vault,
    config: &'a DaylogConfig,
    options: &'a LogOptions,
    time_range: String,
    note: Option<PathBuf>,
    result: CmdResult,
}

impl Session<'_> {
    fn log_source<S: ActivitySource>(&mut self, source: &S) -> Result<Option<LoggedEntry>> {
        let commits = source.commits(self.options.since, self.config.git.max_commits)?;
        if commits.is_empty() {
            return Ok(None);
        }

        let files = if self.options.git_summary {
            source
                .changed_files(self.options.since)
                .unwrap_or_else(|e| {
                    self.result.add_message(CmdMessage::warning(format!(
                        "Could not get changed files for {}: {}",
                        source.name(),
                        e
                    )));
                    Vec::new()
                })
        } else {
            Vec::new()
        };

        let note = self.note()?;
        let project = self
            .options
            .project
            .clone()
            .unwrap_or_else(|| source.name().to_string());
        let body = format_entry_body(
            source.name(),
            &commits,
            &files,
            &self.time_range,
            &self.config.formatting.add_tags,
        );

        let doc = read_document(&note)?.merge_entry(
            &self.config.formatting.section_title,
            &project,
            &body,
        );
        write_document(&note, &doc)?;
        info!(%project, note = %note.display(), commits = commits.len(), "logged project entry");

        Ok(Some(LoggedEntry {
            project,
            note,
            commits: commits.len(),
            files: files.len(),
        }))
    }

    /// Today's note: an existing one in any format, else a new one if allowed.
    fn note(&mut self) -> Result<PathBuf> {
        if let Some(path) = &self.note {
            return Ok(path.clone());
        }

        let today = self.options.now.date_naive();
        let path = match self.vault.find_existing_note(today) {
            Some((path, format)) => {
                debug!(path = %path.display(), %format, "found daily note");
                path
            }
            None => {
                let label = today.format("%A, %B %-d, %Y").to_string();
                if !self.options.create_note {
                    return Err(DaylogError::NoteMissing(label));
                }
                let path = self.vault.create_daily_note(today)?;
                self.result
                    .add_message(CmdMessage::info(format!("Created new daily note for {}", label)));
                path
            }
        };

        self.note = Some(path.clone());
        Ok(path)
    }
}
