use clap::{Parser, Subcommand};
use daylog::format::DateFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daylog", bin_name = "daylog", version)]
#[command(about = "Log project activity to your daily notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log recent commits to today's daily note
    ///
    /// With a path, logs the repository containing it. Without one, logs every
    /// repository under the configured project directories.
    Log {
        /// Path inside the repository to log
        path: Option<PathBuf>,

        /// Include changed files and the areas they touch
        #[arg(short = 'g', long)]
        git_summary: bool,

        /// How far back to look: 1h, 30m, 2h30m, today, yesterday
        #[arg(short, long, default_value = "1h")]
        timeframe: String,

        /// Entry title to use instead of the repository name
        #[arg(short, long)]
        project: Option<String>,

        /// Create today's note if it does not exist
        #[arg(short, long)]
        create_note: bool,
    },

    /// Point daylog at a vault and save the configuration
    Init {
        /// Vault root directory
        #[arg(long)]
        vault: PathBuf,

        /// Directories to search for repositories (comma separated)
        #[arg(long, value_delimiter = ',')]
        projects: Vec<PathBuf>,

        /// Daily notes folder, relative to the vault
        #[arg(long)]
        daily_notes_dir: Option<String>,

        /// Date format for note names; detected from existing notes when omitted
        #[arg(long)]
        date_format: Option<DateFormat>,
    },

    /// Show which date format the existing daily notes use
    Detect {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration values
    Config {
        /// Dotted key, e.g. vault.date_format
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}
