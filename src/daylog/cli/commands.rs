use super::print::{print_config, print_detection, print_messages};
use super::setup::{Cli, Commands};
use clap::Parser;
use daylog::api::{ConfigAction, DaylogApi, InitOptions, LogRequest};
use daylog::config::{config_dir, DaylogConfig};
use daylog::error::Result;
use tracing_subscriber::EnvFilter;

/// Overrides the log filter, e.g. `DAYLOG_LOG=daylog=trace`.
const LOG_ENV: &str = "DAYLOG_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let api = DaylogApi::new(config_dir()?)?;

    match cli.command {
        Commands::Log {
            path,
            git_summary,
            timeframe,
            project,
            create_note,
        } => handle_log(
            &api,
            LogRequest {
                path,
                timeframe,
                git_summary,
                project,
                create_note,
            },
        ),
        Commands::Init {
            vault,
            projects,
            daily_notes_dir,
            date_format,
        } => handle_init(
            &api,
            InitOptions {
                vault,
                projects,
                daily_notes_dir,
                date_format,
            },
        ),
        Commands::Detect { json } => handle_detect(&api, json),
        Commands::Config { key, value } => handle_config(&api, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "daylog=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_log(api: &DaylogApi, request: LogRequest) -> Result<()> {
    let result = api.log(&request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(api: &DaylogApi, options: InitOptions) -> Result<()> {
    let result = api.init(options)?;
    print_messages(&result.messages);
    if let Some(config) = &result.config {
        print_config(config);
    }
    Ok(())
}

fn handle_detect(api: &DaylogApi, json: bool) -> Result<()> {
    let result = api.detect()?;
    match (&result.detection, json) {
        (Some(detection), true) => {
            println!("{}", serde_json::to_string_pretty(detection)?);
        }
        (Some(detection), false) => {
            print_detection(detection);
            print_messages(&result.messages);
        }
        (None, _) => print_messages(&result.messages),
    }
    Ok(())
}

fn handle_config(api: &DaylogApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if show_all {
        println!("# {}", DaylogConfig::path_in(api.config_dir()).display());
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
