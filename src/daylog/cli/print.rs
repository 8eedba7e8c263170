use colored::Colorize;
use daylog::api::{CmdMessage, Detection, MessageLevel};
use daylog::config::{DaylogConfig, KEYS};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_config(config: &DaylogConfig) {
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        if value.is_empty() {
            println!("{} = {}", key.bold(), "(unset)".dimmed());
        } else {
            println!("{} = {}", key.bold(), value);
        }
    }
}

pub(super) fn print_detection(detection: &Detection) {
    println!("Directory: {}", detection.directory.display());
    println!("Notes sampled: {}", detection.sampled);

    if !detection.votes.is_empty() {
        println!("Votes:");
        for vote in &detection.votes {
            let line = format!("  {:<18}{}", vote.format.token(), vote.count);
            if Some(vote.format) == detection.detected {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }

    match detection.detected {
        Some(format) => println!("Detected: {}", format.token().green()),
        None => println!("Detected: {}", "none".yellow()),
    }
    println!("Configured: {}", detection.configured.token());
}
