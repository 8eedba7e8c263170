use crate::commands::{CmdMessage, CmdResult, Detection};
use crate::config::DaylogConfig;
use crate::error::{DaylogError, Result};
use crate::format::{infer_format, tally};
use crate::vault::Vault;

/// Reports which date format the existing daily notes use and the votes behind it.
pub fn run(config: &DaylogConfig) -> Result<CmdResult> {
    let vault = Vault::new(
        config.vault_path()?,
        config.vault.daily_notes_dir.clone(),
        config.vault.date_format,
    );
    if !vault.exists() {
        return Err(DaylogError::VaultMissing(vault.root().to_path_buf()));
    }

    let stems = vault.sample_stems()?;
    let votes = tally(&stems, config.vault.ambiguous_order);
    let detected = infer_format(&stems, config.vault.ambiguous_order).ok();

    let mut result = CmdResult::default();
    match detected {
        Some(format) if format == config.vault.date_format => {
            result.add_message(CmdMessage::success(format!(
                "Daily notes use {} (matches config)",
                format
            )));
        }
        Some(format) => {
            result.add_message(CmdMessage::warning(format!(
                "Daily notes use {} but config says {} (set it with `daylog config vault.date_format \"{}\"`)",
                format, config.vault.date_format, format
            )));
        }
        None => {
            result.add_message(CmdMessage::warning(format!(
                "No note names matched a known date format; {} will be used",
                config.vault.date_format
            )));
        }
    }

    Ok(result.with_detection(Detection {
        directory: vault.daily_notes_path(),
        sampled: stems.len(),
        votes,
        detected,
        configured: config.vault.date_format,
    }))
}
