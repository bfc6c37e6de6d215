//! `config` subcommand: show current configuration and file path.

use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width};

pub(super) fn cmd_config(
    json: bool,
    write_default: bool,
    custom_path: Option<&Path>,
) -> Result<()> {
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);

    if write_default {
        let Some(path) = &config_path else {
            return Err(jacket_lib::JacketError::Config(
                "no config directory on this platform".into(),
            ));
        };
        if path.exists() {
            log::warn!("{} already exists, leaving it untouched", path.display());
        } else {
            Config::default().save_to(path)?;
            log::info!("wrote default config to {}", path.display());
        }
    }

    let config = super::load_config(custom_path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            problems,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &["mention_limit:", "selection:", "max_text_len:"],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("mention_limit:", config.mention_limit, w);
    kv_indent("selection:", config.selection, w);
    kv_indent("max_text_len:", config.max_text_len, w);
    println!();

    println!("Sources:");
    if config.sources.is_empty() {
        println!("  (none)");
    }
    for source in &config.sources {
        kv_indent(&format!("{}:", source.name), &source.path, w);
    }

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}
