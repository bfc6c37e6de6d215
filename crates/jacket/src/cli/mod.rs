//! CLI subcommands for text extraction and mention lookup.

mod color;
mod config_cmd;
mod extract_cmd;
mod mentions;
mod palette;
mod platforms;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use jacket_lib::config::Config;
pub(super) use jacket_lib::error::Result;
pub(super) use jacket_lib::extract::{self, Color, Effect, LightingCommand};
pub(super) use jacket_lib::mention::{self, Mention, Resolution};
pub(super) use jacket_lib::platform::{MentionSource, Platforms};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Human-readable effect, or "none".
pub(super) fn effect_label(effect: Option<&Effect>) -> String {
    match effect {
        Some(e) => e.to_string(),
        None => "none".to_string(),
    }
}

/// Load config from `custom_path` or the default location, logging problems.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let config = match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    };
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("{e}");
        }
    }
    config
}

/// Pick a source by name (or the active one), listing alternatives on failure.
pub(super) fn select_source<'a>(
    platforms: &'a Platforms,
    name: Option<&str>,
) -> Result<&'a dyn MentionSource> {
    match platforms.resolve(name) {
        Ok(source) => Ok(source),
        Err(e) => {
            if platforms.is_empty() {
                eprintln!("No mention sources initialized. Add [[sources]] to the config file.");
            } else {
                eprintln!("Available platforms: {}", platforms.names().join(", "));
            }
            Err(e.into())
        }
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ColorOutput {
    pub platform: String,
    #[serde(flatten)]
    pub resolution: Resolution,
}

#[derive(Serialize)]
pub(super) struct MentionsOutput {
    pub platform: String,
    pub count: usize,
    pub mentions: Vec<Mention>,
}

#[derive(Serialize)]
pub(super) struct PlatformsOutput {
    pub available: Vec<String>,
    pub active: Option<String>,
}

#[derive(Serialize)]
pub(super) struct PaletteOutput {
    pub colors: Vec<Color>,
    pub effects: Vec<Effect>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract a lighting command from text
    Extract {
        /// Mention text (several words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Resolve the lighting command from recent mentions
    Color {
        /// Mention source to query (default: the active one)
        #[arg(long)]
        platform: Option<String>,
        /// Number of mentions to check (default: mention_limit from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List recent mentions with HTML removed
    Mentions {
        /// Mention source to query (default: the active one)
        #[arg(long)]
        platform: Option<String>,
        /// Number of mentions to fetch (default: mention_limit from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List available mention sources and the active one
    Platforms,

    /// List known color names and effects
    Palette,

    /// Show current configuration and file path
    Config {
        /// Write a default config file if none exists yet
        #[arg(long)]
        write_default: bool,
    },
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Extract { text } => extract_cmd::cmd_extract(&text.join(" "), json),
        Command::Color { platform, limit } => {
            color::cmd_color(platform.as_deref(), limit, json, config_path)
        }
        Command::Mentions { platform, limit } => {
            mentions::cmd_mentions(platform.as_deref(), limit, json, config_path)
        }
        Command::Platforms => platforms::cmd_platforms(json, config_path),
        Command::Palette => palette::cmd_palette(json),
        Command::Config { write_default } => {
            config_cmd::cmd_config(json, write_default, config_path)
        }
    }
}
