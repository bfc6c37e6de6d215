//! `mentions` subcommand: list recent mentions with HTML removed.

use std::path::Path;

use super::{Mention, MentionSource, MentionsOutput, Platforms, Result};

pub(super) fn cmd_mentions(
    platform: Option<&str>,
    limit: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path);
    let platforms = Platforms::from_config(&config);
    let source = super::select_source(&platforms, platform)?;

    let mentions: Vec<Mention> = source
        .latest_mentions(limit.unwrap_or(config.mention_limit))?
        .iter()
        .map(Mention::cleaned)
        .collect();
    print_mentions(source.name(), mentions, json)
}

fn print_mentions(platform: &str, mentions: Vec<Mention>, json: bool) -> Result<()> {
    if json {
        let output = MentionsOutput {
            platform: platform.to_string(),
            count: mentions.len(),
            mentions,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if mentions.is_empty() {
        println!("No mentions found on {platform}.");
        return Ok(());
    }

    println!(
        "{} mention{} on {platform}:",
        mentions.len(),
        if mentions.len() == 1 { "" } else { "s" }
    );
    println!();
    for (i, m) in mentions.iter().enumerate() {
        let account = if m.account.is_empty() { "?" } else { m.account.as_str() };
        println!("  [{}] @{account}  {}", i + 1, m.created_at);
        println!("      {}", m.text);
    }
    Ok(())
}
