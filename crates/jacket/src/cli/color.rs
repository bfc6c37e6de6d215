//! `color` subcommand: lighting command from a source's recent mentions.

use std::path::Path;

use super::{
    ColorOutput, MentionSource, Platforms, Resolution, Result, effect_label, kv, kv_indent,
    kv_width, mention,
};

pub(super) fn cmd_color(
    platform: Option<&str>,
    limit: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path);
    let platforms = Platforms::from_config(&config);
    let source = super::select_source(&platforms, platform)?;

    let mentions = source.latest_mentions(limit.unwrap_or(config.mention_limit))?;
    let resolution = mention::resolve_mentions(&mentions, config.selection, config.max_text_len);
    print_resolution(source.name(), resolution, json)
}

fn print_resolution(platform: &str, resolution: Resolution, json: bool) -> Result<()> {
    if json {
        let output = ColorOutput {
            platform: platform.to_string(),
            resolution,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let w = kv_width(
        &["Platform:", "Color:", "Effect:", "Checked:"],
        &["ID:", "Account:", "Created:", "Text:"],
    );
    let checked = resolution.mentions_checked;
    kv("Platform:", platform, w);
    kv("Color:", &resolution.command.color, w);
    kv("Effect:", effect_label(resolution.command.effect.as_ref()), w);
    kv(
        "Checked:",
        format_args!("{checked} mention{}", if checked == 1 { "" } else { "s" }),
        w,
    );
    println!();

    match &resolution.mention {
        Some(m) => {
            println!("Mention:");
            kv_indent("ID:", &m.id, w);
            kv_indent("Account:", &m.account, w);
            kv_indent("Created:", &m.created_at, w);
            kv_indent("Text:", &m.text, w);
        }
        None => println!("No mentions found, using default color."),
    }
    Ok(())
}
