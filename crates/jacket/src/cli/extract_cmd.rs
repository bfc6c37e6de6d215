//! `extract` subcommand: run the extraction engine on text.

use super::{LightingCommand, Result, effect_label, extract, kv, kv_width};

pub(super) fn cmd_extract(text: &str, json: bool) -> Result<()> {
    let command = extract::extract(text);
    print_command(&command, json)
}

fn print_command(command: &LightingCommand, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(command)?);
        return Ok(());
    }

    let w = kv_width(&["Color:", "RGB:", "Effect:"], &[]);
    let rgb = command.color.rgb();
    kv("Color:", &command.color, w);
    kv("RGB:", format_args!("{}, {}, {}", rgb.0, rgb.1, rgb.2), w);
    kv("Effect:", effect_label(command.effect.as_ref()), w);
    Ok(())
}
