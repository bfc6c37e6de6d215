//! `palette` subcommand: list known color names and effects.

use super::{Color, Effect, PaletteOutput, Result, extract};

pub(super) fn cmd_palette(json: bool) -> Result<()> {
    let colors: Vec<Color> = extract::COLOR_TABLE
        .iter()
        .map(|&(name, rgb)| Color::named(name, rgb))
        .collect();
    let effects: Vec<Effect> = extract::EffectId::ALL
        .into_iter()
        .map(Effect::from)
        .collect();

    if json {
        let output = PaletteOutput { colors, effects };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Colors:");
    for c in &colors {
        let rgb = c.rgb();
        println!(
            "  {:<12}{}  ({}, {}, {})",
            c.name(),
            c.hex(),
            rgb.0,
            rgb.1,
            rgb.2
        );
    }
    println!();

    println!("Effects (underscore or space between words):");
    for category in [
        extract::EffectCategory::Transition,
        extract::EffectCategory::Buffer,
    ] {
        let ids: Vec<&str> = effects
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.id.as_str())
            .collect();
        println!("  {:<12}{}", category.to_string(), ids.join(", "));
    }
    Ok(())
}
