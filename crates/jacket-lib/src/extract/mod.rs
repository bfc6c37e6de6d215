//! Extraction engine: mention text in, lighting command out.
//!
//! Pure and allocation-light: the color and effect tables are static, and
//! every call is independent of every other.

mod color;
mod effect;
mod normalize;

pub use color::{
    COLOR_TABLE, CUSTOM_COLOR_NAME, Color, ColorSource, Rgb, default_color, lookup_color,
    resolve_color, resolve_color_with_source,
};
pub use effect::{
    EFFECT_TABLE, Effect, EffectCategory, EffectId, lookup_effect, resolve_effect,
};
pub use normalize::{NormalizedText, Word, normalize, words};

use serde::Serialize;

/// What the jacket should display.
///
/// Serializes as `{"color": {...}, "effect": {...} | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightingCommand {
    pub color: Color,
    pub effect: Option<Effect>,
}

impl Default for LightingCommand {
    fn default() -> Self {
        LightingCommand {
            color: default_color(),
            effect: None,
        }
    }
}

/// Extract a lighting command from raw mention text. Never fails.
///
/// The effect is resolved even when no color is found, so a post can ask for
/// an effect on the default color.
pub fn extract(raw: &str) -> LightingCommand {
    let text = normalize(raw);
    let color = find_color(&text).unwrap_or_else(|| {
        log::debug!("no color in mention, using default");
        default_color()
    });
    LightingCommand {
        color,
        effect: find_effect(&text),
    }
}

/// Like [`extract`], but `None` when the text names no color.
pub fn extract_colored(raw: &str) -> Option<LightingCommand> {
    let text = normalize(raw);
    let color = find_color(&text)?;
    Some(LightingCommand {
        color,
        effect: find_effect(&text),
    })
}

fn find_color(text: &NormalizedText) -> Option<Color> {
    let (color, source) = resolve_color_with_source(text)?;
    log::debug!("color {color} from {source}");
    Some(color)
}

fn find_effect(text: &NormalizedText) -> Option<Effect> {
    let effect = resolve_effect(text);
    if let Some(effect) = effect {
        log::debug!("effect {effect}");
    }
    effect
}
