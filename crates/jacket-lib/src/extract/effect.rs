//! Effect resolution: transitions and buffer animations named in a mention.
//!
//! Compound identifiers such as `wipe_down` match with either an underscore
//! or a single space between their words. Matching is whole-word and exact.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use super::normalize::{NormalizedText, Word, words};

/// Broad kind of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectCategory {
    /// One-shot animated change to the new color.
    Transition,
    /// Continuous pattern that keeps running.
    Buffer,
}

impl fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectCategory::Transition => write!(f, "transition"),
            EffectCategory::Buffer => write!(f, "buffer"),
        }
    }
}

/// Canonical effect identifiers understood by the jacket firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    Fade,
    WipeDown,
    WipeUp,
    WipeLeft,
    WipeRight,
    ChaseDown,
    ChaseUp,
    ChaseSpiral,
    Dissolve,
    Expand,
    ColourStack,
    ColourRain,
    ColourTrail,
    ColourWaterfall,
    ColourWave,
    ColourSpiral,
}

impl EffectId {
    pub const ALL: [EffectId; 16] = [
        EffectId::Fade,
        EffectId::WipeDown,
        EffectId::WipeUp,
        EffectId::WipeLeft,
        EffectId::WipeRight,
        EffectId::ChaseDown,
        EffectId::ChaseUp,
        EffectId::ChaseSpiral,
        EffectId::Dissolve,
        EffectId::Expand,
        EffectId::ColourStack,
        EffectId::ColourRain,
        EffectId::ColourTrail,
        EffectId::ColourWaterfall,
        EffectId::ColourWave,
        EffectId::ColourSpiral,
    ];

    /// Underscore-joined canonical alias, e.g. `"wipe_down"`.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectId::Fade => "fade",
            EffectId::WipeDown => "wipe_down",
            EffectId::WipeUp => "wipe_up",
            EffectId::WipeLeft => "wipe_left",
            EffectId::WipeRight => "wipe_right",
            EffectId::ChaseDown => "chase_down",
            EffectId::ChaseUp => "chase_up",
            EffectId::ChaseSpiral => "chase_spiral",
            EffectId::Dissolve => "dissolve",
            EffectId::Expand => "expand",
            EffectId::ColourStack => "colour_stack",
            EffectId::ColourRain => "colour_rain",
            EffectId::ColourTrail => "colour_trail",
            EffectId::ColourWaterfall => "colour_waterfall",
            EffectId::ColourWave => "colour_wave",
            EffectId::ColourSpiral => "colour_spiral",
        }
    }

    pub fn category(self) -> EffectCategory {
        match self {
            EffectId::ColourStack
            | EffectId::ColourRain
            | EffectId::ColourTrail
            | EffectId::ColourWaterfall
            | EffectId::ColourWave
            | EffectId::ColourSpiral => EffectCategory::Buffer,
            _ => EffectCategory::Transition,
        }
    }

    fn word_count(self) -> usize {
        self.as_str().split('_').count()
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Effect {
    pub category: EffectCategory,
    pub id: EffectId,
}

impl From<EffectId> for Effect {
    fn from(id: EffectId) -> Self {
        Effect {
            category: id.category(),
            id,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.category)
    }
}

/// Every recognized alias, underscore and space forms, mapped to its effect.
pub static EFFECT_TABLE: LazyLock<HashMap<String, Effect>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for id in EffectId::ALL {
        table.insert(id.as_str().to_string(), Effect::from(id));
        table.insert(id.as_str().replace('_', " "), Effect::from(id));
    }
    table
});

/// Words in the longest alias.
static MAX_ALIAS_WORDS: LazyLock<usize> = LazyLock::new(|| {
    EffectId::ALL
        .into_iter()
        .map(EffectId::word_count)
        .max()
        .unwrap_or(1)
});

/// Look up an exact alias (`"wipe_down"` or `"wipe down"`, any case).
pub fn lookup_effect(alias: &str) -> Option<Effect> {
    EFFECT_TABLE.get(&alias.trim().to_lowercase()).copied()
}

/// Resolve the effect a mention asks for, if any.
///
/// The leftmost alias wins. At the same position the longer alias wins.
pub fn resolve_effect(text: &NormalizedText) -> Option<Effect> {
    let spaced = text.spaced();
    let ws = words(spaced);
    (0..ws.len()).find_map(|i| longest_alias_at(&ws[i..], spaced))
}

fn longest_alias_at(ws: &[Word<'_>], spaced: &str) -> Option<Effect> {
    (1..=(*MAX_ALIAS_WORDS).min(ws.len()))
        .rev()
        .filter(|&n| single_spaced(&ws[..n], spaced))
        .find_map(|n| lookup_effect(&spaced[ws[0].start..ws[n - 1].end]))
}

/// Whether consecutive words are separated by exactly one space in `spaced`
/// (an underscore or a space in the original text).
fn single_spaced(phrase: &[Word<'_>], spaced: &str) -> bool {
    phrase
        .windows(2)
        .all(|pair| &spaced[pair[0].end..pair[1].start] == " ")
}
