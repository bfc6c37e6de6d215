//! Color resolution from mention text.
//!
//! Three syntaxes are recognized, tried in priority order over the whole
//! text: `#rrggbb` hex codes, `rgb(r, g, b)` triples, then whole-word color
//! names from [`COLOR_TABLE`]. A candidate that fails validation is skipped,
//! never reported.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::normalize::{NormalizedText, words};

/// Name given to colors parsed from hex or `rgb()` syntax.
pub const CUSTOM_COLOR_NAME: &str = "custom";

/// An 8-bit RGB triple. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Canonical lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Decode six hex digits (no `#`) as three byte pairs.
    fn from_hex_digits(digits: &str) -> Option<Self> {
        if digits.len() != 6 {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Rgb(byte(0)?, byte(2)?, byte(4)?))
    }
}

/// A resolved color. `hex` is always derived from `rgb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    name: String,
    rgb: Rgb,
    hex: String,
}

impl Color {
    /// A color found by name lookup.
    pub fn named(name: &str, rgb: Rgb) -> Self {
        Color {
            name: name.to_string(),
            rgb,
            hex: rgb.to_hex(),
        }
    }

    /// A color given literally as hex or `rgb()`.
    pub fn custom(rgb: Rgb) -> Self {
        Self::named(CUSTOM_COLOR_NAME, rgb)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hex, self.name)
    }
}

/// Color used when a mention names none: white.
pub fn default_color() -> Color {
    Color::named("white", Rgb::WHITE)
}

/// Named colors recognized in mention text.
pub static COLOR_TABLE: [(&str, Rgb); 24] = [
    ("red", Rgb(255, 0, 0)),
    ("orange", Rgb(255, 165, 0)),
    ("yellow", Rgb(255, 255, 0)),
    ("chartreuse", Rgb(127, 255, 0)),
    ("green", Rgb(0, 128, 0)),
    ("spring", Rgb(0, 255, 127)),
    ("cyan", Rgb(0, 255, 255)),
    ("azure", Rgb(0, 127, 255)),
    ("blue", Rgb(0, 0, 255)),
    ("violet", Rgb(138, 43, 226)),
    ("magenta", Rgb(255, 0, 255)),
    ("rose", Rgb(255, 20, 147)),
    ("pink", Rgb(255, 192, 203)),
    ("purple", Rgb(128, 0, 128)),
    ("indigo", Rgb(75, 0, 130)),
    ("turquoise", Rgb(64, 224, 208)),
    ("lime", Rgb(0, 255, 0)),
    ("amber", Rgb(255, 191, 0)),
    ("coral", Rgb(255, 127, 80)),
    ("salmon", Rgb(250, 128, 114)),
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
];

/// Look up a canonical (lowercase) color name.
pub fn lookup_color(name: &str) -> Option<Rgb> {
    COLOR_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, rgb)| rgb)
}

/// Which syntax produced a resolved color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    Hex,
    RgbTriple,
    Name,
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSource::Hex => write!(f, "hex code"),
            ColorSource::RgbTriple => write!(f, "rgb triple"),
            ColorSource::Name => write!(f, "color name"),
        }
    }
}

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9a-f]{6}").expect("valid regex"));

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgb\s*\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*\)").expect("valid regex")
});

/// Resolve the color a mention asks for, if any.
pub fn resolve_color(text: &NormalizedText) -> Option<Color> {
    resolve_color_with_source(text).map(|(color, _)| color)
}

/// Like [`resolve_color`], also reporting which syntax matched.
pub fn resolve_color_with_source(text: &NormalizedText) -> Option<(Color, ColorSource)> {
    let lowered = text.lowered();
    if let Some(rgb) = find_hex(lowered) {
        return Some((Color::custom(rgb), ColorSource::Hex));
    }
    if let Some(rgb) = find_rgb_triple(lowered) {
        return Some((Color::custom(rgb), ColorSource::RgbTriple));
    }
    find_color_name(lowered).map(|(name, rgb)| (Color::named(name, rgb), ColorSource::Name))
}

/// First `#` followed by exactly six hex digits.
///
/// Seven or more alphanumerics after the `#` make the candidate malformed.
fn find_hex(lowered: &str) -> Option<Rgb> {
    HEX_RE.find_iter(lowered).find_map(|m| {
        let overlong = lowered[m.end()..]
            .chars()
            .next()
            .is_some_and(char::is_alphanumeric);
        if overlong {
            log::trace!("skipping malformed hex code at byte {}", m.start());
            return None;
        }
        Rgb::from_hex_digits(&m.as_str()[1..])
    })
}

/// First `rgb(r, g, b)` whose components all fit in a byte.
fn find_rgb_triple(lowered: &str) -> Option<Rgb> {
    RGB_RE.captures_iter(lowered).find_map(|caps| {
        let component = |i: usize| caps[i].parse::<u8>().ok();
        match (component(1), component(2), component(3)) {
            (Some(r), Some(g), Some(b)) => Some(Rgb(r, g, b)),
            _ => {
                log::trace!("skipping out-of-range rgb triple {:?}", &caps[0]);
                None
            }
        }
    })
}

/// Leftmost whole-word color name.
fn find_color_name(lowered: &str) -> Option<(&str, Rgb)> {
    words(lowered)
        .into_iter()
        .find_map(|w| lookup_color(w.text).map(|rgb| (w.text, rgb)))
}
