//! Text normalization for case- and separator-insensitive matching.

use std::sync::LazyLock;

use regex::Regex;

/// Mention text prepared for matching.
///
/// Both variants share byte offsets: `spaced` is `lowered` with every `_`
/// replaced by a space, and both characters are one byte wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lowered: String,
    spaced: String,
}

impl NormalizedText {
    /// The lowercased text.
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// The lowercased text with underscores read as spaces.
    pub fn spaced(&self) -> &str {
        &self.spaced
    }
}

/// Normalize raw mention text. Never fails; `""` normalizes to `""`.
pub fn normalize(raw: &str) -> NormalizedText {
    let lowered = raw.to_lowercase();
    let spaced = lowered.replace('_', " ");
    NormalizedText { lowered, spaced }
}

/// Letters, digits and combining marks. Underscore is not a word character.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{N}\p{M}]+").expect("valid regex"));

/// A maximal run of word characters and its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Split text into words, left to right.
///
/// Punctuation, whitespace and underscores separate words, so `"redo"` is one
/// word and `"red_light"` is two. Combining marks stay with their base letter:
/// `"red\u{301}o"` is a single word.
pub fn words(text: &str) -> Vec<Word<'_>> {
    WORD_RE
        .find_iter(text)
        .map(|m| Word {
            start: m.start(),
            end: m.end(),
            text: m.as_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize ──

    #[test]
    fn lowercases_everything() {
        let n = normalize("Make It RED!");
        assert_eq!(n.lowered(), "make it red!");
    }

    #[test]
    fn underscores_become_spaces() {
        let n = normalize("WIPE_DOWN please");
        assert_eq!(n.lowered(), "wipe_down please");
        assert_eq!(n.spaced(), "wipe down please");
    }

    #[test]
    fn underscore_and_space_forms_converge() {
        assert_eq!(normalize("wipe_down").spaced(), normalize("wipe down").spaced());
    }

    #[test]
    fn empty_input() {
        let n = normalize("");
        assert!(n.lowered().is_empty());
        assert_eq!(n.spaced(), "");
    }

    #[test]
    fn variants_share_length() {
        let n = normalize("Ünïcode_and_ÄSCII mix");
        assert_eq!(n.lowered().len(), n.spaced().len());
    }

    // ── words ──

    #[test]
    fn words_split_on_punctuation() {
        let ws: Vec<&str> = words("make it red!").iter().map(|w| w.text).collect();
        assert_eq!(ws, vec!["make", "it", "red"]);
    }

    #[test]
    fn words_keep_byte_spans() {
        let text = "  blue, red";
        let ws = words(text);
        assert_eq!(ws[0], Word { start: 2, end: 6, text: "blue" });
        assert_eq!(&text[ws[1].start..ws[1].end], "red");
    }

    #[test]
    fn words_split_on_underscore() {
        let ws: Vec<&str> = words("red_light").iter().map(|w| w.text).collect();
        assert_eq!(ws, vec!["red", "light"]);
    }

    #[test]
    fn words_of_empty_text() {
        assert!(words("").is_empty());
        assert!(words("!!! ...").is_empty());
    }

    #[test]
    fn combining_marks_join_the_word() {
        let ws: Vec<&str> = words("red\u{301}o fade\u{300}").iter().map(|w| w.text).collect();
        assert_eq!(ws, vec!["red\u{301}o", "fade\u{300}"]);
        // dotted capital I lowercases to "i" plus U+0307
        let n = normalize("\u{130}RED");
        assert_eq!(words(n.lowered()).len(), 1);
    }

    #[test]
    fn words_run_to_end_of_text() {
        let ws = words("go");
        assert_eq!(ws, vec![Word { start: 0, end: 2, text: "go" }]);
    }
}
