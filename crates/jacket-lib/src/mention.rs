//! Mentions: cleanup and selection before extraction.
//!
//! Sources hand over mentions newest first. Mastodon delivers post bodies as
//! HTML, so text is cleaned before it reaches the engine.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::{self, LightingCommand};

/// A single post that mentions the jacket's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub created_at: String,
}

impl Mention {
    /// Copy of this mention with HTML removed from the text.
    pub fn cleaned(&self) -> Self {
        Mention {
            text: strip_html(&self.text),
            ..self.clone()
        }
    }
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    // last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

/// Strip HTML tags and common entities, collapsing whitespace.
///
/// Tags become spaces so `red</p><p>fade` stays two words.
pub fn strip_html(text: &str) -> String {
    let mut out = TAG_RE.replace_all(text, " ").into_owned();
    for (entity, ch) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, ch);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bound text to at most `max_chars` characters.
pub fn truncate_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Which mention drives the lighting command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The most recent mention, whatever it says.
    #[default]
    Latest,
    /// The most recent mention that names a color.
    FirstWithColor,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Latest => write!(f, "latest"),
            SelectionPolicy::FirstWithColor => write!(f, "first_with_color"),
        }
    }
}

/// Lighting command chosen from a batch of mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub command: LightingCommand,
    /// The mention the command came from (cleaned), if any.
    pub mention: Option<Mention>,
    pub mentions_checked: usize,
}

/// Pick a mention according to `policy` and extract its command.
///
/// No mentions yields the default command. Under
/// [`SelectionPolicy::FirstWithColor`], when no mention names a color the
/// latest mention is used, so its effect still applies to the default color.
pub fn resolve_mentions(
    mentions: &[Mention],
    policy: SelectionPolicy,
    max_text_len: usize,
) -> Resolution {
    let Some(latest) = mentions.first() else {
        log::debug!("no mentions, using default command");
        return Resolution {
            command: LightingCommand::default(),
            mention: None,
            mentions_checked: 0,
        };
    };

    if policy == SelectionPolicy::FirstWithColor {
        for (i, mention) in mentions.iter().enumerate() {
            let cleaned = mention.cleaned();
            let text = truncate_text(&cleaned.text, max_text_len);
            if let Some(command) = extract::extract_colored(text) {
                log::debug!("mention {} carries a color", cleaned.id);
                return Resolution {
                    command,
                    mention: Some(cleaned),
                    mentions_checked: i + 1,
                };
            }
        }
        log::debug!("no color in {} mentions", mentions.len());
    }

    let cleaned = latest.cleaned();
    let command = extract::extract(truncate_text(&cleaned.text, max_text_len));
    let mentions_checked = match policy {
        SelectionPolicy::Latest => 1,
        SelectionPolicy::FirstWithColor => mentions.len(),
    };
    Resolution {
        command,
        mention: Some(cleaned),
        mentions_checked,
    }
}
