//! Application configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::mention::SelectionPolicy;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# Jacket configuration\n\n";

/// Largest batch any supported platform returns in one request.
pub const MAX_MENTION_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mentions requested from a source per lookup. Default: 10.
    #[serde(default = "default_mention_limit")]
    pub mention_limit: usize,

    /// Which mention drives the command: "latest" or "first_with_color".
    #[serde(default)]
    pub selection: SelectionPolicy,

    /// Characters of mention text handed to the extraction engine. Default: 500.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Mention sources in priority order. The first that initializes is active.
    /// Example in TOML: `[[sources]]` / `name = "mastodon"` / `path = "mentions.json"`
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// One configured mention source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    /// JSON feed file holding the source's recent mentions.
    pub path: String,
}

fn default_mention_limit() -> usize {
    10
}
fn default_max_text_len() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mention_limit: default_mention_limit(),
            selection: SelectionPolicy::default(),
            max_text_len: default_max_text_len(),
            sources: Vec::new(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `mention_limit` is zero or above [`MAX_MENTION_LIMIT`].
    InvalidMentionLimit(usize),
    /// `max_text_len` is zero.
    InvalidMaxTextLen,
    /// A source has an empty or whitespace-only name.
    EmptySourceName { index: usize },
    /// Two sources share a name.
    DuplicateSource(String),
    /// A source has no feed path.
    EmptySourcePath(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidMentionLimit(n) => write!(
                f,
                "Invalid mention_limit: {n} (must be between 1 and {MAX_MENTION_LIMIT})"
            ),
            ValidationError::InvalidMaxTextLen => write!(f, "max_text_len cannot be zero"),
            ValidationError::EmptySourceName { index } => {
                write!(f, "Source #{} has an empty name", index + 1)
            }
            ValidationError::DuplicateSource(name) => {
                write!(f, "Source \"{name}\" is configured more than once")
            }
            ValidationError::EmptySourcePath(name) => {
                write!(f, "Source \"{name}\" has an empty path")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jacket"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.mention_limit == 0 || self.mention_limit > MAX_MENTION_LIMIT {
            errors.push(ValidationError::InvalidMentionLimit(self.mention_limit));
        }
        if self.max_text_len == 0 {
            errors.push(ValidationError::InvalidMaxTextLen);
        }

        for (index, source) in self.sources.iter().enumerate() {
            let name = source.name.trim();
            if name.is_empty() {
                errors.push(ValidationError::EmptySourceName { index });
                continue;
            }
            let seen_before = self.sources[..index]
                .iter()
                .any(|other| other.name.trim() == name);
            if seen_before {
                errors.push(ValidationError::DuplicateSource(name.to_string()));
            }
            if source.path.trim().is_empty() {
                errors.push(ValidationError::EmptySourcePath(name.to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, path: &str) -> SourceConfig {
        SourceConfig {
            name: name.into(),
            path: path.into(),
        }
    }

    // ── Config defaults ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.mention_limit, 10);
        assert_eq!(c.selection, SelectionPolicy::Latest);
        assert_eq!(c.max_text_len, 500);
        assert!(c.sources.is_empty());
    }

    #[test]
    fn serialize_roundtrip() {
        let c = Config {
            mention_limit: 25,
            selection: SelectionPolicy::FirstWithColor,
            sources: vec![source("mastodon", "/tmp/m.json")],
            ..Config::default()
        };
        let toml_str = toml::to_string_pretty(&c).unwrap();
        let c2: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(c2.mention_limit, 25);
        assert_eq!(c2.selection, SelectionPolicy::FirstWithColor);
        assert_eq!(c2.sources, vec![source("mastodon", "/tmp/m.json")]);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("selection = \"first_with_color\"").unwrap();
        assert_eq!(c.selection, SelectionPolicy::FirstWithColor);
        assert_eq!(c.mention_limit, 10);
        assert_eq!(c.max_text_len, 500);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.mention_limit, 10);
        assert!(c.sources.is_empty());
    }

    #[test]
    fn sources_array_of_tables() {
        let toml_str = r#"
mention_limit = 5

[[sources]]
name = "mastodon"
path = "mastodon.json"

[[sources]]
name = "bluesky"
path = "bluesky.json"
"#;
        let c: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(c.mention_limit, 5);
        assert_eq!(c.sources.len(), 2);
        assert_eq!(c.sources[1], source("bluesky", "bluesky.json"));
    }

    #[test]
    fn unknown_selection_is_error() {
        let result: std::result::Result<Config, _> = toml::from_str("selection = \"random\"");
        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_toml_is_error() {
        let result: std::result::Result<Config, _> = toml::from_str("mention_limit = \"ten\"");
        assert!(result.is_err());
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(path) = Config::path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }

    // ── load_from / save_to ──

    #[test]
    fn load_missing_file_gives_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("nope.toml"));
        assert!(warnings.is_empty());
        assert_eq!(c.mention_limit, 10);
    }

    #[test]
    fn load_malformed_file_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
        assert_eq!(c.max_text_len, 500);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let c = Config {
            max_text_len: 280,
            sources: vec![source("bluesky", "feed.json")],
            ..Config::default()
        };
        c.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(CONFIG_HEADER));
        assert!(!path.with_extension("toml.tmp").exists());

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded.max_text_len, 280);
        assert_eq!(loaded.sources, c.sources);
    }

    // ── validate ──

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn mention_limit_bounds() {
        for bad in [0, MAX_MENTION_LIMIT + 1] {
            let c = Config {
                mention_limit: bad,
                ..Config::default()
            };
            assert_eq!(
                c.validate().unwrap_err(),
                vec![ValidationError::InvalidMentionLimit(bad)]
            );
        }
        let c = Config {
            mention_limit: MAX_MENTION_LIMIT,
            ..Config::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let c = Config {
            mention_limit: 0,
            max_text_len: 0,
            sources: vec![
                source("  ", "a.json"),
                source("mastodon", "a.json"),
                source("mastodon", ""),
            ],
            ..Config::default()
        };
        let errors = c.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidMentionLimit(0),
                ValidationError::InvalidMaxTextLen,
                ValidationError::EmptySourceName { index: 0 },
                ValidationError::DuplicateSource("mastodon".into()),
                ValidationError::EmptySourcePath("mastodon".into()),
            ]
        );
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::InvalidMentionLimit(0).to_string(),
            "Invalid mention_limit: 0 (must be between 1 and 100)"
        );
        assert_eq!(
            ValidationError::EmptySourceName { index: 1 }.to_string(),
            "Source #2 has an empty name"
        );
        assert_eq!(
            ValidationError::DuplicateSource("bluesky".into()).to_string(),
            "Source \"bluesky\" is configured more than once"
        );
    }
}
