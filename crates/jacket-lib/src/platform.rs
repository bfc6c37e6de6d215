//! Mention sources and the registry built at startup.
//!
//! A source is anything that can hand over recent mentions. [`Platforms`] is
//! built once from the config and then only read: the first source that
//! initializes becomes the active one.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::mention::Mention;

// ── Error type ──

/// Mention source errors.
#[derive(Debug)]
pub enum SourceError {
    /// No initialized source has this name.
    NotFound(String),
    /// The source exists but could not deliver.
    Unavailable { name: String, reason: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotFound(name) => write!(f, "Mention source \"{name}\" not available"),
            SourceError::Unavailable { name, reason } => {
                write!(f, "Mention source \"{name}\" unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

// ── Trait ──

pub trait MentionSource {
    /// Platform name used for selection, e.g. `"mastodon"`.
    fn name(&self) -> &str;

    /// Up to `limit` mentions, newest first.
    fn latest_mentions(&self, limit: usize) -> Result<Vec<Mention>>;
}

// ── Feed file ──

/// Mentions exported to a JSON file, newest first.
///
/// The file holds an array of `{ "id", "text", "account", "created_at" }`
/// objects. It is re-read on every fetch so an exporter can keep it current.
#[derive(Debug)]
pub struct FeedFileSource {
    name: String,
    path: PathBuf,
}

impl FeedFileSource {
    /// Open a feed, failing if the file is missing or not a mention array.
    pub fn initialize(name: &str, path: &Path) -> Result<Self> {
        let source = FeedFileSource {
            name: name.to_string(),
            path: path.to_path_buf(),
        };
        let count = source.read_feed()?.len();
        log::debug!(
            "feed \"{name}\" at {} holds {count} mention{}",
            path.display(),
            if count == 1 { "" } else { "s" }
        );
        Ok(source)
    }

    fn read_feed(&self) -> Result<Vec<Mention>> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl MentionSource for FeedFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn latest_mentions(&self, limit: usize) -> Result<Vec<Mention>> {
        let mut mentions = self.read_feed().map_err(|e| SourceError::Unavailable {
            name: self.name.clone(),
            reason: e.to_string(),
        })?;
        mentions.truncate(limit);
        Ok(mentions)
    }
}

// ── Registry ──

/// Initialized mention sources, in configuration order.
pub struct Platforms {
    sources: Vec<Box<dyn MentionSource>>,
}

impl Platforms {
    /// Initialize every configured source, skipping the ones that fail.
    pub fn from_config(config: &Config) -> Self {
        let mut sources: Vec<Box<dyn MentionSource>> = Vec::new();
        for sc in &config.sources {
            match FeedFileSource::initialize(&sc.name, Path::new(&sc.path)) {
                Ok(source) => {
                    log::info!("mention source \"{}\" initialized", sc.name);
                    sources.push(Box::new(source));
                }
                Err(e) => log::warn!("failed to initialize mention source \"{}\": {e}", sc.name),
            }
        }
        if sources.is_empty() {
            log::warn!("no mention sources initialized; check the config file");
        }
        Self::from_sources(sources)
    }

    /// Registry over already-initialized sources. The first one is active.
    pub fn from_sources(sources: Vec<Box<dyn MentionSource>>) -> Self {
        Platforms { sources }
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The source used when none is named.
    pub fn active(&self) -> Option<&dyn MentionSource> {
        self.sources.first().map(|s| s.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn MentionSource> {
        self.sources
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// The named source, or the active one when `name` is `None`.
    pub fn resolve(
        &self,
        name: Option<&str>,
    ) -> std::result::Result<&dyn MentionSource, SourceError> {
        match name {
            Some(n) => self.get(n).ok_or_else(|| SourceError::NotFound(n.to_string())),
            None => self
                .active()
                .ok_or_else(|| SourceError::NotFound("(none configured)".to_string())),
        }
    }
}

// ── Mock source for testing ──

/// In-memory mention source for unit and integration tests.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;

    pub struct MockSource {
        name: String,
        mentions: Vec<Mention>,
        /// If set, `latest_mentions` fails with this reason.
        pub fail_with: Option<String>,
        /// Recorded `limit` arguments.
        pub requests: RefCell<Vec<usize>>,
    }

    impl MockSource {
        pub fn new(name: &str, mentions: Vec<Mention>) -> Self {
            MockSource {
                name: name.into(),
                mentions,
                fail_with: None,
                requests: RefCell::new(Vec::new()),
            }
        }

        /// Convenience: mentions with ids `"1"`, `"2"`, … from text alone.
        pub fn with_texts(name: &str, texts: &[&str]) -> Self {
            let mentions = texts
                .iter()
                .enumerate()
                .map(|(i, text)| Mention {
                    id: (i + 1).to_string(),
                    text: text.to_string(),
                    account: "tester".into(),
                    created_at: String::new(),
                })
                .collect();
            Self::new(name, mentions)
        }
    }

    impl MentionSource for MockSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn latest_mentions(&self, limit: usize) -> Result<Vec<Mention>> {
            self.requests.borrow_mut().push(limit);
            if let Some(reason) = &self.fail_with {
                return Err(SourceError::Unavailable {
                    name: self.name.clone(),
                    reason: reason.clone(),
                }
                .into());
            }
            Ok(self.mentions.iter().take(limit).cloned().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSource;
    use super::*;
    use crate::config::SourceConfig;

    fn write_feed(dir: &Path, file: &str, json: &str) -> PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, json).unwrap();
        path
    }

    const FEED: &str = r#"[
        {"id": "3", "text": "<p>make it blue</p>", "account": "ana", "created_at": "2024-05-03T10:00:00Z"},
        {"id": "2", "text": "fade", "account": "bo"},
        {"id": "1", "text": "red"}
    ]"#;

    // ── FeedFileSource ──

    #[test]
    fn feed_reads_mentions_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_feed(dir.path(), "feed.json", FEED);
        let src = FeedFileSource::initialize("mastodon", &path).unwrap();
        assert_eq!(src.name(), "mastodon");
        let ids: Vec<String> = src.latest_mentions(10).unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn feed_honours_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_feed(dir.path(), "feed.json", FEED);
        let src = FeedFileSource::initialize("mastodon", &path).unwrap();
        assert_eq!(src.latest_mentions(2).unwrap().len(), 2);
        assert!(src.latest_mentions(0).unwrap().is_empty());
    }

    #[test]
    fn feed_missing_file_fails_to_initialize() {
        let err = FeedFileSource::initialize("x", Path::new("/nonexistent/feed.json")).unwrap_err();
        assert!(matches!(err, crate::JacketError::Io(_)));
    }

    #[test]
    fn feed_malformed_json_fails_to_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_feed(dir.path(), "bad.json", "{ not json");
        let err = FeedFileSource::initialize("x", &path).unwrap_err();
        assert!(matches!(err, crate::JacketError::Json(_)));
    }

    #[test]
    fn feed_removed_after_initialize_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_feed(dir.path(), "feed.json", FEED);
        let src = FeedFileSource::initialize("bluesky", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let err = src.latest_mentions(5).unwrap_err();
        assert!(err.to_string().contains("\"bluesky\" unavailable"), "{err}");
    }

    // ── Platforms ──

    #[test]
    fn first_initialized_source_is_active() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_feed(dir.path(), "good.json", FEED);
        let config = Config {
            sources: vec![
                SourceConfig {
                    name: "mastodon".into(),
                    path: dir.path().join("missing.json").display().to_string(),
                },
                SourceConfig {
                    name: "bluesky".into(),
                    path: good.display().to_string(),
                },
            ],
            ..Config::default()
        };
        let platforms = Platforms::from_config(&config);
        assert_eq!(platforms.names(), vec!["bluesky"]);
        assert_eq!(platforms.active().unwrap().name(), "bluesky");
    }

    #[test]
    fn no_sources_configured() {
        let platforms = Platforms::from_config(&Config::default());
        assert!(platforms.is_empty());
        assert!(platforms.active().is_none());
        assert!(matches!(platforms.resolve(None), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn resolve_by_name_or_active() {
        let platforms = Platforms::from_sources(vec![
            Box::new(MockSource::with_texts("mastodon", &["red"])),
            Box::new(MockSource::with_texts("bluesky", &["blue"])),
        ]);
        assert_eq!(platforms.resolve(None).unwrap().name(), "mastodon");
        assert_eq!(platforms.resolve(Some("bluesky")).unwrap().name(), "bluesky");
        let err = platforms.resolve(Some("myspace")).err().unwrap();
        assert_eq!(err.to_string(), "Mention source \"myspace\" not available");
    }

    // ── MockSource ──

    #[test]
    fn mock_records_limits_and_fails_on_demand() {
        let mut src = MockSource::with_texts("mock", &["a", "b", "c"]);
        assert_eq!(src.latest_mentions(2).unwrap().len(), 2);
        src.fail_with = Some("rate limited".into());
        assert!(src.latest_mentions(5).is_err());
        assert_eq!(*src.requests.borrow(), vec![2, 5]);
    }
}
