//! `platforms` subcommand: list initialized mention sources.

use std::path::Path;

use super::{MentionSource, Platforms, PlatformsOutput, Result};

pub(super) fn cmd_platforms(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path);
    let platforms = Platforms::from_config(&config);
    print_platforms(&platforms, json)
}

fn print_platforms(platforms: &Platforms, json: bool) -> Result<()> {
    let active = platforms.active().map(|s| s.name().to_string());

    if json {
        let output = PlatformsOutput {
            available: platforms.names().iter().map(|n| n.to_string()).collect(),
            active,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if platforms.is_empty() {
        println!("No mention sources initialized.");
        return Ok(());
    }

    for name in platforms.names() {
        let marker = if active.as_deref() == Some(name) {
            " (active)"
        } else {
            ""
        };
        println!("  {name}{marker}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jacket_lib::platform::mock::MockSource;

    #[test]
    fn print_no_platforms() {
        let platforms = Platforms::from_sources(vec![]);
        assert!(print_platforms(&platforms, false).is_ok());
        assert!(print_platforms(&platforms, true).is_ok());
    }

    #[test]
    fn print_mock_platforms() {
        let platforms = Platforms::from_sources(vec![
            Box::new(MockSource::with_texts("mastodon", &[])),
            Box::new(MockSource::with_texts("bluesky", &[])),
        ]);
        assert!(print_platforms(&platforms, false).is_ok());
        assert!(print_platforms(&platforms, true).is_ok());
    }
}
