use std::{env, path::PathBuf, str::FromStr};

use cmd_palette::{MatchBackend, PaletteOptions, MAX_MATCHES};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::theme::PaletteStyle;

const CONFIG_FILE: &str = "cmd-palette-demo.toml";

/// Which fuzzy matcher ranks palette results
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    #[default]
    Subsequence,
    Nucleo,
}

/// Application configuration loaded from cmd-palette-demo.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherKind,
    /// Longest query that can be highlighted (capped at 32)
    #[serde(default = "default_match_capacity")]
    pub match_capacity: usize,
    /// Number of independent palette contexts (Ctrl+N cycles)
    #[serde(default = "default_contexts")]
    pub contexts: usize,
    #[serde(default = "default_highlight_bold")]
    pub highlight_bold: bool,
    /// Any color name or hex value ratatui understands, e.g. "red" or "#ff8800"
    #[serde(default)]
    pub highlight_color: Option<String>,
    #[serde(default = "default_result_rows")]
    pub result_rows: u16,
}

fn default_match_capacity() -> usize {
    MAX_MATCHES
}

fn default_contexts() -> usize {
    4
}

fn default_highlight_bold() -> bool {
    true
}

fn default_result_rows() -> u16 {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matcher: MatcherKind::default(),
            match_capacity: default_match_capacity(),
            contexts: default_contexts(),
            highlight_bold: default_highlight_bold(),
            highlight_color: None,
            result_rows: default_result_rows(),
        }
    }
}

impl Config {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        // Try current directory first
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE)
            && let Some(config) = Self::parse(&content, CONFIG_FILE)
        {
            log::debug!("Loaded config from {}", CONFIG_FILE);
            return config;
        }

        // Try home directory
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home).join(format!(".{}", CONFIG_FILE));
            if let Ok(content) = std::fs::read_to_string(&home_config)
                && let Some(config) = Self::parse(&content, &home_config.display().to_string())
            {
                log::debug!("Loaded config from {}", home_config.display());
                return config;
            }
        }

        log::debug!("Using default config");
        Self::default()
    }

    fn parse(content: &str, origin: &str) -> Option<Self> {
        match toml::from_str::<Config>(content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Ignoring invalid config {}: {}", origin, err);
                None
            }
        }
    }

    /// Engine options for every palette context
    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions {
            backend: match self.matcher {
                MatcherKind::Subsequence => MatchBackend::Subsequence,
                MatcherKind::Nucleo => MatchBackend::Nucleo,
            },
            match_capacity: self.match_capacity.clamp(1, MAX_MATCHES),
        }
    }

    pub fn palette_style(&self) -> PaletteStyle {
        let highlight_color = self.highlight_color.as_deref().and_then(|name| {
            Color::from_str(name)
                .inspect_err(|_| log::warn!("Unknown highlight color '{}'", name))
                .ok()
        });

        PaletteStyle {
            highlight_bold: self.highlight_bold,
            highlight_color,
            result_rows: self.result_rows.max(1),
        }
    }

    /// At least one context always exists
    pub fn context_count(&self) -> usize {
        self.contexts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.palette_options(), PaletteOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r##"
            matcher = "nucleo"
            match_capacity = 64
            contexts = 0
            highlight_bold = false
            highlight_color = "#ff0000"
            result_rows = 5
            "##,
        )
        .unwrap();

        let options = config.palette_options();
        assert_eq!(options.backend, MatchBackend::Nucleo);
        assert_eq!(options.match_capacity, MAX_MATCHES);
        assert_eq!(config.context_count(), 1);

        let style = config.palette_style();
        assert!(!style.highlight_bold);
        assert_eq!(style.highlight_color, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(style.result_rows, 5);
    }

    #[test]
    fn test_unknown_color_is_ignored() {
        let config = Config {
            highlight_color: Some("not-a-color".into()),
            ..Default::default()
        };
        assert_eq!(config.palette_style().highlight_color, None);
    }
}
