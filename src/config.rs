// ABOUTME: Configuration module for the slidedeck application
// ABOUTME: Provides default paths and environment variable handling

use crate::watch::WatchConfig;
use std::env;
use std::path::PathBuf;

const DEFAULT_MARKDOWN: &str = "slides.md";
const DEFAULT_OUTPUT: &str = "slides.html";
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Global configuration for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub markdown_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` selects the built-in template.
    pub template_path: Option<PathBuf>,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown_path: PathBuf::from(DEFAULT_MARKDOWN),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            template_path: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let markdown_path = lookup("SLIDEDECK_MARKDOWN")
            .map(PathBuf::from)
            .unwrap_or(defaults.markdown_path);
        let output_path = lookup("SLIDEDECK_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);
        let template_path = lookup("SLIDEDECK_TEMPLATE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let debounce_ms = lookup("SLIDEDECK_DEBOUNCE_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        Self {
            markdown_path,
            output_path,
            template_path,
            debounce_ms,
        }
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        markdown_path: Option<PathBuf>,
        output_path: Option<PathBuf>,
        template_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = markdown_path {
            self.markdown_path = path;
        }
        if let Some(path) = output_path {
            self.output_path = path;
        }
        if template_path.is_some() {
            self.template_path = template_path;
        }
        self
    }

    /// Get a watch configuration for the current paths
    pub fn get_watch_config(&self) -> WatchConfig {
        WatchConfig {
            markdown_path: self.markdown_path.clone(),
            output_path: self.output_path.clone(),
            template_path: self.template_path.clone(),
            debounce_ms: self.debounce_ms,
        }
    }
}
