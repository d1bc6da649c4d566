// ABOUTME: Watch module for monitoring file changes and regenerating the deck
// ABOUTME: Re-renders the HTML output when the markdown, template or bibliography changes

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;

use crate::deck;
use crate::errors::{DeckError, Result};
use crate::utils;

/// Configuration for watch mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Path to the markdown file to watch
    pub markdown_path: PathBuf,

    /// Output HTML file path
    pub output_path: PathBuf,

    /// Template file, `None` for the built-in template
    pub template_path: Option<PathBuf>,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            markdown_path: PathBuf::new(),
            output_path: PathBuf::new(),
            template_path: None,
            debounce_ms: 500,
        }
    }
}

/// Render once, then keep re-rendering whenever a relevant file changes.
///
/// Blocks until the watcher channel closes.
pub fn watch_markdown(config: WatchConfig) -> Result<()> {
    utils::validate_file_exists(&config.markdown_path)?;
    utils::ensure_parent_directory_exists(&config.output_path)?;

    // Initial generation
    regenerate_output(&config)?;

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| DeckError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = match config.markdown_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let abs_watch_path = utils::get_absolute_path(watch_path)?;
    debug!("Watching absolute path: {:?}", abs_watch_path);

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::Recursive)
        .map_err(|e| {
            DeckError::WatchError(format!(
                "Failed to start watching directory {:?}: {}",
                abs_watch_path, e
            ))
        })?;

    info!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        watch_path
    );

    let mut last_processed = Instant::now();

    for result in rx {
        match result {
            Ok(events) => {
                let relevant_changes = events
                    .iter()
                    .flat_map(|event| event.paths.iter())
                    .any(|path| {
                        let relevant = is_relevant_path(path, &config);
                        if relevant {
                            debug!("Detected relevant change in {:?}", path);
                        }
                        relevant
                    });

                let now = Instant::now();
                if relevant_changes
                    && now.duration_since(last_processed) > Duration::from_millis(config.debounce_ms)
                {
                    match regenerate_output(&config) {
                        Ok(()) => {
                            info!("Regenerated slides successfully");
                            last_processed = now;
                        }
                        Err(e) => error!("Failed to regenerate slides: {}", e),
                    }
                }
            }
            Err(errors) => error!("Watch error: {:?}", errors),
        }
    }

    Ok(())
}

/// Whether a change to `path` should trigger a re-render.
///
/// The output file never does, so writing it cannot loop.
pub fn is_relevant_path(path: &Path, config: &WatchConfig) -> bool {
    if same_file(path, &config.output_path) {
        return false;
    }

    if same_file(path, &config.markdown_path) {
        return true;
    }

    if let Some(template) = &config.template_path {
        if same_file(path, template) {
            return true;
        }
    }

    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "bib"
        }
        None => false,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (utils::get_absolute_path(a), utils::get_absolute_path(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn regenerate_output(config: &WatchConfig) -> Result<()> {
    info!("Regenerating slides...");
    deck::process_slides(
        &config.markdown_path,
        &config.output_path,
        config.template_path.as_deref(),
    )
}
