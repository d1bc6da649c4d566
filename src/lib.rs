// ABOUTME: Library module for the slidedeck program.
// ABOUTME: Turns annotated markdown into HTML slide decks.

pub mod bibliography;
pub mod config;
pub mod deck;
pub mod errors;
pub mod footer;
pub mod markdown;
pub mod scaffold;
pub mod settings;
pub mod slides;
pub mod template;
pub mod utils;
pub mod vcs;
pub mod watch;

// Reexport common types and functions
pub use config::Config;
pub use deck::{process_slides, render_file, write_slides, DeckAssembler, DeckContext, Slide};
pub use errors::{DeckError, Result};
pub use markdown::{ComrakRenderer, Extension, MarkdownRenderer};
pub use scaffold::create_deck;
pub use settings::{extract_directives, parse_deck_settings, DeckSettings, Directive};
pub use slides::{parse_slide, split_slides, ParsedSlide, SlideMetadata, SlideUnit};
pub use template::{MiniJinjaEngine, TemplateEngine};
pub use vcs::{GitRepository, NoVersionControl, StaticVersionControl, VersionControl, VersionControlInfo};
pub use watch::{watch_markdown, WatchConfig};
