// ABOUTME: Markdown rendering for slide bodies
// ABOUTME: Wraps comrak behind a renderer trait and post-processes slide HTML

use crate::bibliography::Bibliography;
use crate::errors::Result;
use crate::slides::SlideMetadata;
use comrak::{markdown_to_html, Options};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static META_BEGIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3}(\s.*)?$").unwrap());
static META_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-{3}|\.{3})(\s.*)?$").unwrap());
static META_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]{0,3}[A-Za-z0-9_-]+:").unwrap());
static META_CONTINUATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ ]{4,}").unwrap());

/// Optional behaviour requested from a markdown renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// `$inline$` and `$$display$$` math.
    Math,
    FencedCode,
    /// Leading `key: value` lines are dropped from the output. See [`strip_meta`].
    Meta,
    /// Resolve `[@key]` citations against a bibliography loaded once per deck.
    Bibliography(Arc<Bibliography>),
}

/// Converts markdown text into HTML.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str, extensions: &[Extension]) -> Result<String>;
}

/// Renderer backed by comrak.
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer;

impl ComrakRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options(extensions: &[Extension]) -> Options {
        let mut options = Options::default();
        options.render.unsafe_ = true; // Allow raw HTML
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;

        for extension in extensions {
            match extension {
                Extension::Math => options.extension.math_dollars = true,
                // Fenced code blocks are part of CommonMark.
                Extension::FencedCode | Extension::Meta | Extension::Bibliography(_) => {}
            }
        }

        options
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str, extensions: &[Extension]) -> Result<String> {
        let mut source = if extensions.contains(&Extension::Meta) {
            strip_meta(markdown).to_string()
        } else {
            markdown.to_string()
        };

        for extension in extensions {
            if let Extension::Bibliography(bibliography) = extension {
                source = bibliography.cite(&source);
            }
        }

        Ok(markdown_to_html(&source, &Self::options(extensions)))
    }
}

/// Drop a leading metadata block: an optional `---` line, then `key: value`
/// lines with indented continuations, ended by a blank line, `---` or `...`.
/// Stops at the first line that is none of these and keeps it.
pub fn strip_meta(markdown: &str) -> &str {
    let mut rest = markdown;
    let mut first = true;
    let mut in_block = false;

    while !rest.is_empty() {
        let (line, remainder) = match rest.split_once('\n') {
            Some((line, remainder)) => (line, remainder),
            None => (rest, ""),
        };

        if first && META_BEGIN_REGEX.is_match(line) {
            first = false;
            rest = remainder;
            continue;
        }
        first = false;

        if line.trim().is_empty() || META_END_REGEX.is_match(line) {
            return remainder;
        }
        if META_LINE_REGEX.is_match(line) {
            in_block = true;
        } else if !(in_block && META_CONTINUATION_REGEX.is_match(line)) {
            return rest;
        }
        rest = remainder;
    }

    rest
}

/// Returns processed HTML to fit into the slide template format.
///
/// With `build_lists: true` in the slide metadata every list is tagged with
/// the `build` class so it is revealed item by item.
pub fn postprocess_html(html: &str, metadata: &SlideMetadata) -> String {
    if metadata.get("build_lists").map(String::as_str) != Some("true") {
        return html.to_string();
    }

    html.replace("<ul>", "<ul class=\"build\">")
        .replace("<ol>", "<ol class=\"build\">")
        .replace("<ol start=", "<ol class=\"build\" start=")
}
