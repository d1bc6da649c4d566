// ABOUTME: Slide splitting and per-slide metadata parsing
// ABOUTME: Divides the deck on `---` lines and separates leading `key: value` blocks from content

use std::collections::BTreeMap;

/// A line that separates slides when the lines around it are blank.
pub const SLIDE_DELIMITER: &str = "---";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Key/value pairs from the first block of a slide.
pub type SlideMetadata = BTreeMap<String, String>;

/// One delimiter-separated segment of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideUnit {
    pub index: usize,
    pub text: String,
}

/// A slide unit split into its metadata and markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSlide {
    pub metadata: SlideMetadata,
    pub body: String,
}

/// Split the (directive-free) document into slide units in source order.
///
/// A delimiter is a `---` line whose neighbours are blank lines or the edge of
/// the document. One blank line on each side belongs to the delimiter, so two
/// delimiters sharing a blank line enclose an empty unit. A document without
/// delimiters is a single unit. Segment text is not trimmed.
pub fn split_slides(markdown: &str) -> Vec<SlideUnit> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let blank_or_edge = |index: Option<usize>| {
        index
            .and_then(|i| lines.get(i))
            .map_or(true, |line| line.is_empty())
    };

    let mut texts = Vec::new();
    let mut start = 0;
    for (i, line) in lines.iter().enumerate() {
        if *line == SLIDE_DELIMITER
            && blank_or_edge(i.checked_sub(1))
            && blank_or_edge(Some(i + 1))
        {
            let end = i.saturating_sub(1).max(start);
            texts.push(lines[start..end].join("\n"));
            start = (i + 2).min(lines.len());
        }
    }
    texts.push(lines[start..].join("\n"));

    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| SlideUnit { index, text })
        .collect()
}

/// Collect `key: value` pairs from a block of lines.
///
/// Only the first colon separates key from value; lines without a colon are skipped.
pub fn parse_metadata(section: &str) -> SlideMetadata {
    section
        .split('\n')
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Separate a slide's leading metadata block from its body.
///
/// The first blank-line separated block is read as metadata. When it yields
/// at least one pair the remaining blocks are the body; otherwise the whole
/// slide is body.
pub fn parse_slide(text: &str) -> ParsedSlide {
    let (first, rest) = match text.split_once(BLOCK_SEPARATOR) {
        Some((first, rest)) => (first, Some(rest)),
        None => (text, None),
    };

    let metadata = parse_metadata(first);
    if metadata.is_empty() {
        return ParsedSlide {
            metadata,
            body: text.to_string(),
        };
    }

    ParsedSlide {
        metadata,
        body: rest.unwrap_or_default().to_string(),
    }
}
