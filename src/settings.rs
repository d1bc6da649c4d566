// ABOUTME: Deck-wide settings parsed from `% name: value` directive lines
// ABOUTME: Strips directive lines from the document and merges repeated directives

use crate::footer::resolve_footer;
use crate::vcs::VersionControl;
use log::info;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Marker placed between the values of a directive that appears more than once.
pub const SETTING_SEPARATOR: &str = "<br/>";

/// Matches a single directive line, without its line terminator.
static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^%\s*(thankyou_details|thankyou|title|subtitle|author|contact|favicon|bibliography|footer):(.*)$",
    )
    .unwrap()
});

/// The fixed set of deck-wide directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    Thankyou,
    ThankyouDetails,
    Title,
    Subtitle,
    Author,
    Contact,
    Favicon,
    Bibliography,
    Footer,
}

impl Directive {
    pub const ALL: [Directive; 9] = [
        Directive::Thankyou,
        Directive::ThankyouDetails,
        Directive::Title,
        Directive::Subtitle,
        Directive::Author,
        Directive::Contact,
        Directive::Favicon,
        Directive::Bibliography,
        Directive::Footer,
    ];

    /// Name as written in the source document and exposed to templates.
    pub fn name(self) -> &'static str {
        match self {
            Directive::Thankyou => "thankyou",
            Directive::ThankyouDetails => "thankyou_details",
            Directive::Title => "title",
            Directive::Subtitle => "subtitle",
            Directive::Author => "author",
            Directive::Contact => "contact",
            Directive::Favicon => "favicon",
            Directive::Bibliography => "bibliography",
            Directive::Footer => "footer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Extract the value part of a matched directive line.
    fn value_of(self, raw: &str) -> &str {
        match self {
            // Footer values may carry a trailing `# comment`.
            Directive::Footer => raw.split('#').next().unwrap_or_default(),
            _ => raw,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved deck-wide settings.
///
/// A directive is present only if at least one matching line was found;
/// there is no empty-string default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckSettings {
    values: BTreeMap<Directive, String>,
}

impl DeckSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, directive: Directive) -> Option<&str> {
        self.values.get(&directive).map(String::as_str)
    }

    pub fn contains(&self, directive: Directive) -> bool {
        self.values.contains_key(&directive)
    }

    pub fn insert(&mut self, directive: Directive, value: impl Into<String>) {
        self.values.insert(directive, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Directive, &str)> {
        self.values.iter().map(|(d, v)| (*d, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the directives that were found, in canonical order.
    pub fn names(&self) -> Vec<&'static str> {
        self.values.keys().map(|d| d.name()).collect()
    }
}

impl Serialize for DeckSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (directive, value) in &self.values {
            map.serialize_entry(directive.name(), value)?;
        }
        map.end()
    }
}

/// Remove every directive line from `markdown` and collect the directive values.
///
/// Works in a single pass over the lines. Values of a repeated directive are
/// joined in order of appearance with [`SETTING_SEPARATOR`]. No footer
/// resolution happens here, see [`parse_deck_settings`].
pub fn extract_directives(markdown: &str) -> (String, DeckSettings) {
    let mut collected: BTreeMap<Directive, Vec<String>> = BTreeMap::new();
    let mut stripped = String::with_capacity(markdown.len());

    for line in markdown.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        let matched = DIRECTIVE_REGEX.captures(content).and_then(|caps| {
            let directive = Directive::from_name(caps.get(1)?.as_str())?;
            let raw = caps.get(2).map_or("", |m| m.as_str());
            Some((directive, directive.value_of(raw).trim().to_string()))
        });

        match matched {
            Some((directive, value)) => collected.entry(directive).or_default().push(value),
            None => stripped.push_str(line),
        }
    }

    let mut settings = DeckSettings::new();
    for (directive, values) in collected {
        settings.insert(directive, values.join(SETTING_SEPARATOR));
    }

    (stripped.trim().to_string(), settings)
}

/// Parse the global settings for the slide deck.
///
/// Returns the markdown with all directive lines removed and surrounding
/// whitespace trimmed, plus the settings. A `footer` setting is resolved
/// against `vcs`.
pub fn parse_deck_settings(markdown: &str, vcs: &dyn VersionControl) -> (String, DeckSettings) {
    let (stripped, mut settings) = extract_directives(markdown);

    if let Some(footer) = settings.get(Directive::Footer) {
        let resolved = resolve_footer(footer, vcs);
        settings.insert(Directive::Footer, resolved);
    }

    info!(
        "Parsed slide deck settings, and found setting for: {}.",
        settings.names().join(", ")
    );

    (stripped, settings)
}
