// ABOUTME: BibTeX bibliography support for slide content
// ABOUTME: Parses `.bib` files and turns `[@key]` citations into numbered references

use crate::errors::Result;
use crate::utils;
use log::warn;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// `[@key]` or `[@first; @second]`.
static CITATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(@[\w:.\-/]+(?:\s*;\s*@[\w:.\-/]+)*)\]").unwrap());

/// A single BibTeX entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    pub kind: String,
    pub key: String,
    /// Field names are lowercased; values have protective braces removed.
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Format the entry as an HTML reference line.
    pub fn to_html(&self) -> String {
        let mut parts = Vec::new();
        if let Some(author) = self.field("author") {
            parts.push(escape_html(&format_authors(author)));
        }
        if let Some(title) = self.field("title") {
            parts.push(format!("<em>{}</em>", escape_html(title)));
        }
        let venue = ["journal", "booktitle", "publisher", "howpublished"]
            .iter()
            .find_map(|name| self.field(name));
        if let Some(venue) = venue {
            parts.push(escape_html(venue));
        }
        if let Some(year) = self.field("year") {
            parts.push(escape_html(year));
        }
        if parts.is_empty() {
            return escape_html(&self.key);
        }
        format!("{}.", parts.join(". "))
    }
}

/// Entries of a `.bib` file keyed by citation key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    entries: BTreeMap<String, BibEntry>,
}

impl Bibliography {
    pub fn load(path: &Path) -> Result<Self> {
        let source = utils::read_text_file(path)?;
        Ok(Self::parse(&source))
    }

    /// Parse BibTeX source. Malformed entries are skipped.
    pub fn parse(source: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut parser = BibParser::new(source);
        while let Some(entry) = parser.next_entry() {
            entries.insert(entry.key.clone(), entry);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&BibEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace citations in `markdown` with numbered markers and append a
    /// reference list for the entries cited.
    ///
    /// Unknown keys are left as written. Numbers are assigned in order of
    /// first citation.
    pub fn cite(&self, markdown: &str) -> String {
        let mut cited: Vec<&BibEntry> = Vec::new();

        let replaced = CITATION_REGEX.replace_all(markdown, |caps: &Captures| {
            let keys: Vec<&str> = caps[1]
                .split(';')
                .map(|k| k.trim().trim_start_matches('@'))
                .collect();

            if let Some(missing) = keys.iter().find(|k| !self.entries.contains_key(**k)) {
                warn!("Unknown citation key: {}", missing);
                return caps[0].to_string();
            }

            let numbers: Vec<String> = keys
                .iter()
                .filter_map(|key| self.entries.get(*key))
                .map(|entry| {
                    let position = match cited.iter().position(|c| c.key == entry.key) {
                        Some(position) => position,
                        None => {
                            cited.push(entry);
                            cited.len() - 1
                        }
                    };
                    (position + 1).to_string()
                })
                .collect();

            format!("<sup class=\"citation\">[{}]</sup>", numbers.join(", "))
        });

        if cited.is_empty() {
            return replaced.into_owned();
        }

        let mut output = replaced.into_owned();
        output.push_str("\n\n<ol class=\"references\">\n");
        for entry in cited {
            output.push_str(&format!("<li id=\"ref-{}\">{}</li>\n", entry.key, entry.to_html()));
        }
        output.push_str("</ol>\n");
        output
    }
}

/// `Last, First and Other, Name` -> `Last and Other`, or `Last et al.` for three or more.
fn format_authors(authors: &str) -> String {
    let surnames: Vec<&str> = authors
        .split(" and ")
        .map(|author| {
            let author = author.trim();
            match author.split_once(',') {
                Some((last, _)) => last.trim(),
                None => author.rsplit(' ').next().unwrap_or(author),
            }
        })
        .collect();

    match surnames.as_slice() {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [first, ..] => format!("{} et al.", first),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

struct BibParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> BibParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
        }
    }

    fn next_entry(&mut self) -> Option<BibEntry> {
        loop {
            // Anything outside an entry is a comment.
            while self.chars.next_if(|c| *c != '@').is_some() {}
            self.chars.next()?;

            let kind = self.take_while(|c| c.is_alphanumeric()).to_lowercase();
            self.skip_whitespace();
            let close = match self.chars.next()? {
                '{' => '}',
                '(' => ')',
                _ => continue,
            };

            if matches!(kind.as_str(), "comment" | "string" | "preamble") {
                self.skip_group(close);
                continue;
            }

            self.skip_whitespace();
            let key = self.take_while(|c| c != ',' && c != close && !c.is_whitespace());
            self.skip_whitespace();
            if key.is_empty() {
                self.skip_group(close);
                continue;
            }

            let mut fields = BTreeMap::new();
            loop {
                self.skip_whitespace();
                match self.chars.peek().copied() {
                    None => break,
                    Some(c) if c == close => {
                        self.chars.next();
                        break;
                    }
                    Some(',') => {
                        self.chars.next();
                        continue;
                    }
                    Some(_) => {}
                }

                let name = self.take_while(|c| c != '=' && c != ',' && c != close);
                let name = name.trim().to_lowercase();
                if self.chars.next_if_eq(&'=').is_none() {
                    continue;
                }
                self.skip_whitespace();
                let value = self.read_value(close);
                if !name.is_empty() {
                    fields.insert(name, value);
                }
            }

            return Some(BibEntry { kind, key, fields });
        }
    }

    fn read_value(&mut self, close: char) -> String {
        let mut value = String::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek().copied() {
                Some('{') => {
                    self.chars.next();
                    value.push_str(&self.read_braced());
                }
                Some('"') => {
                    self.chars.next();
                    value.push_str(&self.read_quoted());
                }
                Some(c) if c != ',' && c != close => {
                    let word = self.take_while(|c| c != ',' && c != close && c != '#');
                    value.push_str(word.trim());
                }
                _ => break,
            }
            self.skip_whitespace();
            // `#` concatenates parts of a value.
            if self.chars.next_if_eq(&'#').is_none() {
                break;
            }
        }
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Read up to the matching `}`; the opening brace is already consumed.
    fn read_braced(&mut self) -> String {
        let mut depth = 1;
        let mut text = String::new();
        for c in self.chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => text.push(c),
            }
        }
        text
    }

    fn read_quoted(&mut self) -> String {
        let mut depth = 0;
        let mut text = String::new();
        for c in self.chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                '"' if depth == 0 => break,
                _ => text.push(c),
            }
        }
        text
    }

    fn skip_group(&mut self, close: char) {
        let open = if close == '}' { '{' } else { '(' };
        let mut depth = 1;
        for c in self.chars.by_ref() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn take_while(&mut self, mut accept: impl FnMut(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.chars.next_if(|c| accept(*c)) {
            text.push(c);
        }
        text
    }
}
