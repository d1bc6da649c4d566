// ABOUTME: Scaffolding for new slide decks
// ABOUTME: Creates a deck directory holding a starter markdown file, template and bibliography

use crate::errors::{DeckError, Result};
use crate::template::DEFAULT_TEMPLATE;
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const MARKDOWN_FILE: &str = "slides.md";
pub const TEMPLATE_FILE: &str = "template.html";
pub const BIBLIOGRAPHY_FILE: &str = "refs.bib";

/// Starter deck exercising every directive.
pub const SAMPLE_MARKDOWN: &str = r#"% title: Presentation Title
% subtitle: Subtitle
% author: Your Name
% contact: you@example.com
% thankyou: Thank you!
% thankyou_details: Questions?
% favicon: favicon.ico
% bibliography: refs.bib
% footer: git-hash
% footer: git-date  # resolved from the git repository, if there is one

title: Slide with a title
subtitle: and a subtitle

Slides are separated by a line containing `---` with a blank line on
each side. The first block of a slide holds `key: value` metadata.

---

title: Incremental lists
build_lists: true

- Lists on this slide
- are revealed
- one item at a time

---

title: Math and code

Inline math like $e^{i\pi} + 1 = 0$ is supported, and so are
citations from the bibliography [@knuth84].

```rust
fn main() {
    println!("Hello, slides!");
}
```
"#;

/// Bibliography referenced by the starter deck.
pub const SAMPLE_BIBLIOGRAPHY: &str = r#"@article{knuth84,
  author = {Knuth, Donald E.},
  title = {Literate Programming},
  journal = {The Computer Journal},
  year = {1984}
}
"#;

/// Create `dir` with a starter `slides.md`, `template.html` and `refs.bib`.
///
/// Refuses to touch an existing non-empty directory unless `force` is set.
/// Returns the paths written.
pub fn create_deck(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(DeckError::ScaffoldError(format!(
                "Path exists and is not a directory: {:?}",
                dir
            )));
        }
        let non_empty = fs::read_dir(dir)
            .map_err(DeckError::FileReadError)?
            .next()
            .is_some();
        if non_empty && !force {
            return Err(DeckError::ScaffoldError(format!(
                "Directory {:?} is not empty; use --force to overwrite",
                dir
            )));
        }
    }

    utils::ensure_directory_exists(dir)?;

    let files = [
        (dir.join(MARKDOWN_FILE), SAMPLE_MARKDOWN),
        (dir.join(TEMPLATE_FILE), DEFAULT_TEMPLATE),
        (dir.join(BIBLIOGRAPHY_FILE), SAMPLE_BIBLIOGRAPHY),
    ];
    for (path, content) in &files {
        utils::write_text_file(path, content)?;
        info!("Created {:?}", path);
    }

    Ok(files.into_iter().map(|(path, _)| path).collect())
}
