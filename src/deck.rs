// ABOUTME: Deck assembly for the slidedeck application
// ABOUTME: Runs settings extraction, slide splitting and rendering, then applies the template

use crate::bibliography::Bibliography;
use crate::errors::Result;
use crate::markdown::{postprocess_html, ComrakRenderer, Extension, MarkdownRenderer};
use crate::settings::{parse_deck_settings, DeckSettings, Directive};
use crate::slides::{parse_slide, split_slides, SlideMetadata, SlideUnit};
use crate::template::{MiniJinjaEngine, TemplateEngine, DEFAULT_TEMPLATE};
use crate::utils;
use crate::vcs::{GitRepository, VersionControl};
use log::{debug, info, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A rendered slide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slide {
    pub metadata: SlideMetadata,
    /// Rendered HTML body.
    pub content: String,
}

/// Templates see the metadata keys directly on the slide, alongside
/// `content` and the full `metadata` map.
impl Serialize for Slide {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.metadata {
            if key != "content" && key != "metadata" {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("metadata", &self.metadata)?;
        map.end()
    }
}

/// Everything handed to the template engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckContext {
    pub settings: DeckSettings,
    pub slides: Vec<Slide>,
}

/// Turns a markdown document into a finished deck using pluggable
/// markdown, template and version-control collaborators.
pub struct DeckAssembler<'a> {
    renderer: &'a dyn MarkdownRenderer,
    templates: &'a dyn TemplateEngine,
    vcs: &'a dyn VersionControl,
    base_dir: Option<PathBuf>,
}

impl<'a> DeckAssembler<'a> {
    pub fn new(
        renderer: &'a dyn MarkdownRenderer,
        templates: &'a dyn TemplateEngine,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            renderer,
            templates,
            vcs,
            base_dir: None,
        }
    }

    /// Directory that relative paths in the document (the bibliography) resolve against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Parse the document into deck settings and rendered slides.
    pub fn build_context(&self, markdown: &str) -> Result<DeckContext> {
        let (markdown, settings) = parse_deck_settings(markdown, self.vcs);
        let units = split_slides(&markdown);
        info!("Compiled {} slides.", units.len());

        let extensions = self.extensions(&settings);
        let slides = units
            .iter()
            .map(|unit| self.render_slide(unit, &extensions))
            .collect::<Result<Vec<_>>>()?;

        Ok(DeckContext { settings, slides })
    }

    /// Render the document through `template`.
    pub fn render_slides(&self, markdown: &str, template: &str) -> Result<String> {
        let context = self.build_context(markdown)?;
        self.templates.render(template, &context)
    }

    fn extensions(&self, settings: &DeckSettings) -> Vec<Extension> {
        let mut extensions = vec![Extension::Math, Extension::FencedCode, Extension::Meta];
        if let Some(bibfile) = settings.get(Directive::Bibliography) {
            let path = self.resolve_path(bibfile);
            match Bibliography::load(&path) {
                Ok(bibliography) => {
                    debug!("Loaded {} bibliography entries from {:?}", bibliography.len(), path);
                    extensions.push(Extension::Bibliography(Arc::new(bibliography)));
                }
                Err(e) => warn!("Failed to load bibliography {:?}: {}", path, e),
            }
        }
        extensions
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn render_slide(&self, unit: &SlideUnit, extensions: &[Extension]) -> Result<Slide> {
        let parsed = parse_slide(&unit.text);
        debug!(
            "Slide {}: {} metadata keys",
            unit.index,
            parsed.metadata.len()
        );

        let html = self.renderer.render(&parsed.body, extensions)?;
        let content = postprocess_html(&html, &parsed.metadata);

        Ok(Slide {
            metadata: parsed.metadata,
            content,
        })
    }
}

/// Render a markdown file with the given template file, or the built-in
/// template when `template_path` is `None`.
///
/// Fails with `PathNotFoundError` before any parsing if the markdown file is missing.
pub fn render_file(markdown_path: &Path, template_path: Option<&Path>) -> Result<String> {
    info!("Rendering slides from markdown: {:?}", markdown_path);
    let markdown = utils::read_text_file(markdown_path)?;

    let template = match template_path {
        Some(path) => utils::read_text_file(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let renderer = ComrakRenderer::new();
    let templates = MiniJinjaEngine::new();
    let vcs = GitRepository::for_document(markdown_path);
    let mut assembler = DeckAssembler::new(&renderer, &templates, &vcs);
    if let Some(parent) = markdown_path.parent() {
        assembler = assembler.with_base_dir(parent);
    }

    assembler.render_slides(&markdown, &template)
}

/// Write the rendered deck as UTF-8.
pub fn write_slides(content: &str, output_path: &Path) -> Result<()> {
    info!("Writing slides to file: {:?}", output_path);
    utils::write_text_file(output_path, content)
}

/// Read `markdown_path`, render it and write the result to `output_path`.
pub fn process_slides(
    markdown_path: &Path,
    output_path: &Path,
    template_path: Option<&Path>,
) -> Result<()> {
    let content = render_file(markdown_path, template_path)?;
    write_slides(&content, output_path)
}
