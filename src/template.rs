// ABOUTME: Output templating for the slidedeck application
// ABOUTME: Renders the deck context through a minijinja template

use crate::deck::DeckContext;
use crate::errors::Result;
use minijinja::{context, Environment};

/// Built-in template used when no template file is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.html");

const TEMPLATE_NAME: &str = "deck";

/// Produces the final document from a template and the deck context.
pub trait TemplateEngine {
    fn render(&self, template: &str, context: &DeckContext) -> Result<String>;
}

/// Jinja-style templates via minijinja.
///
/// The template sees `settings` (directive name to value, only directives
/// that were present) and `slides`.
#[derive(Debug, Clone, Default)]
pub struct MiniJinjaEngine;

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template: &str, deck: &DeckContext) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, template)?;
        let output = env.get_template(TEMPLATE_NAME)?.render(context! {
            settings => &deck.settings,
            slides => &deck.slides,
        })?;
        Ok(output)
    }
}
