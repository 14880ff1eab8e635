//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod text;

use anyhow::{anyhow, Result};
use mugen_ini::{Document, Section};

/// A parsed input and the label it was read from.
pub struct Parsed {
    pub source: String,
    pub doc: Document,
}

/// Trait for rendering parsed documents into a specific output format.
pub trait Renderer {
    fn render(&self, files: &[Parsed], filter: &SectionFilter) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}

/// `--section` selection. Empty means everything, defaults included.
pub struct SectionFilter {
    names: Vec<String>,
}

impl SectionFilter {
    pub fn new(names: &[String]) -> Self {
        Self {
            names: names.iter().map(|n| n.trim().to_lowercase()).collect(),
        }
    }

    /// The default section, unless a selection is active or it is empty.
    pub fn defaults<'a>(&self, doc: &'a Document) -> Option<&'a Section> {
        let defaults = doc.defaults();
        (self.names.is_empty() && !defaults.is_empty()).then_some(defaults)
    }

    /// Selected sections in document order.
    pub fn sections<'a>(&'a self, doc: &'a Document) -> impl Iterator<Item = &'a Section> + 'a {
        doc.sections()
            .filter(|name| self.names.is_empty() || self.names.iter().any(|n| n.as_str() == *name))
            .filter_map(|name| doc.section(name))
    }
}
