//! JSON renderer: structured output for tooling integration.
//!
//! A single input renders as one object; several inputs render as an array
//! of objects in input order. Valueless options are `null`.

use crate::render::{Parsed, Renderer, SectionFilter};
use anyhow::{Context, Result};
use mugen_ini::Section;
use serde::Serialize;
use serde_json::{Map, Value};

pub struct JsonRenderer;

#[derive(Serialize)]
struct FileView<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<&'a Section>,
    sections: Map<String, Value>,
}

impl Renderer for JsonRenderer {
    fn render(&self, files: &[Parsed], filter: &SectionFilter) -> Result<String> {
        let views = files
            .iter()
            .map(|file| file_view(file, filter))
            .collect::<Result<Vec<_>>>()?;

        let mut out = match views.as_slice() {
            [single] => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(&views),
        }
        .context("failed to serialize JSON")?;
        out.push('\n');
        Ok(out)
    }
}

fn file_view<'a>(file: &'a Parsed, filter: &SectionFilter) -> Result<FileView<'a>> {
    let mut sections = Map::new();
    for section in filter.sections(&file.doc) {
        let value = serde_json::to_value(section)
            .with_context(|| format!("failed to serialize section [{}]", section.name()))?;
        sections.insert(section.name().to_string(), value);
    }

    Ok(FileView {
        source: &file.source,
        defaults: filter.defaults(&file.doc),
        sections,
    })
}
