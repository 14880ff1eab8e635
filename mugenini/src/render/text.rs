//! Text renderer: one `[section]` block per section, values debug-quoted.
//!
//! Quoting keeps multi-line values on one line and makes empty values
//! distinguishable from valueless options:
//!
//! ```text
//! [info]
//! name = "\"Kung Fu Man\""
//! intro.storyboard = ""
//! enabled
//! ```

use crate::render::{Parsed, Renderer, SectionFilter};
use anyhow::Result;
use mugen_ini::{OptionValue, Section};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, files: &[Parsed], filter: &SectionFilter) -> Result<String> {
        let mut out = String::new();
        let banner = files.len() > 1;

        for (i, file) in files.iter().enumerate() {
            if banner {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("==> {} <==\n", file.source));
            }

            let sections = filter
                .defaults(&file.doc)
                .into_iter()
                .chain(filter.sections(&file.doc));
            for (n, section) in sections.enumerate() {
                if n > 0 {
                    out.push('\n');
                }
                render_section(&mut out, section);
            }
        }

        Ok(out)
    }
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str(&format!("[{}]\n", section.name()));
    for (name, value) in section.iter() {
        match value {
            OptionValue::Text(text) => out.push_str(&format!("{} = {:?}\n", name, text)),
            OptionValue::Absent => out.push_str(&format!("{}\n", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mugen_ini::Parser;

    fn parsed(source: &str, text: &str) -> Parsed {
        Parsed {
            source: source.to_string(),
            doc: Parser::default().parse_str(text, source).unwrap(),
        }
    }

    #[test]
    fn renders_sections_in_order() {
        let files = [parsed(
            "kfm.def",
            "[Info]\nname = \"Kung Fu Man\"\ndesc = a\n  b\nenabled\n\n[Arcade]\nintro.storyboard =\n",
        )];
        let out = TextRenderer
            .render(&files, &SectionFilter::new(&[]))
            .unwrap();
        assert_eq!(
            out,
            "[info]\nname = \"\\\"Kung Fu Man\\\"\"\ndesc = \"a\\nb\"\nenabled\n\n[arcade]\nintro.storyboard = \"\"\n"
        );
    }

    #[test]
    fn banner_per_file() {
        let files = [parsed("a.def", "[a]\nx = 1\n"), parsed("b.def", "[b]\ny = 2\n")];
        let out = TextRenderer
            .render(&files, &SectionFilter::new(&[]))
            .unwrap();
        assert_eq!(
            out,
            "==> a.def <==\n[a]\nx = \"1\"\n\n==> b.def <==\n[b]\ny = \"2\"\n"
        );
    }

    #[test]
    fn defaults_come_first() {
        let files = [parsed("t.def", "[data]\npower = 3000\n[default]\nlife = 1000\n")];
        let out = TextRenderer
            .render(&files, &SectionFilter::new(&[]))
            .unwrap();
        assert!(out.starts_with("[default]\nlife = \"1000\"\n\n[data]\n"), "{out}");
    }
}
