//! Document parser: single forward pass over lines.
//!
//! Each line is reduced to its effective content (comment stripped, trimmed)
//! and then handled in this order:
//!
//! 1. blank: extends an open value with an empty fragment unless the line
//!    held a comment
//! 2. deeper indented than the open option: continuation fragment
//! 3. `[header]`: opens (or reopens) a section, closes the open option;
//!    an empty `[ ]` closes the section instead
//! 4. anything before the first section: discarded
//! 5. `name = value` / `name`: registers an option
//!
//! Malformed lines are logged at debug level and skipped. Fragments are
//! joined once, after the last line.

use crate::comment::strip_comment;
use crate::config::ParserConfig;
use crate::document::{Document, OptionValue, Section};
use crate::error::{Error, Result};
use crate::line::{classify, indentation, LineKind};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::HashSet;

/// Collected fragments, or `None` for a valueless option.
type Pending = Option<Vec<String>>;

type Table = IndexMap<String, Pending>;

/// Parses line sequences into [`Document`]s.
///
/// Holds only configuration; every call starts from an empty document, so a
/// single parser can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `lines` (line endings already removed).
    ///
    /// `source` and `start_line` only label errors and log messages.
    pub fn parse_lines<I>(&self, lines: I, source: &str, start_line: usize) -> Result<Document>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut state = ScanState::new(&self.config, source);
        for (offset, line) in lines.into_iter().enumerate() {
            state.process_line(start_line + offset, line.as_ref())?;
        }
        Ok(state.finish())
    }

    /// Parse an in-memory buffer; `\n` and `\r\n` both end a line.
    pub fn parse_str(&self, text: &str, source: &str) -> Result<Document> {
        self.parse_lines(text.lines(), source, 1)
    }
}

/// Key used to detect repeats within one parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ElementKey {
    Section(String),
    Option(String, String),
}

/// Scratch state of one parse call.
struct ScanState<'a> {
    config: &'a ParserConfig,
    file: &'a str,

    defaults: Table,
    sections: IndexMap<String, Table>,
    seen: HashSet<ElementKey>,

    current_section: Option<String>,
    current_option: Option<String>,
    indent_threshold: usize,
    seen_header: bool,
}

impl<'a> ScanState<'a> {
    fn new(config: &'a ParserConfig, file: &'a str) -> Self {
        Self {
            config,
            file,
            defaults: Table::new(),
            sections: IndexMap::new(),
            seen: HashSet::new(),
            current_section: None,
            current_option: None,
            indent_threshold: usize::MAX,
            seen_header: false,
        }
    }

    fn process_line(&mut self, lineno: usize, line: &str) -> Result<()> {
        let stripped = strip_comment(
            line,
            self.config.comment_prefixes(),
            self.config.inline_comment_prefixes(),
        );
        let content = stripped.content;

        if content.is_empty() {
            if !stripped.commented {
                if let Some(fragments) = self.open_value_mut() {
                    fragments.push(String::new());
                }
            }
            return Ok(());
        }

        let indent = indentation(line);
        if indent > self.indent_threshold {
            if let Some(fragments) = self.open_value_mut() {
                fragments.push(content.to_string());
                return Ok(());
            }
        }

        match classify(content, self.config.delimiters()) {
            LineKind::Header(name) => self.open_section(lineno, name)?,
            LineKind::EmptyHeader => {
                debug!("{}:{}: skipping empty section header", self.file, lineno);
                self.close_section();
            }
            _ if self.current_section.is_none() => {
                if self.seen_header {
                    debug!("{}:{}: skipping line outside any section", self.file, lineno);
                } else {
                    debug!("{}:{}: skipping preamble", self.file, lineno);
                }
                self.close_section();
            }
            LineKind::Option { name, value } => self.add_option(lineno, indent, name, value)?,
            LineKind::Malformed => {
                debug!("{}:{}: skipping malformed line {:?}", self.file, lineno, content);
            }
        }

        Ok(())
    }

    fn open_section(&mut self, lineno: usize, name: String) -> Result<()> {
        self.seen_header = true;
        self.current_option = None;

        if name != self.config.default_section() {
            let first = self.seen.insert(ElementKey::Section(name.clone()));
            if !first && self.config.is_strict() {
                return Err(Error::DuplicateSection {
                    name,
                    file: self.file.to_string(),
                    line: lineno,
                });
            }
            self.sections.entry(name.clone()).or_default();
        }

        trace!("{}:{}: section {:?}", self.file, lineno, name);
        self.current_section = Some(name);
        Ok(())
    }

    /// Lines up to the next valid header belong to no section.
    fn close_section(&mut self) {
        self.current_section = None;
        self.current_option = None;
        self.indent_threshold = usize::MAX;
    }

    fn add_option(
        &mut self,
        lineno: usize,
        indent: usize,
        name: String,
        value: Option<&str>,
    ) -> Result<()> {
        let Some(section) = self.current_section.clone() else {
            return Ok(());
        };

        let first = self
            .seen
            .insert(ElementKey::Option(section.clone(), name.clone()));
        if !first && self.config.is_strict() {
            return Err(Error::DuplicateOption {
                section,
                option: name,
                file: self.file.to_string(),
                line: lineno,
            });
        }

        // a repeated option replaces its fragments but keeps its position
        let pending = value.map(|v| vec![v.to_string()]);
        self.table_mut(&section).insert(name.clone(), pending);

        self.current_option = Some(name);
        self.indent_threshold = indent;
        Ok(())
    }

    fn table_mut(&mut self, section: &str) -> &mut Table {
        if section == self.config.default_section() {
            &mut self.defaults
        } else {
            self.sections.entry(section.to_string()).or_default()
        }
    }

    /// Fragments of the open option, if it has a value.
    fn open_value_mut(&mut self) -> Option<&mut Vec<String>> {
        let section = self.current_section.as_deref()?;
        let option = self.current_option.as_deref()?;
        let table = if section == self.config.default_section() {
            &mut self.defaults
        } else {
            self.sections.get_mut(section)?
        };
        table.get_mut(option)?.as_mut()
    }

    fn finish(self) -> Document {
        let defaults = finish_table(self.config.default_section().to_string(), self.defaults);
        let sections = self
            .sections
            .into_iter()
            .map(|(name, table)| (name.clone(), finish_table(name, table)))
            .collect();
        Document::new(defaults, sections)
    }
}

fn finish_table(name: String, table: Table) -> Section {
    let options = table
        .into_iter()
        .map(|(option, pending)| {
            let value = match pending {
                Some(fragments) => OptionValue::Text(fragments.join("\n").trim_end().to_string()),
                None => OptionValue::Absent,
            };
            (option, value)
        })
        .collect();
    Section::new(name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;

    fn parse(text: &str) -> Document {
        Parser::default().parse_str(text, "test.def").unwrap()
    }

    fn strict(text: &str) -> Result<Document> {
        Parser::new(ParserConfig::default().with_strict(true)).parse_str(text, "test.def")
    }

    #[test]
    fn section_names_are_case_folded() {
        let doc = parse("[Data]\na = 1\n[data]\nb = 2\n[DATA]\nc = 3\n");
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["data"]);
        let data = doc.section("data").unwrap();
        assert_eq!(data.get("a"), Some("1"));
        assert_eq!(data.get("b"), Some("2"));
        assert_eq!(data.get("c"), Some("3"));
    }

    #[test]
    fn header_tolerates_spaces() {
        assert_eq!(parse("[  data  ]\nlife = 1000\n"), parse("[data]\nlife = 1000\n"));
    }

    #[test]
    fn option_names_are_folded() {
        let doc = parse("[Size]\nXScale = 1\nYscale  = 1\n");
        assert_eq!(
            doc.section("size").unwrap().iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["xscale", "yscale"]
        );
    }

    #[test]
    fn inline_comment_respects_word_boundary() {
        let doc = parse("[data]\nvalue = a;b\nother = a ;comment\n");
        assert_eq!(doc.get("data", "value"), Some("a;b"));
        assert_eq!(doc.get("data", "other"), Some("a"));
    }

    #[test]
    fn multiline_continuation() {
        let doc = parse("[info]\ndesc = first line\n  second line\n  third line\n");
        assert_eq!(
            doc.get("info", "desc"),
            Some("first line\nsecond line\nthird line")
        );
    }

    #[test]
    fn blank_line_inside_continuation() {
        let doc = parse("[info]\ndesc = first\n  second\n\n  third\nnext = 1\n");
        assert_eq!(doc.get("info", "desc"), Some("first\nsecond\n\nthird"));
        assert_eq!(doc.get("info", "next"), Some("1"));
    }

    #[test]
    fn comment_line_does_not_extend_value() {
        let doc = parse("[info]\ndesc = first\n; note\n  second\n");
        assert_eq!(doc.get("info", "desc"), Some("first\nsecond"));
    }

    #[test]
    fn trailing_blank_fragments_are_dropped() {
        let doc = parse("[info]\ndesc = first\n  second\n\n\n[next]\n");
        assert_eq!(doc.get("info", "desc"), Some("first\nsecond"));
    }

    #[test]
    fn continuation_strips_comments() {
        let doc = parse("[info]\ndesc = a\n    b ; trailing\n");
        assert_eq!(doc.get("info", "desc"), Some("a\nb"));
    }

    #[test]
    fn continuation_follows_option_indent() {
        let doc = parse("[info]\n  a = 1\n  b = 2\n    more\n");
        assert_eq!(doc.get("info", "a"), Some("1"));
        assert_eq!(doc.get("info", "b"), Some("2\nmore"));
    }

    #[test]
    fn header_closes_continuation() {
        let doc = parse("[a]\nx = 1\n  [b]\n  y = 2\n");
        assert_eq!(doc.get("a", "x"), Some("1\n[b]\ny = 2"));

        let doc = parse("[a]\nx = 1\n[b]\n  y = 2\n");
        assert_eq!(doc.get("a", "x"), Some("1"));
        assert_eq!(doc.get("b", "y"), Some("2"));
    }

    #[test]
    fn valueless_option() {
        let doc = parse("[data]\nenabled\n");
        assert_eq!(doc.value("data", "enabled"), Some(&OptionValue::Absent));
    }

    #[test]
    fn valueless_option_is_not_continued() {
        let doc = parse("[data]\nflag\n   life = 1000\n\n");
        assert_eq!(doc.value("data", "flag"), Some(&OptionValue::Absent));
        assert_eq!(doc.get("data", "life"), Some("1000"));
    }

    #[test]
    fn spaced_colon_makes_a_flag() {
        let doc = parse("[data]\nlife : 1000\n");
        assert_eq!(doc.value("data", "life"), Some(&OptionValue::Absent));
    }

    #[test]
    fn colon_delimiter() {
        let doc = parse("[data]\nlife: 1000\n");
        assert_eq!(doc.get("data", "life"), Some("1000"));
    }

    #[test]
    fn duplicate_option_lenient_last_wins() {
        let doc = parse("[data]\nx = 1\ny = 0\nx = 2\n");
        let data = doc.section("data").unwrap();
        assert_eq!(data.get("x"), Some("2"));
        assert_eq!(data.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["x", "y"]);
    }

    #[test]
    fn duplicate_option_discards_old_continuation() {
        let doc = parse("[data]\nx = 1\n  more\nx = 2\n");
        assert_eq!(doc.get("data", "x"), Some("2"));
    }

    #[test]
    fn duplicate_option_strict() {
        let err = strict("[data]\nx = 1\nx = 2\n").unwrap_err();
        match err {
            Error::DuplicateOption {
                section,
                option,
                file,
                line,
            } => {
                assert_eq!(section, "data");
                assert_eq!(option, "x");
                assert_eq!(file, "test.def");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_section_strict() {
        let err = Parser::new(ParserConfig::default().with_duplicates(DuplicatePolicy::Strict))
            .parse_str("[a]\nx = 1\n[b]\n[a]\n", "test.def")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSection { ref name, line: 4, .. } if name == "a"));
    }

    #[test]
    fn duplicate_section_lenient_merges() {
        let doc = parse("[a]\nx = 1\n[b]\ny = 2\n[A]\nx = 3\nz = 4\n");
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(doc.get("a", "x"), Some("3"));
        assert_eq!(doc.get("a", "z"), Some("4"));
    }

    #[test]
    fn strict_allows_distinct_names() {
        let doc = strict("[a]\nx = 1\ny = 2\n[b]\nx = 1\n").unwrap();
        assert_eq!(doc.get("b", "x"), Some("1"));
    }

    #[test]
    fn malformed_line_is_skipped() {
        let doc = parse("[data]\nlife = 1000\n=== broken ===\npower = 3000\n");
        let data = doc.section("data").unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("power"), Some("3000"));
    }

    #[test]
    fn malformed_line_keeps_open_option() {
        let doc = parse("[data]\nlife = 1000\n= stray\n  more\n");
        assert_eq!(doc.get("data", "life"), Some("1000\nmore"));
    }

    #[test]
    fn empty_header_closes_the_open_section() {
        let doc = parse(
            "[data]\nlife = 1000\n[   ]\nstray = 1\n[]\nmore = 2\n[info]\nname = kfm\n",
        );
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["data", "info"]);
        assert_eq!(doc.get("data", "life"), Some("1000"));
        assert!(!doc.has_option("data", "stray"));
        assert!(!doc.has_option("data", "more"));
        assert_eq!(doc.get("info", "name"), Some("kfm"));
    }

    #[test]
    fn empty_header_ends_the_open_value() {
        let doc = parse("[data]\ndesc = first\n[ ]\n  second\n");
        assert_eq!(doc.get("data", "desc"), Some("first"));
    }

    #[test]
    fn preamble_is_discarded() {
        let doc = parse("Kung Fu Man by Elecbyte\nversion = 1.0\n=====\n\n[info]\nname = kfm\n");
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["info"]);
        assert_eq!(doc.section("info").unwrap().len(), 1);
        assert!(doc.defaults().is_empty());
    }

    #[test]
    fn indented_preamble_is_not_a_continuation() {
        let doc = parse("credits\n    more credits\n[info]\n");
        assert!(doc.section("info").unwrap().is_empty());
    }

    #[test]
    fn default_section_layers_beneath() {
        let doc = parse("[Default]\nlife = 1000\n[data]\npower = 3000\n[default]\nattack = 100\n");
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["data"]);
        assert_eq!(doc.get("data", "life"), Some("1000"));
        assert_eq!(doc.get("data", "attack"), Some("100"));
        assert_eq!(doc.defaults().len(), 2);
    }

    #[test]
    fn repeated_default_header_is_not_a_duplicate() {
        let doc = strict("[default]\na = 1\n[default]\nb = 2\n").unwrap();
        assert_eq!(doc.defaults().len(), 2);
        assert!(strict("[default]\na = 1\n[default]\na = 2\n").is_err());
    }

    #[test]
    fn custom_default_section() {
        let parser = Parser::new(ParserConfig::default().with_default_section("Common"));
        let doc = parser.parse_str("[common]\nx = 1\n[default]\ny = 2\n", "t").unwrap();
        assert_eq!(doc.sections().collect::<Vec<_>>(), ["default"]);
        assert_eq!(doc.get("default", "x"), Some("1"));
    }

    #[test]
    fn empty_value_is_kept() {
        let doc = parse("[arcade]\nintro.storyboard =\nending.storyboard = ;none\n");
        assert_eq!(doc.get("arcade", "intro.storyboard"), Some(""));
        assert_eq!(doc.get("arcade", "ending.storyboard"), Some(""));
    }

    #[test]
    fn start_line_offsets_errors() {
        let err = Parser::new(ParserConfig::default().with_strict(true))
            .parse_lines(["[a]", "[a]"], "inline", 10)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSection { line: 11, .. }));
    }

    #[test]
    fn crlf_input() {
        let doc = parse("[info]\r\nname = kfm\r\ndesc = a\r\n  b\r\n");
        assert_eq!(doc.get("info", "name"), Some("kfm"));
        assert_eq!(doc.get("info", "desc"), Some("a\nb"));
    }

    #[test]
    fn reparse_is_idempotent() {
        let text = "[info]\nname = kfm\ndesc = a\n  b\nflag\n[data]\nlife = 1000\n";
        let parser = Parser::default();
        assert_eq!(
            parser.parse_str(text, "a").unwrap(),
            parser.parse_str(text, "b").unwrap()
        );
    }

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
