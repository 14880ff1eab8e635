//! Parser for the INI dialect used by MUGEN definition files.
//!
//! Character, stage and system definitions (`.def`, `.cns`, `.cmd`, ...) are
//! written in a loose INI flavour:
//!
//! - `;`, `#` and `:` all start comments, on their own line or after a value
//! - section headers tolerate spaces inside the brackets and are case-folded
//! - option values continue on deeper-indented lines
//! - options may be declared without a value
//! - malformed lines are skipped instead of aborting the parse
//!
//! The core consumes an ordered sequence of lines and produces a [`Document`].
//! Loading from files or readers is provided on top of that by
//! [`Parser::parse_path`] and [`Parser::parse_reader`].
//!
//! ```ignore
//! use mugen_ini::Parser;
//!
//! let doc = Parser::default().parse_str("[Info]\nname = \"Kung Fu Man\"\n", "kfm.def")?;
//! assert_eq!(doc.get("info", "name"), Some("\"Kung Fu Man\""));
//! ```

mod comment;
mod config;
mod document;
mod error;
mod line;
mod parser;
mod source;

pub use config::{DuplicatePolicy, ParserConfig};
pub use document::{Document, OptionValue, Section};
pub use error::{Error, LookupError, Result};
pub use parser::Parser;
