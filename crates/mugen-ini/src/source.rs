//! Loading documents from readers and files.
//!
//! Definition files are usually ASCII, sometimes UTF-8 with a byte order
//! mark, and now and then Latin-1. Bytes are decoded as UTF-8 after dropping
//! the BOM; invalid sequences become U+FFFD instead of failing the load.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::parser::Parser;
use log::debug;
use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

impl Parser {
    /// Read `reader` to the end and parse it. `source` labels errors.
    pub fn parse_reader<R: Read>(&self, mut reader: R, source: &str) -> Result<Document> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|source_err| Error::Io {
                path: PathBuf::from(source),
                source: source_err,
            })?;
        self.parse_str(&decode(&data), source)
    }

    /// Parse the file at `path`, labelling errors with its display form.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("parsing {} ({} bytes)", path.display(), data.len());
        self.parse_str(&decode(&data), &path.display().to_string())
    }
}

fn decode(data: &[u8]) -> Cow<'_, str> {
    let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
    String::from_utf8_lossy(data)
}
