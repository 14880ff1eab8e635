use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Terminal parse failures. No partial document is returned with any of them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A section header was repeated while duplicates are strict.
    #[error("{file}:{line}: section {name:?} already exists")]
    DuplicateSection {
        name: String,
        /// Source label given to the parser, a path or `<stdin>`.
        file: String,
        line: usize,
    },

    /// An option was repeated within a section while duplicates are strict.
    #[error("{file}:{line}: option {option:?} in section {section:?} already exists")]
    DuplicateOption {
        section: String,
        option: String,
        file: String,
        line: usize,
    },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the typed accessors on [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no section {0:?}")]
    NoSection(String),

    #[error("no option {option:?} in section {section:?}")]
    NoOption { section: String, option: String },

    #[error("option {option:?} in section {section:?} has no value")]
    Absent { section: String, option: String },

    #[error("option {option:?} in section {section:?}: {value:?} is not a valid {expected}")]
    Invalid {
        section: String,
        option: String,
        value: String,
        expected: &'static str,
    },
}
