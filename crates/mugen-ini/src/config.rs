//! Parser configuration: fixed per [`Parser`](crate::Parser) instance.

/// Characters that start a comment, both on their own line and after a value.
pub const DEFAULT_COMMENT_PREFIXES: &[char] = &[';', '#', ':'];

/// Characters separating an option name from its value.
pub const DEFAULT_DELIMITERS: &[char] = &['=', ':'];

/// Name of the section whose options sit beneath every explicit section.
pub const DEFAULT_SECTION: &str = "default";

/// What happens when a section or option is declared twice in one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Reopen repeated sections and let later options overwrite earlier ones.
    #[default]
    Lenient,
    /// Fail with [`Error::DuplicateSection`](crate::Error::DuplicateSection)
    /// or [`Error::DuplicateOption`](crate::Error::DuplicateOption).
    Strict,
}

/// Reusable parser settings.
///
/// Built with the `with_*` setters:
///
/// ```ignore
/// let config = ParserConfig::default()
///     .with_strict(true)
///     .with_delimiters(['=']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    comment_prefixes: Vec<char>,
    inline_comment_prefixes: Vec<char>,
    delimiters: Vec<char>,
    duplicates: DuplicatePolicy,
    default_section: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_prefixes: DEFAULT_COMMENT_PREFIXES.to_vec(),
            inline_comment_prefixes: DEFAULT_COMMENT_PREFIXES.to_vec(),
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            duplicates: DuplicatePolicy::default(),
            default_section: DEFAULT_SECTION.to_string(),
        }
    }
}

impl ParserConfig {
    /// Markers that turn a whole line into a comment when it starts with one.
    #[must_use]
    pub fn with_comment_prefixes(mut self, prefixes: impl IntoIterator<Item = char>) -> Self {
        self.comment_prefixes = prefixes.into_iter().collect();
        self
    }

    /// Markers that start a trailing comment when at column 0 or after whitespace.
    #[must_use]
    pub fn with_inline_comment_prefixes(
        mut self,
        prefixes: impl IntoIterator<Item = char>,
    ) -> Self {
        self.inline_comment_prefixes = prefixes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_delimiters(mut self, delimiters: impl IntoIterator<Item = char>) -> Self {
        self.delimiters = delimiters.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Shorthand for [`with_duplicates`](Self::with_duplicates).
    #[must_use]
    pub fn with_strict(self, strict: bool) -> Self {
        self.with_duplicates(if strict {
            DuplicatePolicy::Strict
        } else {
            DuplicatePolicy::Lenient
        })
    }

    /// The name is case-folded so it compares equal to folded header names.
    #[must_use]
    pub fn with_default_section(mut self, name: &str) -> Self {
        self.default_section = name.trim().to_lowercase();
        self
    }

    pub fn comment_prefixes(&self) -> &[char] {
        &self.comment_prefixes
    }

    pub fn inline_comment_prefixes(&self) -> &[char] {
        &self.inline_comment_prefixes
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn is_strict(&self) -> bool {
        self.duplicates == DuplicatePolicy::Strict
    }

    pub fn default_section(&self) -> &str {
        &self.default_section
    }
}
