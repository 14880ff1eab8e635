//! Parsed document: sections of options, in first-seen order.
//!
//! A [`Document`] is an immutable snapshot handed out by the parser. Lookups
//! fold the requested names the same way the parser folds headers and option
//! names, and fall back to the default section when an explicit section does
//! not declare an option.

use crate::error::LookupError;
use crate::line::fold;
use indexmap::IndexMap;

/// Value of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum OptionValue {
    /// Declared without a delimiter, e.g. a lone `enabled`.
    Absent,
    /// Declaration line plus continuation lines, joined with `\n`.
    Text(String),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Text(text) => Some(text),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A named group of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    options: IndexMap<String, OptionValue>,
}

impl Section {
    pub(crate) fn new(name: String, options: IndexMap<String, OptionValue>) -> Self {
        Self { name, options }
    }

    /// Case-folded section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, option: &str) -> Option<&OptionValue> {
        self.options.get(&fold(option))
    }

    /// Text of `option`; `None` when missing or valueless.
    pub fn get(&self, option: &str) -> Option<&str> {
        self.value(option).and_then(OptionValue::as_str)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(&fold(option))
    }

    /// Options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Section {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.options, serializer)
    }
}

/// Parsed definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl Document {
    pub(crate) fn new(defaults: Section, sections: IndexMap<String, Section>) -> Self {
        Self { defaults, sections }
    }

    /// Options declared under the default-section header.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Explicit section names in first-seen order. The default section is not listed.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&fold(name))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(&fold(name))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.is_empty()
    }

    /// Whether `option` is visible from `section`, counting defaults.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.lookup(section, option).is_ok()
    }

    /// Resolve `option` in `section`, then in the default section.
    ///
    /// Naming the default section itself only consults the defaults.
    pub fn lookup(&self, section: &str, option: &str) -> Result<&OptionValue, LookupError> {
        let section = fold(section);
        let option = fold(option);

        let explicit = if section == self.defaults.name {
            None
        } else {
            Some(
                self.sections
                    .get(&section)
                    .ok_or_else(|| LookupError::NoSection(section.clone()))?,
            )
        };

        explicit
            .and_then(|s| s.options.get(&option))
            .or_else(|| self.defaults.options.get(&option))
            .ok_or(LookupError::NoOption { section, option })
    }

    pub fn value(&self, section: &str, option: &str) -> Option<&OptionValue> {
        self.lookup(section, option).ok()
    }

    /// Text of an option; `None` when missing or valueless.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.value(section, option).and_then(OptionValue::as_str)
    }

    pub fn get_int(&self, section: &str, option: &str) -> Result<i64, LookupError> {
        self.get_parsed(section, option, "integer", |text| text.parse().ok())
    }

    pub fn get_float(&self, section: &str, option: &str) -> Result<f64, LookupError> {
        self.get_parsed(section, option, "float", |text| text.parse().ok())
    }

    /// Accepts `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`, in any case.
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool, LookupError> {
        self.get_parsed(section, option, "boolean", |text| {
            match text.to_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Some(true),
                "0" | "no" | "false" | "off" => Some(false),
                _ => None,
            }
        })
    }

    /// Default options overlaid with the section's own, defaults first.
    pub fn items(&self, section: &str) -> Result<Vec<(&str, &OptionValue)>, LookupError> {
        let name = fold(section);
        let mut merged: IndexMap<&str, &OptionValue> = self.defaults.iter().collect();

        if name != self.defaults.name {
            let own = self
                .sections
                .get(&name)
                .ok_or(LookupError::NoSection(name))?;
            merged.extend(own.iter());
        }

        Ok(merged.into_iter().collect())
    }

    fn get_parsed<T>(
        &self,
        section: &str,
        option: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, LookupError> {
        let text = match self.lookup(section, option)? {
            OptionValue::Text(text) => text.trim(),
            OptionValue::Absent => {
                return Err(LookupError::Absent {
                    section: fold(section),
                    option: fold(option),
                })
            }
        };

        parse(text).ok_or_else(|| LookupError::Invalid {
            section: fold(section),
            option: fold(option),
            value: text.to_string(),
            expected,
        })
    }
}
