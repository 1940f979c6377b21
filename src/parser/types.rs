use crate::error::{DocblockError, Result};
use serde::Serialize;

/// One `@name value` entry. Duplicate names are legal and kept in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub name: String,
    pub value: String,
}

impl TagEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a `name value...` argument. The name is the first
    /// whitespace-delimited token; the value is the rest, kept verbatim.
    pub fn parse(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        let name_end = arg.find(char::is_whitespace).unwrap_or(arg.len());
        let name = arg[..name_end].trim_start_matches('@');

        if name.is_empty() || !name.chars().all(super::docblock::is_tag_name_char) {
            return Err(DocblockError::InvalidTag(arg.to_string()));
        }

        Ok(Self::new(name, arg[name_end..].trim()))
    }

    /// Single-line `"<name> <value>"` form used inside a rendered block.
    pub fn render(&self) -> String {
        let value = super::text::collapse_line_breaks(self.value.trim());
        if value.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, value)
        }
    }
}

/// Semantic content of a structured comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedComment {
    pub summary: String,
    pub description: String,
    pub tags: Vec<TagEntry>,
}
