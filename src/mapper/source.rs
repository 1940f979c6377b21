use super::lines::{decorator_lines, locate_comment_range, measure_indentation};
use crate::config::LayoutConfig;
use crate::error::{DocblockError, ParseError, Result};
use crate::locate::Declaration;
use crate::parser::{collapse_line_breaks, DocBlockParser, DocParser, ParsedComment, TagEntry};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Structural view of one declaration's source file.
///
/// Holds the file as a line buffer (index 0 is line 1) and answers where the
/// declaration really starts, how far it is indented, what its current
/// comment says and what the file looks like without that comment.
pub struct SourceMapper {
    declaration: Declaration,
    file_path: PathBuf,
    lines: Vec<String>,
    tab_width: usize,
    parser: Box<dyn DocParser>,
    parsed: OnceCell<std::result::Result<ParsedComment, ParseError>>,
    comment_range: Option<Range<usize>>,
}

impl SourceMapper {
    pub fn load(declaration: Declaration) -> Result<Self> {
        Self::load_with(declaration, Box::new(DocBlockParser), &LayoutConfig::default())
    }

    pub fn load_with(
        declaration: Declaration,
        parser: Box<dyn DocParser>,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let file_path = declaration.file_path.clone().ok_or_else(|| {
            DocblockError::unmappeable(&declaration.identifier, "no source file")
        })?;

        let content = std::fs::read_to_string(&file_path).map_err(|e| {
            DocblockError::unmappeable(
                &declaration.identifier,
                format!("{}: {}", file_path.display(), e),
            )
        })?;
        Self::from_source(declaration, file_path, &content, parser, config)
    }

    /// Build a mapper over already-loaded `content`.
    pub fn from_source(
        declaration: Declaration,
        file_path: PathBuf,
        content: &str,
        parser: Box<dyn DocParser>,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();

        if declaration.start_line == 0 || declaration.start_line > lines.len() {
            return Err(DocblockError::unmappeable(
                &declaration.identifier,
                format!(
                    "start line {} outside of {} ({} lines)",
                    declaration.start_line,
                    file_path.display(),
                    lines.len()
                ),
            ));
        }

        let comment_range = declaration
            .raw_comment
            .as_deref()
            .and_then(|raw| locate_comment_range(&lines, raw, declaration.start_line - 1));

        if declaration.raw_comment.is_some() && comment_range.is_none() {
            tracing::warn!(
                "Comment of {} not found as a block above line {}, stripping by content",
                declaration.identifier,
                declaration.start_line
            );
        }

        tracing::debug!(
            "Loaded {} ({} lines), {} declared at line {}",
            file_path.display(),
            lines.len(),
            declaration.identifier,
            declaration.start_line
        );

        Ok(Self {
            declaration,
            file_path,
            lines,
            tab_width: config.tab_width,
            parser,
            parsed: OnceCell::new(),
            comment_range,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.declaration.identifier
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Declaration line as reported by the provider (1-based).
    pub fn start_line(&self) -> usize {
        self.declaration.start_line
    }

    pub fn has_comment(&self) -> bool {
        self.declaration.raw_comment.is_some()
    }

    pub fn raw_comment(&self) -> Option<&str> {
        self.declaration.raw_comment.as_deref()
    }

    /// Parsed comment, computed on first use. `None` without a comment.
    pub fn parsed(&self) -> Result<Option<&ParsedComment>> {
        let Some(raw) = self.raw_comment() else {
            return Ok(None);
        };

        match self.parsed.get_or_init(|| self.parser.parse(raw)) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(e.clone().into()),
        }
    }

    pub fn tags(&self) -> Result<Vec<TagEntry>> {
        Ok(self.parsed()?.map(|p| p.tags.clone()).unwrap_or_default())
    }

    pub fn summary(&self) -> Result<Option<String>> {
        Ok(self.parsed()?.and_then(|p| single_line(&p.summary)))
    }

    pub fn description(&self) -> Result<Option<String>> {
        Ok(self.parsed()?.and_then(|p| single_line(&p.description)))
    }

    /// Columns of leading whitespace on the effective declaration line.
    pub fn indentation(&self) -> usize {
        self.lines
            .get(self.effective_start_line() - 1)
            .map(|line| measure_indentation(line, self.tab_width))
            .unwrap_or(0)
    }

    /// Line (1-based) a new comment goes in front of. When attribute lines
    /// appear in the header, this is the earliest of them.
    pub fn effective_start_line(&self) -> usize {
        let end = (self.declaration.start_line + 1).min(self.lines.len());

        match decorator_lines(&self.lines[..end]).first() {
            Some(&first) => first + 1,
            None => self.declaration.start_line,
        }
    }

    /// The line buffer with the old comment removed. Identity when the
    /// declaration has no comment.
    pub fn lines_without_comment(&self) -> Vec<String> {
        let stripped = self.stripped_indices();

        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| !stripped.contains(i))
            .map(|(_, l)| l.clone())
            .collect()
    }

    /// Position of the effective start line inside `lines_without_comment()`.
    pub fn splice_index(&self) -> usize {
        let at = self.effective_start_line() - 1;
        at - self.stripped_indices().range(..at).count()
    }

    fn stripped_indices(&self) -> BTreeSet<usize> {
        let Some(raw) = self.raw_comment() else {
            return BTreeSet::new();
        };

        if let Some(range) = &self.comment_range {
            return range.clone().collect();
        }

        let comment: Vec<&str> = raw
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let limit = self.declaration.start_line - 1;

        self.lines
            .iter()
            .enumerate()
            .take(limit)
            .filter(|(_, line)| comment.contains(&line.trim()))
            .map(|(i, _)| i)
            .collect()
    }
}

fn single_line(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(collapse_line_breaks(text))
    }
}
