use super::layout::{natural_cmp, render_block};
use crate::config::LayoutConfig;
use crate::error::{DocblockError, Result};
use crate::locate::DeclarationProvider;
use crate::mapper::SourceMapper;
use crate::parser::{DocBlockParser, DocParser, TagEntry};

/// How a block gets composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Drop everything already in the comment; keep only what was set here.
    pub truncate: bool,
    /// Natural-sort the tags instead of keeping insertion order.
    pub sort: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            truncate: false,
            sort: true,
        }
    }
}

/// Rewrites the documentation comment of one declaration.
///
/// Tags, summary and description accumulate across calls and are consumed by
/// a single `compose`.
pub struct DocblockWriter {
    mapper: SourceMapper,
    wrap_width: usize,
    tags: Vec<TagEntry>,
    summary: Option<String>,
    description: Option<String>,
}

impl DocblockWriter {
    pub fn new(identifier: &str, provider: &dyn DeclarationProvider) -> Result<Self> {
        Self::with_parser(
            identifier,
            provider,
            Box::new(DocBlockParser),
            &LayoutConfig::default(),
        )
    }

    pub fn with_parser(
        identifier: &str,
        provider: &dyn DeclarationProvider,
        parser: Box<dyn DocParser>,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let declaration = provider
            .resolve(identifier)
            .ok_or_else(|| DocblockError::DeclarationNotFound(identifier.to_string()))?;

        let mapper = SourceMapper::load_with(declaration, parser, config)?;
        Ok(Self::from_mapper(mapper, config))
    }

    pub fn from_mapper(mapper: SourceMapper, config: &LayoutConfig) -> Self {
        Self {
            mapper,
            wrap_width: config.wrap_width,
            tags: Vec::new(),
            summary: None,
            description: None,
        }
    }

    pub fn mapper(&self) -> &SourceMapper {
        &self.mapper
    }

    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.push(TagEntry::new(name, value));
    }

    /// Pass the summary without line breaks. Blank input is ignored.
    pub fn set_summary(&mut self, summary: &str) {
        let summary = summary.trim();
        if !summary.is_empty() {
            self.summary = Some(summary.to_string());
        }
    }

    /// Pass the description without line breaks. Blank input is ignored.
    pub fn set_description(&mut self, description: &str) {
        let description = description.trim();
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
    }

    /// The whole file as it would be written.
    pub fn render(&self, options: ComposeOptions) -> Result<String> {
        let (summary, description, mut tags) = if options.truncate {
            (self.summary.clone(), self.description.clone(), Vec::new())
        } else {
            let summary = match &self.summary {
                Some(s) => Some(s.clone()),
                None => self.mapper.summary()?,
            };
            let description = match &self.description {
                Some(d) => Some(d.clone()),
                None => self.mapper.description()?,
            };
            let tags: Vec<String> = self.mapper.tags()?.iter().map(TagEntry::render).collect();
            (summary, description, tags)
        };

        tags.extend(self.tags.iter().map(TagEntry::render));

        if options.sort {
            tags.sort_by(|a, b| natural_cmp(a, b));
        }

        let indent = " ".repeat(self.mapper.indentation());
        let block = render_block(
            &indent,
            summary.as_deref(),
            description.as_deref(),
            &tags,
            self.wrap_width,
        );

        let body = self.mapper.lines_without_comment();
        let at = self.mapper.splice_index();

        let mut lines: Vec<String> = Vec::with_capacity(body.len() + block.len());
        lines.extend_from_slice(&body[..at]);
        lines.extend(block);
        lines.extend_from_slice(&body[at..]);

        Ok(lines.join("\n"))
    }

    /// Compose and write back. `Ok(false)` means the write itself failed.
    pub fn compose(self, truncate: bool, sort: bool) -> Result<bool> {
        self.compose_with(ComposeOptions { truncate, sort })
    }

    pub fn compose_with(self, options: ComposeOptions) -> Result<bool> {
        let content = self.render(options)?;
        let path = self.mapper.file_path();

        tracing::info!(
            "Writing docblock for {} into {} at line {} (truncate={}, sort={})",
            self.mapper.identifier(),
            path.display(),
            self.mapper.effective_start_line(),
            options.truncate,
            options.sort
        );

        match std::fs::write(path, content) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::error!("Failed to write {}: {}", path.display(), e);
                Ok(false)
            }
        }
    }
}
