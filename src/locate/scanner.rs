use super::{Declaration, DeclarationProvider};
use crate::config::LayoutConfig;
use crate::error::{DocblockError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

fn namespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*namespace\s+([A-Za-z_\\][A-Za-z0-9_\\]*)\s*[;{]")
            .expect("namespace pattern")
    })
}

fn declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:(?:abstract|final|readonly)\s+)*(?:class|interface|trait|enum)\s+([A-Za-z_][A-Za-z0-9_]*)",
        )
        .expect("declaration pattern")
    })
}

/// Metadata provider that reads declarations straight out of source files.
#[derive(Debug, Clone, Default)]
pub struct SourceScanner {
    config: LayoutConfig,
    declarations: BTreeMap<String, Declaration>,
}

impl SourceScanner {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            declarations: BTreeMap::new(),
        }
    }

    /// Scan a file, or every matching file below a directory.
    pub fn scan_path(&mut self, path: &Path) -> Result<()> {
        if path.is_dir() {
            for file in self.collect_files(path) {
                self.scan_file(&file)?;
            }
            Ok(())
        } else {
            self.scan_file(path)
        }
    }

    pub fn scan_file(&mut self, path: &Path) -> Result<()> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocblockError::io(path, e))?;
        self.scan_source(path, &content);
        Ok(())
    }

    /// Record every declaration found in `content` as living in `path`.
    pub fn scan_source(&mut self, path: &Path, content: &str) {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut namespace: Option<String> = None;

        for (i, line) in lines.iter().enumerate() {
            if let Some(caps) = namespace_re().captures(line) {
                namespace = Some(caps[1].trim_matches('\\').to_string());
                continue;
            }

            let Some(caps) = declaration_re().captures(line) else {
                continue;
            };

            let identifier = match &namespace {
                Some(ns) => format!("{}\\{}", ns, &caps[1]),
                None => caps[1].to_string(),
            };

            if self.declarations.contains_key(&identifier) {
                tracing::warn!(
                    "Duplicate declaration {} in {} (line {}), keeping the first one",
                    identifier,
                    path.display(),
                    i + 1
                );
                continue;
            }

            let decl = Declaration {
                identifier: identifier.clone(),
                file_path: Some(path.to_path_buf()),
                raw_comment: preceding_docblock(&lines, i),
                start_line: i + 1,
            };
            tracing::debug!("Found {} at {}:{}", identifier, path.display(), i + 1);
            self.declarations.insert(identifier, decl);
        }
    }

    fn collect_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.config.accepts_extension(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        files
    }
}

/// The `/** ... */` block sitting directly above line `decl`, allowing only
/// blank lines and attribute groups (possibly spanning lines) in between.
fn preceding_docblock(lines: &[&str], decl: usize) -> Option<String> {
    let mut end = decl;
    while end > 0 {
        let line = lines[end - 1].trim();
        if line.is_empty() {
            end -= 1;
        } else if line.ends_with(']') {
            match attribute_start(lines, end - 1) {
                Some(start) => end = start,
                None => break,
            }
        } else {
            break;
        }
    }

    if end == 0 || !lines[end - 1].trim_end().ends_with("*/") {
        return None;
    }

    let last = end - 1;
    let mut start = last;
    loop {
        let trimmed = lines[start].trim_start();
        if trimmed.starts_with("/**") {
            break;
        }
        if trimmed.starts_with("/*") || start == 0 {
            return None;
        }
        start -= 1;
    }

    let mut block: Vec<&str> = lines[start..=last].to_vec();
    block[0] = block[0].trim_start();
    let tail = block.len() - 1;
    block[tail] = block[tail].trim_end();
    Some(block.join("\n"))
}

/// First line of the attribute group closing on line `last`: walk up until
/// the brackets balance on a line opening with `#[`.
fn attribute_start(lines: &[&str], last: usize) -> Option<usize> {
    let mut depth = 0i32;
    for i in (0..=last).rev() {
        for ch in lines[i].chars().rev() {
            match ch {
                ']' => depth += 1,
                '[' => depth -= 1,
                _ => {}
            }
        }
        if depth < 0 {
            return None;
        }
        if depth == 0 {
            return lines[i].trim_start().starts_with("#[").then_some(i);
        }
    }
    None
}

impl DeclarationProvider for SourceScanner {
    fn resolve(&self, identifier: &str) -> Option<Declaration> {
        let key = identifier.trim_start_matches('\\');
        self.declarations.get(key).cloned()
    }

    fn identifiers(&self) -> Vec<String> {
        self.declarations.keys().cloned().collect()
    }
}
