use super::{Declaration, DeclarationProvider};
use crate::error::{DocblockError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
struct IndexEntry {
    file: Option<PathBuf>,
    #[serde(default)]
    comment: Option<String>,
    start_line: usize,
}

/// Declarations loaded from a JSON manifest of the form
/// `{ "<identifier>": { "file": "...", "comment": "...", "start_line": N } }`.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl DeclarationIndex {
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, IndexEntry> = serde_json::from_str(content)?;

        if let Some((id, _)) = entries.iter().find(|(_, e)| e.start_line == 0) {
            return Err(DocblockError::unmappeable(id, "start_line must be 1 or greater"));
        }

        Ok(Self { entries })
    }

    /// Load a manifest. Relative `file` entries resolve against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocblockError::io(path, e))?;
        let mut index = Self::from_json(&content)?;

        if let Some(base) = path.parent() {
            for entry in index.entries.values_mut() {
                if let Some(file) = entry.file.as_mut() {
                    if file.is_relative() {
                        *file = base.join(&*file);
                    }
                }
            }
        }

        tracing::debug!("Loaded {} declarations from {}", index.entries.len(), path.display());
        Ok(index)
    }
}

impl DeclarationProvider for DeclarationIndex {
    fn resolve(&self, identifier: &str) -> Option<Declaration> {
        self.entries.get(identifier).map(|e| Declaration {
            identifier: identifier.to_string(),
            file_path: e.file.clone(),
            raw_comment: e.comment.clone(),
            start_line: e.start_line,
        })
    }

    fn identifiers(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
