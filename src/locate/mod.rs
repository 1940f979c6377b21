mod index;
mod scanner;

use std::path::PathBuf;

pub use index::DeclarationIndex;
pub use scanner::SourceScanner;

/// Where a declaration lives, as reported by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: String,
    /// `None` when the provider knows the declaration but not a readable file.
    pub file_path: Option<PathBuf>,
    pub raw_comment: Option<String>,
    /// 1-based line of the declaration keyword.
    pub start_line: usize,
}

/// Metadata provider: resolves an identifier to its declaration location.
pub trait DeclarationProvider {
    /// `None` when the identifier is unknown.
    fn resolve(&self, identifier: &str) -> Option<Declaration>;

    /// Every identifier the provider knows about, in a stable order.
    fn identifiers(&self) -> Vec<String>;
}
