use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocblockError>;

#[derive(Error, Debug)]
pub enum DocblockError {
    #[error("The declaration [{0}] is not declared.")]
    DeclarationNotFound(String),

    #[error("Declaration [{identifier}] impossible to map: {reason}")]
    UnmappeableSource { identifier: String, reason: String },

    #[error("Comment parse error: {0}")]
    CommentParse(#[from] ParseError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index error: {0}")]
    Index(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

impl DocblockError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unmappeable(identifier: &str, reason: impl std::fmt::Display) -> Self {
        Self::UnmappeableSource {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Rejection raised by a comment parser. Cloneable so a memoized failure can
/// be handed to every accessor that needs parsed content.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}{}", line_suffix(.line))]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" (comment line {})", l),
        None => String::new(),
    }
}
