pub mod composer;
pub mod config;
pub mod error;
pub mod locate;
pub mod mapper;
pub mod parser;

pub use composer::{ComposeOptions, DocblockWriter};
pub use config::LayoutConfig;
pub use error::{DocblockError, ParseError, Result};
pub use locate::{Declaration, DeclarationIndex, DeclarationProvider, SourceScanner};
pub use mapper::SourceMapper;
pub use parser::{DocBlockParser, DocParser, ParsedComment, TagEntry};
