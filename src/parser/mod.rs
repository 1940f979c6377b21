mod docblock;
mod text;
mod types;

pub use docblock::{DocBlockParser, DocParser};
pub use text::{collapse_line_breaks, strip_gutter};
pub use types::{ParsedComment, TagEntry};
