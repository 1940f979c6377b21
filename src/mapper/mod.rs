mod lines;
mod source;

pub use lines::{decorator_lines, locate_comment_range, measure_indentation};
pub use source::SourceMapper;
