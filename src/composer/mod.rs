mod layout;
mod writer;

pub use layout::{natural_cmp, render_block, wrap_text};
pub use writer::{ComposeOptions, DocblockWriter};
