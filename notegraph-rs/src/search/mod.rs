//! Full-text, tag and frontmatter search across vault notes.

pub mod matcher;
pub mod types;

pub use matcher::{list_tags, make_snippet, search_by_tag, search_content, search_frontmatter};
pub use types::*;
