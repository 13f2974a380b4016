//! Parsers for Obsidian-flavoured markdown.
//!
//! Each extractor is an independent single pass over the note body.

pub mod block_id;
pub mod code_block;
pub mod frontmatter;
pub mod heading;
pub mod link;
pub mod tag;

pub use block_id::parse_block_ids;
pub use code_block::{find_code_spans, CodeSpans};
pub use frontmatter::{compose_note, parse_note, serialize_frontmatter, split_frontmatter, ParsedSource};
pub use heading::{parse_headings, slugify};
pub use link::{parse_links, parse_markdown_links, parse_wikilinks};
pub use tag::{extract_tags, parse_tags};
