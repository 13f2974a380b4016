//! notegraph - the link graph of an Obsidian-style vault.
//!
//! # Overview
//!
//! notegraph parses a folder of markdown notes and answers questions about it:
//! - Frontmatter, tags, links, headings and block anchors per note
//! - Link resolution by filename, path or alias
//! - Backlinks, outlinks, orphans and unlinked mentions
//! - Bounded neighbourhoods for graph views
//! - Full-text, tag and frontmatter search
//! - Note creation, update and deletion
//!
//! Every query rescans the vault; nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use notegraph::Vault;
//!
//! let vault = Vault::open("/path/to/vault").unwrap();
//!
//! for path in vault.orphans().unwrap() {
//!     println!("orphan: {}", path);
//! }
//!
//! let note = vault.get_note(None, Some("meeting notes")).unwrap();
//! println!("Links: {:?}", note.links);
//! println!("Backlinks: {:?}", vault.backlinks(&note.path).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod graph;
pub mod note;
pub mod parser;
pub mod search;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{ErrorKind, Result, VaultError};
pub use frontmatter::{Frontmatter, FrontmatterValue};
pub use note::Note;
pub use search::{MatchType, SearchOptions, SearchResult, TagSort};
pub use types::*;
pub use vault::{ListOptions, SortBy, Vault};
