//! Link resolution and graph-derived views over the note collection.

pub mod queries;
pub mod resolution;
pub mod subgraph;

pub use queries::{backlinks_of, find_orphans, outlinks_of, unlinked_references};
pub use resolution::{find_by_title, normalize_key, resolve_link_target, resolves_to, suggest_titles};
pub use subgraph::{connected_subgraph, graph_data};
