//! Shared types for notegraph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link occurrence found while parsing a note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLink {
    /// Exact text as written (e.g. `![[Note#Part|shown]]`).
    pub raw: String,

    /// The destination reference, before resolution.
    pub target: String,

    /// Optional text shown to the reader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,

    /// Optional heading fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Optional block anchor fragment (without `^`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_ref: Option<String>,

    /// Whether this is an embed (`![[...]]` / `![...](...)`).
    pub is_embed: bool,

    /// Line number where this link appears (1-indexed).
    pub line: usize,
}

/// A heading found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// The heading text (without the # prefix or trailing block anchor).
    pub text: String,

    /// The heading level (1-6).
    pub level: u8,

    /// Line number where this heading appears (1-indexed).
    pub line: usize,

    /// The anchor slug for linking.
    pub slug: String,
}

/// A tag and the number of notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub tag: String,
    pub count: usize,
}

/// A folder in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderInfo {
    /// Path relative to the vault root.
    pub path: String,
    pub name: String,
    /// Markdown files directly inside this folder.
    pub note_count: usize,
    /// Relative paths of immediate child folders.
    pub subfolders: Vec<String>,
}

/// Lightweight listing entry for a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub path: String,
    pub name: String,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Aggregate statistics over the whole vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultStats {
    pub total_notes: usize,
    pub total_folders: usize,
    /// Distinct tags.
    pub total_tags: usize,
    pub total_links: usize,
    pub total_words: usize,
    pub orphan_count: usize,
    pub average_links_per_note: f64,
    /// Most recently modified notes, newest first.
    pub recent_notes: Vec<NoteSummary>,
}

/// A node of the graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// The note path.
    pub id: String,
    /// The note name.
    pub label: String,
    pub tags: Vec<String>,
    pub link_count: usize,
    pub backlink_count: usize,
}

/// A directed edge of the graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Nodes and edges handed to a graph renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
