//! Option and result types for vault search.

use serde::{Deserialize, Serialize};

/// Score for a filename equal to the query.
pub const TITLE_EXACT: f64 = 100.0;
/// Score for a filename or frontmatter title containing the query.
pub const TITLE_PARTIAL: f64 = 80.0;
/// Score for a body match in the first fifth of the body.
pub const CONTENT_EARLY: f64 = 60.0;
/// Score for a body match anywhere later.
pub const CONTENT_LATE: f64 = 40.0;

/// Characters of context kept before a match in a snippet.
pub const SNIPPET_BEFORE: usize = 50;
/// Characters kept from the match position onwards in a snippet.
pub const SNIPPET_AFTER: usize = 150;

/// Where a search result matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Title,
    Heading,
    Content,
    Tag,
    Frontmatter,
}

/// A search result for a single note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Path to the matching note (relative to vault root).
    pub path: String,

    /// Note name (filename without extension).
    pub name: String,

    /// Relevance; higher is better.
    pub score: f64,

    /// Context around the match, if it was in the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    pub match_type: MatchType,
}

/// Options for [`search_content`](super::search_content).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Only search notes under this folder.
    pub folder: Option<String>,
    /// Only search notes carrying this tag (nested tags included).
    pub tag: Option<String>,
    pub case_sensitive: bool,
    pub limit: Option<usize>,
}

/// Order for [`list_tags`](super::list_tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSort {
    /// Most used first, ties by name.
    #[default]
    Count,
    /// Alphabetical.
    Name,
}
