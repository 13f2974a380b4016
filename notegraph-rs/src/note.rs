//! Note representation and derivation from raw file text.

use crate::error::{Result, VaultError};
use crate::frontmatter::Frontmatter;
use crate::parser::{extract_tags, parse_block_ids, parse_headings, parse_links, parse_note};
use crate::types::{Heading, NoteSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

/// File extensions treated as notes (compared case-insensitively).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A parsed markdown note. Rebuilt from disk on every scan, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Path relative to vault root, `/`-separated (e.g. "proj/My Project.md").
    pub path: String,

    /// Filename without extension. Not unique across the vault.
    pub name: String,

    /// Body text with the frontmatter block stripped.
    pub content: String,

    /// Parsed frontmatter; empty when the note has none.
    pub frontmatter: Frontmatter,

    /// Frontmatter tags then inline tags, without `#`, deduplicated.
    pub tags: Vec<String>,

    /// Raw link targets in document order (unresolved).
    pub links: Vec<String>,

    pub headings: Vec<Heading>,

    /// Block id -> 1-based body line.
    pub blocks: BTreeMap<String, usize>,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Note {
    /// Derive a note from its raw text and file timestamps.
    pub fn from_source(
        path: impl Into<String>,
        text: &str,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        let path = path.into();
        let parsed = parse_note(text);
        let tags = extract_tags(parsed.body, &parsed.frontmatter.tags());
        let links = parse_links(parsed.body)
            .into_iter()
            .map(|link| link.target)
            .collect();

        Self {
            name: note_name(&path).to_string(),
            content: parsed.body.to_string(),
            tags,
            links,
            headings: parse_headings(parsed.body),
            blocks: parse_block_ids(parsed.body),
            frontmatter: parsed.frontmatter,
            path,
            created,
            modified,
        }
    }

    /// Read and parse a note from disk.
    pub fn load(vault_root: &Path, relative_path: &str) -> Result<Self> {
        let full_path = vault_root.join(relative_path);
        let text = std::fs::read_to_string(&full_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VaultError::NoteNotFound(relative_path.to_string()),
            _ => VaultError::Io(e),
        })?;
        let metadata = std::fs::metadata(&full_path)?;
        let (created, modified) = file_times(&metadata);
        Ok(Self::from_source(relative_path, &text, created, modified))
    }

    pub fn title(&self) -> Option<&str> {
        self.frontmatter.title()
    }

    pub fn aliases(&self) -> Vec<String> {
        self.frontmatter.aliases()
    }

    /// Parent folder path ("" for the vault root).
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    /// Whether the note carries `tag` or a tag nested under it
    /// (`research` matches `research/physics`). Case-insensitive.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().trim_start_matches('#').to_lowercase();
        if wanted.is_empty() {
            return false;
        }
        let prefix = format!("{}/", wanted);
        self.tags.iter().any(|t| {
            let t = t.to_lowercase();
            t == wanted || t.starts_with(&prefix)
        })
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            path: self.path.clone(),
            name: self.name.clone(),
            tags: self.tags.clone(),
            created: self.created,
            modified: self.modified,
        }
    }
}

/// Creation and modification time of a file.
///
/// Filesystems without a birth time report the modification time instead.
pub fn file_times(metadata: &std::fs::Metadata) -> (DateTime<Utc>, DateTime<Utc>) {
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    let created = metadata.created().unwrap_or(modified);
    (DateTime::<Utc>::from(created), DateTime::<Utc>::from(modified))
}

/// Whether a path has a markdown extension.
pub fn is_markdown_path(path: &str) -> bool {
    markdown_extension(path).is_some()
}

fn markdown_extension(path: &str) -> Option<&str> {
    let (stem, ext) = path.rsplit_once('.')?;
    if stem.is_empty() || stem.ends_with('/') || ext.contains('/') {
        return None;
    }
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|m| ext.eq_ignore_ascii_case(m))
        .then_some(ext)
}

/// Strip a trailing markdown extension, if any.
pub fn strip_markdown_extension(path: &str) -> &str {
    match markdown_extension(path) {
        Some(ext) => &path[..path.len() - ext.len() - 1],
        None => path,
    }
}

/// Filename without directory or markdown extension.
pub fn note_name(path: &str) -> &str {
    let file = path.rsplit_once('/').map(|(_, f)| f).unwrap_or(path);
    strip_markdown_extension(file)
}

/// Join path components with `/`, whatever the platform separator.
pub fn to_vault_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
