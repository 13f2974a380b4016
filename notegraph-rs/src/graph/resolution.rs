//! Link target resolution logic.
//!
//! A link may name a note by any of its identities:
//! 1. Bare filename (case-insensitive)
//! 2. Full vault-relative path
//! 3. A frontmatter alias
//!
//! A trailing markdown extension is ignored on both sides.

use crate::note::{strip_markdown_extension, Note};
use unicode_normalization::UnicodeNormalization;

/// Comparison key for a link target or note identity.
pub fn normalize_key(s: &str) -> String {
    strip_markdown_extension(s.trim()).nfc().collect::<String>().to_lowercase()
}

/// Whether `target` points at `note`.
pub fn resolves_to(target: &str, note: &Note) -> bool {
    let key = normalize_key(target);
    if key.is_empty() {
        return false;
    }

    key == normalize_key(&note.name)
        || key == normalize_key(&note.path)
        || note.aliases().iter().any(|alias| normalize_key(alias) == key)
}

/// Find the first note resolving `target`, in scan order.
pub fn resolve_link_target<'a>(target: &str, notes: &'a [Note]) -> Option<&'a Note> {
    notes.iter().find(|note| resolves_to(target, note))
}

/// Loosely look a note up by title.
///
/// Tiers, first satisfied wins (ties broken by scan order):
/// 1. filename or relative path equals `title`
/// 2. frontmatter `title` equals it
/// 3. an alias equals it
/// 4. filename contains it
pub fn find_by_title<'a>(title: &str, notes: &'a [Note]) -> Option<&'a Note> {
    let key = normalize_key(title);
    if key.is_empty() {
        return None;
    }

    notes
        .iter()
        .find(|n| normalize_key(&n.name) == key || normalize_key(&n.path) == key)
        .or_else(|| {
            notes
                .iter()
                .find(|n| n.title().is_some_and(|t| normalize_key(t) == key))
        })
        .or_else(|| {
            notes
                .iter()
                .find(|n| n.aliases().iter().any(|a| normalize_key(a) == key))
        })
        .or_else(|| notes.iter().find(|n| normalize_key(&n.name).contains(&key)))
}

/// Names of notes whose filename contains `partial`, for "did you mean" hints.
pub fn suggest_titles(partial: &str, notes: &[Note], limit: usize) -> Vec<String> {
    let key = normalize_key(partial);
    if key.is_empty() {
        return Vec::new();
    }

    notes
        .iter()
        .filter(|n| normalize_key(&n.name).contains(&key))
        .map(|n| n.name.clone())
        .take(limit)
        .collect()
}
