//! Tag parsing (#tag and nested #area/sub).

use crate::parser::code_block::find_code_spans;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Tag: '#' then word chars, '-' or '/'. Must not follow a word char or '&'
// (HTML entities). The regex crate has no lookbehind, so the preceding char
// is consumed by the non-capturing group.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|[^\w&])#([\w/-]+)").unwrap());

/// Parse inline tags from a note body, without the leading `#`, in encounter
/// order. Duplicates are kept.
pub fn parse_tags(body: &str) -> Vec<String> {
    let code = find_code_spans(body);
    let mut tags = Vec::new();

    for cap in TAG.captures_iter(body) {
        let Some(name) = cap.get(1) else { continue };
        let hash_pos = name.start() - 1;

        // Purely numeric is an issue reference, not a tag
        if name.as_str().chars().all(|c| c.is_ascii_digit() || c == '/' || c == '-') {
            continue;
        }
        if code.contains_offset(hash_pos) || is_in_wikilink(body, hash_pos) {
            continue;
        }

        let name = name.as_str().trim_end_matches('/');
        if !name.is_empty() {
            tags.push(name.to_string());
        }
    }

    tags
}

/// Whether a byte offset sits between an unclosed `[[` and its `]]`.
fn is_in_wikilink(text: &str, pos: usize) -> bool {
    let before = &text[..pos];
    match (before.rfind("[["), before.rfind("]]")) {
        (Some(open), Some(close)) if open > close => text[pos..].contains("]]"),
        (Some(_), None) => text[pos..].contains("]]"),
        _ => false,
    }
}

/// Union frontmatter tags with inline body tags.
///
/// Frontmatter tags come first (leading `#` stripped), then inline tags in
/// encounter order. Duplicates are removed.
pub fn extract_tags(body: &str, frontmatter_tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    frontmatter_tags
        .iter()
        .map(|t| t.trim().trim_start_matches('#').to_string())
        .filter(|t| !t.is_empty())
        .chain(parse_tags(body))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
