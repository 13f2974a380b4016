//! Block anchor parsing (`^block-id` at the end of a line).

use crate::parser::code_block::find_code_spans;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BLOCK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\^([a-zA-Z0-9-]+)\s*$").unwrap());

/// Map each block id to the 1-based line it anchors.
///
/// A repeated id keeps its last occurrence.
pub fn parse_block_ids(body: &str) -> BTreeMap<String, usize> {
    let code = find_code_spans(body);
    let mut blocks = BTreeMap::new();

    for (idx, line) in body.lines().enumerate() {
        let line_no = idx + 1;
        if code.contains_line(line_no) {
            continue;
        }
        if let Some(cap) = BLOCK_ID.captures(line) {
            blocks.insert(cap[1].to_string(), line_no);
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_block_id() {
        let blocks = parse_block_ids("Some paragraph text ^abc123");
        assert_eq!(blocks.get("abc123"), Some(&1));
    }

    #[test]
    fn test_multiple_block_ids() {
        let blocks = parse_block_ids("Para 1 ^id1\n\nPara 2 ^id2\n\n- Item ^id-3");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks["id1"], 1);
        assert_eq!(blocks["id2"], 3);
        assert_eq!(blocks["id-3"], 5);
    }

    #[test]
    fn test_anchor_on_own_line() {
        let blocks = parse_block_ids("> quote\n\n^quote-id");
        assert_eq!(blocks["quote-id"], 3);
    }

    #[test]
    fn test_must_be_at_line_end() {
        assert!(parse_block_ids("Some ^id text continues").is_empty());
        assert!(parse_block_ids("x^glued").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        assert_eq!(parse_block_ids("Some text ^id   ")["id"], 1);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let blocks = parse_block_ids("first ^dup\nsecond\nthird ^dup");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks["dup"], 3);
    }

    #[test]
    fn test_block_id_in_code_block_skipped() {
        let blocks = parse_block_ids("Real ^real-id\n\n```\ncode ^fake-id\n```");
        assert_eq!(blocks.len(), 1);
        assert!(blocks.contains_key("real-id"));
    }
}
