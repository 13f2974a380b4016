//! Heading parsing and slug generation.

use crate::parser::code_block::find_code_spans;
use crate::types::Heading;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ATX heading with an optional trailing block anchor that is not part of the text.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})[ \t]+(.+?)(?:[ \t]+\^[a-zA-Z0-9-]+)?[ \t]*$").unwrap()
});

/// Parse all headings. Line numbers are 1-based over every line of `body`.
pub fn parse_headings(body: &str) -> Vec<Heading> {
    let code = find_code_spans(body);
    let mut headings = Vec::new();
    let mut slug_counts: HashMap<String, usize> = HashMap::new();

    for (idx, line) in body.lines().enumerate() {
        let line_no = idx + 1;
        if code.contains_line(line_no) {
            continue;
        }
        let Some(cap) = HEADING.captures(line) else { continue };

        let level = cap[1].len() as u8;
        let text = cap[2].trim().to_string();
        if text.is_empty() {
            continue;
        }
        let slug = unique_slug(slugify(&text), &mut slug_counts);

        headings.push(Heading {
            text,
            level,
            line: line_no,
            slug,
        });
    }

    headings
}

/// Generate an Obsidian-style anchor slug from heading text.
///
/// NFC-normalizes, lowercases, turns whitespace runs into single hyphens and
/// strips everything that is not alphanumeric, `-` or `_`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut last_was_hyphen = false;

    for c in text.nfc() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if (c == '-' || c == '_' || c.is_whitespace()) && !slug.is_empty() && !last_was_hyphen {
            let out = if c == '_' { '_' } else { '-' };
            slug.push(out);
            last_was_hyphen = out == '-';
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn unique_slug(base: String, counts: &mut HashMap<String, usize>) -> String {
    let count = counts.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, *count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_and_lines() {
        let headings = parse_headings("# Heading 1\n\nSome text\n\n## Heading 2");
        assert_eq!(headings.len(), 2);
        assert_eq!((headings[0].text.as_str(), headings[0].level, headings[0].line), ("Heading 1", 1, 1));
        assert_eq!((headings[1].text.as_str(), headings[1].level, headings[1].line), ("Heading 2", 2, 5));
    }

    #[test]
    fn test_all_levels() {
        let headings = parse_headings("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6\n####### H7");
        assert_eq!(headings.len(), 6);
        for (i, h) in headings.iter().enumerate() {
            assert_eq!(h.level as usize, i + 1);
        }
    }

    #[test]
    fn test_block_anchor_not_in_text() {
        let headings = parse_headings("# Heading ^block-id");
        assert_eq!(headings[0].text, "Heading");
    }

    #[test]
    fn test_requires_space_and_line_start() {
        let headings = parse_headings("#notaheading\ntext # not a heading\n# Real heading");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real heading");
        assert_eq!(headings[0].line, 3);
    }

    #[test]
    fn test_heading_in_code_block_skipped() {
        let headings = parse_headings("# Real\n\n```bash\n# comment\n```");
        assert_eq!(headings.len(), 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("  Spaced  "), "spaced");
        assert_eq!(slugify("Under_score"), "under_score");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Ünïcode"), "ünïcode");
    }

    #[test]
    fn test_duplicate_headings_get_unique_slugs() {
        let headings = parse_headings("# Test\n## Test\n### Test");
        let slugs: Vec<_> = headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, vec!["test", "test-1", "test-2"]);
    }
}
