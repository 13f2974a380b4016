//! Wikilink, embed and markdown-link parsing.

use crate::parser::code_block::{find_code_spans, CodeSpans};
use crate::types::ParsedLink;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// (!)?                      - embed marker (group 1)
// \[\[                      - opening [[
// ([^\]\|#\^]+)             - target (group 2), stops at ] | # ^
// (?:#([^\]\|\^]+))?        - heading (group 3)
// (?:#?\^([^\]\|]+))?       - block reference, `^id` or `#^id` (group 4)
// (?:\|([^\]]+))?           - display text (group 5)
// \]\]                      - closing ]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#\^]+)(?:#([^\]\|\^]+))?(?:#?\^([^\]\|]+))?(?:\|([^\]]+))?\]\]")
        .unwrap()
});

// [text](target) or [text](<target with spaces>), optional "title".
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\]]*)\]\((?:<([^>]+)>|([^)\s]+))(?:\s+"[^"]*")?\)"#).unwrap()
});

// Any URI scheme (http:, https:, mailto:, obsidian:, ...).
static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").unwrap());

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

fn non_empty(s: Option<regex::Match<'_>>) -> Option<String> {
    s.map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn wikilinks_with_ranges(body: &str, code: &CodeSpans) -> Vec<(Range<usize>, ParsedLink)> {
    let mut links = Vec::new();

    for cap in WIKILINK.captures_iter(body) {
        let Some(whole) = cap.get(0) else { continue };
        if code.contains_offset(whole.start()) {
            continue;
        }
        let target = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if target.is_empty() {
            continue;
        }

        links.push((
            whole.range(),
            ParsedLink {
                raw: whole.as_str().to_string(),
                target: target.to_string(),
                display_text: non_empty(cap.get(5)),
                heading: non_empty(cap.get(3)),
                block_ref: non_empty(cap.get(4)),
                is_embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
                line: line_of(body, whole.start()),
            },
        ));
    }

    links
}

fn markdown_links_with_ranges(body: &str, code: &CodeSpans) -> Vec<(Range<usize>, ParsedLink)> {
    let mut links = Vec::new();

    for cap in MARKDOWN_LINK.captures_iter(body) {
        let Some(whole) = cap.get(0) else { continue };
        if code.contains_offset(whole.start()) {
            continue;
        }
        let Some(raw_target) = cap.get(3).or_else(|| cap.get(4)).map(|m| m.as_str()) else {
            continue;
        };
        // External links are not vault references.
        if URL_SCHEME.is_match(raw_target) {
            continue;
        }

        let decoded = urlencoding::decode(raw_target)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| raw_target.to_string());
        let (path, fragment) = match decoded.split_once('#') {
            Some((path, fragment)) => (path.trim().to_string(), Some(fragment.trim().to_string())),
            None => (decoded.trim().to_string(), None),
        };
        if path.is_empty() {
            continue;
        }
        let (heading, block_ref) = match fragment.filter(|f| !f.is_empty()) {
            Some(f) => match f.strip_prefix('^') {
                Some(block) => (None, Some(block.to_string())),
                None => (Some(f), None),
            },
            None => (None, None),
        };

        links.push((
            whole.range(),
            ParsedLink {
                raw: whole.as_str().to_string(),
                target: path,
                display_text: non_empty(cap.get(2)),
                heading,
                block_ref,
                is_embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
                line: line_of(body, whole.start()),
            },
        ));
    }

    links
}

/// Parse all `[[wikilinks]]` and `![[embeds]]`.
pub fn parse_wikilinks(body: &str) -> Vec<ParsedLink> {
    let code = find_code_spans(body);
    wikilinks_with_ranges(body, &code)
        .into_iter()
        .map(|(_, link)| link)
        .collect()
}

/// Parse all intra-vault `[text](target)` links and `![alt](target)` embeds.
pub fn parse_markdown_links(body: &str) -> Vec<ParsedLink> {
    let code = find_code_spans(body);
    markdown_links_with_ranges(body, &code)
        .into_iter()
        .map(|(_, link)| link)
        .collect()
}

/// Parse every link of either syntax, in document order.
pub fn parse_links(body: &str) -> Vec<ParsedLink> {
    let code = find_code_spans(body);
    let wiki = wikilinks_with_ranges(body, &code);
    let markdown: Vec<_> = markdown_links_with_ranges(body, &code)
        .into_iter()
        .filter(|(range, _)| {
            !wiki
                .iter()
                .any(|(w, _)| range.start < w.end && w.start < range.end)
        })
        .collect();

    let mut all: Vec<_> = wiki.into_iter().chain(markdown).collect();
    all.sort_by_key(|(range, _)| range.start);
    all.into_iter().map(|(_, link)| link).collect()
}
