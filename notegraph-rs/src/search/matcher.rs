//! Search evaluation over a scanned note collection.

use crate::error::Result;
use crate::note::Note;
use crate::search::types::*;
use crate::types::TagInfo;
use crate::vault::Vault;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Build a literal matcher for `query`.
fn literal_matcher(query: &str, case_sensitive: bool) -> Result<Regex> {
    Ok(RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!case_sensitive)
        .build()?)
}

/// Context around byte offset `pos` of `text`: up to [`SNIPPET_BEFORE`]
/// characters before and [`SNIPPET_AFTER`] from `pos` on, newlines flattened.
pub fn make_snippet(text: &str, pos: usize) -> String {
    let before: usize = text[..pos]
        .chars()
        .rev()
        .take(SNIPPET_BEFORE)
        .map(char::len_utf8)
        .sum();
    let after: usize = text[pos..]
        .chars()
        .take(SNIPPET_AFTER)
        .map(char::len_utf8)
        .sum();
    let (start, end) = (pos - before, pos + after);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[start..end].replace(['\n', '\r'], " "));
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

fn in_folder(note: &Note, folder: Option<&str>) -> bool {
    match folder.map(|f| f.trim_matches('/')) {
        None | Some("") => true,
        Some(folder) => note.path.starts_with(&format!("{}/", folder)),
    }
}

/// Rank notes against a free-text query.
///
/// Per note, the first hit wins: filename, then frontmatter title, then body.
/// Results are sorted by descending score; equal scores keep scan order.
pub fn search_content(
    query: &str,
    notes: &[Note],
    options: &SearchOptions,
) -> Result<Vec<SearchResult>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let matcher = literal_matcher(query, options.case_sensitive)?;
    let equals = |s: &str| {
        if options.case_sensitive {
            s == query
        } else {
            s.to_lowercase() == query.to_lowercase()
        }
    };

    let mut results = Vec::new();
    for note in notes {
        if !in_folder(note, options.folder.as_deref()) {
            continue;
        }
        if let Some(tag) = &options.tag {
            if !note.has_tag(tag) {
                continue;
            }
        }

        let hit = if matcher.is_match(&note.name) {
            let score = if equals(&note.name) { TITLE_EXACT } else { TITLE_PARTIAL };
            Some((score, None, MatchType::Title))
        } else if note.title().is_some_and(|t| matcher.is_match(t)) {
            Some((TITLE_PARTIAL, None, MatchType::Title))
        } else if let Some(m) = matcher.find(&note.content) {
            let early = m.start() * 5 < note.content.len();
            let score = if early { CONTENT_EARLY } else { CONTENT_LATE };
            Some((score, Some(make_snippet(&note.content, m.start())), MatchType::Content))
        } else {
            None
        };

        if let Some((score, snippet, match_type)) = hit {
            results.push(SearchResult {
                path: note.path.clone(),
                name: note.name.clone(),
                score,
                snippet,
                match_type,
            });
        }
    }

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    Ok(results)
}

/// Notes carrying `tag` or a tag nested beneath it.
pub fn search_by_tag<'a>(tag: &str, notes: &'a [Note]) -> Vec<&'a Note> {
    notes.iter().filter(|n| n.has_tag(tag)).collect()
}

/// Count the notes carrying each tag. Tags differing only in case are merged
/// under their first spelling.
pub fn list_tags(notes: &[Note], sort: TagSort) -> Vec<TagInfo> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tags: Vec<TagInfo> = Vec::new();

    for note in notes {
        let mut seen = Vec::new();
        for tag in &note.tags {
            let key = tag.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            match index.get(&key) {
                Some(&i) => tags[i].count += 1,
                None => {
                    index.insert(key.clone(), tags.len());
                    tags.push(TagInfo {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
            seen.push(key);
        }
    }

    match sort {
        TagSort::Count => tags.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.tag.to_lowercase().cmp(&b.tag.to_lowercase()))
        }),
        TagSort::Name => tags.sort_by_key(|t| t.tag.to_lowercase()),
    }
    tags
}

/// Notes whose frontmatter has `field`, or whose `field` equals `value`
/// after string coercion (any element, for lists).
pub fn search_frontmatter<'a>(field: &str, value: Option<&str>, notes: &'a [Note]) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| match (note.frontmatter.get(field), value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(found), Some(wanted)) => {
                found.to_string() == wanted
                    || found
                        .as_list()
                        .is_some_and(|items| items.iter().any(|i| i.to_string() == wanted))
            }
        })
        .collect()
}

impl Vault {
    /// Full-text search over the vault (or `options.folder`).
    pub fn search_content(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let folder = options
            .folder
            .as_deref()
            .map(|f| self.normalize_folder(f))
            .transpose()?;
        let notes = self.scan(folder.as_deref())?;
        let options = SearchOptions {
            folder,
            ..options.clone()
        };
        search_content(query, &notes, &options)
    }

    /// Notes carrying `tag`, nested tags included.
    pub fn search_tags(&self, tag: &str) -> Result<Vec<Note>> {
        let notes = self.scan(None)?;
        Ok(search_by_tag(tag, &notes).into_iter().cloned().collect())
    }

    /// Every tag in the vault with its note count.
    pub fn list_tags(&self, sort: TagSort) -> Result<Vec<TagInfo>> {
        Ok(list_tags(&self.scan(None)?, sort))
    }

    /// Notes matching a frontmatter field (and optionally its value).
    pub fn search_frontmatter(&self, field: &str, value: Option<&str>) -> Result<Vec<Note>> {
        let notes = self.scan(None)?;
        Ok(search_frontmatter(field, value, &notes)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn note(path: &str, text: &str) -> Note {
        let now = Utc::now();
        Note::from_source(path, text, now, now)
    }

    fn paths(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_search_content_ranking() {
        let filler = "x ".repeat(100);
        let notes = vec![
            note("late.md", &format!("{}rust here", filler)),
            note("early.md", "rust at the start and then lots of other words"),
            note("Rust.md", "nothing"),
            note("rusty tools.md", "nothing"),
            note("titled.md", "---\ntitle: Learning Rust\n---\nnothing"),
            note("unrelated.md", "nothing"),
        ];

        let results = search_content("rust", &notes, &SearchOptions::default()).unwrap();
        assert_eq!(
            paths(&results),
            vec!["Rust.md", "rusty tools.md", "titled.md", "early.md", "late.md"]
        );
        assert_eq!(results[0].score, TITLE_EXACT);
        assert_eq!(results[1].score, TITLE_PARTIAL);
        assert_eq!(results[2].match_type, MatchType::Title);
        assert_eq!(results[3].score, CONTENT_EARLY);
        assert_eq!(results[4].score, CONTENT_LATE);
        assert_eq!(results[4].match_type, MatchType::Content);
        assert!(results[4].snippet.as_deref().unwrap().contains("rust here"));
        assert!(results[0].snippet.is_none());
    }

    #[test]
    fn test_search_content_ties_keep_scan_order() {
        let notes = vec![note("b.md", "term"), note("a.md", "term")];
        let results = search_content("term", &notes, &SearchOptions::default()).unwrap();
        assert_eq!(paths(&results), vec!["b.md", "a.md"]);
    }

    #[test]
    fn test_search_content_options() {
        let notes = vec![
            note("work/a.md", "#project/alpha Needle"),
            note("work/b.md", "needle"),
            note("home/c.md", "#project needle"),
        ];

        let sensitive = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };
        assert_eq!(paths(&search_content("Needle", &notes, &sensitive).unwrap()), vec!["work/a.md"]);

        let tagged = SearchOptions {
            tag: Some("project".to_string()),
            ..SearchOptions::default()
        };
        assert_eq!(
            paths(&search_content("needle", &notes, &tagged).unwrap()),
            vec!["work/a.md", "home/c.md"]
        );

        let scoped = SearchOptions {
            folder: Some("work".to_string()),
            limit: Some(1),
            ..SearchOptions::default()
        };
        // b.md matches at the very start, so it outranks a.md
        assert_eq!(paths(&search_content("needle", &notes, &scoped).unwrap()), vec!["work/b.md"]);
    }

    #[test]
    fn test_vault_search_normalizes_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("work")).unwrap();
        std::fs::write(dir.path().join("work/a.md"), "needle here").unwrap();
        std::fs::write(dir.path().join("b.md"), "needle too").unwrap();
        let vault = Vault::open(dir.path()).unwrap();

        for folder in ["work", "./work", " work", "work/", "work\\"] {
            let options = SearchOptions {
                folder: Some(folder.to_string()),
                ..SearchOptions::default()
            };
            let results = vault.search_content("needle", &options).unwrap();
            assert_eq!(paths(&results), vec!["work/a.md"], "folder {:?}", folder);
        }
    }

    #[test]
    fn test_search_content_no_match_and_blank() {
        let notes = vec![note("a.md", "text")];
        assert!(search_content("absent", &notes, &SearchOptions::default()).unwrap().is_empty());
        assert!(search_content("  ", &notes, &SearchOptions::default()).unwrap().is_empty());
        // Regex metacharacters are literal
        assert!(search_content("(a+", &notes, &SearchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_make_snippet() {
        let text = format!("{}MATCH{}", "a".repeat(60), "b".repeat(200));
        let snippet = make_snippet(&text, 60);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.len(), 3 + 50 + 150 + 3);
        assert!(snippet.contains("MATCH"));

        assert_eq!(make_snippet("short\ntext", 0), "short text");
        // Multi-byte characters never split
        let s = make_snippet(&format!("{}é", "ü".repeat(80)), 160);
        assert!(s.ends_with('é'));
    }

    #[test]
    fn test_search_by_tag_nested() {
        let notes = vec![note("C.md", "#project/alpha"), note("D.md", "#projects")];
        let names = |tag| search_by_tag(tag, &notes).iter().map(|n| n.name.clone()).collect::<Vec<_>>();
        assert_eq!(names("project"), vec!["C"]);
        assert_eq!(names("#project/alpha"), vec!["C"]);
        assert!(names("beta").is_empty());
    }

    #[test]
    fn test_list_tags() {
        let notes = vec![
            note("a.md", "#rust #cli #rust"),
            note("b.md", "#Rust #web"),
            note("c.md", "#web #rust"),
        ];

        let by_count = list_tags(&notes, TagSort::Count);
        let counts: Vec<_> = by_count.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(counts, vec![("rust", 3), ("web", 2), ("cli", 1)]);

        let by_name: Vec<_> = list_tags(&notes, TagSort::Name).into_iter().map(|t| t.tag).collect();
        assert_eq!(by_name, vec!["cli", "rust", "web"]);
    }

    #[test]
    fn test_search_frontmatter() {
        let notes = vec![
            note("a.md", "---\nstatus: done\ndraft: false\n---\n"),
            note("b.md", "---\nstatus: [todo, blocked]\npriority: 2\n---\n"),
            note("c.md", "no frontmatter"),
        ];
        let names = |field, value| {
            search_frontmatter(field, value, &notes)
                .iter()
                .map(|n| n.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(names("status", None), vec!["a", "b"]);
        assert_eq!(names("draft", None), vec!["a"]);
        assert_eq!(names("draft", Some("false")), vec!["a"]);
        assert_eq!(names("status", Some("blocked")), vec!["b"]);
        assert_eq!(names("priority", Some("2")), vec!["b"]);
        assert!(names("status", Some("nope")).is_empty());
        assert!(names("missing", None).is_empty());
    }
}
