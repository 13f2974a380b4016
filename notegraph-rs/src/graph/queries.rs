//! Link graph queries: backlinks, outlinks, orphans and unlinked mentions.

use crate::error::Result;
use crate::note::Note;
use crate::search::{make_snippet, MatchType, SearchResult};
use crate::vault::Vault;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

use super::resolution::{find_by_title, resolves_to};

/// Paths of notes linking to `target`, in scan order.
pub fn backlinks_of(target: &Note, notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .filter(|n| n.path != target.path)
        .filter(|n| n.links.iter().any(|link| resolves_to(link, target)))
        .map(|n| n.path.clone())
        .collect()
}

/// Raw link targets of `note`, first occurrence order, without repeats.
pub fn outlinks_of(note: &Note) -> Vec<String> {
    let mut seen = HashSet::new();
    note.links
        .iter()
        .filter(|link| seen.insert(link.as_str()))
        .cloned()
        .collect()
}

/// Paths of notes no other note links to.
///
/// Every raw link is looked up with [`find_by_title`]; links that resolve to
/// nothing are ignored.
pub fn find_orphans(notes: &[Note]) -> Vec<String> {
    let mut linked: HashSet<&str> = HashSet::new();
    for note in notes {
        for link in &note.links {
            if let Some(target) = find_by_title(link, notes) {
                if target.path != note.path {
                    linked.insert(&target.path);
                }
            }
        }
    }

    notes
        .iter()
        .filter(|n| !linked.contains(n.path.as_str()))
        .map(|n| n.path.clone())
        .collect()
}

/// Case-insensitive whole-word matcher for a mention of `term`.
fn mention_matcher(term: &str) -> Result<Regex> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = regex::escape(term);
    if term.starts_with(is_word) {
        pattern = format!(r"\b{}", pattern);
    }
    if term.ends_with(is_word) {
        pattern = format!(r"{}\b", pattern);
    }
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// Notes mentioning `target` by name or alias without linking to it.
///
/// The first term that matches a note decides its snippet; the score is the
/// number of mentions of that term. Sorted by descending score, ties in scan
/// order, then truncated to `limit`.
pub fn unlinked_references(target: &Note, notes: &[Note], limit: usize) -> Result<Vec<SearchResult>> {
    let mut terms = vec![target.name.clone()];
    terms.extend(target.aliases());
    let matchers = terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| mention_matcher(t.trim()))
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::new();
    for note in notes {
        if note.path == target.path || note.links.iter().any(|l| resolves_to(l, target)) {
            continue;
        }

        for matcher in &matchers {
            let Some(first) = matcher.find(&note.content) else { continue };
            results.push(SearchResult {
                path: note.path.clone(),
                name: note.name.clone(),
                score: matcher.find_iter(&note.content).count() as f64,
                snippet: Some(make_snippet(&note.content, first.start())),
                match_type: MatchType::Content,
            });
            break;
        }
    }

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    Ok(results)
}

impl Vault {
    /// Notes linking to the note at `path`.
    pub fn backlinks(&self, path: &str) -> Result<Vec<String>> {
        let target = self.read_one(path)?;
        let notes = self.scan(None)?;
        Ok(backlinks_of(&target, &notes))
    }

    /// Distinct raw link targets of the note at `path`.
    pub fn outlinks(&self, path: &str) -> Result<Vec<String>> {
        Ok(outlinks_of(&self.read_one(path)?))
    }

    /// Notes without inbound links.
    pub fn orphans(&self) -> Result<Vec<String>> {
        Ok(find_orphans(&self.scan(None)?))
    }

    /// Unlinked mentions of the note at `path`.
    pub fn unlinked_references(&self, path: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let target = self.read_one(path)?;
        let notes = self.scan(None)?;
        unlinked_references(&target, &notes, limit)
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

    #[test]
    fn test_backlinks_by_name_path_and_alias() {
        let b = note("people/B.md", "---\naliases: [Bee]\n---\nI link [[B]] myself");
        let notes = vec![
            note("A.md", "Link to [[B]]"),
            b.clone(),
            note("C.md", "See [[people/B.md]]"),
            note("D.md", "Hello [[bee|the bee]]"),
            note("E.md", "No links, just B"),
        ];

        assert_eq!(backlinks_of(&b, &notes), vec!["A.md", "C.md", "D.md"]);
    }

    #[test]
    fn test_outlinks_deduplicated_in_order() {
        let n = note("A.md", "[[B]] then [[C]] then [[B#Part]] and [x](D.md)");
        assert_eq!(outlinks_of(&n), vec!["B", "C", "D.md"]);
    }

    #[test]
    fn test_orphans() {
        let notes = vec![
            note("A.md", "Link to [[B]] and [[Missing]]"),
            note("B.md", "---\naliases: [Bee]\n---\n"),
            note("C.md", "[[Bee]]"),
            note("D.md", "[[D]] self link only"),
            note("sub/E.md", ""),
            note("F.md", "[[sub/E]]"),
        ];

        // B is reached by name and alias, E by path
        assert_eq!(find_orphans(&notes), vec!["A.md", "C.md", "D.md", "F.md"]);
    }

    #[test]
    fn test_unlinked_references() {
        let target = note("Rust Lang.md", "---\naliases: [rustlang]\n---\n");
        let notes = vec![
            target.clone(),
            note("a.md", "I like rust lang. Rust Lang is great. RUST LANG!"),
            note("b.md", "Trusted rust langs are not whole words"),
            note("c.md", "Already linked [[Rust Lang]] rust lang"),
            note("d.md", "Mentions rustlang once"),
            note("e.md", "Once: Rust Lang"),
        ];

        let results = unlinked_references(&target, &notes, 10).unwrap();
        let found: Vec<_> = results.iter().map(|r| (r.path.as_str(), r.score)).collect();
        assert_eq!(found, vec![("a.md", 3.0), ("d.md", 1.0), ("e.md", 1.0)]);
        assert!(results[0].snippet.as_deref().unwrap().starts_with("I like rust lang"));
        assert_eq!(results[0].match_type, MatchType::Content);

        let limited = unlinked_references(&target, &notes, 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].path, "a.md");
    }

    #[test]
    fn test_mention_matcher_non_word_edges() {
        let m = mention_matcher("C++").unwrap();
        assert!(m.is_match("I write c++ daily"));
        assert!(!m.is_match("abc++"));
    }
}
