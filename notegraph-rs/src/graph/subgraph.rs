//! Bounded neighbourhood traversal and graph view data.

use crate::error::{Result, VaultError};
use crate::note::{strip_markdown_extension, Note};
use crate::types::{GraphData, GraphEdge, GraphNode};
use crate::vault::Vault;
use std::collections::{HashMap, HashSet, VecDeque};

use super::resolution::resolves_to;

/// Direct link match used for traversal and edges: exact path, path without
/// its markdown extension, or exact name.
fn links_directly(link: &str, note: &Note) -> bool {
    note.path == link || strip_markdown_extension(&note.path) == link || note.name == link
}

/// Breadth-first neighbourhood of the note at `central_path`.
///
/// Follows outgoing links and backlinks up to `max_depth` hops and stops once
/// `max_notes` notes are collected. An unknown centre yields nothing.
pub fn connected_subgraph<'a>(
    central_path: &str,
    notes: &'a [Note],
    max_depth: usize,
    max_notes: usize,
) -> Vec<&'a Note> {
    let Some(start) = notes.iter().position(|n| n.path == central_path) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((idx, depth)) = queue.pop_front() {
        if result.len() >= max_notes {
            break;
        }
        let note = &notes[idx];
        result.push(note);

        if depth >= max_depth {
            continue;
        }

        let outgoing = note
            .links
            .iter()
            .filter_map(|link| notes.iter().position(|n| links_directly(link, n)));
        let incoming = notes
            .iter()
            .enumerate()
            .filter(|(i, n)| *i != idx && n.links.iter().any(|l| resolves_to(l, note)))
            .map(|(i, _)| i);

        for neighbour in outgoing.chain(incoming) {
            if visited.insert(neighbour) {
                queue.push_back((neighbour, depth + 1));
            }
        }
    }

    result
}

/// Nodes and directed edges among `notes`. Repeated links give repeated edges.
pub fn graph_data(notes: &[&Note]) -> GraphData {
    let mut edges = Vec::new();
    for source in notes {
        for link in &source.links {
            let target = notes
                .iter()
                .find(|n| n.path != source.path && links_directly(link, n));
            if let Some(target) = target {
                edges.push(GraphEdge {
                    source: source.path.clone(),
                    target: target.path.clone(),
                });
            }
        }
    }

    let mut inbound: HashMap<&str, usize> = HashMap::new();
    for edge in &edges {
        *inbound.entry(edge.target.as_str()).or_default() += 1;
    }

    let nodes = notes
        .iter()
        .map(|n| GraphNode {
            id: n.path.clone(),
            label: n.name.clone(),
            tags: n.tags.clone(),
            link_count: n.links.len(),
            backlink_count: inbound.get(n.path.as_str()).copied().unwrap_or(0),
        })
        .collect();

    GraphData { nodes, edges }
}

impl Vault {
    /// Graph view around `center`, or over the first `max_notes` notes.
    pub fn graph_view(
        &self,
        center: Option<&str>,
        max_depth: usize,
        max_notes: usize,
    ) -> Result<GraphData> {
        let notes = self.scan(None)?;

        let selected: Vec<&Note> = match center {
            Some(center) => {
                let path = self.normalize_note_path(center)?;
                if !notes.iter().any(|n| n.path == path) {
                    return Err(VaultError::NoteNotFound(path));
                }
                connected_subgraph(&path, &notes, max_depth, max_notes)
            }
            None => notes.iter().take(max_notes).collect(),
        };

        Ok(graph_data(&selected))
    }
}
