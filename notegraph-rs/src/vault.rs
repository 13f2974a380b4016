//! Vault representation: scanning, note I/O and vault-wide listings.

use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::frontmatter::Frontmatter;
use crate::graph::{find_by_title, find_orphans, suggest_titles};
use crate::note::{is_markdown_path, to_vault_path, Note};
use crate::parser::compose_note;
use crate::types::{FolderInfo, NoteSummary, Page, VaultStats};
use chrono::{Local, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Number of suggestions attached to a failed title lookup.
const SUGGESTION_LIMIT: usize = 5;

/// Number of notes listed in [`VaultStats::recent_notes`].
const RECENT_NOTES: usize = 5;

/// Represents an Obsidian vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,

    /// Configuration in effect.
    pub config: Config,
}

/// Sort key for [`Vault::list_notes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Path,
    Name,
    Modified,
    Created,
}

/// Options for [`Vault::list_notes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Restrict to notes under this folder.
    pub folder: Option<String>,
    /// Glob matched against the note's vault-relative path.
    pub pattern: Option<String>,
    pub sort_by: SortBy,
    pub descending: bool,
    /// Page size; the configured default when absent.
    pub limit: Option<usize>,
    pub offset: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl Vault {
    /// Create a vault for `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            return Err(VaultError::VaultNotFound(root));
        }
        if !root.is_dir() {
            return Err(VaultError::InvalidVaultPath(root));
        }

        Ok(Self { root, config })
    }

    /// Open a vault with default configuration.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(root, Config::default())
    }

    fn ensure_available(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(VaultError::VaultNotFound(self.root.clone()))
        }
    }

    /// Validate and normalize a vault-relative folder path ("" is the root).
    pub fn normalize_folder(&self, folder: &str) -> Result<String> {
        let folder = folder.trim().replace('\\', "/");
        if folder.starts_with('/') || Path::new(&folder).is_absolute() {
            return Err(VaultError::InvalidInput(format!(
                "path must be relative to the vault: {}",
                folder
            )));
        }

        let mut parts = Vec::new();
        for component in Path::new(&folder).components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => {
                    return Err(VaultError::InvalidInput(format!(
                        "path may not leave the vault: {}",
                        folder
                    )));
                }
            }
        }
        Ok(parts.join("/"))
    }

    /// Validate and normalize a note path, adding `.md` if it has no
    /// markdown extension.
    pub fn normalize_note_path(&self, path: &str) -> Result<String> {
        let normalized = self.normalize_folder(path)?;
        if normalized.is_empty() {
            return Err(VaultError::InvalidInput("note path is empty".to_string()));
        }
        if is_markdown_path(&normalized) {
            Ok(normalized)
        } else {
            Ok(format!("{}.md", normalized))
        }
    }

    /// Get the full filesystem path for a vault-relative path.
    pub fn full_path(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Check if a note exists.
    pub fn note_exists(&self, relative_path: &str) -> bool {
        self.full_path(relative_path).is_file()
    }

    /// Walk `subfolder` (default: the whole vault) and parse every note.
    ///
    /// Hidden files and directories are pruned. Entries that cannot be read
    /// are skipped and logged at debug level. Notes come back sorted by path.
    pub fn scan(&self, subfolder: Option<&str>) -> Result<Vec<Note>> {
        self.ensure_available()?;
        let start = match subfolder {
            Some(folder) => self.root.join(self.normalize_folder(folder)?),
            None => self.root.clone(),
        };

        let mut paths: Vec<String> = Vec::new();
        for entry in WalkDir::new(&start).into_iter().filter_entry(|e| !is_hidden(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = to_vault_path(relative);
            if is_markdown_path(&relative) {
                paths.push(relative);
            }
        }
        paths.sort();

        let notes: Vec<Note> = paths
            .par_iter()
            .filter_map(|path| match Note::load(&self.root, path) {
                Ok(note) => Some(note),
                Err(e) => {
                    tracing::debug!(path = %path, error = %e, "skipping unreadable note");
                    None
                }
            })
            .collect();

        tracing::trace!(root = %start.display(), found = paths.len(), parsed = notes.len(), "scanned vault");
        Ok(notes)
    }

    /// Read and parse exactly one note.
    pub fn read_one(&self, path: &str) -> Result<Note> {
        self.ensure_available()?;
        let path = self.normalize_note_path(path)?;
        Note::load(&self.root, &path).map_err(|e| match e {
            VaultError::Io(err) => {
                tracing::debug!(path = %path, error = %err, "note unreadable");
                VaultError::NoteNotFound(path.clone())
            }
            other => other,
        })
    }

    /// Create a note and return it as re-read from disk.
    pub fn create_one(
        &self,
        path: &str,
        content: &str,
        frontmatter: Option<&Frontmatter>,
        create_parents: bool,
    ) -> Result<Note> {
        self.ensure_available()?;
        let path = self.normalize_note_path(path)?;
        if self.note_exists(&path) {
            return Err(VaultError::NoteAlreadyExists(path));
        }

        let full_path = self.full_path(&path);
        if create_parents {
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let empty = Frontmatter::new();
        let text = compose_note(frontmatter.unwrap_or(&empty), content)?;
        std::fs::write(&full_path, text)?;
        tracing::info!(path = %path, "created note");

        self.read_one(&path)
    }

    /// Update a note's body and/or frontmatter and return it as re-read.
    ///
    /// With `append`, `content` is added after a blank line instead of
    /// replacing the body. Frontmatter is merged key by key.
    pub fn update_one(
        &self,
        path: &str,
        content: Option<&str>,
        frontmatter: Option<&Frontmatter>,
        append: bool,
    ) -> Result<Note> {
        let existing = self.read_one(path)?;

        let body = match content {
            Some(new) if append => {
                let current = existing.content.trim_end();
                if current.is_empty() {
                    new.to_string()
                } else {
                    format!("{}\n\n{}", current, new)
                }
            }
            Some(new) => new.to_string(),
            None => existing.content.clone(),
        };

        let mut merged = existing.frontmatter.clone();
        if let Some(update) = frontmatter {
            merged.merge(update);
        }

        let text = compose_note(&merged, &body)?;
        std::fs::write(self.full_path(&existing.path), text)?;
        tracing::info!(path = %existing.path, append, "updated note");

        self.read_one(&existing.path)
    }

    /// Delete a note.
    pub fn delete_one(&self, path: &str) -> Result<()> {
        self.ensure_available()?;
        let path = self.normalize_note_path(path)?;
        if !self.note_exists(&path) {
            return Err(VaultError::NoteNotFound(path));
        }
        std::fs::remove_file(self.full_path(&path))?;
        tracing::info!(path = %path, "deleted note");
        Ok(())
    }

    /// Fetch a note by path, or by loose title lookup.
    pub fn get_note(&self, path: Option<&str>, title: Option<&str>) -> Result<Note> {
        match (path, title) {
            (Some(path), _) => self.read_one(path),
            (None, Some(title)) => {
                let notes = self.scan(None)?;
                match find_by_title(title, &notes) {
                    Some(note) => Ok(note.clone()),
                    None => Err(VaultError::NoMatchingNote {
                        query: title.to_string(),
                        suggestions: suggest_titles(title, &notes, SUGGESTION_LIMIT),
                    }),
                }
            }
            (None, None) => Err(VaultError::InvalidInput(
                "either a path or a title is required".to_string(),
            )),
        }
    }

    /// Create a note. See [`Vault::create_one`].
    pub fn create_note(
        &self,
        path: &str,
        content: &str,
        frontmatter: Option<&Frontmatter>,
        create_parents: bool,
    ) -> Result<Note> {
        self.create_one(path, content, frontmatter, create_parents)
    }

    /// Update a note. See [`Vault::update_one`].
    pub fn update_note(
        &self,
        path: &str,
        content: Option<&str>,
        frontmatter: Option<&Frontmatter>,
        append: bool,
    ) -> Result<Note> {
        self.update_one(path, content, frontmatter, append)
    }

    /// Delete a note; refuses unless `confirm` is set.
    pub fn delete_note(&self, path: &str, confirm: bool) -> Result<()> {
        if !confirm {
            return Err(VaultError::InvalidInput(format!(
                "refusing to delete {} without confirmation",
                path
            )));
        }
        self.delete_one(path)
    }

    /// List notes, sorted and paginated.
    pub fn list_notes(&self, options: &ListOptions) -> Result<Page<NoteSummary>> {
        let pattern = options
            .pattern
            .as_deref()
            .map(glob::Pattern::new)
            .transpose()?;

        let mut notes: Vec<Note> = self
            .scan(options.folder.as_deref())?
            .into_iter()
            .filter(|note| pattern.as_ref().is_none_or(|p| p.matches(&note.path)))
            .collect();

        // Stable sort; the path order from scan breaks ties in either direction
        notes.sort_by(|a, b| {
            let ord = match options.sort_by {
                SortBy::Path => a.path.cmp(&b.path),
                SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortBy::Modified => a.modified.cmp(&b.modified),
                SortBy::Created => a.created.cmp(&b.created),
            };
            if options.descending { ord.reverse() } else { ord }
        });

        let total = notes.len();
        let limit = options.limit.unwrap_or(self.config.default_limit);
        let items = notes
            .iter()
            .skip(options.offset)
            .take(limit)
            .map(Note::summary)
            .collect();

        Ok(Page {
            items,
            total,
            offset: options.offset,
            limit,
        })
    }

    /// List every non-hidden folder beneath `folder` (default: vault root).
    pub fn list_folders(&self, folder: Option<&str>) -> Result<Vec<FolderInfo>> {
        self.ensure_available()?;
        let start = match folder {
            Some(folder) => self.root.join(self.normalize_folder(folder)?),
            None => self.root.clone(),
        };

        let mut folders = Vec::new();
        for entry in WalkDir::new(&start)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable folder");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let path = to_vault_path(relative);
            folders.push(self.folder_info(entry.path(), path));
        }

        folders.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(folders)
    }

    fn folder_info(&self, dir: &Path, path: String) -> FolderInfo {
        let mut note_count = 0;
        let mut subfolders = Vec::new();

        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if name.starts_with('.') {
                        continue;
                    }
                    let Ok(file_type) = entry.file_type() else { continue };
                    if file_type.is_dir() {
                        subfolders.push(format!("{}/{}", path, name));
                    } else if file_type.is_file() && is_markdown_path(&name) {
                        note_count += 1;
                    }
                }
            }
            Err(e) => tracing::debug!(path = %path, error = %e, "cannot list folder"),
        }
        subfolders.sort();

        FolderInfo {
            name: path.rsplit('/').next().unwrap_or(&path).to_string(),
            path,
            note_count,
            subfolders,
        }
    }

    /// Path of the daily note for `date`.
    pub fn daily_note_path(&self, date: NaiveDate) -> String {
        let folder = self.config.daily_notes_folder.trim_matches('/');
        let file = format!("{}.md", date.format("%Y-%m-%d"));
        if folder.is_empty() {
            file
        } else {
            format!("{}/{}", folder, file)
        }
    }

    /// Fetch the daily note for `date` (`YYYY-MM-DD`, default today),
    /// creating it from the template when absent and `create` is set.
    pub fn daily_note(&self, date: Option<&str>, create: bool) -> Result<Note> {
        let date = match date {
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                VaultError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", s))
            })?,
            None => Local::now().date_naive(),
        };
        let path = self.daily_note_path(date);

        if self.note_exists(&path) {
            return self.read_one(&path);
        }
        if !create {
            return Err(VaultError::NoteNotFound(path));
        }

        let (frontmatter, body) = daily_note_template(date);
        self.create_one(&path, &body, Some(&frontmatter), true)
    }

    /// Aggregate statistics over the whole vault.
    pub fn vault_stats(&self) -> Result<VaultStats> {
        let notes = self.scan(None)?;
        let folders = self.list_folders(None)?;

        let distinct_tags: HashSet<String> = notes
            .iter()
            .flat_map(|n| n.tags.iter().map(|t| t.to_lowercase()))
            .collect();
        let total_links: usize = notes.iter().map(|n| n.links.len()).sum();
        let average_links_per_note = if notes.is_empty() {
            0.0
        } else {
            total_links as f64 / notes.len() as f64
        };

        let mut recent: Vec<&Note> = notes.iter().collect();
        recent.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(VaultStats {
            total_notes: notes.len(),
            total_folders: folders.len(),
            total_tags: distinct_tags.len(),
            total_links,
            total_words: notes.iter().map(Note::word_count).sum(),
            orphan_count: find_orphans(&notes).len(),
            average_links_per_note,
            recent_notes: recent.into_iter().take(RECENT_NOTES).map(Note::summary).collect(),
        })
    }
}

/// Frontmatter and body for a freshly created daily note.
pub fn daily_note_template(date: NaiveDate) -> (Frontmatter, String) {
    let mut frontmatter = Frontmatter::new();
    frontmatter.insert("created", Utc::now().to_rfc3339());
    frontmatter.insert("tags", vec!["daily-note"]);

    let body = format!(
        "# {}\n\n## Tasks\n- [ ] \n\n## Notes\n\n",
        date.format("%A, %B %-d, %Y")
    );
    (frontmatter, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::FrontmatterValue;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn setup_test_vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::open(dir.path()).unwrap();
        (dir, vault)
    }

    fn write(dir: &TempDir, path: &str, text: &str) {
        let full = dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, text).unwrap();
    }

    #[test]
    fn test_open_missing_root() {
        let result = Vault::open("/definitely/not/a/vault");
        assert!(matches!(result, Err(VaultError::VaultNotFound(_))));
    }

    #[test]
    fn test_open_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.md");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(Vault::open(&file), Err(VaultError::InvalidVaultPath(_))));
    }

    #[test]
    fn test_normalize_note_path() {
        let (_dir, vault) = setup_test_vault();
        assert_eq!(vault.normalize_note_path("note").unwrap(), "note.md");
        assert_eq!(vault.normalize_note_path("note.md").unwrap(), "note.md");
        assert_eq!(vault.normalize_note_path("a.markdown").unwrap(), "a.markdown");
        assert_eq!(vault.normalize_note_path("./folder//note").unwrap(), "folder/note.md");
        assert_eq!(vault.normalize_note_path("folder\\note").unwrap(), "folder/note.md");
        assert!(matches!(vault.normalize_note_path("../escape"), Err(VaultError::InvalidInput(_))));
        assert!(matches!(vault.normalize_note_path("/abs/note"), Err(VaultError::InvalidInput(_))));
        assert!(matches!(vault.normalize_note_path("  "), Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_scan_skips_hidden_and_non_markdown() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "b.md", "B");
        write(&dir, "a.markdown", "A");
        write(&dir, "sub/c.md", "C");
        write(&dir, ".obsidian/workspace.md", "hidden");
        write(&dir, "sub/.hidden.md", "hidden");
        write(&dir, "image.png", "binary");

        let notes = vault.scan(None).unwrap();
        let paths: Vec<_> = notes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["a.markdown", "b.md", "sub/c.md"]);
    }

    #[test]
    fn test_scan_subfolder_keeps_vault_relative_paths() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "top.md", "");
        write(&dir, "sub/inner/deep.md", "");

        let notes = vault.scan(Some("sub")).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].path, "sub/inner/deep.md");
        assert!(vault.scan(Some("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_scan_skips_unreadable_file() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "ok.md", "fine");
        std::fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let notes = vault.scan(None).unwrap();
        let paths: Vec<_> = notes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["ok.md"]);
    }

    #[test]
    fn test_create_and_read_round_trip() {
        let (_dir, vault) = setup_test_vault();
        let mut fm = Frontmatter::new();
        fm.insert("title", "Hello");
        fm.insert("status", "draft");

        let created = vault.create_one("greeting", "Hello, world!", Some(&fm), false).unwrap();
        assert_eq!(created.path, "greeting.md");
        assert_eq!(created.content, "Hello, world!");
        assert_eq!(created.frontmatter, fm);

        let reread = vault.read_one("greeting.md").unwrap();
        assert_eq!(reread.content, created.content);
        assert_eq!(reread.frontmatter, created.frontmatter);
    }

    #[test]
    fn test_body_with_leading_block_survives_round_trip() {
        let (_dir, vault) = setup_test_vault();
        let body = "---\nk: v\n---\nrest";

        let created = vault.create_one("x.md", body, None, false).unwrap();
        assert_eq!(created.content, body);
        assert!(created.frontmatter.is_empty());

        let updated = vault.update_one("x.md", Some(body), None, false).unwrap();
        assert_eq!(updated.content, body);
        assert_eq!(vault.read_one("x.md").unwrap().content, body);
    }

    #[test]
    fn test_create_in_subdirectory_requires_flag() {
        let (_dir, vault) = setup_test_vault();
        assert!(matches!(
            vault.create_one("sub/folder/note.md", "x", None, false),
            Err(VaultError::Io(_))
        ));
        vault.create_one("sub/folder/note.md", "x", None, true).unwrap();
        assert!(vault.note_exists("sub/folder/note.md"));
    }

    #[test]
    fn test_create_existing_fails() {
        let (_dir, vault) = setup_test_vault();
        vault.create_one("test.md", "First", None, false).unwrap();
        let result = vault.create_one("test.md", "Second", None, false);
        assert!(matches!(result, Err(VaultError::NoteAlreadyExists(_))));
    }

    #[test]
    fn test_update_replace_append_and_merge() {
        let (_dir, vault) = setup_test_vault();
        let mut fm = Frontmatter::new();
        fm.insert("title", "Doc");
        fm.insert("status", "draft");
        vault.create_one("doc.md", "First paragraph\n", Some(&fm), false).unwrap();

        let appended = vault.update_one("doc.md", Some("Second"), None, true).unwrap();
        assert_eq!(appended.content, "First paragraph\n\nSecond");

        let mut update = Frontmatter::new();
        update.insert("status", "done");
        update.insert("priority", 1i64);
        let merged = vault.update_one("doc", None, Some(&update), false).unwrap();
        assert_eq!(merged.content, "First paragraph\n\nSecond");
        assert_eq!(merged.frontmatter.title(), Some("Doc"));
        assert_eq!(merged.frontmatter.status(), Some("done"));
        assert_eq!(merged.frontmatter.get("priority"), Some(&FrontmatterValue::Integer(1)));

        let replaced = vault.update_one("doc.md", Some("Fresh"), None, false).unwrap();
        assert_eq!(replaced.content, "Fresh");
        assert_eq!(replaced.frontmatter.status(), Some("done"));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_dir, vault) = setup_test_vault();
        let result = vault.update_one("nope.md", Some("x"), None, false);
        assert!(matches!(result, Err(VaultError::NoteNotFound(_))));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, vault) = setup_test_vault();
        vault.create_one("gone.md", "bye", None, false).unwrap();

        assert!(matches!(vault.delete_note("gone.md", false), Err(VaultError::InvalidInput(_))));
        assert!(vault.note_exists("gone.md"));

        vault.delete_note("gone.md", true).unwrap();
        assert!(!vault.note_exists("gone.md"));
        assert!(matches!(vault.delete_one("gone.md"), Err(VaultError::NoteNotFound(_))));
    }

    #[test]
    fn test_get_note_by_title_and_suggestions() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "Project Alpha.md", "alpha");
        write(&dir, "Project Beta.md", "beta");

        let note = vault.get_note(None, Some("project alpha")).unwrap();
        assert_eq!(note.path, "Project Alpha.md");

        let substring = vault.get_note(None, Some("beta")).unwrap();
        assert_eq!(substring.path, "Project Beta.md");

        match vault.get_note(None, Some("Project Gamma")) {
            Err(VaultError::NoMatchingNote { suggestions, .. }) => assert!(suggestions.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(vault.get_note(None, None), Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_list_notes_pagination_reconstructs_all() {
        let (dir, vault) = setup_test_vault();
        for i in 0..7 {
            write(&dir, &format!("n{}.md", i), "");
        }

        let mut seen = Vec::new();
        let mut offset = 0;
        loop {
            let page = vault
                .list_notes(&ListOptions {
                    limit: Some(3),
                    offset,
                    ..ListOptions::default()
                })
                .unwrap();
            assert_eq!(page.total, 7);
            assert_eq!(page.items.len(), 3.min(7usize.saturating_sub(offset)));
            if page.items.is_empty() {
                break;
            }
            seen.extend(page.items.into_iter().map(|s| s.path));
            offset += 3;
        }

        let expected: Vec<String> = (0..7).map(|i| format!("n{}.md", i)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_list_notes_sort_and_pattern() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "b/Zed.md", "");
        write(&dir, "a/alpha.md", "");
        write(&dir, "c/Mid.md", "");

        let by_name = vault
            .list_notes(&ListOptions {
                sort_by: SortBy::Name,
                descending: true,
                ..ListOptions::default()
            })
            .unwrap();
        let names: Vec<_> = by_name.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Mid", "alpha"]);

        let mut by_path_desc = vault
            .list_notes(&ListOptions {
                descending: true,
                ..ListOptions::default()
            })
            .unwrap()
            .items
            .into_iter()
            .map(|s| s.path);
        assert_eq!(by_path_desc.next().as_deref(), Some("c/Mid.md"));

        let filtered = vault
            .list_notes(&ListOptions {
                pattern: Some("[ab]/*".to_string()),
                ..ListOptions::default()
            })
            .unwrap();
        assert_eq!(filtered.total, 2);

        let bad = vault.list_notes(&ListOptions {
            pattern: Some("[".to_string()),
            ..ListOptions::default()
        });
        assert!(matches!(bad, Err(VaultError::GlobPattern(_))));
    }

    #[test]
    fn test_list_folders() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "Projects/a.md", "");
        write(&dir, "Projects/b.md", "");
        write(&dir, "Projects/Archive/old.md", "");
        write(&dir, "Projects/readme.txt", "");
        write(&dir, ".obsidian/app.json", "{}");
        write(&dir, "Empty/.keep", "");

        let folders = vault.list_folders(None).unwrap();
        let paths: Vec<_> = folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["Empty", "Projects", "Projects/Archive"]);

        let projects = &folders[1];
        assert_eq!(projects.name, "Projects");
        assert_eq!(projects.note_count, 2);
        assert_eq!(projects.subfolders, vec!["Projects/Archive"]);
        assert_eq!(folders[0].note_count, 0);
    }

    #[test]
    fn test_daily_note_create_then_fetch() {
        let (_dir, vault) = setup_test_vault();

        let created = vault.daily_note(Some("2024-01-15"), true).unwrap();
        assert_eq!(created.path, "Daily Notes/2024-01-15.md");
        assert!(created.tags.contains(&"daily-note".to_string()));
        assert!(created.content.starts_with("# Monday, January 15, 2024"));
        assert!(created.frontmatter.get("created").is_some());

        let text_before = std::fs::read_to_string(vault.full_path(&created.path)).unwrap();
        let fetched = vault.daily_note(Some("2024-01-15"), false).unwrap();
        let text_after = std::fs::read_to_string(vault.full_path(&created.path)).unwrap();
        assert_eq!(fetched.path, created.path);
        assert_eq!(fetched.content, created.content);
        assert_eq!(text_before, text_after);
    }

    #[test]
    fn test_daily_note_errors() {
        let (_dir, vault) = setup_test_vault();
        assert!(matches!(
            vault.daily_note(Some("2024-13-45"), true),
            Err(VaultError::InvalidInput(_))
        ));
        assert!(matches!(
            vault.daily_note(Some("2024-01-16"), false),
            Err(VaultError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_vault_stats() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "A.md", "Link to [[B]] #x");
        write(&dir, "B.md", "Back to [[A]] #x #y");
        write(&dir, "sub/C.md", "alone");

        let stats = vault.vault_stats().unwrap();
        assert_eq!(stats.total_notes, 3);
        assert_eq!(stats.total_folders, 1);
        assert_eq!(stats.total_tags, 2);
        assert_eq!(stats.total_links, 2);
        assert_eq!(stats.orphan_count, 1);
        assert!((stats.average_links_per_note - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.recent_notes.len(), 3);
    }
}
