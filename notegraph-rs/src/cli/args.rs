//! CLI argument definitions using clap.

use crate::search::TagSort;
use crate::vault::SortBy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notegraph")]
#[command(author, version, about = "Query and edit the link graph of an Obsidian-style vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides OBSIDIAN_VAULT_PATH and the config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with = "json")]
    pub yaml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a note by path or title
    #[command(name = "get-note")]
    GetNote(GetNoteArgs),

    /// Create a new note
    #[command(name = "create-note")]
    CreateNote(CreateNoteArgs),

    /// Replace or append to a note's body and merge frontmatter
    #[command(name = "update-note")]
    UpdateNote(UpdateNoteArgs),

    /// Delete a note
    #[command(name = "delete-note")]
    DeleteNote(DeleteNoteArgs),

    /// List notes with sorting and pagination
    #[command(name = "list-notes")]
    ListNotes(ListNotesArgs),

    /// Full-text search over names, titles and bodies
    Search(SearchArgs),

    /// Find notes carrying a tag (nested tags included)
    #[command(name = "search-tags")]
    SearchTags(SearchTagsArgs),

    /// List every tag with its note count
    #[command(name = "list-tags")]
    ListTags(ListTagsArgs),

    /// Find notes by frontmatter field
    #[command(name = "search-frontmatter")]
    SearchFrontmatter(SearchFrontmatterArgs),

    /// Notes linking to a note
    Backlinks(PathArgs),

    /// Distinct link targets of a note
    Outlinks(PathArgs),

    /// Notes without inbound links
    Orphans,

    /// Mentions of a note that are not links
    #[command(name = "unlinked-references")]
    UnlinkedReferences(UnlinkedReferencesArgs),

    /// List folders
    #[command(name = "list-folders")]
    ListFolders(ListFoldersArgs),

    /// Get (or create) a daily note
    #[command(name = "daily-note")]
    DailyNote(DailyNoteArgs),

    /// Vault-wide statistics
    Stats,

    /// Nodes and edges for a graph view
    Graph(GraphArgs),
}

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Path to the note (relative to vault root)
    pub path: String,
}

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["path", "title"])))]
pub struct GetNoteArgs {
    /// Path to the note (relative to vault root)
    #[arg(long)]
    pub path: Option<String>,

    /// Loose title lookup (filename, title, alias, then substring)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateNoteArgs {
    /// Path for the new note (`.md` is added if missing)
    pub path: String,

    /// Body text
    #[arg(long, default_value = "")]
    pub content: String,

    /// Frontmatter as a JSON or YAML mapping
    #[arg(long)]
    pub frontmatter: Option<String>,

    /// Create missing parent folders
    #[arg(long)]
    pub create_parents: bool,
}

#[derive(Args, Debug)]
pub struct UpdateNoteArgs {
    /// Path to the note (relative to vault root)
    pub path: String,

    /// New body text
    #[arg(long)]
    pub content: Option<String>,

    /// Frontmatter keys to merge, as a JSON or YAML mapping
    #[arg(long)]
    pub frontmatter: Option<String>,

    /// Append the content after a blank line instead of replacing the body
    #[arg(long, requires = "content")]
    pub append: bool,
}

#[derive(Args, Debug)]
pub struct DeleteNoteArgs {
    /// Path to the note (relative to vault root)
    pub path: String,

    /// Confirm the deletion
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Debug)]
pub struct ListNotesArgs {
    /// Only list notes under this folder
    #[arg(long)]
    pub folder: Option<String>,

    /// Glob pattern matched against the relative path
    #[arg(long)]
    pub glob: Option<String>,

    /// Sort key
    #[arg(long, value_enum, default_value = "path")]
    pub sort: SortField,

    /// Reverse the sort order
    #[arg(long)]
    pub reverse: bool,

    /// Page size (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of notes to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Path,
    Name,
    Modified,
    Created,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Path => SortBy::Path,
            SortField::Name => SortBy::Name,
            SortField::Modified => SortBy::Modified,
            SortField::Created => SortBy::Created,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Only search notes under this folder
    #[arg(long)]
    pub folder: Option<String>,

    /// Only search notes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Match case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SearchTagsArgs {
    /// Tag to search for (with or without `#`)
    pub tag: String,
}

#[derive(Args, Debug)]
pub struct ListTagsArgs {
    /// Sort by count (default) or name
    #[arg(long, value_enum, default_value = "count")]
    pub sort: TagSortField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagSortField {
    Count,
    Name,
}

impl From<TagSortField> for TagSort {
    fn from(field: TagSortField) -> Self {
        match field {
            TagSortField::Count => TagSort::Count,
            TagSortField::Name => TagSort::Name,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchFrontmatterArgs {
    /// Frontmatter field name
    pub field: String,

    /// Required value; any value matches when omitted
    pub value: Option<String>,
}

#[derive(Args, Debug)]
pub struct UnlinkedReferencesArgs {
    /// Path to the note (relative to vault root)
    pub path: String,

    /// Maximum number of results
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ListFoldersArgs {
    /// Start folder (defaults to the vault root)
    pub folder: Option<String>,
}

#[derive(Args, Debug)]
pub struct DailyNoteArgs {
    /// Date as YYYY-MM-DD (defaults to today)
    pub date: Option<String>,

    /// Create the note from the template when missing
    #[arg(long)]
    pub create: bool,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Centre the view on this note
    #[arg(long)]
    pub center: Option<String>,

    /// Maximum hops from the centre
    #[arg(long, default_value = "2")]
    pub depth: usize,

    /// Maximum number of notes in the view
    #[arg(long, default_value = "50")]
    pub max_notes: usize,
}
