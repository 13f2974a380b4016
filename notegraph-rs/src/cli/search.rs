//! Search commands.

use crate::cli::args::{ListTagsArgs, SearchArgs, SearchFrontmatterArgs, SearchTagsArgs};
use crate::cli::output::{ListResponse, Output};
use crate::error::Result;
use crate::note::Note;
use crate::search::SearchOptions;
use crate::vault::Vault;

pub fn search(vault: &Vault, args: &SearchArgs, output: &Output) -> Result<()> {
    let results = vault.search_content(
        &args.query,
        &SearchOptions {
            folder: args.folder.clone(),
            tag: args.tag.clone(),
            case_sensitive: args.case_sensitive,
            limit: args.limit,
        },
    )?;
    output.print(&ListResponse::from(results))
}

pub fn search_tags(vault: &Vault, args: &SearchTagsArgs, output: &Output) -> Result<()> {
    let notes = vault.search_tags(&args.tag)?;
    output.print(&ListResponse::from(notes.iter().map(Note::summary).collect::<Vec<_>>()))
}

pub fn list_tags(vault: &Vault, args: &ListTagsArgs, output: &Output) -> Result<()> {
    output.print(&ListResponse::from(vault.list_tags(args.sort.into())?))
}

pub fn search_frontmatter(vault: &Vault, args: &SearchFrontmatterArgs, output: &Output) -> Result<()> {
    let notes = vault.search_frontmatter(&args.field, args.value.as_deref())?;
    output.print(&ListResponse::from(notes.iter().map(Note::summary).collect::<Vec<_>>()))
}
