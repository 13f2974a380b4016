//! Note commands: fetch, mutate, list, folders, daily notes and stats.

use crate::cli::args::{
    CreateNoteArgs, DailyNoteArgs, DeleteNoteArgs, GetNoteArgs, ListFoldersArgs, ListNotesArgs,
    UpdateNoteArgs,
};
use crate::cli::output::{ListResponse, MessageResponse, Output};
use crate::error::{Result, VaultError};
use crate::frontmatter::Frontmatter;
use crate::vault::{ListOptions, Vault};

/// Parse a `--frontmatter` argument (JSON or YAML) into a mapping.
pub fn parse_frontmatter_arg(text: &str) -> Result<Frontmatter> {
    match serde_yaml::from_str::<serde_yaml::Value>(text)? {
        serde_yaml::Value::Mapping(map) => Ok(Frontmatter::from_mapping(map)),
        _ => Err(VaultError::InvalidInput(
            "frontmatter must be a mapping of keys to values".to_string(),
        )),
    }
}

pub fn get_note(vault: &Vault, args: &GetNoteArgs, output: &Output) -> Result<()> {
    let note = vault.get_note(args.path.as_deref(), args.title.as_deref())?;
    output.print(&note)
}

pub fn create_note(vault: &Vault, args: &CreateNoteArgs, output: &Output) -> Result<()> {
    let frontmatter = args.frontmatter.as_deref().map(parse_frontmatter_arg).transpose()?;
    let note = vault.create_note(&args.path, &args.content, frontmatter.as_ref(), args.create_parents)?;
    output.info(&format!("Created {}", note.path));
    output.print(&note)
}

pub fn update_note(vault: &Vault, args: &UpdateNoteArgs, output: &Output) -> Result<()> {
    if args.content.is_none() && args.frontmatter.is_none() {
        return Err(VaultError::InvalidInput(
            "nothing to update: pass --content and/or --frontmatter".to_string(),
        ));
    }
    let frontmatter = args.frontmatter.as_deref().map(parse_frontmatter_arg).transpose()?;
    let note = vault.update_note(&args.path, args.content.as_deref(), frontmatter.as_ref(), args.append)?;
    output.print(&note)
}

pub fn delete_note(vault: &Vault, args: &DeleteNoteArgs, output: &Output) -> Result<()> {
    vault.delete_note(&args.path, args.confirm)?;
    output.print(&MessageResponse {
        path: vault.normalize_note_path(&args.path)?,
        message: "Note deleted".to_string(),
    })
}

pub fn list_notes(vault: &Vault, args: &ListNotesArgs, output: &Output) -> Result<()> {
    let page = vault.list_notes(&ListOptions {
        folder: args.folder.clone(),
        pattern: args.glob.clone(),
        sort_by: args.sort.into(),
        descending: args.reverse,
        limit: args.limit,
        offset: args.offset,
    })?;
    output.print(&page)
}

pub fn list_folders(vault: &Vault, args: &ListFoldersArgs, output: &Output) -> Result<()> {
    let folders = vault.list_folders(args.folder.as_deref())?;
    output.print(&ListResponse::from(folders))
}

pub fn daily_note(vault: &Vault, args: &DailyNoteArgs, output: &Output) -> Result<()> {
    let note = vault.daily_note(args.date.as_deref(), args.create)?;
    output.print(&note)
}

pub fn stats(vault: &Vault, output: &Output) -> Result<()> {
    output.print(&vault.vault_stats()?)
}
