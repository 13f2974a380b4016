//! Link graph commands.

use crate::cli::args::{GraphArgs, PathArgs, UnlinkedReferencesArgs};
use crate::cli::output::{ListResponse, Output};
use crate::error::Result;
use crate::vault::Vault;

pub fn backlinks(vault: &Vault, args: &PathArgs, output: &Output) -> Result<()> {
    output.print(&ListResponse::from(vault.backlinks(&args.path)?))
}

pub fn outlinks(vault: &Vault, args: &PathArgs, output: &Output) -> Result<()> {
    output.print(&ListResponse::from(vault.outlinks(&args.path)?))
}

pub fn orphans(vault: &Vault, output: &Output) -> Result<()> {
    output.print(&ListResponse::from(vault.orphans()?))
}

pub fn unlinked_references(vault: &Vault, args: &UnlinkedReferencesArgs, output: &Output) -> Result<()> {
    let results = vault.unlinked_references(&args.path, args.limit)?;
    output.print(&ListResponse::from(results))
}

pub fn graph(vault: &Vault, args: &GraphArgs, output: &Output) -> Result<()> {
    let data = vault.graph_view(args.center.as_deref(), args.depth, args.max_notes)?;
    output.print(&data)
}
