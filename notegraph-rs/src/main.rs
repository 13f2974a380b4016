//! notegraph CLI entry point.

use clap::Parser;
use notegraph::cli::args::{Cli, Commands};
use notegraph::cli::output::Output;
use notegraph::cli::{links, notes, search};
use notegraph::config::Config;
use notegraph::error::{exit_code, VaultError};
use notegraph::vault::Vault;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let output = Output::new(cli.output_format(), cli.quiet);
    match run(&cli, &output) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("notegraph={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli, output: &Output) -> Result<(), VaultError> {
    let config = Config::load()?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path, config)?;
    tracing::debug!(root = %vault.root.display(), "opened vault");

    match &cli.command {
        Commands::GetNote(args) => notes::get_note(&vault, args, output),
        Commands::CreateNote(args) => notes::create_note(&vault, args, output),
        Commands::UpdateNote(args) => notes::update_note(&vault, args, output),
        Commands::DeleteNote(args) => notes::delete_note(&vault, args, output),
        Commands::ListNotes(args) => notes::list_notes(&vault, args, output),
        Commands::ListFolders(args) => notes::list_folders(&vault, args, output),
        Commands::DailyNote(args) => notes::daily_note(&vault, args, output),
        Commands::Stats => notes::stats(&vault, output),

        Commands::Search(args) => search::search(&vault, args, output),
        Commands::SearchTags(args) => search::search_tags(&vault, args, output),
        Commands::ListTags(args) => search::list_tags(&vault, args, output),
        Commands::SearchFrontmatter(args) => search::search_frontmatter(&vault, args, output),

        Commands::Backlinks(args) => links::backlinks(&vault, args, output),
        Commands::Outlinks(args) => links::outlinks(&vault, args, output),
        Commands::Orphans => links::orphans(&vault, output),
        Commands::UnlinkedReferences(args) => links::unlinked_references(&vault, args, output),
        Commands::Graph(args) => links::graph(&vault, args, output),
    }
}
