//! Error types and exit codes for notegraph.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const NOTE_ALREADY_EXISTS: i32 = 3;
    pub const INVALID_INPUT: i32 = 4;
    pub const VAULT_UNAVAILABLE: i32 = 5;
}

/// Main error type for vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("No note matching '{query}'{}", format_suggestions(.suggestions))]
    NoMatchingNote {
        query: String,
        suggestions: Vec<String>,
    },

    #[error("Note already exists: {0}")]
    NoteAlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault path (not a directory): {0}")]
    InvalidVaultPath(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}

/// Coarse classification of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    VaultUnavailable,
    AlreadyExists,
    Io,
    Other,
}

impl VaultError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::NoteNotFound(_) | VaultError::NoMatchingNote { .. } => ErrorKind::NotFound,
            VaultError::NoteAlreadyExists(_) => ErrorKind::AlreadyExists,
            VaultError::InvalidInput(_) | VaultError::GlobPattern(_) => ErrorKind::InvalidInput,
            VaultError::VaultNotFound(_) | VaultError::InvalidVaultPath(_) => {
                ErrorKind::VaultUnavailable
            }
            VaultError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Other,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotFound => exit_code::NOTE_NOT_FOUND,
            ErrorKind::AlreadyExists => exit_code::NOTE_ALREADY_EXISTS,
            ErrorKind::InvalidInput => exit_code::INVALID_INPUT,
            ErrorKind::VaultUnavailable => exit_code::VAULT_UNAVAILABLE,
            ErrorKind::Io | ErrorKind::Other => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
