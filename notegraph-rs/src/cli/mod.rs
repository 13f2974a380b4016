//! CLI command implementations.

pub mod args;
pub mod output;

pub mod links;
pub mod notes;
pub mod search;

pub use args::{Cli, Commands};
pub use output::Output;
