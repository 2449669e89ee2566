//! Subcommand implementations.

pub mod edit;
pub mod show;
