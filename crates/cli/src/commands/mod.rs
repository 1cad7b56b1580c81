//! Subcommand implementations.

pub mod import;
pub mod password;
pub mod token;
