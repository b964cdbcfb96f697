//! Subcommand implementations.

pub mod auto;
pub mod common;
pub mod config;
pub mod fields;
pub mod hybrid;
