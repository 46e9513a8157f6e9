//! Subcommand implementations.

pub mod conditions;
pub mod select;
