//! catsel - offline bundle selection against a rendered catalog
#![allow(clippy::missing_errors_doc)]
//!
//! Loads a file-based catalog (a stream of `olm.package`, `olm.channel` and
//! `olm.bundle` JSON documents), builds the required-package variable source
//! for the requested package and prints the candidates the solver would be
//! offered, best first.

pub mod cmd;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "catsel")]
#[command(author, version, about = "catsel - select catalog bundles for a package request")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rank the bundles that satisfy a package request
    Select(SelectArgs),
    /// List the condition types and reasons a resolution can report,
    /// or check whether the given values are known
    Conditions {
        /// Values to check
        values: Vec<String>,
    },
}

/// Arguments of `catsel select`.
#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Rendered file-based catalog (JSON stream)
    #[arg(long, env = "CATSEL_CATALOG")]
    pub catalog: PathBuf,

    /// Package to select
    #[arg(long)]
    pub package: String,

    /// Version range, e.g. ">=1.0.0 <2.0.0"
    #[arg(long)]
    pub version_range: Option<String>,

    /// Only consider bundles in this channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Print a JSON report instead of a table
    #[arg(long)]
    pub json: bool,
}
