use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build the configured indexes and write their artifacts.
    Build(BuildArgs),
    /// Check a written artifact against its own layers.
    Validate(ValidateArgs),
    /// Run one index's pipeline on a single document and print the record.
    Preview(PreviewArgs),
    /// List the configured indexes.
    List,
}

#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Indexes to build, in order (default: all).
    pub names: Vec<String>,
    /// Build and validate without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Path to an index artifact.
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct PreviewArgs {
    /// Index whose definition to apply.
    #[arg(long, short)]
    pub index: String,
    /// HTML document to process.
    pub file: PathBuf,
}
