//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::batch::DuplicatePolicy;
use crate::mapping::MappingStore;

/// Pressmap - Map CSV/SQLite data to WordPress post fields and batch-publish
/// through the REST API
#[derive(Parser, Debug)]
#[command(name = "pressmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV, or SQLite with --table)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Table to read when the input is a SQLite file
    #[arg(long)]
    pub table: Option<String>,

    /// Load a saved mapping by name instead of building one interactively
    #[arg(short = 'm', long)]
    pub mapping: Option<String>,

    /// Save the mapping used for this run under this name
    #[arg(long)]
    pub save_mapping: Option<String>,

    /// Mapping store directory.
    /// Defaults to the pressmap directory under the user config directory.
    #[arg(long)]
    pub mapping_dir: Option<PathBuf>,

    /// REST collection of the target post type (the rest_base, e.g. "posts"
    /// or "pages")
    #[arg(long, default_value = "posts")]
    pub post_type: String,

    /// What to do when a row's slug matches an existing post.
    /// "create" always makes a new post; "update" upserts by slug.
    #[arg(long, value_enum, default_value = "create")]
    pub on_duplicate: DuplicatePolicy,

    /// Restrict the run to these 1-based row numbers (comma-separated).
    /// The summary of a failed run prints the matching --rows value, so a
    /// manual retry of only the failed rows can be pasted back.
    #[arg(long, value_delimiter = ',')]
    pub rows: Vec<usize>,

    /// Build and print every payload without sending anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved field mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum MappingAction {
    /// List saved mappings
    List,
    /// Show one saved mapping
    Show { name: String },
    /// Delete a saved mapping
    Delete { name: String },
}

impl Cli {
    /// Get the input path, if provided.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Mapping store directory: the override, or the per-user default.
    pub fn mapping_dir(&self) -> PathBuf {
        self.mapping_dir
            .clone()
            .unwrap_or_else(MappingStore::default_dir)
    }

    /// Row filter for the batch, `None` when every row should run.
    pub fn row_filter(&self) -> Option<&[usize]> {
        if self.rows.is_empty() {
            None
        } else {
            Some(&self.rows)
        }
    }
}
