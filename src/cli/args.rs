//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Warehouse location hierarchy: browse, filter and summarize storage locations
#[derive(Parser, Debug)]
#[command(name = "wmsloc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory holding .wmsloc.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Snapshot file with warehouses and locations (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Root-level filter options shared by listing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Warehouse id, or "all"
    #[arg(short, long)]
    pub warehouse: Option<String>,

    /// Location kind (internal, vendor, customer, inventory-adjustment,
    /// procurement, production, transit, view), or "all"
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Case-insensitive text matched against name and full path
    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the location hierarchy as a tree
    Tree {
        #[command(flatten)]
        filter: FilterArgs,
        /// Expand every location
        #[arg(long)]
        expand_all: bool,
        /// Start with every location collapsed
        #[arg(long, conflicts_with = "expand_all")]
        collapse_all: bool,
        /// Expand the ancestors of a location (repeatable)
        #[arg(long, value_name = "ID")]
        reveal: Vec<String>,
        /// Flip the expansion of a location (repeatable)
        #[arg(long, value_name = "ID")]
        toggle: Vec<String>,
    },

    /// List root locations matching the filter
    Roots {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show location counts by kind and flag
    Stats,

    /// List selectable warehouses
    Warehouses,

    /// Validate the snapshot and report orphaned locations
    Check,

    /// Show one location with its ancestry
    Show {
        /// Location id
        id: String,
    },

    /// Write a sample snapshot
    Init {
        /// Target file (default: configured snapshot)
        #[arg(value_hint = ValueHint::FilePath)]
        path: Option<PathBuf>,
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a template config file
    Template,
}
