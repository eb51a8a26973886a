//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Rebuild mindmap XML outline exports into variant set hierarchies
#[derive(Parser, Debug)]
#[command(name = "varmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create variant groups from a mindmap export under the sink root
    Sync {
        /// Mindmap XML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,

        /// Override the configured sink root directory
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Build the groups without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the reconstructed outline tree
    Tree {
        /// Mindmap XML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Print the projected variant groupings per product
    Groups {
        /// Mindmap XML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
