//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::EditOp;

/// Edit nested tag trees: rename, set data, add children, collapse, export JSON
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree as an outline
    Show {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print or write the normalized JSON export
    Export {
        #[command(flatten)]
        tree: TreeArgs,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
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

/// Where the tree comes from and what to do to it first.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Raw JSON tree ("-" for stdin; default: configured seed file or built-in seed)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Edit applied in order: toggle:PATH, rename:PATH=NAME, data:PATH=VALUE, add:PATH
    #[arg(short = 'e', long = "edit", value_name = "OP")]
    pub edits: Vec<EditOp>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config (default: local config in project dir)
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
