//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Precomputed radial layouts for taxonomy atlases
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out the taxonomy and write root and branch payloads
    Build {
        /// Taxonomy document (default: <data_dir>/<master_file>)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Payload directory (default: <data_dir>)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Copy payloads into the static site directory
    Publish,

    /// Show the taxonomy as a tree with leaf weights
    Tree {
        /// Taxonomy document (default: <data_dir>/<master_file>)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
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
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}
