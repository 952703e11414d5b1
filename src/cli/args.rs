//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course catalog lookup: load course records into an ordered tree and query prerequisites
#[derive(Parser, Debug)]
#[command(name = "coursetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Field delimiter in catalog files (overrides config)
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Menu {
        /// Catalog to load before the first prompt
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print all courses in order
    List {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one course and its prerequisites
    Show {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Course number (case-insensitive)
        course: String,
    },

    /// Show the tree layout of a catalog
    Tree {
        /// Catalog file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
