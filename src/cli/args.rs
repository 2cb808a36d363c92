//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::content::{PageId, PageStatus};

/// Flat-file CMS with custom archive pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: archives.toml)
    #[arg(short = 'C', long, default_value = "archives.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new site
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,
    },

    /// Start the development server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for content rescan
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// List registered content types
    #[command(visible_alias = "t")]
    Types,

    /// Manage archive page assignments
    #[command(visible_alias = "a")]
    Archives {
        #[command(subcommand)]
        command: ArchivesCommand,
    },

    /// Inspect and edit pages and content items
    #[command(visible_alias = "p")]
    Pages {
        #[command(subcommand)]
        command: PagesCommand,
    },
}

/// `archives` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ArchivesCommand {
    /// List archivable types and their assigned pages
    #[command(visible_alias = "ls")]
    List,

    /// Assign a page as the archive page of a type
    Set {
        /// Content type name
        type_name: String,
        /// Page id to serve the archive
        page: PageId,
    },

    /// Remove a type's archive page assignment
    Unset {
        /// Content type name
        type_name: String,
    },
}

/// `pages` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum PagesCommand {
    /// List pages and content items
    #[command(visible_alias = "ls")]
    List {
        /// Restrict to one content type
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
    },

    /// Change an entry's publication status
    Status {
        /// Entry id
        id: PageId,
        /// New status (publish, draft, pending, private, trash)
        status: PageStatus,
    },

    /// Delete an entry's source file
    Delete {
        /// Entry id
        id: PageId,
    },
}
