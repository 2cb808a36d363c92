//! Command-line interface module.

mod args;
pub mod archives;
pub mod common;
pub mod init;
pub mod pages;
pub mod types;

pub use args::{ArchivesCommand, Cli, Commands, PagesCommand};
