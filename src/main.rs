//! custom-archives - a flat-file CMS where any content type's archive
//! listing can be served by a designated page.

#![allow(dead_code)]

mod archive;
mod cli;
mod config;
mod content;
mod core;
mod logger;
mod routes;
mod serve;
mod settings;
mod template;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{ArchivesCommand, Cli, Commands, PagesCommand, common::Host};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // Init runs before config discovery; there is nothing to load yet
    if let Commands::Init { name } = &cli.command {
        return cli::init::new_site(name.as_deref());
    }

    let mut config = SiteConfig::discover(&cli.config)?;

    if let Commands::Serve {
        interface,
        port,
        watch,
    } = &cli.command
    {
        if let Some(interface) = interface {
            config.serve.interface = *interface;
        }
        if let Some(port) = port {
            config.serve.port = *port;
        }
        if let Some(watch) = watch {
            config.serve.watch = *watch;
        }
    }

    let config = init_config(config);

    match &cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Serve { .. } => serve::run(),
        Commands::Types => cli::types::list_types(&config),
        Commands::Archives { command } => {
            let host = Host::load(&config)?;
            match command {
                ArchivesCommand::List => cli::archives::list(&host),
                ArchivesCommand::Set { type_name, page } => {
                    cli::archives::set(&config, &host, type_name, *page)
                }
                ArchivesCommand::Unset { type_name } => cli::archives::unset(&host, type_name),
            }
        }
        Commands::Pages { command } => {
            let host = Host::load(&config)?;
            match command {
                PagesCommand::List { type_name } => cli::pages::list(&host, type_name.as_deref()),
                PagesCommand::Status { id, status } => cli::pages::set_status(&host, *id, *status),
                PagesCommand::Delete { id } => cli::pages::delete(&host, *id),
            }
        }
    }
}
