#![allow(clippy::module_inception)]
use crate::cli::cli::{Cli, Commands};
use crate::config::app_config::Config;
use crate::manager::handlers::{Manager, SaveOptions};
use crate::tui;
use clap::Parser;
use std::path::PathBuf;

pub mod cli;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::create(cli.path.map(PathBuf::from), cli.encoding.map(Into::into))?;
    let manager = Manager::create(&config);

    match cli.command {
        Commands::Generate { no_copy, echo } => {
            manager.handle_generate(no_copy, echo).await?;
        }
        Commands::Save {
            website,
            email,
            username,
            password,
            generate,
            yes,
            no_copy,
        } => {
            let opts = SaveOptions {
                website,
                email,
                username,
                password,
                generate,
                yes,
                no_copy,
            };
            manager.handle_save(opts).await?;
        }
        Commands::Lookup {
            website,
            no_copy,
            echo,
        } => {
            manager.handle_lookup(&website, no_copy, echo).await?;
        }
        Commands::Form => {
            tui::launch(&config).await?;
        }
    }

    Ok(())
}
