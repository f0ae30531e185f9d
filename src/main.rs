// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later
mod conf;
mod defs;
mod fstab;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use conf::{
    cli::{Cli, Commands},
    cli_handlers,
    config::Config,
};

fn setup(cli: &Cli) -> Result<Config> {
    let config = cli_handlers::load_config(cli)?;

    utils::init_logging(config.verbose).context("Failed to initialize logging")?;

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::GenConfig { output } => cli_handlers::handle_gen_config(output)?,
        Commands::Apply { directives } => cli_handlers::handle_apply(&setup(&cli)?, directives)?,
        Commands::Show { json } => cli_handlers::handle_show(&setup(&cli)?, *json)?,
        Commands::ShowConfig => cli_handlers::handle_show_config(&setup(&cli)?)?,
    }

    Ok(())
}
