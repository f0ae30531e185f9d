// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::defs;

#[derive(Parser, Debug)]
#[command(name = "fstab-edit", version, about = "Edit fstab mount entries from the command line")]
pub struct Cli {
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
    /// Table to read [env: fstab]
    #[arg(short = 's', long = "source", global = true)]
    pub source: Option<PathBuf>,
    /// Table to write [env: targetFstab]
    #[arg(short = 't', long = "target", global = true)]
    pub target: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
    /// Print the resulting table instead of writing it
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply `edit <mountPoint> <name=value>` and `remove <mountPoint>` directives
    Apply {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        directives: Vec<String>,
    },
    /// Print the parsed source table
    Show {
        #[arg(long)]
        json: bool,
    },
    GenConfig {
        #[arg(short = 'o', long = "output", default_value = defs::CONFIG_FILE)]
        output: PathBuf,
    },
    ShowConfig,
}
