// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::defs;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Table that is read and parsed.
    #[serde(default = "default_fstab")]
    pub source: PathBuf,
    /// Table that is (re)written. May differ from `source` for dry runs.
    #[serde(default = "default_fstab")]
    pub target: PathBuf,
    #[serde(default)]
    pub verbose: bool,
    /// Only settable from the command line.
    #[serde(skip)]
    pub dry_run: bool,
}

fn default_fstab() -> PathBuf {
    PathBuf::from(defs::DEFAULT_FSTAB)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_fstab(),
            target: default_fstab(),
            verbose: false,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).context("failed to read config file")?;

        let config: Config = toml::from_str(&content).context("failed to parse config file")?;

        Ok(config)
    }

    pub fn load_default() -> Result<Self> {
        Self::from_file(defs::CONFIG_FILE)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).context("failed to create config directory")?;
        }

        fs::write(path.as_ref(), content).context("failed to write config file")?;

        Ok(())
    }

    /// CLI flags and their environment fallbacks take precedence over the file.
    pub fn merge_with_cli(
        &mut self,
        source: Option<PathBuf>,
        target: Option<PathBuf>,
        verbose: bool,
        dry_run: bool,
    ) {
        if let Some(path) = source {
            self.source = path;
        }

        if let Some(path) = target {
            self.target = path;
        }

        self.verbose |= verbose;
        self.dry_run |= dry_run;
    }
}
