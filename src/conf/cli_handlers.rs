// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    conf::{cli::Cli, config::Config},
    defs,
    fstab::{self, MountTable},
    utils,
};

/// A path flag wins over its environment variable; an empty variable counts as unset.
fn path_override(flag: Option<PathBuf>, env_value: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path).with_context(|| {
            format!(
                "Failed to load config from custom path: {}",
                config_path.display()
            )
        })?
    } else {
        match Config::load_default() {
            Ok(config) => config,
            Err(e) => {
                let is_not_found = e
                    .root_cause()
                    .downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);

                if !is_not_found {
                    return Err(e).context(format!(
                        "Failed to load default config from {}",
                        defs::CONFIG_FILE
                    ));
                }
                Config::default()
            }
        }
    };

    config.merge_with_cli(
        path_override(cli.source.clone(), env::var_os(defs::SOURCE_FSTAB_ENV)),
        path_override(cli.target.clone(), env::var_os(defs::TARGET_FSTAB_ENV)),
        cli.verbose,
        cli.dry_run,
    );

    Ok(config)
}

fn trace_table(label: &str, table: &MountTable) {
    if table.is_empty() {
        tracing::debug!("{}: no entries", label);
        return;
    }
    tracing::debug!("{} ({} entries):", label, table.len());
    for line in table.serialize().lines().skip(1) {
        tracing::debug!("   {}", line);
    }
}

/// Reads the source table, applies every directive and writes the result.
/// Nothing is written when a directive fails.
pub fn handle_apply<S: AsRef<str>>(config: &Config, directives: &[S]) -> Result<()> {
    tracing::info!(">> Source table: {}", config.source.display());

    let mut table = utils::read_table(&config.source)?;
    trace_table("Parsed table", &table);

    let applied = fstab::interpret(&mut table, directives)
        .context("Failed to apply directives, no changes written")?;

    for record in &applied {
        tracing::info!("   [{}] {}", record.position, record.directive);
    }
    trace_table("Final table", &table);

    if config.dry_run {
        tracing::info!(":: DRY-RUN :: not writing {}", config.target.display());
        println!("{}", table.serialize());
        return Ok(());
    }

    utils::write_table(&config.target, &table)?;
    tracing::info!(
        ">> Wrote {} entries to {}",
        table.len(),
        config.target.display()
    );

    Ok(())
}

pub fn handle_show(config: &Config, json: bool) -> Result<()> {
    let table = utils::read_table(&config.source)?;

    if json {
        let json = serde_json::to_string_pretty(&table).context("Failed to serialize table to JSON")?;
        println!("{}", json);
    } else {
        println!("{}", table.serialize());
    }

    Ok(())
}

pub fn handle_gen_config(output: &Path) -> Result<()> {
    Config::default()
        .save_to_file(output)
        .with_context(|| format!("Failed to save generated config to {}", output.display()))
}

pub fn handle_show_config(config: &Config) -> Result<()> {
    let json = serde_json::to_string(config).context("Failed to serialize config to JSON")?;

    println!("{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::fstab::error::FstabError;

    fn config_in(dir: &Path, source: &str) -> Config {
        let config = Config {
            source: dir.join("fstab"),
            target: dir.join("fstab.new"),
            ..Config::default()
        };
        fs::write(&config.source, source).unwrap();
        config
    }

    #[test]
    fn empty_env_path_falls_back_to_config() {
        assert_eq!(path_override(None, Some(OsString::new())), None);
        assert_eq!(path_override(None, None), None);

        let mut config = Config::default();
        config.merge_with_cli(
            path_override(None, Some(OsString::new())),
            path_override(None, Some(OsString::from(""))),
            false,
            false,
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn env_path_used_unless_flag_given() {
        assert_eq!(
            path_override(None, Some(OsString::from("/mnt/etc/fstab"))),
            Some(PathBuf::from("/mnt/etc/fstab"))
        );
        assert_eq!(
            path_override(
                Some(PathBuf::from("/tmp/fstab")),
                Some(OsString::from("/mnt/etc/fstab"))
            ),
            Some(PathBuf::from("/tmp/fstab"))
        );
    }

    #[test]
    fn apply_writes_target_and_leaves_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = "/dev/sda1\t/\text4\tdefaults\t1\t1\n/dev/sda2 /tmp ext4 defaults 0 2\n";
        let config = config_in(dir.path(), source);

        handle_apply(&config, &["edit", "/tmp", "device=tmpfs"]).unwrap();

        assert_eq!(fs::read_to_string(&config.source).unwrap(), source);
        assert_eq!(
            fs::read_to_string(&config.target).unwrap(),
            format!(
                "{}\n/dev/sda1\t/\text4\tdefaults\t1\t1\ntmpfs\t/tmp\ttmpfs\tnosuid,nodev\t0\t0\n",
                defs::FSTAB_HEADER
            )
        );
    }

    #[test]
    fn failed_directive_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/dev/sda1 / ext4 defaults 1 1\n");

        let err = handle_apply(&config, &["remove", "/", "bogus", "/tmp"]).unwrap_err();

        assert_eq!(
            err.downcast_ref::<FstabError>(),
            Some(&FstabError::UnknownCommand {
                command: "bogus".to_string(),
                position: 2
            })
        );
        assert!(!config.target.exists());
    }

    #[test]
    fn dry_run_does_not_touch_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "");
        config.dry_run = true;

        handle_apply(&config, &["edit", "/data", "fsType=ext4"]).unwrap();
        assert!(!config.target.exists());
    }

    #[test]
    fn in_place_edit_when_source_is_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "/dev/sda1 / ext4 defaults 1 1\n");
        config.target = config.source.clone();

        handle_apply(&config, &["remove", "/"]).unwrap();
        assert_eq!(
            fs::read_to_string(&config.source).unwrap(),
            format!("{}\n", defs::FSTAB_HEADER)
        );
    }

    #[test]
    fn show_reads_source_in_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/dev/sda1 / ext4 defaults 1 1\n");

        handle_show(&config, false).unwrap();
        handle_show(&config, true).unwrap();
        assert!(!config.target.exists());
    }

    #[test]
    fn show_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            source: dir.path().join("absent"),
            ..Config::default()
        };
        assert!(handle_show(&config, true).is_err());
    }

    #[test]
    fn gen_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        handle_gen_config(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }
}
