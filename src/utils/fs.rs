// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};

use crate::fstab::MountTable;

/// Truncates and rewrites `path` in place. Symlinks are followed and the
/// target keeps its inode, mode and owner.
pub fn rewrite_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;

    file.write_all(content.as_ref())?;
    file.sync_all()?;
    Ok(())
}

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<MountTable> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read mount table {}", path.display()))?;

    Ok(MountTable::parse(&raw))
}

/// Writes the serialized table followed by a single trailing newline.
pub fn write_table<P: AsRef<Path>>(path: P, table: &MountTable) -> Result<()> {
    let path = path.as_ref();
    rewrite_file(path, format!("{}\n", table.serialize()))
        .with_context(|| format!("failed to write mount table {}", path.display()))
}
