// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Serialize, Serializer};

use super::{
    entry::MountEntry,
    error::{FstabError, Result},
};
use crate::defs;

/// Ordered mount table. Row order is preserved from input to output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountTable {
    entries: Vec<MountEntry>,
}

/// Serialized as a plain array of the live entries, matching the text output.
impl Serialize for MountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.live().map(MountEntry::rendered))
    }
}

impl MountTable {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses fstab text. Full-line `#` comments are ignored and rows without
    /// exactly six columns are logged and skipped.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();

        for line in raw.split('\n') {
            if line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            match MountEntry::from_fields(&fields) {
                Ok(entry) => entries.push(entry),
                Err(e) if fields.is_empty() => {
                    tracing::debug!("{}, skipping blank line", e);
                }
                Err(e) => {
                    tracing::warn!("{}, skipping line", e);
                }
            }
        }

        Self { entries }
    }

    /// Renders the header followed by every live row, joined by newlines.
    /// No trailing newline is emitted.
    pub fn serialize(&self) -> String {
        std::iter::once(defs::FSTAB_HEADER.to_string())
            .chain(self.live().map(MountEntry::to_fstab_line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    /// Entries that have not been removed.
    pub fn live(&self) -> impl Iterator<Item = &MountEntry> {
        self.entries.iter().filter(|e| !e.removed)
    }

    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub fn find(&self, mount_point: &str) -> Option<&MountEntry> {
        self.live().find(|e| e.mount_point == mount_point)
    }

    pub fn find_mut(&mut self, mount_point: &str) -> Option<&mut MountEntry> {
        self.entries
            .iter_mut()
            .find(|e| !e.removed && e.mount_point == mount_point)
    }

    pub fn push(&mut self, entry: MountEntry) {
        self.entries.push(entry);
    }

    /// Edits the live entry at `mount_point`, or creates and appends one.
    /// A new entry is only appended when the edit succeeds.
    pub fn edit_or_add(&mut self, mount_point: &str, expression: &str) -> Result<()> {
        if let Some(entry) = self.find_mut(mount_point) {
            return entry.edit(expression);
        }

        let mut entry = MountEntry::new(mount_point);
        entry.edit(expression)?;
        tracing::debug!("adding new entry for {}", mount_point);
        self.push(entry);
        Ok(())
    }

    /// Tombstones the live entry at `mount_point`.
    pub fn remove(&mut self, mount_point: &str) -> Result<()> {
        let entry = self
            .find_mut(mount_point)
            .ok_or_else(|| FstabError::NotFound(mount_point.to_string()))?;
        entry.removed = true;
        Ok(())
    }
}
