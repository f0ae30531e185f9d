// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::error::{FstabError, Result};
use crate::defs;

/// One row of the mount table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
    pub options: String,
    pub dump: bool,
    pub pass: bool,
    /// Tombstone. Removed entries stay in the table but are never written out.
    #[serde(skip)]
    pub removed: bool,
}

/// Editable columns, addressed by their camelCase names in `name=value` expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Device,
    MountPoint,
    FsType,
    Options,
    Dump,
    Pass,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Device => "device",
            Field::MountPoint => "mountPoint",
            Field::FsType => "fsType",
            Field::Options => "options",
            Field::Dump => "dump",
            Field::Pass => "pass",
        }
    }
}

impl FromStr for Field {
    type Err = FstabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "device" => Ok(Field::Device),
            "mountPoint" => Ok(Field::MountPoint),
            "fsType" => Ok(Field::FsType),
            "options" => Ok(Field::Options),
            "dump" => Ok(Field::Dump),
            "pass" => Ok(Field::Pass),
            other => Err(FstabError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean grammar accepted in edit expressions. Rows read from disk only
/// honour the literal "1", see [`MountEntry::from_fields`].
fn parse_bool(field: Field, value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(FstabError::InvalidBooleanValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn bool_to_binary(v: bool) -> &'static str {
    if v { "1" } else { "0" }
}

impl MountEntry {
    pub fn new(mount_point: impl Into<String>) -> Self {
        Self {
            mount_point: mount_point.into(),
            ..Self::default()
        }
    }

    /// Builds an entry from the whitespace-separated columns of one table row.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() != defs::FSTAB_COLUMNS {
            return Err(FstabError::MalformedRow {
                line: fields.join(" "),
                count: fields.len(),
            });
        }

        Ok(Self {
            device: fields[0].to_string(),
            mount_point: fields[1].to_string(),
            fs_type: fields[2].to_string(),
            options: fields[3].to_string(),
            dump: fields[4] == "1",
            pass: fields[5] == "1",
            removed: false,
        })
    }

    pub fn is_tmpfs(&self) -> bool {
        self.device == defs::TMPFS_DEVICE
    }

    pub fn apply_tmpfs_template(&mut self) {
        if self.is_tmpfs() {
            self.fs_type = defs::TMPFS_FS_TYPE.to_string();
            self.options = defs::TMPFS_OPTIONS.to_string();
            self.dump = false;
            self.pass = false;
        }
    }

    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Device => {
                self.device = value.to_string();
                self.apply_tmpfs_template();
            }
            Field::MountPoint => self.mount_point = value.to_string(),
            Field::FsType => self.fs_type = value.to_string(),
            Field::Options => self.options = value.to_string(),
            Field::Dump => self.dump = parse_bool(field, value)?,
            Field::Pass => self.pass = parse_bool(field, value)?,
        }
        Ok(())
    }

    /// Applies a `name=value` expression. On error the entry is left untouched.
    pub fn edit(&mut self, expression: &str) -> Result<()> {
        let mut operands = expression.split('=');
        let (Some(name), Some(value), None) = (operands.next(), operands.next(), operands.next())
        else {
            return Err(FstabError::InvalidExpression(expression.to_string()));
        };

        let field: Field = name.parse()?;
        self.set(field, value)
    }

    /// Copy with the tmpfs template applied, as it is written out.
    pub fn rendered(&self) -> Self {
        let mut rendered = self.clone();
        rendered.apply_tmpfs_template();
        rendered
    }

    pub fn to_fstab_line(&self) -> String {
        let rendered = self.rendered();

        [
            rendered.device.as_str(),
            rendered.mount_point.as_str(),
            rendered.fs_type.as_str(),
            rendered.options.as_str(),
            bool_to_binary(rendered.dump),
            bool_to_binary(rendered.pass),
        ]
        .join("\t")
    }
}
