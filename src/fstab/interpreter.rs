// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use super::{
    error::{FstabError, Result},
    table::MountTable,
};

/// A single parsed command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Edit {
        mount_point: String,
        expression: String,
    },
    Remove {
        mount_point: String,
    },
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Edit {
                mount_point,
                expression,
            } => write!(f, "edit {} {}", mount_point, expression),
            Directive::Remove { mount_point } => write!(f, "remove {}", mount_point),
        }
    }
}

fn argument<S: AsRef<str>>(
    tokens: &[S],
    command: &str,
    position: usize,
    offset: usize,
    name: &'static str,
) -> Result<String> {
    tokens
        .get(position + offset)
        .map(|t| t.as_ref().to_string())
        .ok_or_else(|| FstabError::MissingArgument {
            command: command.to_string(),
            position,
            argument: name,
        })
}

impl Directive {
    /// Reads the command at `position` and returns it together with the
    /// number of argument tokens it consumes.
    pub fn parse<S: AsRef<str>>(tokens: &[S], position: usize) -> Result<(Self, usize)> {
        let command = tokens.get(position).map(|t| t.as_ref()).unwrap_or_default();

        match command {
            "edit" => {
                let mount_point = argument(tokens, command, position, 1, "mount point")?;
                let expression = argument(tokens, command, position, 2, "expression")?;
                Ok((
                    Directive::Edit {
                        mount_point,
                        expression,
                    },
                    2,
                ))
            }
            "remove" => {
                let mount_point = argument(tokens, command, position, 1, "mount point")?;
                Ok((Directive::Remove { mount_point }, 1))
            }
            other => Err(FstabError::UnknownCommand {
                command: other.to_string(),
                position,
            }),
        }
    }

    pub fn apply(&self, table: &mut MountTable) -> Result<()> {
        match self {
            Directive::Edit {
                mount_point,
                expression,
            } => table.edit_or_add(mount_point, expression),
            Directive::Remove { mount_point } => table.remove(mount_point),
        }
    }
}

/// Record of a directive that was applied successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub position: usize,
    pub directive: Directive,
    pub consumed: usize,
}

pub struct Interpreter<'a> {
    table: &'a mut MountTable,
    applied: Vec<Applied>,
}

impl<'a> Interpreter<'a> {
    pub fn new(table: &'a mut MountTable) -> Self {
        Self {
            table,
            applied: Vec::new(),
        }
    }

    /// Applies the directive starting at `position` and returns how many
    /// argument tokens it consumed.
    pub fn step<S: AsRef<str>>(&mut self, tokens: &[S], position: usize) -> Result<usize> {
        let (directive, consumed) = Directive::parse(tokens, position)?;
        directive.apply(self.table)?;
        tracing::debug!("applied '{}' at {}", directive, position);

        self.applied.push(Applied {
            position,
            directive,
            consumed,
        });
        Ok(consumed)
    }

    /// Runs every directive in order. The first failure aborts the run;
    /// directives applied before it are not rolled back.
    pub fn run<S: AsRef<str>>(mut self, tokens: &[S]) -> Result<Vec<Applied>> {
        let mut position = 0;

        while position < tokens.len() {
            position += 1 + self.step(tokens, position)?;
        }

        Ok(self.applied)
    }
}

pub fn interpret<S: AsRef<str>>(table: &mut MountTable, tokens: &[S]) -> Result<Vec<Applied>> {
    Interpreter::new(table).run(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs;

    fn run(raw: &str, tokens: &[&str]) -> Result<String> {
        let mut table = MountTable::parse(raw);
        interpret(&mut table, tokens)?;
        Ok(table.serialize())
    }

    #[test]
    fn remove_root_leaves_header_only() {
        let out = run("/dev/sda1\t/\text4\tdefaults\t1\t1\n", &["remove", "/"]).unwrap();
        assert_eq!(out, defs::FSTAB_HEADER);
    }

    #[test]
    fn edit_new_tmpfs_mount() {
        let out = run("", &["edit", "/tmp", "device=tmpfs"]).unwrap();
        assert_eq!(
            out,
            format!("{}\ntmpfs\t/tmp\ttmpfs\tnosuid,nodev\t0\t0", defs::FSTAB_HEADER)
        );
    }

    #[test]
    fn tmpfs_wins_regardless_of_edit_order() {
        let tokens = [
            "edit", "/tmp", "device=tmpfs", "edit", "/tmp", "fsType=ext4", "edit", "/tmp",
            "options=rw", "edit", "/tmp", "dump=1", "edit", "/tmp", "pass=true",
        ];
        let out = run("", &tokens).unwrap();
        assert_eq!(
            out,
            format!("{}\ntmpfs\t/tmp\ttmpfs\tnosuid,nodev\t0\t0", defs::FSTAB_HEADER)
        );
    }

    #[test]
    fn mixed_directives_are_consumed_in_order() {
        let mut table = MountTable::parse(
            "/dev/sda1 / ext4 defaults 1 1\n/dev/sda2 /home ext4 defaults 0 1\n/dev/sda3 /var ext4 defaults 0 0\n",
        );
        let applied = interpret(
            &mut table,
            &["edit", "/home", "device=tmpfs", "remove", "/var", "edit", "/data", "fsType=xfs"],
        )
        .unwrap();

        let steps: Vec<_> = applied.iter().map(|a| (a.position, a.consumed)).collect();
        assert_eq!(steps, [(0, 2), (3, 1), (5, 2)]);
        assert_eq!(
            table.serialize(),
            format!(
                "{}\n/dev/sda1\t/\text4\tdefaults\t1\t1\ntmpfs\t/home\ttmpfs\tnosuid,nodev\t0\t0\n\t/data\txfs\t\t0\t0",
                defs::FSTAB_HEADER
            )
        );
    }

    #[test]
    fn step_reports_consumed_tokens() {
        let mut table = MountTable::new();
        let mut interpreter = Interpreter::new(&mut table);
        let tokens = ["edit", "/a", "fsType=ext4", "remove", "/a"];
        assert_eq!(interpreter.step(&tokens, 0).unwrap(), 2);
        assert_eq!(interpreter.step(&tokens, 3).unwrap(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn unknown_command_reports_position() {
        assert_eq!(
            run("", &["bogus", "/tmp"]),
            Err(FstabError::UnknownCommand {
                command: "bogus".to_string(),
                position: 0
            })
        );
        assert_eq!(
            run("", &["remove", "/x", "edit", "/x", "fsType=ext4", "frob"]).unwrap_err(),
            FstabError::NotFound("/x".to_string())
        );
        assert_eq!(
            run("", &["edit", "/x", "fsType=ext4", "frob"]).unwrap_err(),
            FstabError::UnknownCommand {
                command: "frob".to_string(),
                position: 3
            }
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            run("", &["remove"]),
            Err(FstabError::MissingArgument {
                command: "remove".to_string(),
                position: 0,
                argument: "mount point"
            })
        );
        assert_eq!(
            run("", &["edit", "/tmp"]),
            Err(FstabError::MissingArgument {
                command: "edit".to_string(),
                position: 0,
                argument: "expression"
            })
        );
        assert!(matches!(
            run("", &["edit"]),
            Err(FstabError::MissingArgument {
                argument: "mount point",
                ..
            })
        ));
    }

    #[test]
    fn failure_stops_the_run_without_rollback() {
        let mut table = MountTable::new();
        let err = interpret(
            &mut table,
            &["edit", "/a", "fsType=ext4", "edit", "/b", "nope=1", "edit", "/c", "fsType=xfs"],
        )
        .unwrap_err();

        assert_eq!(err, FstabError::UnknownField("nope".to_string()));
        assert!(table.find("/a").is_some());
        assert!(table.find("/b").is_none());
        assert!(table.find("/c").is_none());
    }

    #[test]
    fn empty_token_stream_is_a_no_op() {
        let tokens: [&str; 0] = [];
        let mut table = MountTable::parse("/dev/sda1 / ext4 defaults 1 1");
        assert!(interpret(&mut table, &tokens).unwrap().is_empty());
        assert_eq!(table.len(), 1);
    }
}
