// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Errors raised while parsing or editing a mount table.
///
/// `MalformedRow` is recovered by the parser (the row is skipped). Every other
/// variant aborts the directive run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FstabError {
    #[error("invalid column count {count} in row '{line}'")]
    MalformedRow { line: String, count: usize },

    #[error("invalid expression '{0}', expected name=value")]
    InvalidExpression(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid boolean value '{value}' for {field}")]
    InvalidBooleanValue { field: String, value: String },

    #[error("no mount point {0} found")]
    NotFound(String),

    #[error("unknown command '{command}' at {position}")]
    UnknownCommand { command: String, position: usize },

    #[error("missing {argument} for '{command}' at {position}")]
    MissingArgument {
        command: String,
        position: usize,
        argument: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FstabError>;
