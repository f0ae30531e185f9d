// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod entry;
pub mod error;
pub mod interpreter;
pub mod table;

pub use self::{interpreter::interpret, table::MountTable};
