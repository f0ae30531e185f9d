// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod fs;
pub mod log;

pub use self::{fs::*, log::*};
