// Copyright 2026 Fstab Edit Developers
// SPDX-License-Identifier: GPL-3.0-or-later

// Mount table locations
pub const DEFAULT_FSTAB: &str = "/etc/fstab";
pub const SOURCE_FSTAB_ENV: &str = "fstab";
pub const TARGET_FSTAB_ENV: &str = "targetFstab";

// Our own config
pub const CONFIG_FILE: &str = "/etc/fstab-edit/config.toml";

// Serialized table layout
pub const FSTAB_HEADER: &str = "# <device>\t<mountPoint>\t<fsType>\t<options>\t<dump>\t<pass>";
pub const FSTAB_COLUMNS: usize = 6;

// Template forced onto any entry whose device is tmpfs
pub const TMPFS_DEVICE: &str = "tmpfs";
pub const TMPFS_FS_TYPE: &str = "tmpfs";
pub const TMPFS_OPTIONS: &str = "nosuid,nodev";
