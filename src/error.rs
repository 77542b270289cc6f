//! Errors raised while loading configuration
//!
//! Gameplay itself never fails: invalid actions are skipped. Only data coming
//! from outside the binary (settings files, level packs) can be rejected.

use thiserror::Error;

/// Problems with a level grid or level pack
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("level {0} does not exist (have {1} levels)")]
    UnknownLevel(u32, usize),
    #[error("level {level}: expected {expected} rows, found {found}")]
    RowCount {
        level: u32,
        expected: usize,
        found: usize,
    },
    #[error("level {level}, row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        level: u32,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level {level}: expected exactly one start cell, found {found}")]
    StartCell { level: u32, found: usize },
    #[error("level {level}: {found} enemy cells exceed the limit of {max}")]
    TooManyEnemies {
        level: u32,
        found: usize,
        max: usize,
    },
    #[error("level {level}: no enemy spawns at easy difficulty")]
    NoEnemies { level: u32 },
    #[error("level pack contains no levels")]
    EmptyPack,
    #[error("invalid level pack JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read level pack: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
