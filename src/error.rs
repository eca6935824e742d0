// Load-time error types: level ingestion and configuration validation.
// The per-step simulation path never surfaces errors; everything that can
// be rejected is rejected before the match starts.

use thiserror::Error;

/// Level ingestion errors. Any of these aborts match creation; the
/// simulation never runs against a partially parsed arena.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("level grid is empty")]
    EmptyGrid,
    #[error("row {row} has {len} tiles, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTileCode { code: u8, x: usize, y: usize },
    #[error("border tile at ({x}, {y}) is not bedrock")]
    OpenBorder { x: usize, y: usize },
    #[error("player spawn at ({x}, {y}) overlaps solid terrain")]
    BlockedSpawn { x: i32, y: i32 },
}

/// Configuration validation errors, checked once at match creation so the
/// per-step damage/ratio calculations never see a zero denominator.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{weapon}: max ammo must be greater than zero")]
    ZeroAmmo { weapon: &'static str },
    #[error("{weapon}: {field} must be greater than zero")]
    NonPositive {
        weapon: &'static str,
        field: &'static str,
    },
    #[error("{weapon}: {field} must not be negative")]
    Negative {
        weapon: &'static str,
        field: &'static str,
    },
    #[error("win score must be at least 1, got {value}")]
    InvalidWinScore { value: i32 },
}
