use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActuatorError>;

/// Caller contract violations. None of these are retried; a rejected call leaves every piece of
/// presentation state exactly as it was.
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("tile at ({x}, {y}) has value {value}, expected a positive power of two")]
    InvalidValue { x: u32, y: u32, value: u32 },

    #[error("position ({x}, {y}) lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        columns: usize,
        rows: usize,
    },

    #[error("cell ({column}, {row}) holds a tile positioned at ({x}, {y})")]
    Misplaced {
        column: usize,
        row: usize,
        x: u32,
        y: u32,
    },

    #[error("merged tile at ({x}, {y}) lists {count} sources, expected 1 or 2")]
    MergeArity { x: u32, y: u32, count: usize },

    #[error("merged tile at ({x}, {y}) has a source that is itself a merge result")]
    NestedMerge { x: u32, y: u32 },

    #[error("answer option {index} does not exist ({available} available)")]
    UnknownOption { index: usize, available: usize },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
