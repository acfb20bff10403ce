//! Error types for bench-trends-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for bench-trends-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that work in both native and WASM environments
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(
        "Series '{label}' of chart '{chart}' has {points} points but there are {commits} commits"
    )]
    SeriesLengthMismatch {
        chart: String,
        label: String,
        points: usize,
        commits: usize,
    },

    #[error("Unknown graph kind: {0}")]
    UnknownKind(String),
}
