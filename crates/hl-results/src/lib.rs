//! hl-results: solved network reports and their CSV/JSON exports.

pub mod export;
pub mod types;

pub use export::{load_json, save_csv, save_json, write_csv};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report has {inputs} input segments but {results} results")]
    LengthMismatch { inputs: usize, results: usize },
}
