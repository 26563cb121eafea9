//! Error types for network solving.

use hl_components::ComponentError;
use thiserror::Error;

/// Errors that can occur during network solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A segment failed; `position` is 1-based in input order.
    #[error("Segment {position} failed: {source}")]
    Segment {
        position: usize,
        #[source]
        source: ComponentError,
    },
}

impl SolverError {
    /// 1-based position of the failing segment.
    pub fn position(&self) -> usize {
        match self {
            SolverError::Segment { position, .. } => *position,
        }
    }

    pub fn cause(&self) -> &ComponentError {
        match self {
            SolverError::Segment { source, .. } => source,
        }
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
