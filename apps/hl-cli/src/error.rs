//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] hl_project::ProjectError),

    #[error("Network solve failed: {0}")]
    Solver(#[from] hl_solver::SolverError),

    #[error("Segment solve failed: {0}")]
    Component(#[from] hl_components::ComponentError),

    #[error("Results error: {0}")]
    Results(#[from] hl_results::ResultsError),

    #[error("Profile error: {0}")]
    Profile(#[from] hl_project::ProfileError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CliResult<T> = Result<T, CliError>;
