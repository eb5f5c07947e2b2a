//! Error types for solver setup.

use thiserror::Error;

/// Errors raised while configuring a solver.
///
/// Solve failures are not errors here; they come back as
/// [`SolveOutcome::Error`](nf_model::SolveOutcome::Error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
