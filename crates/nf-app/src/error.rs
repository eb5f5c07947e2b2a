//! Error types for the nf-app service layer.

/// Everything that can stop a problem before or while it is handed to a
/// solver. An infeasible or unbounded model is not an error; it is
/// reported in [`Report::outcome`](crate::Report::outcome).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] nf_project::ProjectError),

    #[error(transparent)]
    Core(#[from] nf_core::CoreError),

    #[error("Network validation failed: {0}")]
    Validation(#[from] nf_graph::ValidationError),

    #[error("Formulation error: {0}")]
    Formulation(#[from] nf_formulation::FormulationError),

    #[error("Solver error: {0}")]
    Solver(#[from] nf_solver::SolverError),

    #[error("Compilation failed: {0}")]
    Compile(String),
}

/// Result type for nf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<nf_project::ValidationError> for AppError {
    fn from(err: nf_project::ValidationError) -> Self {
        AppError::Project(err.into())
    }
}
