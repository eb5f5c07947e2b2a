//! Service layer for netflow.
//!
//! Ties the pipeline together: problem definition -> validated network ->
//! model -> solver -> decoded result, for single problems and batches.

pub mod compile;
pub mod error;
pub mod pipeline;

pub use compile::{CompiledProblem, compile_problem};
pub use error::{AppError, AppResult};
pub use pipeline::{Report, solve_batch, solve_network, solve_network_as, solve_problem};
