//! Solver adapters for network-flow models.
//!
//! A [`SolverAdapter`] takes a read-only [`ModelSpec`](nf_model::ModelSpec)
//! and reports a [`SolveOutcome`](nf_model::SolveOutcome). The bundled
//! [`MicrolpSolver`] runs the pure-Rust `microlp` simplex / branch-and-bound
//! engine; [`DeadlineSolver`] adds a wall-clock limit to any adapter.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod deadline;
pub mod error;

pub use adapter::SolverAdapter;
pub use backend::MicrolpSolver;
pub use config::{SolverConfig, build_solver};
pub use deadline::DeadlineSolver;
pub use error::{SolverError, SolverResult};
