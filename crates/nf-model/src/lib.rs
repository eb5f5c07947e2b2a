//! Solver-neutral linear/integer program representation.
//!
//! A [`ModelSpec`] is assembled once through a [`ModelBuilder`] and is a
//! plain value afterwards: it can be cloned, shared across threads and
//! handed to any solver adapter. [`SolveOutcome`] is what an adapter
//! returns for it.

pub mod error;
pub mod expr;
pub mod outcome;
pub mod spec;

pub use error::{ModelError, ModelResult};
pub use expr::{LinearExpr, Relation};
pub use outcome::{Solution, SolveOutcome, SolveStatus};
pub use spec::{
    Constraint, ModelBuilder, ModelSpec, ModelStats, Objective, Sense, VarDomain, VarId, Variable,
};
