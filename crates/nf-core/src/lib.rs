//! nf-core: stable foundation for netflow.
//!
//! Contains:
//! - ids (compact typed IDs for nodes and arcs)
//! - numeric (Real + tolerances + float helpers)
//! - kind (the problem-type selector)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod kind;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use kind::ProblemKind;
pub use numeric::*;
