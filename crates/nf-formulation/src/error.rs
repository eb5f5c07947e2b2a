//! Error types for formulation.

use nf_core::ProblemKind;
use thiserror::Error;

pub type FormulationResult<T> = Result<T, FormulationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulationError {
    /// The network was validated for a kind whose requirements differ.
    #[error("Network validated for {validated} cannot be formulated as {requested}")]
    KindMismatch {
        requested: ProblemKind,
        validated: ProblemKind,
    },
}
