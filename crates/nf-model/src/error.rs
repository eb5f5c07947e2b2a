//! Error types for model assembly and solution handling.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Solution has {got} values but the model has {expected} variables")]
    ValueCountMismatch { expected: usize, got: usize },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
