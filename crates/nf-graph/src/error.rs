//! Descriptor validation errors.

use nf_core::{ArcId, NodeId, Real};
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A violated descriptor invariant. Raised before any model is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two nodes share a label.
    #[error("Duplicate node label {label:?}")]
    DuplicateNode { label: String },

    /// A reference to a node that was never declared.
    #[error("Unknown node {node} referenced by {context}")]
    UnknownNode { node: NodeId, context: &'static str },

    /// The same (tail, head) pair was declared twice.
    #[error("Duplicate arc {tail} -> {head}")]
    DuplicateArc { tail: NodeId, head: NodeId },

    /// A cost-based problem with an arc lacking a cost.
    #[error("Arc {arc} has no cost")]
    MissingCost { arc: ArcId },

    /// A cost was given for a pair that is not a declared arc.
    #[error("Cost given for undeclared arc {tail} -> {head}")]
    ExtraneousCost { tail: NodeId, head: NodeId },

    /// Capacities are required (or partially given) and one arc lacks one.
    #[error("Arc {arc} has no capacity")]
    MissingCapacity { arc: ArcId },

    /// A capacity was given for a pair that is not a declared arc.
    #[error("Capacity given for undeclared arc {tail} -> {head}")]
    ExtraneousCapacity { tail: NodeId, head: NodeId },

    #[error("Arc {arc} has negative capacity {value}")]
    NegativeCapacity { arc: ArcId, value: Real },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: Real },

    #[error("Problem requires a source node")]
    MissingSource,

    #[error("Problem requires a sink node")]
    MissingSink,

    #[error("Source and sink are the same node {node}")]
    SourceIsSink { node: NodeId },

    /// Total supply and total demand differ (strict balance check).
    #[error("Unbalanced network: total supply {supply} != total demand {demand}")]
    Unbalanced { supply: Real, demand: Real },
}
