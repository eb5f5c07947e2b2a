//! Formulation strategies and result decoding for network problems.
//!
//! Each problem kind has its own strategy that turns a validated
//! [`Network`](nf_graph::Network) into a fresh [`ModelSpec`](nf_model::ModelSpec):
//!
//! | kind | variables | objective | constraints |
//! |---|---|---|---|
//! | shortest path | binary per arc | min cost | out - in = +1 / -1 / 0 at every node |
//! | max flow | [0, capacity] per arc | max net source outflow | conservation at non-terminals |
//! | transportation, min-cost flow | [0, capacity or inf) | min cost | row per nonzero balance |
//!
//! [`Formulation`] selects the strategy from the problem kind; the
//! [`decode`] module maps a solver outcome back onto arcs.

pub mod balance_flow;
pub mod decode;
pub mod error;
pub mod max_flow;
pub mod shortest_path;
pub mod strategy;

pub use balance_flow::{BalanceFlow, BalanceRule};
pub use decode::{
    BINARY_THRESHOLD, FLOW_EPSILON, FlowAssignment, FlowResult, MaxFlowResult, PathResult,
    Unsolved, decode,
};
pub use error::{FormulationError, FormulationResult};
pub use max_flow::MaxFlow;
pub use shortest_path::ShortestPath;
pub use strategy::{Formulation, FormulationOptions, Strategy};
