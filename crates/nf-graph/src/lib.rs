//! nf-graph: graph descriptor layer for netflow.
//!
//! Provides:
//! - Core network data structures (Node, Arc, ArcAttrs, Network)
//! - Incremental builder with per-problem validation
//! - Compact in/out adjacency for formulation
//!
//! # Example
//!
//! ```
//! use nf_core::ProblemKind;
//! use nf_graph::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let s = builder.add_node("s");
//! let t = builder.add_node("t");
//! builder.add_arc(s, t);
//! builder.set_cost(s, t, 4.0);
//! builder.set_source(s);
//! builder.set_sink(t);
//! let network = builder.build(ProblemKind::ShortestPath).unwrap();
//!
//! assert_eq!(network.nodes().len(), 2);
//! assert_eq!(network.arcs().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub(crate) mod validate;

pub use builder::{BalanceCheck, NetworkBuilder};
pub use error::{ValidationError, ValidationResult};
pub use network::{Arc, ArcAttrs, Network, Node};
