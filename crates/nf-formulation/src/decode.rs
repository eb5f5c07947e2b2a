//! Result decoding: solver outcome -> path / flow assignment.

use std::collections::HashMap;

use nf_core::{ArcId, NodeId, ProblemKind, Real};
use nf_graph::Network;
use nf_model::{Solution, SolveOutcome};
use thiserror::Error;

/// A binary selection variable counts as chosen above this value.
pub const BINARY_THRESHOLD: Real = 0.5;

/// Flows at or below this value are treated as zero.
pub const FLOW_EPSILON: Real = 1e-9;

/// A source -> sink path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Selected arcs in walking order from the source.
    pub arcs: Vec<ArcId>,
    /// Selected arcs off the simple source -> sink walk, in declaration
    /// order: cycles under negative costs, including cycles through a node
    /// of the walk.
    pub detached: Vec<ArcId>,
    pub total_cost: Real,
}

impl PathResult {
    /// Node sequence of the walk, starting at the first arc's tail.
    pub fn nodes(&self, network: &Network) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.arcs.len() + 1);
        for (i, arc) in self.arcs.iter().filter_map(|&a| network.arc(a)).enumerate() {
            if i == 0 {
                nodes.push(arc.tail);
            }
            nodes.push(arc.head);
        }
        nodes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlowResult {
    /// Positive arc flows in arc declaration order.
    pub flows: Vec<(ArcId, Real)>,
    pub total_flow: Real,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowAssignment {
    /// Positive arc flows in arc declaration order.
    pub flows: Vec<(ArcId, Real)>,
    pub total_cost: Real,
}

/// Decoded optimum, tagged by problem kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    ShortestPath(PathResult),
    Transportation(FlowAssignment),
    MinCostFlow(FlowAssignment),
    MaxFlow(MaxFlowResult),
}

impl FlowResult {
    pub fn kind(&self) -> ProblemKind {
        match self {
            FlowResult::ShortestPath(_) => ProblemKind::ShortestPath,
            FlowResult::Transportation(_) => ProblemKind::Transportation,
            FlowResult::MinCostFlow(_) => ProblemKind::MinCostFlow,
            FlowResult::MaxFlow(_) => ProblemKind::MaxFlow,
        }
    }

    /// Total cost, or total flow for max-flow.
    pub fn objective(&self) -> Real {
        match self {
            FlowResult::ShortestPath(p) => p.total_cost,
            FlowResult::Transportation(a) | FlowResult::MinCostFlow(a) => a.total_cost,
            FlowResult::MaxFlow(m) => m.total_flow,
        }
    }

    /// Flow on `arc` (1 for a path arc), 0 when the arc carries nothing.
    pub fn flow(&self, arc: ArcId) -> Real {
        let flows = match self {
            FlowResult::ShortestPath(p) => {
                let on_path = p.arcs.contains(&arc) || p.detached.contains(&arc);
                return if on_path { 1.0 } else { 0.0 };
            }
            FlowResult::Transportation(a) | FlowResult::MinCostFlow(a) => &a.flows,
            FlowResult::MaxFlow(m) => &m.flows,
        };
        flows
            .iter()
            .find(|(a, _)| *a == arc)
            .map_or(0.0, |&(_, v)| v)
    }

    pub fn as_path(&self) -> Option<&PathResult> {
        match self {
            FlowResult::ShortestPath(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_max_flow(&self) -> Option<&MaxFlowResult> {
        match self {
            FlowResult::MaxFlow(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_assignment(&self) -> Option<&FlowAssignment> {
        match self {
            FlowResult::Transportation(a) | FlowResult::MinCostFlow(a) => Some(a),
            _ => None,
        }
    }
}

/// Why no optimum could be decoded. A normal outcome, not a defect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unsolved {
    #[error("no feasible solution exists")]
    Infeasible,

    #[error("objective is unbounded")]
    Unbounded,

    #[error("solver error: {message}")]
    SolverError { message: String },
}

impl Unsolved {
    /// The model itself admits no optimum (as opposed to an engine failure).
    pub fn is_no_solution(&self) -> bool {
        matches!(self, Unsolved::Infeasible | Unsolved::Unbounded)
    }

    pub fn is_solver_error(&self) -> bool {
        matches!(self, Unsolved::SolverError { .. })
    }
}

/// Decode `outcome` for a model formulated as `kind` on `network`.
pub fn decode(
    kind: ProblemKind,
    network: &Network,
    outcome: SolveOutcome,
) -> Result<FlowResult, Unsolved> {
    let solution = match outcome {
        SolveOutcome::Optimal(solution) => solution,
        SolveOutcome::Infeasible => return Err(Unsolved::Infeasible),
        SolveOutcome::Unbounded => return Err(Unsolved::Unbounded),
        SolveOutcome::Error { message } => return Err(Unsolved::SolverError { message }),
    };

    Ok(match kind {
        ProblemKind::ShortestPath => FlowResult::ShortestPath(decode_path(network, &solution)),
        ProblemKind::MaxFlow => FlowResult::MaxFlow(MaxFlowResult {
            flows: positive_flows(network, &solution),
            total_flow: solution.objective(),
        }),
        ProblemKind::Transportation => FlowResult::Transportation(FlowAssignment {
            flows: positive_flows(network, &solution),
            total_cost: solution.objective(),
        }),
        ProblemKind::MinCostFlow => FlowResult::MinCostFlow(FlowAssignment {
            flows: positive_flows(network, &solution),
            total_cost: solution.objective(),
        }),
    })
}

fn positive_flows(network: &Network, solution: &Solution) -> Vec<(ArcId, Real)> {
    network
        .arcs()
        .iter()
        .filter_map(|arc| solution.value(arc.id).map(|v| (arc.id, v)))
        .filter(|&(_, v)| v > FLOW_EPSILON)
        .collect()
}

fn decode_path(network: &Network, solution: &Solution) -> PathResult {
    // Selected and not yet walked, by arc slot.
    let mut unused: Vec<bool> = network
        .arcs()
        .iter()
        .map(|arc| solution.value(arc.id).is_some_and(|v| v > BINARY_THRESHOLD))
        .collect();

    let mut arcs = Vec::new();
    let mut detached = Vec::new();
    if let (Some(source), Some(sink)) = (network.source(), network.sink()) {
        // Node -> number of walk arcs taken before reaching it.
        let mut visited = HashMap::from([(source, 0usize)]);
        let mut current = source;
        while current != sink {
            let next = network
                .outgoing(current)
                .iter()
                .copied()
                .find(|a| unused[a.slot()]);
            let Some(arc) = next else {
                break;
            };
            unused[arc.slot()] = false;
            let Some(head) = network.arc(arc).map(|a| a.head) else {
                break;
            };
            arcs.push(arc);
            if let Some(&depth) = visited.get(&head) {
                // Closed a cycle: cut it out and resume from `head`.
                for cut in arcs.drain(depth..) {
                    if let Some(a) = network.arc(cut).filter(|a| a.head != head) {
                        visited.remove(&a.head);
                    }
                    detached.push(cut);
                }
            } else {
                visited.insert(head, arcs.len());
            }
            current = head;
        }
    }

    detached.extend(
        network
            .arcs()
            .iter()
            .map(|arc| arc.id)
            .filter(|a| unused[a.slot()]),
    );
    detached.sort_by_key(|a| a.index());
    PathResult {
        arcs,
        detached,
        total_cost: solution.objective(),
    }
}
