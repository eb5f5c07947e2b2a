//! Core network data structures.

use std::collections::HashMap;

use nf_core::{ArcId, NodeId, ProblemKind, Real};

/// A node of the network.
///
/// Nodes hold no data of their own beyond a label for human reference;
/// supply/demand lives in the network's balance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

/// A directed arc `tail -> head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    pub id: ArcId,
    pub tail: NodeId,
    pub head: NodeId,
}

/// Per-arc attribute record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcAttrs {
    pub cost: Option<Real>,
    pub capacity: Option<Real>,
}

/// The network: a validated, immutable graph descriptor.
///
/// Built once by [`NetworkBuilder`](crate::NetworkBuilder) for a specific
/// [`ProblemKind`] and only read afterwards. Stores:
/// - nodes and arcs in declaration order (indexed by their IDs)
/// - one attribute record per arc and an optional balance per node
/// - compact outgoing/incoming adjacency
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) kind: ProblemKind,
    pub(crate) nodes: Vec<Node>,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) attrs: Vec<ArcAttrs>,
    pub(crate) balances: Vec<Option<Real>>,
    pub(crate) source: Option<NodeId>,
    pub(crate) sink: Option<NodeId>,

    /// Node i's outgoing arcs are `out_arcs[out_offsets[i]..out_offsets[i+1]]`.
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_arcs: Vec<ArcId>,
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_arcs: Vec<ArcId>,

    pub(crate) labels: HashMap<String, NodeId>,
    pub(crate) endpoints: HashMap<(NodeId, NodeId), ArcId>,
    pub(crate) warnings: Vec<String>,
}

impl Network {
    /// The problem kind this network was validated for.
    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// Label of a node, or its id rendered if unknown.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id)
            .map_or_else(|| id.to_string(), |node| node.label.clone())
    }

    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id.slot())
    }

    /// The arc `tail -> head`, if declared.
    pub fn arc_between(&self, tail: NodeId, head: NodeId) -> Option<ArcId> {
        self.endpoints.get(&(tail, head)).copied()
    }

    pub fn attrs(&self, id: ArcId) -> Option<&ArcAttrs> {
        self.attrs.get(id.slot())
    }

    pub fn cost(&self, id: ArcId) -> Option<Real> {
        self.attrs(id).and_then(|a| a.cost)
    }

    pub fn capacity(&self, id: ArcId) -> Option<Real> {
        self.attrs(id).and_then(|a| a.capacity)
    }

    /// Declared supply/demand of a node (positive = demand).
    pub fn balance(&self, id: NodeId) -> Option<Real> {
        self.balances.get(id.slot()).copied().flatten()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.sink
    }

    /// Arcs leaving `node`, in declaration order.
    pub fn outgoing(&self, node: NodeId) -> &[ArcId] {
        Self::slice(&self.out_offsets, &self.out_arcs, node)
    }

    /// Arcs entering `node`, in declaration order.
    pub fn incoming(&self, node: NodeId) -> &[ArcId] {
        Self::slice(&self.in_offsets, &self.in_arcs, node)
    }

    /// Sum of supplies, reported as a positive quantity.
    pub fn total_supply(&self) -> Real {
        self.balances.iter().flatten().filter(|d| **d < 0.0).map(|d| -d).sum()
    }

    pub fn total_demand(&self) -> Real {
        self.balances.iter().flatten().filter(|d| **d > 0.0).sum()
    }

    /// Non-fatal findings recorded during validation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn slice<'a>(offsets: &[usize], flat: &'a [ArcId], node: NodeId) -> &'a [ArcId] {
        let idx = node.slot();
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }
}

#[cfg(test)]
mod tests {
    use crate::NetworkBuilder;
    use nf_core::{NodeId, ProblemKind};

    #[test]
    fn adjacency_follows_declaration_order() {
        let mut b = NetworkBuilder::new();
        let x = b.add_node("x");
        let y = b.add_node("y");
        let z = b.add_node("z");
        let xy = b.add_arc(x, y);
        let xz = b.add_arc(x, z);
        let yz = b.add_arc(y, z);
        for (t, h) in [(x, y), (x, z), (y, z)] {
            b.set_capacity(t, h, 1.0);
        }
        b.set_source(x);
        b.set_sink(z);
        let net = b.build(ProblemKind::MaxFlow).unwrap();

        assert_eq!(net.outgoing(x), &[xy, xz]);
        assert_eq!(net.incoming(z), &[xz, yz]);
        assert!(net.incoming(x).is_empty());
        assert!(net.outgoing(NodeId::from_index(42)).is_empty());
        assert_eq!(net.arc_between(y, z), Some(yz));
        assert_eq!(net.arc_between(z, y), None);
        assert_eq!(net.node_by_label("y"), Some(y));
        assert_eq!(net.label(NodeId::from_index(42)), "n42");
    }
}
