//! Incremental network builder.

use std::collections::HashMap;

use nf_core::{ArcId, NodeId, ProblemKind, Real};

use crate::error::ValidationResult;
use crate::network::{Arc, ArcAttrs, Network, Node};
use crate::validate;

/// What to do when total supply and total demand differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalanceCheck {
    /// Reject the network with [`ValidationError::Unbalanced`](crate::ValidationError::Unbalanced).
    #[default]
    Strict,
    /// Log a warning, record it on the network and keep the data as given.
    Warn,
}

/// Builder for constructing a network incrementally.
///
/// Setters only record raw input; nothing is checked until `build()`,
/// which validates everything against the requested problem kind and
/// freezes the result into an immutable [`Network`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    pub(crate) nodes: Vec<Node>,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) costs: Vec<((NodeId, NodeId), Real)>,
    pub(crate) capacities: Vec<((NodeId, NodeId), Real)>,
    pub(crate) balances: Vec<(NodeId, Real)>,
    pub(crate) source: Option<NodeId>,
    pub(crate) sink: Option<NodeId>,
    pub(crate) balance_check: BalanceCheck,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its ID.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            label: label.into(),
        });
        id
    }

    /// Look up a node previously added under `label`.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    /// Add a directed arc `tail -> head` and return its ID.
    pub fn add_arc(&mut self, tail: NodeId, head: NodeId) -> ArcId {
        let id = ArcId::from_index(self.arcs.len() as u32);
        self.arcs.push(Arc { id, tail, head });
        id
    }

    /// Record the cost of arc `tail -> head`. A later value replaces an earlier one.
    pub fn set_cost(&mut self, tail: NodeId, head: NodeId, cost: Real) -> &mut Self {
        self.costs.push(((tail, head), cost));
        self
    }

    /// Record the capacity of arc `tail -> head`.
    pub fn set_capacity(&mut self, tail: NodeId, head: NodeId, capacity: Real) -> &mut Self {
        self.capacities.push(((tail, head), capacity));
        self
    }

    /// Record a node's supply (negative) or demand (positive).
    pub fn set_balance(&mut self, node: NodeId, balance: Real) -> &mut Self {
        self.balances.push((node, balance));
        self
    }

    pub fn set_source(&mut self, node: NodeId) -> &mut Self {
        self.source = Some(node);
        self
    }

    pub fn set_sink(&mut self, node: NodeId) -> &mut Self {
        self.sink = Some(node);
        self
    }

    pub fn set_balance_check(&mut self, check: BalanceCheck) -> &mut Self {
        self.balance_check = check;
        self
    }

    /// Validate the raw input for `kind` and return an immutable `Network`.
    pub fn build(self, kind: ProblemKind) -> ValidationResult<Network> {
        validate::validate_nodes(&self.nodes)?;
        let endpoints = validate::validate_arcs(&self.nodes, &self.arcs)?;

        let mut attrs = vec![ArcAttrs::default(); self.arcs.len()];
        let costs = validate::collect_attribute(&endpoints, &self.costs, validate::Attr::Cost)?;
        let capacities =
            validate::collect_attribute(&endpoints, &self.capacities, validate::Attr::Capacity)?;
        validate::check_coverage(&self.arcs, &costs, kind.requires_costs(), validate::Attr::Cost)?;
        validate::check_coverage(
            &self.arcs,
            &capacities,
            kind.requires_capacities(),
            validate::Attr::Capacity,
        )?;
        for (arc, cost) in costs {
            attrs[arc.slot()].cost = Some(cost);
        }
        for (arc, capacity) in capacities {
            attrs[arc.slot()].capacity = Some(capacity);
        }

        let balances = validate::collect_balances(&self.nodes, &self.balances)?;
        let mut warnings = Vec::new();
        if kind.uses_balances() {
            if let Some(warning) =
                validate::check_balance_totals(&self.nodes, &balances, self.balance_check)?
            {
                warnings.push(warning);
            }
        }

        validate::validate_terminals(&self.nodes, self.source, self.sink, kind)?;

        let (out_offsets, out_arcs) = Self::build_adjacency(&self.nodes, &self.arcs, |a| a.tail);
        let (in_offsets, in_arcs) = Self::build_adjacency(&self.nodes, &self.arcs, |a| a.head);

        let labels = self
            .nodes
            .iter()
            .map(|n| (n.label.clone(), n.id))
            .collect();

        Ok(Network {
            kind,
            nodes: self.nodes,
            arcs: self.arcs,
            attrs,
            balances,
            source: self.source,
            sink: self.sink,
            out_offsets,
            out_arcs,
            in_offsets,
            in_arcs,
            labels,
            endpoints,
            warnings,
        })
    }

    /// Build compact adjacency lists keyed by the node `endpoint` selects.
    fn build_adjacency(
        nodes: &[Node],
        arcs: &[Arc],
        endpoint: impl Fn(&Arc) -> NodeId,
    ) -> (Vec<usize>, Vec<ArcId>) {
        let mut node_to_arcs: HashMap<NodeId, Vec<ArcId>> = HashMap::new();
        for arc in arcs {
            node_to_arcs.entry(endpoint(arc)).or_default().push(arc.id);
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(arcs.len());
        offsets.push(0);

        for node in nodes {
            if let Some(list) = node_to_arcs.get(&node.id) {
                flat.extend_from_slice(list);
            }
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = NetworkBuilder::new();
        let n1 = builder.add_node("Node1");
        let n2 = builder.add_node("Node2");
        let a1 = builder.add_arc(n1, n2);

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(a1.index(), 0);
        assert_eq!(builder.node_id("Node2"), Some(n2));
        assert_eq!(builder.node_id("missing"), None);
    }

    #[test]
    fn later_cost_replaces_earlier() {
        let mut builder = NetworkBuilder::new();
        let s = builder.add_node("s");
        let t = builder.add_node("t");
        let arc = builder.add_arc(s, t);
        builder.set_cost(s, t, 1.0).set_cost(s, t, 5.0);
        builder.set_source(s).set_sink(t);

        let net = builder.build(ProblemKind::ShortestPath).unwrap();
        assert_eq!(net.cost(arc), Some(5.0));
        assert_eq!(net.capacity(arc), None);
    }

    #[test]
    fn balances_are_stored_per_node() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_node("a");
        let b = builder.add_node("b");
        let c = builder.add_node("c");
        builder.add_arc(a, b);
        builder.set_cost(a, b, 2.0);
        builder.set_balance(a, -3.0).set_balance(b, 3.0);

        let net = builder.build(ProblemKind::Transportation).unwrap();
        assert_eq!(net.balance(a), Some(-3.0));
        assert_eq!(net.balance(b), Some(3.0));
        assert_eq!(net.balance(c), None);
        assert_eq!(net.total_supply(), 3.0);
        assert_eq!(net.total_demand(), 3.0);
        assert!(net.warnings().is_empty());
    }
}
