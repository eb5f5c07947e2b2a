//! Transportation / minimum-cost flow driven by node supply and demand.
//!
//! Only nodes with a nonzero balance get a row. Transshipment nodes without
//! a balance are left unconstrained, so flow conservation is not imposed
//! there.

use nf_core::{ProblemKind, Real};
use nf_graph::Network;
use nf_model::{LinearExpr, ModelBuilder, ModelSpec, Relation, Sense};

use crate::strategy::Strategy;

/// Which side of a node its balance constrains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BalanceRule {
    /// Supply (d < 0) fixes outgoing flow to -d; demand (d > 0) fixes incoming flow to d.
    #[default]
    SupplyOutDemandIn,
    /// Demand (d > 0) fixes outgoing flow to d; supply (d < 0) fixes incoming flow to -d.
    DemandOutSupplyIn,
}

/// Shared strategy for transportation and min-cost flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceFlow {
    pub rule: BalanceRule,
    kind: Option<ProblemKind>,
}

impl BalanceFlow {
    pub fn new(rule: BalanceRule) -> Self {
        Self { rule, kind: None }
    }

    /// Report models under `kind` (transportation or min-cost flow).
    pub fn reporting_as(mut self, kind: ProblemKind) -> Self {
        if kind.uses_balances() {
            self.kind = Some(kind);
        }
        self
    }
}

enum Side {
    Outgoing,
    Incoming,
}

impl Strategy for BalanceFlow {
    fn kind(&self) -> ProblemKind {
        self.kind.unwrap_or(ProblemKind::Transportation)
    }

    fn formulate(&self, network: &Network) -> ModelSpec {
        let mut model = ModelBuilder::new(self.kind().as_str(), Sense::Minimize);

        for arc in network.arcs() {
            let upper = network.capacity(arc.id).unwrap_or(Real::INFINITY);
            let x = model.add_continuous(arc.id, 0.0, upper);
            // Costs are present for every arc of a validated network.
            model.objective_term(x, network.cost(arc.id).unwrap_or_default());
        }

        for node in network.nodes() {
            let Some(d) = network.balance(node.id).filter(|d| *d != 0.0) else {
                continue;
            };
            let (side, prefix) = match (self.rule, d > 0.0) {
                (BalanceRule::SupplyOutDemandIn, true) => (Side::Incoming, "demand"),
                (BalanceRule::SupplyOutDemandIn, false) => (Side::Outgoing, "supply"),
                (BalanceRule::DemandOutSupplyIn, true) => (Side::Outgoing, "demand"),
                (BalanceRule::DemandOutSupplyIn, false) => (Side::Incoming, "supply"),
            };
            let arcs = match side {
                Side::Outgoing => network.outgoing(node.id),
                Side::Incoming => network.incoming(node.id),
            };
            let expr: LinearExpr = arcs
                .iter()
                .filter_map(|&arc| model.var_of(arc))
                .map(|x| (x, 1.0))
                .collect();
            model.add_constraint(format!("{prefix}_{}", node.label), expr, Relation::Eq, d.abs());
        }

        model.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_graph::NetworkBuilder;

    /// Supplies A=20, B=10; demands C=15, D=15; every supplier reaches every customer.
    fn two_by_two(capacity: Option<f64>) -> Network {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A");
        let bb = b.add_node("B");
        let c = b.add_node("C");
        let d = b.add_node("D");
        let hub = b.add_node("H");
        for (t, h, cost) in [(a, c, 2.0), (a, d, 1.0), (bb, c, 1.0), (bb, d, 3.0), (a, hub, 1.0)] {
            b.add_arc(t, h);
            b.set_cost(t, h, cost);
            if let Some(cap) = capacity {
                b.set_capacity(t, h, cap);
            }
        }
        b.set_balance(a, -20.0)
            .set_balance(bb, -10.0)
            .set_balance(c, 15.0)
            .set_balance(d, 15.0)
            .set_balance(hub, 0.0);
        b.build(ProblemKind::Transportation).unwrap()
    }

    #[test]
    fn rows_only_for_nonzero_balances() {
        let net = two_by_two(None);
        let model = BalanceFlow::default().formulate(&net);
        let labels: Vec<&str> = model.constraints().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["supply_A", "supply_B", "demand_C", "demand_D"]);
        assert!(model.constraints().iter().all(|c| c.relation == Relation::Eq));
        assert_eq!(model.constraint("supply_A").unwrap().rhs, 20.0);
        assert_eq!(model.constraint("supply_A").unwrap().expr.len(), 3);
        assert_eq!(model.constraint("demand_C").unwrap().expr.len(), 2);
    }

    #[test]
    fn unbounded_without_capacities() {
        let net = two_by_two(None);
        let model = BalanceFlow::default().formulate(&net);
        assert!(model.variables().iter().all(|v| v.upper == f64::INFINITY));

        let capped = two_by_two(Some(12.0));
        let model = BalanceFlow::default().formulate(&capped);
        assert!(model.variables().iter().all(|v| v.upper == 12.0));
    }

    #[test]
    fn literal_rule_flips_sides() {
        let net = two_by_two(None);
        let model = BalanceFlow::new(BalanceRule::DemandOutSupplyIn).formulate(&net);
        // C and D have no outgoing arcs, A and B no incoming ones.
        assert!(model.constraints().iter().all(|c| c.expr.is_empty()));
        assert_eq!(model.constraint("demand_D").unwrap().rhs, 15.0);
    }

    #[test]
    fn reporting_kind() {
        assert_eq!(BalanceFlow::default().kind(), ProblemKind::Transportation);
        let mcf = BalanceFlow::default().reporting_as(ProblemKind::MinCostFlow);
        assert_eq!(mcf.kind(), ProblemKind::MinCostFlow);
        let ignored = BalanceFlow::default().reporting_as(ProblemKind::MaxFlow);
        assert_eq!(ignored.kind(), ProblemKind::Transportation);
    }
}
