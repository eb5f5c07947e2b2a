//! Maximum flow with capacity bounds on the arc variables.
//!
//! The objective is the net flow leaving the source (outgoing minus
//! incoming arcs), so no direct source -> sink arc is needed. When no arc
//! enters the source this is the plain sum of outgoing source flow.

use nf_core::{ProblemKind, Real};
use nf_graph::Network;
use nf_model::{LinearExpr, ModelBuilder, ModelSpec, Relation, Sense};

use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxFlow;

impl Strategy for MaxFlow {
    fn kind(&self) -> ProblemKind {
        ProblemKind::MaxFlow
    }

    fn formulate(&self, network: &Network) -> ModelSpec {
        let mut model = ModelBuilder::new(self.kind().as_str(), Sense::Maximize);

        for arc in network.arcs() {
            let capacity = network.capacity(arc.id).unwrap_or(Real::INFINITY);
            model.add_continuous(arc.id, 0.0, capacity);
        }

        if let Some(source) = network.source() {
            let signed = [(network.outgoing(source), 1.0), (network.incoming(source), -1.0)];
            for (arcs, sign) in signed {
                for &arc in arcs {
                    if let Some(x) = model.var_of(arc) {
                        model.objective_term(x, sign);
                    }
                }
            }
        }

        for node in network.nodes() {
            if Some(node.id) == network.source() || Some(node.id) == network.sink() {
                continue;
            }
            let mut expr = LinearExpr::new();
            for &arc in network.incoming(node.id) {
                if let Some(x) = model.var_of(arc) {
                    expr.add(x, 1.0);
                }
            }
            for &arc in network.outgoing(node.id) {
                if let Some(x) = model.var_of(arc) {
                    expr.add(x, -1.0);
                }
            }
            model.add_constraint(format!("conserve_{}", node.label), expr, Relation::Eq, 0.0);
        }

        model.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_graph::NetworkBuilder;
    use nf_model::VarDomain;

    fn diamond() -> Network {
        // A -> B -> D, A -> C -> D
        let mut b = NetworkBuilder::new();
        let a = b.add_node("A");
        let bb = b.add_node("B");
        let c = b.add_node("C");
        let d = b.add_node("D");
        for (t, h, cap, cost) in [
            (a, bb, 10.0, 1.0),
            (a, c, 15.0, 2.0),
            (bb, d, 10.0, 1.0),
            (c, d, 10.0, 1.0),
        ] {
            b.add_arc(t, h);
            b.set_capacity(t, h, cap).set_cost(t, h, cost);
        }
        b.set_source(a).set_sink(d);
        b.build(ProblemKind::MaxFlow).unwrap()
    }

    #[test]
    fn capacities_become_variable_bounds() {
        let net = diamond();
        let model = MaxFlow.formulate(&net);
        assert_eq!(model.objective().sense, Sense::Maximize);
        let uppers: Vec<f64> = model.variables().iter().map(|v| v.upper).collect();
        assert_eq!(uppers, vec![10.0, 15.0, 10.0, 10.0]);
        assert!(model
            .variables()
            .iter()
            .all(|v| v.domain == VarDomain::Continuous && v.lower == 0.0));
    }

    #[test]
    fn objective_counts_flow_leaving_source() {
        let net = diamond();
        let model = MaxFlow.formulate(&net);
        assert_eq!(model.objective_coefficients(), vec![1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn conservation_rows_skip_terminals() {
        let net = diamond();
        let model = MaxFlow.formulate(&net);
        let labels: Vec<&str> = model.constraints().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["conserve_B", "conserve_C"]);
        assert!(model.is_feasible(&[10.0, 10.0, 10.0, 10.0], 1e-9));
        assert!(!model.is_feasible(&[10.0, 15.0, 10.0, 10.0], 1e-9));
    }

    #[test]
    fn arcs_into_source_reduce_the_objective() {
        let mut b = NetworkBuilder::new();
        let s = b.add_node("s");
        let x = b.add_node("x");
        let t = b.add_node("t");
        for (tail, head) in [(s, x), (x, s), (x, t)] {
            b.add_arc(tail, head);
            b.set_capacity(tail, head, 4.0);
        }
        b.set_source(s).set_sink(t);
        let net = b.build(ProblemKind::MaxFlow).unwrap();
        let model = MaxFlow.formulate(&net);
        assert_eq!(model.objective_coefficients(), vec![1.0, -1.0, 0.0]);
    }
}
