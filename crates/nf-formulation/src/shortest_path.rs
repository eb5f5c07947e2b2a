//! Shortest path as a 0/1 flow of one unit from source to sink.
//!
//! With negative arc costs the model admits zero-net cycles next to the
//! path; such arcs come back from the decoder as `detached`.

use nf_core::ProblemKind;
use nf_graph::Network;
use nf_model::{LinearExpr, ModelBuilder, ModelSpec, Relation, Sense};

use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestPath;

impl Strategy for ShortestPath {
    fn kind(&self) -> ProblemKind {
        ProblemKind::ShortestPath
    }

    fn formulate(&self, network: &Network) -> ModelSpec {
        let mut model = ModelBuilder::new(self.kind().as_str(), Sense::Minimize);

        for arc in network.arcs() {
            let x = model.add_binary(arc.id);
            // Costs are present for every arc of a validated network.
            model.objective_term(x, network.cost(arc.id).unwrap_or_default());
        }

        for node in network.nodes() {
            let mut expr = LinearExpr::new();
            for &arc in network.outgoing(node.id) {
                if let Some(x) = model.var_of(arc) {
                    expr.add(x, 1.0);
                }
            }
            for &arc in network.incoming(node.id) {
                if let Some(x) = model.var_of(arc) {
                    expr.add(x, -1.0);
                }
            }
            let rhs = if Some(node.id) == network.source() {
                1.0
            } else if Some(node.id) == network.sink() {
                -1.0
            } else {
                0.0
            };
            model.add_constraint(format!("balance_{}", node.label), expr, Relation::Eq, rhs);
        }

        model.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_graph::NetworkBuilder;
    use nf_model::VarDomain;

    #[test]
    fn one_binary_per_arc_and_one_row_per_node() {
        let mut b = NetworkBuilder::new();
        let s = b.add_node("s");
        let m = b.add_node("m");
        let t = b.add_node("t");
        let sm = b.add_arc(s, m);
        let mt = b.add_arc(m, t);
        let st = b.add_arc(s, t);
        b.set_cost(s, m, 1.0).set_cost(m, t, 2.0).set_cost(s, t, 5.0);
        b.set_source(s).set_sink(t);
        let net = b.build(ProblemKind::ShortestPath).unwrap();

        let model = ShortestPath.formulate(&net);
        assert_eq!(model.variables().len(), 3);
        assert!(model
            .variables()
            .iter()
            .all(|v| v.domain == VarDomain::Binary));
        assert_eq!(model.objective().sense, Sense::Minimize);
        assert_eq!(model.objective_coefficients(), vec![1.0, 2.0, 5.0]);

        assert_eq!(model.constraints().len(), 3);
        assert_eq!(model.constraint("balance_s").unwrap().rhs, 1.0);
        assert_eq!(model.constraint("balance_m").unwrap().rhs, 0.0);
        assert_eq!(model.constraint("balance_t").unwrap().rhs, -1.0);

        let mid = model.constraint("balance_m").unwrap();
        let x_sm = model.var_of(sm).unwrap();
        let x_mt = model.var_of(mt).unwrap();
        assert_eq!(mid.expr.terms(), &[(x_mt, 1.0), (x_sm, -1.0)]);

        // s->m->t and s->t both satisfy the rows; only their costs differ.
        let via_m = [1.0, 1.0, 0.0];
        let direct = [0.0, 0.0, 1.0];
        assert!(model.is_feasible(&via_m, 1e-9));
        assert!(model.is_feasible(&direct, 1e-9));
        assert_eq!(model.objective_value(&via_m), 3.0);
        assert!(model.var_of(st).is_some());
    }

    #[test]
    fn empty_arc_set_leaves_unsatisfiable_terminal_rows() {
        let mut b = NetworkBuilder::new();
        let s = b.add_node("s");
        let t = b.add_node("t");
        b.set_source(s).set_sink(t);
        let net = b.build(ProblemKind::ShortestPath).unwrap();

        let model = ShortestPath.formulate(&net);
        assert!(model.variables().is_empty());
        let row = model.constraint("balance_s").unwrap();
        assert!(row.expr.is_empty());
        assert!(!model.is_feasible(&[], 1e-9));
    }
}
