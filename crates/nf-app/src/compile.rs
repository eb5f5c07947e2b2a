//! Compilation of a ProblemDef into a validated network.

use nf_core::NodeId;
use nf_formulation::{BalanceRule, FormulationOptions};
use nf_graph::{BalanceCheck, Network, NetworkBuilder};
use nf_project::schema::{BalanceCheckDef, BalanceRuleDef, ProblemDef};
use nf_solver::SolverConfig;

use crate::error::{AppError, AppResult};

/// A problem ready to be formulated and solved.
#[derive(Debug, Clone)]
pub struct CompiledProblem {
    pub name: String,
    pub network: Network,
    pub options: FormulationOptions,
    pub solver: SolverConfig,
}

/// Validate `def` and build its network for the selected problem kind.
pub fn compile_problem(def: &ProblemDef) -> AppResult<CompiledProblem> {
    nf_project::validate_problem(def)?;
    let kind = def.problem_kind()?;

    let mut builder = NetworkBuilder::new();
    for label in &def.nodes {
        builder.add_node(label.as_str());
    }
    let lookup = |builder: &NetworkBuilder, label: &str| -> AppResult<NodeId> {
        builder
            .node_id(label)
            .ok_or_else(|| AppError::Compile(format!("Node not found: {label}")))
    };

    for arc in &def.arcs {
        let tail = lookup(&builder, &arc.from)?;
        let head = lookup(&builder, &arc.to)?;
        builder.add_arc(tail, head);
        if let Some(cost) = arc.cost {
            builder.set_cost(tail, head, cost);
        }
        if let Some(capacity) = arc.capacity {
            builder.set_capacity(tail, head, capacity);
        }
    }

    for (label, &value) in &def.balances {
        let node = lookup(&builder, label)?;
        builder.set_balance(node, value);
    }
    if let Some(source) = &def.source {
        let node = lookup(&builder, source)?;
        builder.set_source(node);
    }
    if let Some(sink) = &def.sink {
        let node = lookup(&builder, sink)?;
        builder.set_sink(node);
    }
    builder.set_balance_check(match def.balance_check.unwrap_or_default() {
        BalanceCheckDef::Strict => BalanceCheck::Strict,
        BalanceCheckDef::Warn => BalanceCheck::Warn,
    });

    let network = builder.build(kind)?;
    let balance_rule = match def.balance_rule.unwrap_or_default() {
        BalanceRuleDef::SupplyOutDemandIn => BalanceRule::SupplyOutDemandIn,
        BalanceRuleDef::DemandOutSupplyIn => BalanceRule::DemandOutSupplyIn,
    };

    Ok(CompiledProblem {
        name: def.name.clone(),
        network,
        options: FormulationOptions { balance_rule },
        solver: SolverConfig {
            time_limit_ms: def.solver.time_limit_ms,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::ProblemKind;
    use nf_project::from_yaml_str;

    #[test]
    fn compiles_labels_into_ids() {
        let def = from_yaml_str(
            r#"
version: 1
name: relay
kind: costo_minimo
nodes: [x, y, z]
arcs:
  - { from: x, to: y, cost: 1, capacity: 4 }
  - { from: y, to: z, cost: 2, capacity: 4 }
balances: { x: -4, z: 4 }
balance_rule: demand-out-supply-in
solver: { time_limit_ms: 50 }
"#,
        )
        .unwrap();
        let compiled = compile_problem(&def).unwrap();
        let net = &compiled.network;

        assert_eq!(net.kind(), ProblemKind::MinCostFlow);
        let x = net.node_by_label("x").unwrap();
        let y = net.node_by_label("y").unwrap();
        let xy = net.arc_between(x, y).unwrap();
        assert_eq!(net.cost(xy), Some(1.0));
        assert_eq!(net.capacity(xy), Some(4.0));
        assert_eq!(net.balance(x), Some(-4.0));
        assert_eq!(compiled.options.balance_rule, BalanceRule::DemandOutSupplyIn);
        assert_eq!(compiled.solver.time_limit_ms, Some(50));
    }

    #[test]
    fn graph_errors_propagate() {
        let def = from_yaml_str(
            r#"
version: 1
name: no capacity
kind: max-flow
nodes: [s, t]
arcs:
  - { from: s, to: t }
source: s
sink: t
"#,
        )
        .unwrap();
        assert!(matches!(
            compile_problem(&def),
            Err(AppError::Validation(nf_graph::ValidationError::MissingCapacity { .. }))
        ));
    }

    #[test]
    fn schema_errors_are_reported_before_building() {
        let mut def = from_yaml_str("version: 1\nname: n\nkind: max-flow\nnodes: [s]\n").unwrap();
        def.kind = "unknown".to_string();
        assert!(matches!(compile_problem(&def), Err(AppError::Project(_))));
    }
}
