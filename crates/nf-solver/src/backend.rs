//! `microlp` backed adapter.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use nf_core::{Real, Tolerances};
use nf_model::{LinearExpr, ModelSpec, Relation, Sense, Solution, SolveOutcome, VarDomain};

use crate::adapter::SolverAdapter;

/// Pure-Rust simplex with branch-and-bound for binary variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicrolpSolver {
    /// Tolerance used when a model has no variables and its rows are
    /// decided directly.
    pub tolerances: Tolerances,
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MicrolpSolver {
    pub fn new() -> Self {
        Self {
            tolerances: Tolerances::default(),
        }
    }
}

impl SolverAdapter for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &ModelSpec) -> SolveOutcome {
        let outcome = if model.variables().is_empty() {
            self.decide_constant(model)
        } else {
            // microlp asserts on malformed input; surface that as an engine error.
            panic::catch_unwind(AssertUnwindSafe(|| run(model)))
                .unwrap_or_else(|_| SolveOutcome::error("microlp panicked while solving"))
        };

        match &outcome {
            SolveOutcome::Error { message } => {
                tracing::warn!(
                    solver = self.name(),
                    model = model.name(),
                    %message,
                    "solve failed"
                );
            }
            _ => {
                tracing::debug!(
                    solver = self.name(),
                    model = model.name(),
                    status = %outcome.status(),
                    objective = ?outcome.objective(),
                    "solve finished"
                );
            }
        }
        outcome
    }
}

impl MicrolpSolver {
    /// With no variables every row reads `0 rel rhs`.
    fn decide_constant(&self, model: &ModelSpec) -> SolveOutcome {
        let tol = self.tolerances.abs;
        let satisfied = model
            .constraints()
            .iter()
            .all(|c| c.relation.holds(0.0, c.rhs, tol));
        if !satisfied {
            return SolveOutcome::Infeasible;
        }
        match Solution::from_values(model, 0.0, Vec::new()) {
            Ok(solution) => SolveOutcome::Optimal(solution),
            Err(e) => SolveOutcome::error(e.to_string()),
        }
    }
}

fn run(model: &ModelSpec) -> SolveOutcome {
    let direction = match model.objective().sense {
        Sense::Minimize => OptimizationDirection::Minimize,
        Sense::Maximize => OptimizationDirection::Maximize,
    };
    let mut problem = Problem::new(direction);

    let vars: Vec<microlp::Variable> = model
        .variables()
        .iter()
        .zip(model.objective_coefficients())
        .map(|(var, coeff)| match var.domain {
            VarDomain::Binary => problem.add_binary_var(coeff),
            VarDomain::Continuous => problem.add_var(coeff, (var.lower, var.upper)),
        })
        .collect();

    for row in model.constraints() {
        let terms = lower_expr(&row.expr, &vars);
        problem.add_constraint(&terms, comparison(row.relation), row.rhs);
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(microlp::Error::Infeasible) => return SolveOutcome::Infeasible,
        Err(microlp::Error::Unbounded) => return SolveOutcome::Unbounded,
        Err(microlp::Error::InternalError(message)) => return SolveOutcome::error(message),
    };

    let values: Vec<Real> = vars.iter().map(|&v| *solution.var_value(v)).collect();
    match Solution::from_values(model, solution.objective(), values) {
        Ok(solution) => SolveOutcome::Optimal(solution),
        Err(e) => SolveOutcome::error(e.to_string()),
    }
}

/// microlp rejects a variable appearing twice in one row (self-loop arcs
/// contribute +1 and -1), so repeated terms are summed first.
fn lower_expr(expr: &LinearExpr, vars: &[microlp::Variable]) -> Vec<(microlp::Variable, Real)> {
    let mut merged: BTreeMap<usize, Real> = BTreeMap::new();
    for &(var, coeff) in expr.terms() {
        *merged.entry(var.index()).or_insert(0.0) += coeff;
    }
    merged
        .into_iter()
        .filter_map(|(index, coeff)| vars.get(index).map(|&v| (v, coeff)))
        .collect()
}

fn comparison(relation: Relation) -> ComparisonOp {
    match relation {
        Relation::Eq => ComparisonOp::Eq,
        Relation::Le => ComparisonOp::Le,
        Relation::Ge => ComparisonOp::Ge,
    }
}
