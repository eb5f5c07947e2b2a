//! Formulate, solve and decode.

use std::time::{Duration, Instant};

use nf_core::ProblemKind;
use nf_formulation::{FlowResult, Formulation, FormulationOptions, Unsolved};
use nf_graph::Network;
use nf_model::{ModelStats, SolveStatus};
use nf_project::schema::ProblemDef;
use nf_solver::{SolverAdapter, build_solver};
use rayon::prelude::*;

use crate::compile::compile_problem;
use crate::error::AppResult;

/// What one pipeline run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ProblemKind,
    /// Decoded optimum, or why there is none.
    pub outcome: Result<FlowResult, Unsolved>,
    pub stats: ModelStats,
    pub solver: &'static str,
    /// Formulation, solve and decode wall time.
    pub elapsed: Duration,
    /// Validation warnings carried over from the network.
    pub warnings: Vec<String>,
}

impl Report {
    pub fn status(&self) -> SolveStatus {
        match &self.outcome {
            Ok(_) => SolveStatus::Optimal,
            Err(Unsolved::Infeasible) => SolveStatus::Infeasible,
            Err(Unsolved::Unbounded) => SolveStatus::Unbounded,
            Err(Unsolved::SolverError { .. }) => SolveStatus::Error,
        }
    }

    pub fn result(&self) -> Option<&FlowResult> {
        self.outcome.as_ref().ok()
    }

    /// Total cost, or total flow for max-flow; `None` without an optimum.
    pub fn objective(&self) -> Option<f64> {
        self.result().map(FlowResult::objective)
    }
}

/// Solve `network` as the kind it was validated for.
pub fn solve_network(
    network: &Network,
    options: FormulationOptions,
    solver: &dyn SolverAdapter,
) -> AppResult<Report> {
    solve_network_as(network.kind(), network, options, solver)
}

/// Solve `network` as `kind`. Transportation and min-cost flow networks
/// may be solved as each other; any other mismatch is an error.
pub fn solve_network_as(
    kind: ProblemKind,
    network: &Network,
    options: FormulationOptions,
    solver: &dyn SolverAdapter,
) -> AppResult<Report> {
    let span = tracing::info_span!("solve", %kind, solver = solver.name());
    let _guard = span.enter();
    let started = Instant::now();

    let formulation = Formulation::for_kind(kind, options);
    let model = formulation.formulate(network)?;
    let stats = model.stats();

    let solved = solver.solve(&model);
    let status = solved.status();
    let outcome = formulation.decode(network, solved);
    let elapsed = started.elapsed();

    tracing::info!(
        %status,
        objective = ?outcome.as_ref().ok().map(FlowResult::objective),
        elapsed_ms = nf_core::millis(elapsed),
        "pipeline finished"
    );

    Ok(Report {
        kind,
        outcome,
        stats,
        solver: solver.name(),
        elapsed,
        warnings: network.warnings().to_vec(),
    })
}

/// Compile `def`, build its configured solver and run the pipeline.
pub fn solve_problem(def: &ProblemDef) -> AppResult<Report> {
    let compiled = compile_problem(def)?;
    let solver = build_solver(&compiled.solver)?;
    tracing::debug!(problem = %compiled.name, "compiled");
    solve_network(&compiled.network, compiled.options, solver.as_ref())
}

/// Solve independent problems on the rayon pool. Results keep input order.
pub fn solve_batch(defs: &[ProblemDef]) -> Vec<AppResult<Report>> {
    defs.par_iter().map(solve_problem).collect()
}
