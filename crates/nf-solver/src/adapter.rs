//! The boundary between model construction and the optimization engine.

use nf_model::{ModelSpec, SolveOutcome};

/// An LP/MIP engine.
///
/// Implementations must not mutate or retain the model, and must report
/// infeasibility, unboundedness and engine failure as distinct outcomes.
/// Calls block until the engine returns.
pub trait SolverAdapter: Send + Sync {
    /// Engine name for logging and reports.
    fn name(&self) -> &'static str;

    fn solve(&self, model: &ModelSpec) -> SolveOutcome;
}

impl<S: SolverAdapter + ?Sized> SolverAdapter for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &ModelSpec) -> SolveOutcome {
        (**self).solve(model)
    }
}

impl<S: SolverAdapter + ?Sized> SolverAdapter for std::sync::Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &ModelSpec) -> SolveOutcome {
        (**self).solve(model)
    }
}
