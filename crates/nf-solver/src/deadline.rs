//! Wall-clock limit around any adapter.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use nf_model::{ModelSpec, SolveOutcome};

use crate::adapter::SolverAdapter;

/// Runs the inner adapter on a worker thread and gives up after `limit`.
///
/// An expired solve is reported as an `Error` outcome. The worker is
/// detached and finishes in the background; its result is discarded.
#[derive(Debug, Clone)]
pub struct DeadlineSolver<S> {
    inner: S,
    limit: Duration,
}

impl<S> DeadlineSolver<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> SolverAdapter for DeadlineSolver<S>
where
    S: SolverAdapter + Clone + 'static,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, model: &ModelSpec) -> SolveOutcome {
        let inner = self.inner.clone();
        let model = Arc::new(model.clone());
        let (tx, rx) = mpsc::channel();

        let worker = {
            let model = Arc::clone(&model);
            thread::Builder::new()
                .name(format!("nf-solve-{}", model.name()))
                .spawn(move || {
                    // The receiver is gone once the deadline has passed.
                    let _ = tx.send(inner.solve(&model));
                })
        };
        if let Err(e) = worker {
            return SolveOutcome::error(format!("failed to spawn solver thread: {e}"));
        }

        match rx.recv_timeout(self.limit) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    solver = self.name(),
                    model = model.name(),
                    limit_ms = nf_core::millis(self.limit),
                    "solve deadline exceeded"
                );
                SolveOutcome::error(format!(
                    "deadline exceeded after {} ms",
                    nf_core::millis(self.limit)
                ))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                SolveOutcome::error("solver thread terminated without a result")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_model::{ModelBuilder, Sense, SolveStatus};

    #[derive(Clone)]
    struct Sleepy(Duration);

    impl SolverAdapter for Sleepy {
        fn name(&self) -> &'static str {
            "sleepy"
        }

        fn solve(&self, _model: &ModelSpec) -> SolveOutcome {
            thread::sleep(self.0);
            SolveOutcome::Infeasible
        }
    }

    #[derive(Clone)]
    struct Crashing;

    impl SolverAdapter for Crashing {
        fn name(&self) -> &'static str {
            "crashing"
        }

        fn solve(&self, _model: &ModelSpec) -> SolveOutcome {
            panic!("engine crashed")
        }
    }

    fn empty() -> ModelSpec {
        ModelBuilder::new("empty", Sense::Minimize).build()
    }

    #[test]
    fn fast_solves_pass_through() {
        let solver = DeadlineSolver::new(Sleepy(Duration::ZERO), Duration::from_secs(5));
        assert_eq!(solver.solve(&empty()).status(), SolveStatus::Infeasible);
        assert_eq!(solver.name(), "sleepy");
    }

    #[test]
    fn slow_solves_become_errors() {
        let solver = DeadlineSolver::new(Sleepy(Duration::from_secs(2)), Duration::from_millis(20));
        let outcome = solver.solve(&empty());
        assert_eq!(outcome.status(), SolveStatus::Error);
        match outcome {
            SolveOutcome::Error { message } => assert!(message.starts_with("deadline exceeded")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn worker_panic_is_an_error() {
        let solver = DeadlineSolver::new(Crashing, Duration::from_secs(5));
        assert_eq!(solver.solve(&empty()).status(), SolveStatus::Error);
    }
}
