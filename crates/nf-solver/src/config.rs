//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapter::SolverAdapter;
use crate::backend::MicrolpSolver;
use crate::deadline::DeadlineSolver;
use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Wall-clock limit per solve. No limit when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}

impl SolverConfig {
    pub fn with_time_limit(time_limit_ms: u64) -> Self {
        Self {
            time_limit_ms: Some(time_limit_ms),
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.time_limit_ms == Some(0) {
            return Err(SolverError::InvalidConfig {
                what: "time_limit_ms must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// The bundled adapter, wrapped in a deadline when one is configured.
pub fn build_solver(config: &SolverConfig) -> SolverResult<Box<dyn SolverAdapter>> {
    config.validate()?;
    let solver = MicrolpSolver::new();
    Ok(match config.time_limit_ms {
        Some(ms) => Box::new(DeadlineSolver::new(solver, Duration::from_millis(ms))),
        None => Box::new(solver),
    })
}
