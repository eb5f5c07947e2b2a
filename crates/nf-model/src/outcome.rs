//! What a solver adapter reports back for a model.

use std::fmt;

use nf_core::{ArcId, Real};

use crate::error::{ModelError, ModelResult};
use crate::spec::ModelSpec;

/// Plain status tag of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Optimal objective value plus one value per model variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    objective: Real,
    assignment: Vec<(ArcId, Real)>,
    /// Position in `assignment`, keyed by arc slot.
    by_arc: Vec<Option<usize>>,
}

impl Solution {
    /// Pair raw solver values (in variable order) with their arcs.
    pub fn from_values(model: &ModelSpec, objective: Real, values: Vec<Real>) -> ModelResult<Self> {
        if values.len() != model.variables().len() {
            return Err(ModelError::ValueCountMismatch {
                expected: model.variables().len(),
                got: values.len(),
            });
        }
        if !objective.is_finite() {
            return Err(ModelError::NonFinite {
                what: "objective",
                value: objective,
            });
        }
        if let Some(&bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite {
                what: "variable value",
                value: bad,
            });
        }
        let assignment: Vec<(ArcId, Real)> = model
            .variables()
            .iter()
            .zip(values)
            .map(|(var, value)| (var.arc, value))
            .collect();
        let slots = assignment.iter().map(|(arc, _)| arc.slot() + 1).max().unwrap_or(0);
        let mut by_arc = vec![None; slots];
        for (pos, (arc, _)) in assignment.iter().enumerate() {
            by_arc[arc.slot()] = Some(pos);
        }
        Ok(Self {
            objective,
            assignment,
            by_arc,
        })
    }

    pub fn objective(&self) -> Real {
        self.objective
    }

    /// `(arc, value)` in model variable order.
    pub fn assignment(&self) -> &[(ArcId, Real)] {
        &self.assignment
    }

    pub fn value(&self, arc: ArcId) -> Option<Real> {
        let pos = (*self.by_arc.get(arc.slot())?)?;
        Some(self.assignment[pos].1)
    }

    /// Values alone, in variable order.
    pub fn values(&self) -> Vec<Real> {
        self.assignment.iter().map(|&(_, v)| v).collect()
    }
}

/// Result of handing a model to a solver.
///
/// The objective value and assignment only exist for `Optimal`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Optimal(Solution),
    Infeasible,
    Unbounded,
    /// The engine failed or the model was malformed.
    Error { message: String },
}

impl SolveOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveOutcome::Optimal(_) => SolveStatus::Optimal,
            SolveOutcome::Infeasible => SolveStatus::Infeasible,
            SolveOutcome::Unbounded => SolveStatus::Unbounded,
            SolveOutcome::Error { .. } => SolveStatus::Error,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SolveOutcome::Error {
            message: message.into(),
        }
    }

    pub fn objective(&self) -> Option<Real> {
        match self {
            SolveOutcome::Optimal(solution) => Some(solution.objective()),
            _ => None,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Optimal(solution) => Some(solution),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ModelBuilder, Sense};

    fn two_vars() -> ModelSpec {
        let mut b = ModelBuilder::new("m", Sense::Maximize);
        b.add_continuous(ArcId::from_index(3), 0.0, 1.0);
        b.add_continuous(ArcId::from_index(8), 0.0, 2.0);
        b.build()
    }

    #[test]
    fn solution_pairs_values_with_arcs() {
        let m = two_vars();
        let s = Solution::from_values(&m, 2.5, vec![0.5, 2.0]).unwrap();
        assert_eq!(s.value(ArcId::from_index(8)), Some(2.0));
        assert_eq!(s.value(ArcId::from_index(0)), None);
        assert_eq!(s.value(ArcId::from_index(3)), Some(0.5));
        assert_eq!(s.value(ArcId::from_index(40)), None);
        assert_eq!(s.values(), vec![0.5, 2.0]);

        let outcome = SolveOutcome::Optimal(s);
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        assert_eq!(outcome.objective(), Some(2.5));
    }

    #[test]
    fn solution_rejects_bad_values() {
        let m = two_vars();
        assert_eq!(
            Solution::from_values(&m, 1.0, vec![1.0]).unwrap_err(),
            ModelError::ValueCountMismatch {
                expected: 2,
                got: 1
            }
        );
        assert!(Solution::from_values(&m, f64::NAN, vec![1.0, 1.0]).is_err());
        assert!(Solution::from_values(&m, 1.0, vec![1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn non_optimal_outcomes_carry_no_values() {
        for outcome in [
            SolveOutcome::Infeasible,
            SolveOutcome::Unbounded,
            SolveOutcome::error("boom"),
        ] {
            assert!(outcome.objective().is_none());
            assert!(outcome.solution().is_none());
        }
        assert_eq!(SolveOutcome::Unbounded.status().to_string(), "unbounded");
    }
}
