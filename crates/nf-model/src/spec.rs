//! Model specification: variables, objective and constraints.

use std::collections::HashMap;

use nf_core::{ArcId, Real};

use crate::expr::{LinearExpr, Relation};

/// Position of a variable within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Value domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarDomain {
    /// Real-valued within `[lower, upper]`.
    Continuous,
    /// Either 0 or 1.
    Binary,
}

/// A decision variable, keyed by the arc it originates from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub arc: ArcId,
    pub domain: VarDomain,
    pub lower: Real,
    /// `Real::INFINITY` when unbounded above.
    pub upper: Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}

/// `label: expr relation rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub label: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: Real,
}

/// Size summary used for logging and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub binaries: usize,
    pub constraints: usize,
    pub nonzeros: usize,
}

/// A complete linear/integer program.
///
/// Immutable once built. Holds no reference to the network or to the
/// strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    name: String,
    variables: Vec<Variable>,
    objective: Objective,
    constraints: Vec<Constraint>,
    by_arc: HashMap<ArcId, VarId>,
}

impl ModelSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> Option<&Variable> {
        self.variables.get(var.index())
    }

    /// The variable created for `arc`.
    pub fn var_of(&self, arc: ArcId) -> Option<VarId> {
        self.by_arc.get(&arc).copied()
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Constraint with the given label, if any.
    pub fn constraint(&self, label: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.label == label)
    }

    pub fn has_integer_vars(&self) -> bool {
        self.variables
            .iter()
            .any(|v| v.domain == VarDomain::Binary)
    }

    /// Dense objective coefficient per variable.
    pub fn objective_coefficients(&self) -> Vec<Real> {
        let mut coeffs = vec![0.0; self.variables.len()];
        for &(var, coeff) in self.objective.expr.terms() {
            if let Some(slot) = coeffs.get_mut(var.index()) {
                *slot += coeff;
            }
        }
        coeffs
    }

    pub fn objective_value(&self, values: &[Real]) -> Real {
        self.objective.expr.evaluate(values)
    }

    /// Check bounds, integrality and every constraint against `values`.
    pub fn is_feasible(&self, values: &[Real], tol: Real) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let within_bounds = self.variables.iter().zip(values).all(|(var, &x)| {
            let integral = match var.domain {
                VarDomain::Continuous => true,
                VarDomain::Binary => (x - x.round()).abs() <= tol,
            };
            integral && x >= var.lower - tol && x <= var.upper + tol
        });
        within_bounds
            && self
                .constraints
                .iter()
                .all(|c| c.relation.holds(c.expr.evaluate(values), c.rhs, tol))
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            variables: self.variables.len(),
            binaries: self
                .variables
                .iter()
                .filter(|v| v.domain == VarDomain::Binary)
                .count(),
            constraints: self.constraints.len(),
            nonzeros: self.constraints.iter().map(|c| c.expr.len()).sum(),
        }
    }
}

/// Incremental assembly of a [`ModelSpec`].
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    variables: Vec<Variable>,
    objective: Objective,
    constraints: Vec<Constraint>,
    by_arc: HashMap<ArcId, VarId>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: Objective {
                sense,
                expr: LinearExpr::new(),
            },
            constraints: Vec::new(),
            by_arc: HashMap::new(),
        }
    }

    /// Continuous variable for `arc` bounded by `[lower, upper]`.
    pub fn add_continuous(&mut self, arc: ArcId, lower: Real, upper: Real) -> VarId {
        self.push(Variable {
            arc,
            domain: VarDomain::Continuous,
            lower,
            upper,
        })
    }

    /// Binary selection variable for `arc`.
    pub fn add_binary(&mut self, arc: ArcId) -> VarId {
        self.push(Variable {
            arc,
            domain: VarDomain::Binary,
            lower: 0.0,
            upper: 1.0,
        })
    }

    pub fn var_of(&self, arc: ArcId) -> Option<VarId> {
        self.by_arc.get(&arc).copied()
    }

    /// Add `coeff * var` to the objective.
    pub fn objective_term(&mut self, var: VarId, coeff: Real) -> &mut Self {
        self.objective.expr.add(var, coeff);
        self
    }

    pub fn add_constraint(
        &mut self,
        label: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: Real,
    ) -> &mut Self {
        self.constraints.push(Constraint {
            label: label.into(),
            expr,
            relation,
            rhs,
        });
        self
    }

    pub fn build(self) -> ModelSpec {
        ModelSpec {
            name: self.name,
            variables: self.variables,
            objective: self.objective,
            constraints: self.constraints,
            by_arc: self.by_arc,
        }
    }

    fn push(&mut self, variable: Variable) -> VarId {
        let var = VarId::from_index(self.variables.len());
        self.by_arc.insert(variable.arc, var);
        self.variables.push(variable);
        var
    }
}
