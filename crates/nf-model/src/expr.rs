//! Linear expressions and relations.

use nf_core::Real;

use crate::spec::VarId;

/// A sparse linear expression `sum(coeff * var)`.
///
/// Terms keep insertion order; a variable may appear more than once, in
/// which case its coefficients add up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, Real)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, var: VarId, coeff: Real) -> &mut Self {
        self.terms.push((var, coeff));
        self
    }

    pub fn terms(&self) -> &[(VarId, Real)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Evaluate against a full assignment indexed by variable position.
    pub fn evaluate(&self, values: &[Real]) -> Real {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

impl FromIterator<(VarId, Real)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, Real)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Relation between a constraint's left and right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl Relation {
    /// Whether `lhs rel rhs` holds up to `tol`.
    pub fn holds(self, lhs: Real, rhs: Real, tol: Real) -> bool {
        match self {
            Relation::Eq => (lhs - rhs).abs() <= tol,
            Relation::Le => lhs <= rhs + tol,
            Relation::Ge => lhs + tol >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_sums_repeated_terms() {
        let x = VarId::from_index(0);
        let y = VarId::from_index(1);
        let mut e = LinearExpr::new();
        e.add(x, 2.0).add(y, -1.0).add(x, 1.0);
        assert_eq!(e.len(), 3);
        assert_eq!(e.evaluate(&[1.0, 4.0]), -1.0);
    }

    #[test]
    fn relation_tolerance() {
        assert!(Relation::Eq.holds(1.0 + 1e-10, 1.0, 1e-9));
        assert!(!Relation::Eq.holds(1.1, 1.0, 1e-9));
        assert!(Relation::Le.holds(2.0, 2.0, 0.0));
        assert!(!Relation::Ge.holds(1.0, 2.0, 1e-9));
        assert_eq!(Relation::Le.symbol(), "<=");
    }
}
