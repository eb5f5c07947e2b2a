//! Problem definition validation.
//!
//! Checks document structure only: version, selector and references
//! between labels. Per-kind graph invariants (attribute coverage, balance
//! totals, terminals) are enforced when the network is built.

use std::collections::HashSet;

use crate::schema::ProblemDef;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported problem type: '{selector}'")]
    UnsupportedKind { selector: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_problem(problem: &ProblemDef) -> Result<(), ValidationError> {
    if problem.version == 0 || problem.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: problem.version,
        });
    }

    if problem.problem_kind().is_err() {
        return Err(ValidationError::UnsupportedKind {
            selector: problem.kind.clone(),
        });
    }

    let mut labels = HashSet::new();
    for node in &problem.nodes {
        if !labels.insert(node.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.clone(),
                context: "nodes".to_string(),
            });
        }
    }

    for (i, arc) in problem.arcs.iter().enumerate() {
        for end in [&arc.from, &arc.to] {
            require(&labels, end, || format!("arcs[{i}]"))?;
        }
        finite(arc.cost, || format!("arcs[{i}].cost"))?;
        finite(arc.capacity, || format!("arcs[{i}].capacity"))?;
    }

    for (label, &value) in &problem.balances {
        require(&labels, label, || "balances".to_string())?;
        finite(Some(value), || format!("balances.{label}"))?;
    }

    if let Some(source) = &problem.source {
        require(&labels, source, || "source".to_string())?;
    }
    if let Some(sink) = &problem.sink {
        require(&labels, sink, || "sink".to_string())?;
    }

    if problem.solver.time_limit_ms == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "solver.time_limit_ms".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}

fn require(
    labels: &HashSet<&str>,
    label: &str,
    context: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    if labels.contains(label) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            id: label.to_string(),
            context: context(),
        })
    }
}

fn finite(value: Option<f64>, field: impl FnOnce() -> String) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::InvalidValue {
            field: field(),
            value: v.to_string(),
            reason: "must be finite".to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArcDef, SolverSettings};

    fn minimal() -> ProblemDef {
        ProblemDef {
            version: 1,
            name: "tiny".to_string(),
            kind: "shortest-path".to_string(),
            nodes: vec!["a".to_string(), "b".to_string()],
            arcs: vec![ArcDef {
                from: "a".to_string(),
                to: "b".to_string(),
                cost: Some(1.0),
                capacity: None,
            }],
            balances: Default::default(),
            source: Some("a".to_string()),
            sink: Some("b".to_string()),
            balance_rule: None,
            balance_check: None,
            solver: SolverSettings::default(),
        }
    }

    #[test]
    fn minimal_problem_is_valid() {
        validate_problem(&minimal()).unwrap();
    }

    #[test]
    fn version_bounds() {
        let mut p = minimal();
        p.version = 0;
        assert_eq!(
            validate_problem(&p),
            Err(ValidationError::UnsupportedVersion { version: 0 })
        );
        p.version = crate::LATEST_VERSION + 1;
        assert!(validate_problem(&p).is_err());
    }

    #[test]
    fn unknown_selector() {
        let mut p = minimal();
        p.kind = "travelling-salesman".to_string();
        assert_eq!(
            validate_problem(&p),
            Err(ValidationError::UnsupportedKind {
                selector: "travelling-salesman".to_string()
            })
        );
        p.kind = "ruta_mas_corta".to_string();
        validate_problem(&p).unwrap();
    }

    #[test]
    fn dangling_references() {
        let mut p = minimal();
        p.arcs[0].to = "z".to_string();
        assert_eq!(
            validate_problem(&p),
            Err(ValidationError::MissingReference {
                id: "z".to_string(),
                context: "arcs[0]".to_string()
            })
        );

        let mut p = minimal();
        p.sink = Some("q".to_string());
        assert!(matches!(
            validate_problem(&p),
            Err(ValidationError::MissingReference { .. })
        ));

        let mut p = minimal();
        p.balances.insert("ghost".to_string(), 3.0);
        assert!(matches!(
            validate_problem(&p),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn duplicate_labels_and_bad_numbers() {
        let mut p = minimal();
        p.nodes.push("a".to_string());
        assert!(matches!(
            validate_problem(&p),
            Err(ValidationError::DuplicateId { .. })
        ));

        let mut p = minimal();
        p.arcs[0].cost = Some(f64::NAN);
        assert!(matches!(
            validate_problem(&p),
            Err(ValidationError::InvalidValue { .. })
        ));

        let mut p = minimal();
        p.solver.time_limit_ms = Some(0);
        assert!(validate_problem(&p).is_err());
    }
}
