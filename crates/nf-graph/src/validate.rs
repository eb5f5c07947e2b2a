//! Descriptor validation logic.

use std::collections::{HashMap, HashSet};

use nf_core::{ArcId, NodeId, ProblemKind, Real, Tolerances, nearly_equal};

use crate::builder::BalanceCheck;
use crate::error::{ValidationError, ValidationResult};
use crate::network::{Arc, Node};

/// Which per-arc attribute is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attr {
    Cost,
    Capacity,
}

impl Attr {
    fn what(self) -> &'static str {
        match self {
            Attr::Cost => "arc cost",
            Attr::Capacity => "arc capacity",
        }
    }

    fn missing(self, arc: ArcId) -> ValidationError {
        match self {
            Attr::Cost => ValidationError::MissingCost { arc },
            Attr::Capacity => ValidationError::MissingCapacity { arc },
        }
    }

    fn extraneous(self, tail: NodeId, head: NodeId) -> ValidationError {
        match self {
            Attr::Cost => ValidationError::ExtraneousCost { tail, head },
            Attr::Capacity => ValidationError::ExtraneousCapacity { tail, head },
        }
    }
}

fn finite(value: Real, what: &'static str) -> ValidationResult<Real> {
    nf_core::ensure_finite(value, what).map_err(|_| ValidationError::NonFinite { what, value })
}

fn is_declared(nodes: &[Node], node: NodeId) -> bool {
    node.slot() < nodes.len()
}

/// Node labels must be unique.
pub(crate) fn validate_nodes(nodes: &[Node]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.label.as_str()) {
            return Err(ValidationError::DuplicateNode {
                label: node.label.clone(),
            });
        }
    }
    Ok(())
}

/// Every arc endpoint must be declared and no (tail, head) pair may repeat.
///
/// Returns the endpoint lookup table used by the attribute checks.
pub(crate) fn validate_arcs(
    nodes: &[Node],
    arcs: &[Arc],
) -> ValidationResult<HashMap<(NodeId, NodeId), ArcId>> {
    let mut endpoints = HashMap::with_capacity(arcs.len());
    for arc in arcs {
        for node in [arc.tail, arc.head] {
            if !is_declared(nodes, node) {
                return Err(ValidationError::UnknownNode {
                    node,
                    context: "arc endpoint",
                });
            }
        }
        if endpoints.insert((arc.tail, arc.head), arc.id).is_some() {
            return Err(ValidationError::DuplicateArc {
                tail: arc.tail,
                head: arc.head,
            });
        }
    }
    Ok(endpoints)
}

/// Resolve raw `(tail, head) -> value` entries onto declared arcs.
///
/// Entries for undeclared pairs are rejected rather than ignored.
pub(crate) fn collect_attribute(
    endpoints: &HashMap<(NodeId, NodeId), ArcId>,
    raw: &[((NodeId, NodeId), Real)],
    attr: Attr,
) -> ValidationResult<HashMap<ArcId, Real>> {
    let mut values = HashMap::with_capacity(raw.len());
    for &((tail, head), value) in raw {
        let value = finite(value, attr.what())?;
        let arc = *endpoints
            .get(&(tail, head))
            .ok_or_else(|| attr.extraneous(tail, head))?;
        if attr == Attr::Capacity && value < 0.0 {
            return Err(ValidationError::NegativeCapacity { arc, value });
        }
        values.insert(arc, value);
    }
    Ok(values)
}

/// A required map must cover every arc; an optional one must too once it is non-empty.
pub(crate) fn check_coverage(
    arcs: &[Arc],
    values: &HashMap<ArcId, Real>,
    required: bool,
    attr: Attr,
) -> ValidationResult<()> {
    if !required && values.is_empty() {
        return Ok(());
    }
    match arcs.iter().find(|arc| !values.contains_key(&arc.id)) {
        Some(arc) => Err(attr.missing(arc.id)),
        None => Ok(()),
    }
}

/// Map raw balances onto node slots. Later entries replace earlier ones.
pub(crate) fn collect_balances(
    nodes: &[Node],
    raw: &[(NodeId, Real)],
) -> ValidationResult<Vec<Option<Real>>> {
    let mut balances = vec![None; nodes.len()];
    for &(node, value) in raw {
        if !is_declared(nodes, node) {
            return Err(ValidationError::UnknownNode {
                node,
                context: "supply/demand",
            });
        }
        balances[node.slot()] = Some(finite(value, "node balance")?);
    }
    Ok(balances)
}

/// Compare total supply against total demand.
///
/// Returns the warning text when the totals differ under `BalanceCheck::Warn`.
pub(crate) fn check_balance_totals(
    nodes: &[Node],
    balances: &[Option<Real>],
    check: BalanceCheck,
) -> ValidationResult<Option<String>> {
    let supply: Real = balances.iter().flatten().filter(|d| **d < 0.0).map(|d| -d).sum();
    let demand: Real = balances.iter().flatten().filter(|d| **d > 0.0).sum();
    if nearly_equal(supply, demand, Tolerances::default()) {
        return Ok(None);
    }
    match check {
        BalanceCheck::Strict => Err(ValidationError::Unbalanced { supply, demand }),
        BalanceCheck::Warn => {
            tracing::warn!(
                supply,
                demand,
                nodes = nodes.len(),
                "total supply differs from total demand; data kept as given"
            );
            Ok(Some(format!(
                "total supply {supply} differs from total demand {demand}"
            )))
        }
    }
}

/// Source/sink presence, declaration and distinctness.
pub(crate) fn validate_terminals(
    nodes: &[Node],
    source: Option<NodeId>,
    sink: Option<NodeId>,
    kind: ProblemKind,
) -> ValidationResult<()> {
    for (node, context) in [(source, "source"), (sink, "sink")] {
        if let Some(node) = node {
            if !is_declared(nodes, node) {
                return Err(ValidationError::UnknownNode { node, context });
            }
        }
    }
    if !kind.requires_terminals() {
        return Ok(());
    }
    let source = source.ok_or(ValidationError::MissingSource)?;
    let sink = sink.ok_or(ValidationError::MissingSink)?;
    if source == sink {
        return Err(ValidationError::SourceIsSink { node: source });
    }
    Ok(())
}
