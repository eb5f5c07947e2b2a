//! Problem definition schema.

use std::collections::BTreeMap;

use nf_core::{CoreResult, ProblemKind};
use serde::{Deserialize, Serialize};

/// One network problem: graph, per-arc data, balances and terminals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProblemDef {
    pub version: u32,
    pub name: String,
    /// Problem selector, e.g. `shortest-path` or `flujo_maximo`.
    pub kind: String,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub arcs: Vec<ArcDef>,
    /// Node label -> balance (negative supply, positive demand).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub balances: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_rule: Option<BalanceRuleDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_check: Option<BalanceCheckDef>,
    #[serde(default)]
    pub solver: SolverSettings,
}

impl ProblemDef {
    pub fn problem_kind(&self) -> CoreResult<ProblemKind> {
        self.kind.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArcDef {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

/// Which side of a node its balance constrains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceRuleDef {
    #[default]
    SupplyOutDemandIn,
    DemandOutSupplyIn,
}

/// Reaction to total supply differing from total demand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BalanceCheckDef {
    #[default]
    Strict,
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}
