//! Problem-type selector.

use core::fmt;
use core::str::FromStr;

use crate::CoreError;

/// The closed set of network problems that can be formulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Cheapest single unit of flow from source to sink.
    ShortestPath,
    /// Ship supplies to demands at minimum cost.
    Transportation,
    /// Same balance model as transportation, reported as a min-cost flow.
    MinCostFlow,
    /// Largest flow from source to sink under arc capacities.
    MaxFlow,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 4] = [
        ProblemKind::ShortestPath,
        ProblemKind::Transportation,
        ProblemKind::MinCostFlow,
        ProblemKind::MaxFlow,
    ];

    /// Canonical selector string.
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::ShortestPath => "shortest-path",
            ProblemKind::Transportation => "transportation",
            ProblemKind::MinCostFlow => "min-cost-flow",
            ProblemKind::MaxFlow => "max-flow",
        }
    }

    /// Source and sink must be given.
    pub fn requires_terminals(self) -> bool {
        matches!(self, ProblemKind::ShortestPath | ProblemKind::MaxFlow)
    }

    /// Every arc must carry a cost.
    pub fn requires_costs(self) -> bool {
        !matches!(self, ProblemKind::MaxFlow)
    }

    /// Every arc must carry a capacity.
    pub fn requires_capacities(self) -> bool {
        matches!(self, ProblemKind::MaxFlow)
    }

    /// Node supply/demand values drive the constraints.
    pub fn uses_balances(self) -> bool {
        matches!(self, ProblemKind::Transportation | ProblemKind::MinCostFlow)
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemKind {
    type Err = CoreError;

    /// Accepts the canonical names, their snake/space variants, and the
    /// Spanish selectors used by the first version of the tool.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "shortest-path" | "ruta-mas-corta" => Ok(ProblemKind::ShortestPath),
            "transportation" | "transporte" => Ok(ProblemKind::Transportation),
            "min-cost-flow" | "costo-minimo" => Ok(ProblemKind::MinCostFlow),
            "max-flow" | "flujo-maximo" => Ok(ProblemKind::MaxFlow),
            _ => Err(CoreError::UnsupportedProblemType {
                selector: s.to_string(),
            }),
        }
    }
}
