//! Strategy selection by problem kind.

use nf_core::ProblemKind;
use nf_graph::Network;
use nf_model::{ModelSpec, SolveOutcome};

use crate::balance_flow::{BalanceFlow, BalanceRule};
use crate::decode::{self, FlowResult, Unsolved};
use crate::error::{FormulationError, FormulationResult};
use crate::max_flow::MaxFlow;
use crate::shortest_path::ShortestPath;

/// Builds the linear program for one problem kind.
pub trait Strategy {
    fn kind(&self) -> ProblemKind;

    /// Produce a fresh model for a network validated for `self.kind()`.
    fn formulate(&self, network: &Network) -> ModelSpec;
}

/// Knobs that change how a model is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormulationOptions {
    pub balance_rule: BalanceRule,
}

/// The closed set of strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formulation {
    ShortestPath(ShortestPath),
    MaxFlow(MaxFlow),
    Transportation(BalanceFlow),
    MinCostFlow(BalanceFlow),
}

impl Formulation {
    pub fn for_kind(kind: ProblemKind, options: FormulationOptions) -> Self {
        match kind {
            ProblemKind::ShortestPath => Formulation::ShortestPath(ShortestPath),
            ProblemKind::MaxFlow => Formulation::MaxFlow(MaxFlow),
            ProblemKind::Transportation => {
                Formulation::Transportation(BalanceFlow::new(options.balance_rule))
            }
            ProblemKind::MinCostFlow => Formulation::MinCostFlow(
                BalanceFlow::new(options.balance_rule).reporting_as(ProblemKind::MinCostFlow),
            ),
        }
    }

    /// Strategy matching the kind the network was validated for.
    pub fn for_network(network: &Network, options: FormulationOptions) -> Self {
        Self::for_kind(network.kind(), options)
    }

    pub fn kind(&self) -> ProblemKind {
        match self {
            Formulation::ShortestPath(_) => ProblemKind::ShortestPath,
            Formulation::MaxFlow(_) => ProblemKind::MaxFlow,
            Formulation::Transportation(_) => ProblemKind::Transportation,
            Formulation::MinCostFlow(_) => ProblemKind::MinCostFlow,
        }
    }

    /// Formulate `network`, which must have been validated for a kind with
    /// the same requirements (transportation and min-cost flow are interchangeable).
    pub fn formulate(&self, network: &Network) -> FormulationResult<ModelSpec> {
        if !compatible(self.kind(), network.kind()) {
            return Err(FormulationError::KindMismatch {
                requested: self.kind(),
                validated: network.kind(),
            });
        }
        let model = self.strategy().formulate(network);
        let stats = model.stats();
        tracing::debug!(
            kind = %self.kind(),
            variables = stats.variables,
            binaries = stats.binaries,
            constraints = stats.constraints,
            nonzeros = stats.nonzeros,
            "model formulated"
        );
        Ok(model)
    }

    /// Map a solver outcome for this formulation back onto the network.
    pub fn decode(
        &self,
        network: &Network,
        outcome: SolveOutcome,
    ) -> Result<FlowResult, Unsolved> {
        decode::decode(self.kind(), network, outcome)
    }

    fn strategy(&self) -> &dyn Strategy {
        match self {
            Formulation::ShortestPath(s) => s,
            Formulation::MaxFlow(s) => s,
            Formulation::Transportation(s) | Formulation::MinCostFlow(s) => s,
        }
    }
}

fn compatible(requested: ProblemKind, validated: ProblemKind) -> bool {
    requested == validated || (requested.uses_balances() && validated.uses_balances())
}
