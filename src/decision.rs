//! Unified decision envelope for policy outputs.
//!
//! A `Decision` records which policy chose which arm, the per-arm scores it
//! compared, and a typed note explaining how the choice was made. It is meant
//! for logging and offline inspection; callers that only need the index can
//! use `choose`.

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    ThompsonSampling,
    LinUcb,
    EpsilonGreedy,
    Random,
    OnlineBootstrap,
}

impl PolicyKind {
    /// Stable display label, used for reporting only.
    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::ThompsonSampling => "Thompson Sampling",
            PolicyKind::LinUcb => "LinUCB",
            PolicyKind::EpsilonGreedy => "Epsilon Greedy",
            PolicyKind::Random => "Random",
            PolicyKind::OnlineBootstrap => "Online Bootstrap",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a choice was made.
///
/// Prefer adding new variants over changing existing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionNote {
    /// A weight vector was drawn from the posterior and the best-scoring arm chosen.
    SampledPosteriorMax,

    /// Deterministic argmax over scores (first index wins ties).
    DeterministicChoice,

    /// The epsilon branch fired and a uniformly random arm was chosen.
    EpsilonExplore,

    /// Uniformly random arm, no scores involved.
    UniformRandom,

    /// A stored fixed arm was returned regardless of context.
    FixedArm,

    /// One bootstrap replicate was sampled per arm and the best-scoring arm chosen.
    SampledReplicateMax,
}

/// A single policy decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// The policy that produced this decision.
    pub policy: PolicyKind,
    /// Index of the chosen arm in the context matrix.
    pub chosen: usize,
    /// Per-arm scores in arm order (empty when the policy does not score arms).
    pub scores: Vec<f64>,
    /// Notes describing why this choice happened.
    pub notes: Vec<DecisionNote>,
}

impl Decision {
    pub(crate) fn new(
        policy: PolicyKind,
        chosen: usize,
        scores: Vec<f64>,
        note: DecisionNote,
    ) -> Self {
        tracing::trace!(policy = %policy, chosen, ?scores, ?note, "decision");
        Self {
            policy,
            chosen,
            scores,
            notes: vec![note],
        }
    }

    /// Score of the chosen arm, when the policy produced scores.
    pub fn chosen_score(&self) -> Option<f64> {
        self.scores.get(self.chosen).copied()
    }
}
