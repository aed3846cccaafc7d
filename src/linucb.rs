//! Linear upper-confidence-bound policy (LinUCB).
//!
//! One shared ridge model `t = A⁻¹b` scores every arm by its context:
//!
//! ```text
//!   ucb_k = x_k · t + alpha * sqrt(x_k A⁻¹ x_kᵗ)
//! ```
//!
//! Exploration comes from the deterministic confidence bonus, so the same
//! state and contexts always produce the same choice. Ties go to the
//! lowest arm index.

use nalgebra::{DMatrix, DVector};

use crate::error::check_param;
use crate::linalg::{argmax_first, quad_form};
use crate::ridge::RidgeState;
use crate::{BanditError, Contexts, Decision, DecisionNote, InverseUpdate, PolicyKind};

/// Per-arm score tuple: `(ucb, mean, bonus)`.
pub type LinUcbScore = (f64, f64, f64);

/// Configuration for linear UCB.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinUcbConfig {
    /// Exploration strength (alpha, must be finite and >= 0).
    pub alpha: f64,
    /// Feature vector dimension (must be >= 1).
    pub dim: usize,
    /// How `A⁻¹` is refreshed after each update.
    pub inverse: InverseUpdate,
}

impl Default for LinUcbConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            dim: 8,
            inverse: InverseUpdate::Full,
        }
    }
}

/// Score every arm against a ridge model. Shared with epsilon-greedy.
pub(crate) fn ucb_scores(state: &RidgeState, alpha: f64, contexts: &Contexts) -> Vec<LinUcbScore> {
    contexts
        .rows()
        .map(|row| {
            let x = DVector::from_column_slice(row);
            let mean = x.dot(state.theta());
            let bonus = alpha * quad_form(state.a_inv(), &x).sqrt();
            (mean + bonus, mean, bonus)
        })
        .collect()
}

/// Linear contextual bandit (LinUCB).
///
/// Usage:
/// - call `choose(contexts)` (or `decide` for the scores as well)
/// - call `update(contexts.row(arm), reward)` after observing the reward
#[derive(Debug, Clone)]
pub struct LinUcb {
    cfg: LinUcbConfig,
    state: RidgeState,
}

impl LinUcb {
    /// Create a new LinUCB instance, validating `alpha` and `dim`.
    pub fn new(cfg: LinUcbConfig) -> Result<Self, BanditError> {
        check_param("alpha", cfg.alpha, |v| v >= 0.0)?;
        if cfg.dim == 0 {
            return Err(BanditError::InvalidParameter {
                name: "dim",
                value: 0.0,
            });
        }
        tracing::debug!(alpha = cfg.alpha, dim = cfg.dim, "linucb created");
        Ok(Self {
            state: RidgeState::new(cfg.dim, cfg.inverse),
            cfg,
        })
    }

    /// Shorthand for `new` with full inversion.
    pub fn with_params(alpha: f64, dim: usize) -> Result<Self, BanditError> {
        Self::new(LinUcbConfig {
            alpha,
            dim,
            inverse: InverseUpdate::Full,
        })
    }

    pub fn config(&self) -> &LinUcbConfig {
        &self.cfg
    }

    pub fn dim(&self) -> usize {
        self.cfg.dim
    }

    /// Ridge coefficients `t = A⁻¹b`.
    pub fn theta(&self) -> &DVector<f64> {
        self.state.theta()
    }

    /// Design matrix `A`.
    pub fn design(&self) -> &DMatrix<f64> {
        self.state.a()
    }

    pub fn uses(&self) -> u64 {
        self.state.uses()
    }

    /// Return per-arm `(ucb, mean, bonus)` scores for a context matrix.
    pub fn scores(&self, contexts: &Contexts) -> Result<Vec<LinUcbScore>, BanditError> {
        contexts.expect_dim(self.dim())?;
        Ok(ucb_scores(&self.state, self.cfg.alpha, contexts))
    }

    /// Argmax UCB, returning the chosen arm with the UCB score of every arm.
    pub fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        let ucb: Vec<f64> = self.scores(contexts)?.into_iter().map(|s| s.0).collect();
        let chosen = argmax_first(&ucb).ok_or(BanditError::EmptyArms)?;
        Ok(Decision::new(
            PolicyKind::LinUcb,
            chosen,
            ucb,
            DecisionNote::DeterministicChoice,
        ))
    }

    /// Choose an arm index in `[0, narm)`.
    pub fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    /// Update the model with the chosen arm's context and its observed reward.
    pub fn update(&mut self, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.state.observe(context, reward)?;
        tracing::debug!(policy = "linucb", uses = self.state.uses(), reward, "updated");
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        PolicyKind::LinUcb.label()
    }

    /// Reset all learned state.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
