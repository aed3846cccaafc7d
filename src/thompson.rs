//! Linear Thompson sampling (Bayesian linear regression with posterior sampling).
//!
//! The reward model is `r = xᵗw + noise`. The policy keeps the precision
//! `B = I + Σ x xᵗ` and `f = Σ r x`, so the posterior mean is `mu = B⁻¹f`.
//! Each decision draws `w ~ N(mu, nu² B⁻¹)` and plays the arm that scores
//! best under the draw; the spread of the draw is what drives exploration.
//!
//! Notes:
//! - This policy is **seedable** so selection can be reproducible in tests.
//! - Default construction uses a fixed seed (deterministic by default).

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::check_param;
use crate::linalg::{argmax_first, sample_mvn};
use crate::ridge::RidgeState;
use crate::{BanditError, Contexts, Decision, DecisionNote, InverseUpdate, PolicyKind};

/// Configuration for linear Thompson sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThompsonConfig {
    /// Posterior scale `nu` (finite, > 0). Larger values explore more.
    pub nu: f64,
    /// Feature dimension `d` (>= 1).
    pub dim: usize,
    /// Seed for the posterior draws.
    pub seed: u64,
    /// How `B⁻¹` is refreshed after each update.
    pub inverse: InverseUpdate,
}

impl Default for ThompsonConfig {
    fn default() -> Self {
        Self {
            nu: 0.5,
            dim: 8,
            seed: 0,
            inverse: InverseUpdate::Full,
        }
    }
}

/// Seedable linear Thompson-sampling policy.
#[derive(Debug, Clone)]
pub struct ThompsonSampling {
    cfg: ThompsonConfig,
    state: RidgeState,
    rng: StdRng,
}

impl ThompsonSampling {
    /// Create a new policy, validating `nu` and `dim`.
    pub fn new(cfg: ThompsonConfig) -> Result<Self, BanditError> {
        check_param("nu", cfg.nu, |v| v > 0.0)?;
        if cfg.dim == 0 {
            return Err(BanditError::InvalidParameter {
                name: "dim",
                value: 0.0,
            });
        }
        tracing::debug!(nu = cfg.nu, dim = cfg.dim, seed = cfg.seed, "thompson sampling created");
        Ok(Self {
            state: RidgeState::new(cfg.dim, cfg.inverse),
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
        })
    }

    /// Shorthand for `new` with default seed and full inversion.
    pub fn with_params(nu: f64, dim: usize) -> Result<Self, BanditError> {
        Self::new(ThompsonConfig {
            nu,
            dim,
            ..ThompsonConfig::default()
        })
    }

    pub fn config(&self) -> &ThompsonConfig {
        &self.cfg
    }

    pub fn dim(&self) -> usize {
        self.cfg.dim
    }

    /// Posterior mean `mu = B⁻¹f`.
    pub fn mean(&self) -> &DVector<f64> {
        self.state.theta()
    }

    /// Posterior precision `B`.
    pub fn precision(&self) -> &DMatrix<f64> {
        self.state.a()
    }

    /// Number of observations folded in so far.
    pub fn uses(&self) -> u64 {
        self.state.uses()
    }

    /// Draw a weight vector and score every arm against it.
    pub fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        contexts.expect_dim(self.dim())?;
        let w = sample_mvn(
            &mut self.rng,
            self.state.theta(),
            self.state.a_inv(),
            self.cfg.nu,
        )
        .inspect_err(|_| {
            tracing::warn!(
                dim = self.cfg.dim,
                uses = self.state.uses(),
                "posterior covariance factorization failed"
            );
        })?;
        let scores: Vec<f64> = contexts
            .rows()
            .map(|x| x.iter().zip(w.iter()).map(|(a, b)| a * b).sum())
            .collect();
        let chosen = argmax_first(&scores).ok_or(BanditError::EmptyArms)?;
        Ok(Decision::new(
            PolicyKind::ThompsonSampling,
            chosen,
            scores,
            DecisionNote::SampledPosteriorMax,
        ))
    }

    /// Choose an arm index in `[0, narm)`.
    pub fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    /// Fold in the reward observed for the chosen arm's context.
    pub fn update(&mut self, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.state.observe(context, reward)?;
        tracing::debug!(policy = "thompson", uses = self.state.uses(), reward, "updated");
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        PolicyKind::ThompsonSampling.label()
    }

    /// Reset the posterior to the prior. The RNG stream continues.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}
