//! Online bootstrap (online bagging) over per-arm linear models.
//!
//! Each arm owns `B` replicate weight vectors. A decision samples one
//! replicate per arm and plays the arm whose sampled replicate scores its
//! context highest; disagreement between replicates is the exploration signal.
//!
//! An update replays the observation into each replicate of the played arm a
//! `Poisson(1)` number of times, which simulates bootstrap resampling without
//! storing history. Replay `z` (1-based) takes a least-mean-squares step on
//! the squared error:
//!
//! ```text
//!   eta = 1 / (sqrt(z) + 1)
//!   w  += eta * (r - w·x) * x
//! ```
//!
//! Each step scales the residual by `1 - eta·|x|²`, and `eta` is at most 1/2,
//! so replicates only contract when `|x|² < 4`. Larger contexts make the
//! weights grow with every replay until `update` returns `NonFinite`; scale
//! features into that range before feeding them to this policy.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson, StandardNormal};

use crate::context::check_update;
use crate::error::check_param;
use crate::linalg::argmax_first;
use crate::{BanditError, Contexts, Decision, DecisionNote, PolicyKind};

/// Configuration for the online bootstrap ensemble.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnlineBootstrapConfig {
    /// Replicates per arm (`B`, >= 1).
    pub replicates: usize,
    /// Number of arms (fixed for the policy lifetime, >= 1).
    pub narm: usize,
    /// Feature dimension (>= 1).
    pub dim: usize,
    /// Standard deviation of the Gaussian replicate initialization (>= 0).
    pub init_scale: f64,
    pub seed: u64,
}

impl Default for OnlineBootstrapConfig {
    fn default() -> Self {
        Self {
            replicates: 1,
            narm: 10,
            dim: 10,
            init_scale: 1.0,
            seed: 0,
        }
    }
}

/// Seedable online-bootstrap policy.
#[derive(Debug, Clone)]
pub struct OnlineBootstrap {
    cfg: OnlineBootstrapConfig,
    // narm x replicates x dim, row-major.
    weights: Vec<f64>,
    poisson: Poisson<f64>,
    rng: StdRng,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl OnlineBootstrap {
    pub fn new(cfg: OnlineBootstrapConfig) -> Result<Self, BanditError> {
        for (name, v) in [
            ("replicates", cfg.replicates),
            ("narm", cfg.narm),
            ("dim", cfg.dim),
        ] {
            if v == 0 {
                return Err(BanditError::InvalidParameter { name, value: 0.0 });
            }
        }
        check_param("init_scale", cfg.init_scale, |v| v >= 0.0)?;
        let poisson = Poisson::new(1.0).map_err(|_| BanditError::InvalidParameter {
            name: "poisson_rate",
            value: 1.0,
        })?;

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let n = cfg.narm * cfg.replicates * cfg.dim;
        let weights = (0..n)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut rng);
                z * cfg.init_scale
            })
            .collect();

        tracing::debug!(
            replicates = cfg.replicates,
            narm = cfg.narm,
            dim = cfg.dim,
            "online bootstrap created"
        );
        Ok(Self {
            cfg,
            weights,
            poisson,
            rng,
        })
    }

    /// Shorthand taking `(B, narm, d)` with unit-scale initialization.
    pub fn with_params(replicates: usize, narm: usize, dim: usize) -> Result<Self, BanditError> {
        Self::new(OnlineBootstrapConfig {
            replicates,
            narm,
            dim,
            ..OnlineBootstrapConfig::default()
        })
    }

    pub fn config(&self) -> &OnlineBootstrapConfig {
        &self.cfg
    }

    pub fn dim(&self) -> usize {
        self.cfg.dim
    }

    pub fn narm(&self) -> usize {
        self.cfg.narm
    }

    pub fn replicates(&self) -> usize {
        self.cfg.replicates
    }

    fn offset(&self, arm: usize, j: usize) -> usize {
        (arm * self.cfg.replicates + j) * self.cfg.dim
    }

    /// Weight vector of replicate `j` of `arm`, or `None` when out of range.
    pub fn replicate(&self, arm: usize, j: usize) -> Option<&[f64]> {
        if arm >= self.cfg.narm || j >= self.cfg.replicates {
            return None;
        }
        let o = self.offset(arm, j);
        Some(&self.weights[o..o + self.cfg.dim])
    }

    pub fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        contexts.expect_dim(self.dim())?;
        if contexts.narm() != self.cfg.narm {
            return Err(BanditError::ArmCountMismatch {
                expected: self.cfg.narm,
                got: contexts.narm(),
            });
        }
        let mut scores = Vec::with_capacity(self.cfg.narm);
        for (arm, x) in contexts.rows().enumerate() {
            let j = self.rng.random_range(0..self.cfg.replicates);
            let o = self.offset(arm, j);
            scores.push(dot(x, &self.weights[o..o + self.cfg.dim]));
        }
        let chosen = argmax_first(&scores).ok_or(BanditError::EmptyArms)?;
        Ok(Decision::new(
            PolicyKind::OnlineBootstrap,
            chosen,
            scores,
            DecisionNote::SampledReplicateMax,
        ))
    }

    pub fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    /// Replay `(context, reward)` into every replicate of `arm`.
    ///
    /// If any replicate would leave the finite range (step too large for the
    /// context norm), nothing is committed and `NonFinite` is returned.
    pub fn update(&mut self, arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        check_update(context, self.dim(), reward)?;
        if arm >= self.cfg.narm {
            return Err(BanditError::ArmOutOfRange {
                arm,
                narm: self.cfg.narm,
            });
        }

        let d = self.cfg.dim;
        let start = self.offset(arm, 0);
        let mut block = self.weights[start..start + self.cfg.replicates * d].to_vec();
        let mut replays = 0u64;
        for w in block.chunks_exact_mut(d) {
            let p = self.poisson.sample(&mut self.rng) as u64;
            replays += p;
            for z in 1..=p {
                let eta = 1.0 / ((z as f64).sqrt() + 1.0);
                let err = reward - dot(w, context);
                for (wi, xi) in w.iter_mut().zip(context) {
                    *wi += eta * err * xi;
                }
            }
        }
        if !block.iter().all(|v| v.is_finite()) {
            tracing::warn!(arm, reward, "bootstrap replicate diverged; update rejected");
            return Err(BanditError::NonFinite("replicate"));
        }
        self.weights[start..start + block.len()].copy_from_slice(&block);
        tracing::debug!(policy = "online_bootstrap", arm, replays, reward, "updated");
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        PolicyKind::OnlineBootstrap.label()
    }
}
