//! Epsilon-greedy over a ridge / UCB score.
//!
//! Scoring and updates are the LinUCB ones; `choose` adds a randomized
//! override that replaces the best-scored arm with a uniformly random one.
//! Two override rules are supported, see [`EpsilonRule`].

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::check_param;
use crate::linalg::argmax_first;
use crate::linucb::ucb_scores;
use crate::ridge::RidgeState;
use crate::{BanditError, Contexts, Decision, DecisionNote, InverseUpdate, PolicyKind};

/// When the random override fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EpsilonRule {
    /// Draw `u ~ U[0, 1)`; explore iff `u < epsilon`.
    #[default]
    Uniform,
    /// Draw `j ~ U{0, .., narm-1}`; exploit iff `j > epsilon * narm`.
    ///
    /// The exploration probability depends on `narm` and is not `epsilon`.
    /// Kept for reproducing results produced with that rule.
    ArmCountThreshold,
}

/// Configuration for epsilon-greedy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsilonGreedyConfig {
    /// Exploration rate in `[0, 1]`.
    pub epsilon: f64,
    /// Feature dimension (>= 1).
    pub dim: usize,
    /// Confidence-bonus weight applied to the exploit score (>= 0).
    pub alpha: f64,
    pub rule: EpsilonRule,
    /// Seed for the override draws.
    pub seed: u64,
    pub inverse: InverseUpdate,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            dim: 8,
            alpha: 0.0,
            rule: EpsilonRule::Uniform,
            seed: 0,
            inverse: InverseUpdate::Full,
        }
    }
}

/// Seedable epsilon-greedy policy over a shared ridge model.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    cfg: EpsilonGreedyConfig,
    state: RidgeState,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(cfg: EpsilonGreedyConfig) -> Result<Self, BanditError> {
        check_param("epsilon", cfg.epsilon, |v| (0.0..=1.0).contains(&v))?;
        check_param("alpha", cfg.alpha, |v| v >= 0.0)?;
        if cfg.dim == 0 {
            return Err(BanditError::InvalidParameter {
                name: "dim",
                value: 0.0,
            });
        }
        tracing::debug!(
            epsilon = cfg.epsilon,
            alpha = cfg.alpha,
            dim = cfg.dim,
            rule = ?cfg.rule,
            "epsilon greedy created"
        );
        Ok(Self {
            state: RidgeState::new(cfg.dim, cfg.inverse),
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
        })
    }

    /// Shorthand taking the hyperparameters in `(epsilon, d, alpha)` order.
    pub fn with_params(epsilon: f64, dim: usize, alpha: f64) -> Result<Self, BanditError> {
        Self::new(EpsilonGreedyConfig {
            epsilon,
            dim,
            alpha,
            ..EpsilonGreedyConfig::default()
        })
    }

    pub fn config(&self) -> &EpsilonGreedyConfig {
        &self.cfg
    }

    pub fn dim(&self) -> usize {
        self.cfg.dim
    }

    /// Ridge coefficients `t = A⁻¹b`.
    pub fn theta(&self) -> &DVector<f64> {
        self.state.theta()
    }

    pub fn uses(&self) -> u64 {
        self.state.uses()
    }

    fn explore(&mut self, narm: usize) -> bool {
        match self.cfg.rule {
            EpsilonRule::Uniform => self.rng.random::<f64>() < self.cfg.epsilon,
            EpsilonRule::ArmCountThreshold => {
                let j = self.rng.random_range(0..narm) as f64;
                j <= self.cfg.epsilon * narm as f64
            }
        }
    }

    pub fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        contexts.expect_dim(self.dim())?;
        let scores: Vec<f64> = ucb_scores(&self.state, self.cfg.alpha, contexts)
            .into_iter()
            .map(|s| s.0)
            .collect();
        let best = argmax_first(&scores).ok_or(BanditError::EmptyArms)?;
        let narm = contexts.narm();
        let (chosen, note) = if self.explore(narm) {
            (self.rng.random_range(0..narm), DecisionNote::EpsilonExplore)
        } else {
            (best, DecisionNote::DeterministicChoice)
        };
        Ok(Decision::new(PolicyKind::EpsilonGreedy, chosen, scores, note))
    }

    /// Choose an arm index in `[0, narm)`.
    pub fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    pub fn update(&mut self, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.state.observe(context, reward)?;
        tracing::debug!(policy = "epsilon_greedy", uses = self.state.uses(), reward, "updated");
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        PolicyKind::EpsilonGreedy.label()
    }

    /// Reset the ridge model. The RNG stream continues.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(epsilon: f64, rule: EpsilonRule, seed: u64) -> EpsilonGreedyConfig {
        EpsilonGreedyConfig {
            epsilon,
            dim: 2,
            alpha: 0.0,
            rule,
            seed,
            inverse: InverseUpdate::Full,
        }
    }

    fn trained(cfg: EpsilonGreedyConfig) -> (EpsilonGreedy, Contexts) {
        let mut p = EpsilonGreedy::new(cfg).unwrap();
        let cts = Contexts::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        for _ in 0..10 {
            p.update(cts.row(0), 5.0).unwrap();
            p.update(cts.row(1), 1.0).unwrap();
        }
        (p, cts)
    }

    #[test]
    fn zero_epsilon_is_greedy() {
        let (mut p, cts) = trained(cfg(0.0, EpsilonRule::Uniform, 1));
        for _ in 0..200 {
            let d = p.decide(&cts).unwrap();
            assert_eq!(d.chosen, 0);
            assert_eq!(d.notes, vec![DecisionNote::DeterministicChoice]);
        }
    }

    #[test]
    fn full_epsilon_always_explores() {
        let (mut p, cts) = trained(cfg(1.0, EpsilonRule::Uniform, 2));
        let mut counts = [0usize; 2];
        for _ in 0..400 {
            let d = p.decide(&cts).unwrap();
            assert_eq!(d.notes, vec![DecisionNote::EpsilonExplore]);
            counts[d.chosen] += 1;
        }
        assert!(counts[0] > 120 && counts[1] > 120, "counts={counts:?}");
    }

    #[test]
    fn uniform_rule_explores_at_rate_epsilon() {
        let (mut p, cts) = trained(cfg(0.2, EpsilonRule::Uniform, 3));
        let n = 5_000;
        let explored = (0..n)
            .filter(|_| p.decide(&cts).unwrap().notes[0] == DecisionNote::EpsilonExplore)
            .count();
        let rate = explored as f64 / n as f64;
        assert!((rate - 0.2).abs() < 0.03, "rate={rate}");
    }

    #[test]
    fn arm_count_rule_depends_on_narm() {
        // 10 arms, epsilon 0.2: explore iff j <= 2, i.e. with probability 3/10.
        let mut p = EpsilonGreedy::new(EpsilonGreedyConfig {
            epsilon: 0.2,
            dim: 1,
            alpha: 0.0,
            rule: EpsilonRule::ArmCountThreshold,
            seed: 4,
            inverse: InverseUpdate::Full,
        })
        .unwrap();
        let cts = Contexts::from_rows(&(0..10).map(|i| vec![i as f64]).collect::<Vec<_>>()).unwrap();
        let n = 5_000;
        let explored = (0..n)
            .filter(|_| p.decide(&cts).unwrap().notes[0] == DecisionNote::EpsilonExplore)
            .count();
        let rate = explored as f64 / n as f64;
        assert!((rate - 0.3).abs() < 0.03, "rate={rate}");
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        assert!(EpsilonGreedy::with_params(1.5, 2, 0.0).is_err());
        assert!(EpsilonGreedy::with_params(-0.1, 2, 0.0).is_err());
        assert!(EpsilonGreedy::with_params(0.1, 2, -1.0).is_err());
        assert!(EpsilonGreedy::with_params(0.1, 0, 0.0).is_err());
    }

    #[test]
    fn learns_the_ridge_solution() {
        let (p, _) = trained(cfg(0.1, EpsilonRule::Uniform, 5));
        // A = diag(11, 11), b = [50, 10].
        assert!((p.theta()[0] - 50.0 / 11.0).abs() < 1e-9);
        assert!((p.theta()[1] - 10.0 / 11.0).abs() < 1e-9);
        assert_eq!(p.uses(), 20);
        assert_eq!(p.name(), "Epsilon Greedy");
    }
}
