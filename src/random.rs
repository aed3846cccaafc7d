//! Random baseline: a lower bound for regret comparisons.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::{BanditError, Contexts, Decision, DecisionNote, PolicyKind};

/// How the baseline picks an arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RandomMode {
    /// Uniform over `[0, narm)` on every call.
    Uniform,
    /// Always the same arm index.
    Fixed(usize),
}

/// Context-blind baseline policy with no learned state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    mode: RandomMode,
    rng: StdRng,
}

impl RandomPolicy {
    /// `explore = true` picks uniformly; `false` always plays arm 0.
    pub fn new(explore: bool) -> Self {
        let mode = if explore {
            RandomMode::Uniform
        } else {
            RandomMode::Fixed(0)
        };
        Self::with_mode(mode, 0)
    }

    pub fn with_mode(mode: RandomMode, seed: u64) -> Self {
        Self {
            mode,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> RandomMode {
        self.mode
    }

    pub fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        let narm = contexts.narm();
        let (chosen, note) = match self.mode {
            RandomMode::Uniform => (self.rng.random_range(0..narm), DecisionNote::UniformRandom),
            RandomMode::Fixed(arm) if arm < narm => (arm, DecisionNote::FixedArm),
            RandomMode::Fixed(arm) => return Err(BanditError::ArmOutOfRange { arm, narm }),
        };
        Ok(Decision::new(PolicyKind::Random, chosen, Vec::new(), note))
    }

    pub fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    /// No-op: this policy learns nothing.
    pub fn update(&mut self, _context: &[f64], _reward: f64) -> Result<(), BanditError> {
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        PolicyKind::Random.label()
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_mode_ignores_context() {
        let mut p = RandomPolicy::new(false);
        for n in 1..6 {
            let cts = Contexts::repeated(&[n as f64, -1.0], n).unwrap();
            assert_eq!(p.choose(&cts).unwrap(), 0);
        }
        let mut p = RandomPolicy::with_mode(RandomMode::Fixed(2), 9);
        let cts = Contexts::repeated(&[1.0], 3).unwrap();
        assert_eq!(p.decide(&cts).unwrap().notes, vec![DecisionNote::FixedArm]);
        let small = Contexts::repeated(&[1.0], 2).unwrap();
        assert_eq!(
            p.choose(&small),
            Err(BanditError::ArmOutOfRange { arm: 2, narm: 2 })
        );
    }

    #[test]
    fn uniform_mode_covers_every_arm() {
        let mut p = RandomPolicy::with_mode(RandomMode::Uniform, 5);
        let cts = Contexts::repeated(&[0.0], 4).unwrap();
        let mut seen = [0usize; 4];
        for _ in 0..400 {
            seen[p.choose(&cts).unwrap()] += 1;
        }
        assert!(seen.iter().all(|&c| c > 50), "seen={seen:?}");
    }

    #[test]
    fn update_accepts_anything() {
        let mut p = RandomPolicy::default();
        assert!(p.update(&[], f64::NAN).is_ok());
        assert_eq!(p.name(), "Random");
    }
}
