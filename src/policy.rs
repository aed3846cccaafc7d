//! Unified `BanditPolicy` trait over every contextual policy in this crate.
//!
//! Each policy also exposes the same operations as inherent methods; this
//! trait makes the shared shape explicit so harness code can be generic.
//!
//! The update carries the arm index because the online bootstrap keeps
//! arm-indexed state. Policies with one shared model ignore it.

use crate::{
    BanditError, Contexts, Decision, EpsilonGreedy, LinUcb, OnlineBootstrap, PolicyKind,
    RandomPolicy, ThompsonSampling,
};

/// Common interface for stateful contextual bandit policies.
///
/// # Example
///
/// ```rust
/// use bdt::{BanditPolicy, Contexts, LinUcb, ThompsonSampling};
///
/// fn play<P: BanditPolicy>(policy: &mut P, contexts: &Contexts, rewards: &[f64]) {
///     let arm = policy.choose(contexts).unwrap();
///     policy.update_reward(arm, contexts.row(arm), rewards[arm]).unwrap();
/// }
///
/// let cts = Contexts::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
/// let mut ts = ThompsonSampling::with_params(0.5, 2).unwrap();
/// let mut ucb = LinUcb::with_params(0.5, 2).unwrap();
/// play(&mut ts, &cts, &[5.0, 1.0]);
/// play(&mut ucb, &cts, &[5.0, 1.0]);
/// ```
pub trait BanditPolicy {
    /// Select an arm, returning the choice with its scores and notes.
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError>;

    /// Select an arm index in `[0, contexts.narm())`.
    fn choose(&mut self, contexts: &Contexts) -> Result<usize, BanditError> {
        Ok(self.decide(contexts)?.chosen)
    }

    /// Feed back the reward observed for `arm`, whose context is `context`.
    ///
    /// Must be called with the arm returned by the immediately preceding
    /// `choose`; out-of-order feedback is not detected.
    fn update_reward(&mut self, arm: usize, context: &[f64], reward: f64)
        -> Result<(), BanditError>;

    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Human-readable policy name, for reporting only.
    fn name(&self) -> &'static str {
        self.kind().label()
    }
}

impl BanditPolicy for ThompsonSampling {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        self.decide(contexts)
    }
    fn update_reward(&mut self, _arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.update(context, reward)
    }
    fn kind(&self) -> PolicyKind {
        PolicyKind::ThompsonSampling
    }
}

impl BanditPolicy for LinUcb {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        self.decide(contexts)
    }
    fn update_reward(&mut self, _arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.update(context, reward)
    }
    fn kind(&self) -> PolicyKind {
        PolicyKind::LinUcb
    }
}

impl BanditPolicy for EpsilonGreedy {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        self.decide(contexts)
    }
    fn update_reward(&mut self, _arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.update(context, reward)
    }
    fn kind(&self) -> PolicyKind {
        PolicyKind::EpsilonGreedy
    }
}

impl BanditPolicy for RandomPolicy {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        self.decide(contexts)
    }
    fn update_reward(&mut self, _arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.update(context, reward)
    }
    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }
}

impl BanditPolicy for OnlineBootstrap {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        self.decide(contexts)
    }
    fn update_reward(&mut self, arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        self.update(arm, context, reward)
    }
    fn kind(&self) -> PolicyKind {
        PolicyKind::OnlineBootstrap
    }
}
