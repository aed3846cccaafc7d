//! Tagged union over the policy family, plus config-driven construction.
//!
//! `AgentConfig` is the one place hyperparameters are spelled out for a
//! harness: build an `Agent` from it and drive it through `BanditPolicy`.
//! With the `serde` feature it round-trips through JSON/TOML as
//! `{"policy": "lin_ucb", "alpha": 0.5, "dim": 10, ...}`.

use crate::{
    BanditError, BanditPolicy, Contexts, Decision, EpsilonGreedy, EpsilonGreedyConfig, LinUcb,
    LinUcbConfig, OnlineBootstrap, OnlineBootstrapConfig, PolicyKind, RandomMode, RandomPolicy,
    ThompsonConfig, ThompsonSampling,
};

/// Hyperparameters for any policy in the family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum AgentConfig {
    ThompsonSampling(ThompsonConfig),
    LinUcb(LinUcbConfig),
    EpsilonGreedy(EpsilonGreedyConfig),
    Random { mode: RandomMode, seed: u64 },
    OnlineBootstrap(OnlineBootstrapConfig),
}

impl AgentConfig {
    pub fn kind(&self) -> PolicyKind {
        match self {
            AgentConfig::ThompsonSampling(_) => PolicyKind::ThompsonSampling,
            AgentConfig::LinUcb(_) => PolicyKind::LinUcb,
            AgentConfig::EpsilonGreedy(_) => PolicyKind::EpsilonGreedy,
            AgentConfig::Random { .. } => PolicyKind::Random,
            AgentConfig::OnlineBootstrap(_) => PolicyKind::OnlineBootstrap,
        }
    }

    /// Validate and construct the agent.
    pub fn build(self) -> Result<Agent, BanditError> {
        Ok(match self {
            AgentConfig::ThompsonSampling(c) => Agent::ThompsonSampling(ThompsonSampling::new(c)?),
            AgentConfig::LinUcb(c) => Agent::LinUcb(LinUcb::new(c)?),
            AgentConfig::EpsilonGreedy(c) => Agent::EpsilonGreedy(EpsilonGreedy::new(c)?),
            AgentConfig::Random { mode, seed } => {
                Agent::Random(RandomPolicy::with_mode(mode, seed))
            }
            AgentConfig::OnlineBootstrap(c) => Agent::OnlineBootstrap(OnlineBootstrap::new(c)?),
        })
    }
}

/// Any policy in the family, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Agent {
    ThompsonSampling(ThompsonSampling),
    LinUcb(LinUcb),
    EpsilonGreedy(EpsilonGreedy),
    Random(RandomPolicy),
    OnlineBootstrap(OnlineBootstrap),
}

impl BanditPolicy for Agent {
    fn decide(&mut self, contexts: &Contexts) -> Result<Decision, BanditError> {
        match self {
            Agent::ThompsonSampling(p) => p.decide(contexts),
            Agent::LinUcb(p) => p.decide(contexts),
            Agent::EpsilonGreedy(p) => p.decide(contexts),
            Agent::Random(p) => p.decide(contexts),
            Agent::OnlineBootstrap(p) => p.decide(contexts),
        }
    }

    fn update_reward(&mut self, arm: usize, context: &[f64], reward: f64) -> Result<(), BanditError> {
        match self {
            Agent::ThompsonSampling(p) => p.update(context, reward),
            Agent::LinUcb(p) => p.update(context, reward),
            Agent::EpsilonGreedy(p) => p.update(context, reward),
            Agent::Random(p) => p.update(context, reward),
            Agent::OnlineBootstrap(p) => p.update(arm, context, reward),
        }
    }

    fn kind(&self) -> PolicyKind {
        match self {
            Agent::ThompsonSampling(_) => PolicyKind::ThompsonSampling,
            Agent::LinUcb(_) => PolicyKind::LinUcb,
            Agent::EpsilonGreedy(_) => PolicyKind::EpsilonGreedy,
            Agent::Random(_) => PolicyKind::Random,
            Agent::OnlineBootstrap(_) => PolicyKind::OnlineBootstrap,
        }
    }
}

impl From<ThompsonSampling> for Agent {
    fn from(p: ThompsonSampling) -> Self {
        Agent::ThompsonSampling(p)
    }
}

impl From<LinUcb> for Agent {
    fn from(p: LinUcb) -> Self {
        Agent::LinUcb(p)
    }
}

impl From<EpsilonGreedy> for Agent {
    fn from(p: EpsilonGreedy) -> Self {
        Agent::EpsilonGreedy(p)
    }
}

impl From<RandomPolicy> for Agent {
    fn from(p: RandomPolicy) -> Self {
        Agent::Random(p)
    }
}

impl From<OnlineBootstrap> for Agent {
    fn from(p: OnlineBootstrap) -> Self {
        Agent::OnlineBootstrap(p)
    }
}
