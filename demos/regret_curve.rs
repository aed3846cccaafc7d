//! Cumulative regret of every policy on a synthetic linear problem.
//!
//! Each round draws `narm` rows from a fixed pool as the candidate arms,
//! asks the policy for a choice, feeds back that arm's reward, and adds the
//! gap to the best arm of the round to the running regret.
//!
//! cargo run --example regret_curve

use bdt::{
    Agent, AgentConfig, BanditPolicy, Contexts, EpsilonGreedyConfig, EpsilonRule, InverseUpdate,
    LinUcbConfig, OnlineBootstrapConfig, RandomMode, ThompsonConfig,
};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const D: usize = 10;
const POOL: usize = 10_000;
const ROUNDS: usize = 100;
const NARM: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut env = StdRng::seed_from_u64(2024);

    // Features in [0, 1/sqrt(d)) keep every row inside the unit ball.
    let scale = 1.0 / (D as f64).sqrt();
    let pool: Vec<Vec<f64>> = (0..POOL)
        .map(|_| (0..D).map(|_| env.random_range(0.0..scale)).collect())
        .collect();
    let w: Vec<f64> = (0..D).map(|_| env.random_range(0..10) as f64).collect();
    let rewards: Vec<f64> = pool
        .iter()
        .map(|x| x.iter().zip(&w).map(|(a, b)| a * b).sum::<f64>() + env.random_range(0.0..1.0))
        .collect();

    let configs = [
        AgentConfig::ThompsonSampling(ThompsonConfig {
            nu: 0.5,
            dim: D,
            seed: 1,
            inverse: InverseUpdate::Full,
        }),
        AgentConfig::LinUcb(LinUcbConfig {
            alpha: 0.5,
            dim: D,
            inverse: InverseUpdate::ShermanMorrison,
        }),
        AgentConfig::EpsilonGreedy(EpsilonGreedyConfig {
            epsilon: 0.1,
            dim: D,
            alpha: 0.5,
            rule: EpsilonRule::Uniform,
            seed: 2,
            inverse: InverseUpdate::Full,
        }),
        AgentConfig::Random {
            mode: RandomMode::Uniform,
            seed: 3,
        },
        AgentConfig::OnlineBootstrap(OnlineBootstrapConfig {
            replicates: 10,
            narm: NARM,
            dim: D,
            init_scale: 1.0,
            seed: 4,
        }),
    ];

    for cfg in configs {
        let mut agent: Agent = cfg.build()?;
        let mut rounds = StdRng::seed_from_u64(7);
        let mut regret = 0.0;
        let mut curve = Vec::with_capacity(ROUNDS);

        for _ in 0..ROUNDS {
            let picks: Vec<usize> = (0..NARM).map(|_| rounds.random_range(0..POOL)).collect();
            let rows: Vec<&[f64]> = picks.iter().map(|&i| pool[i].as_slice()).collect();
            let cts = Contexts::from_rows(&rows)?;
            let r: Vec<f64> = picks.iter().map(|&i| rewards[i]).collect();

            let arm = agent.choose(&cts)?;
            agent.update_reward(arm, cts.row(arm), r[arm])?;

            let best = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            regret += best - r[arm];
            curve.push(regret);
        }

        println!("{}:", agent.name());
        for (t, v) in curve.iter().enumerate().filter(|(t, _)| (t + 1) % 10 == 0) {
            println!("  t={:3} regret={:8.3}", t + 1, v);
        }
    }
    Ok(())
}
