//! `bdt`: seedable contextual multi-armed bandit policies.
//!
//! Each decision presents a set of candidate arms, one feature vector
//! ("context") per arm. A policy picks one arm, the caller plays it, and the
//! observed scalar reward is fed back for that arm's context only.
//!
//! ```text
//!   arm = policy.choose(&contexts)?;
//!   policy.update(contexts.row(arm), reward)?;
//! ```
//!
//! **Policies:**
//! - [`ThompsonSampling`]: Bayesian linear regression; samples a weight vector
//!   from `N(mu, nu² B⁻¹)` and plays the best arm under the draw.
//! - [`LinUcb`]: ridge regression plus an `alpha * sqrt(x A⁻¹ xᵗ)` bonus;
//!   fully deterministic.
//! - [`EpsilonGreedy`]: LinUCB scoring with a randomized override
//!   ([`EpsilonRule`] selects the override rule).
//! - [`RandomPolicy`]: uniform or fixed-arm baseline.
//! - [`OnlineBootstrap`]: per-arm ensembles of least-mean-squares replicates
//!   trained by online bagging.
//!
//! All of them implement [`BanditPolicy`]; [`Agent`] is the tagged union and
//! [`AgentConfig`] builds one from explicit hyperparameters.
//!
//! **Goals:**
//! - **Deterministic by default**: every random draw comes from a seeded
//!   `StdRng`, so same seed + same inputs → same choices.
//! - **Explicit failures**: dimension mismatches, empty arm sets, non-finite
//!   inputs and numerical singularity are [`BanditError`] values, never panics
//!   or silent broadcasting.
//! - **Small d**: dense `d × d` algebra per update. [`InverseUpdate`] switches
//!   between full re-inversion and Sherman–Morrison rank-one updates.
//!
//! **Non-goals:**
//! - No persistence, no concurrency inside a policy, no hyperparameter search.
//! - Linear reward models only.
//! - No evaluation harness; see `demos/regret_curve.rs` for a minimal one.
//!
//! # Example
//!
//! ```rust
//! use bdt::{Contexts, LinUcb};
//!
//! let contexts = Contexts::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
//! let rewards = [5.0, 1.0];
//! let mut policy = LinUcb::with_params(0.0, 2).unwrap();
//! for _ in 0..50 {
//!     let arm = policy.choose(&contexts).unwrap();
//!     policy.update(contexts.row(arm), rewards[arm]).unwrap();
//! }
//! assert_eq!(policy.choose(&contexts).unwrap(), 0);
//! ```
//!
//! # Logging
//!
//! Policies emit `tracing` events (`debug` on construction and update,
//! `trace` per decision, `warn` before returning a numerical error). The
//! crate never installs a subscriber.

#![forbid(unsafe_code)]

mod error;
pub use error::BanditError;

mod context;
pub use context::Contexts;

mod linalg;
pub use linalg::InverseUpdate;

mod ridge;

mod decision;
pub use decision::*;

mod thompson;
pub use thompson::*;

mod linucb;
pub use linucb::*;

mod epsilon;
pub use epsilon::*;

mod random;
pub use random::*;

mod bootstrap;
pub use bootstrap::*;

mod policy;
pub use policy::BanditPolicy;

mod agent;
pub use agent::*;
