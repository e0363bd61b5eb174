//! `thompson-bandit`: a Bernoulli multi-armed bandit with Thompson-sampling
//! selection and a Fisher-exact stopping rule.
//!
//! You have a small set of arms (page variants, model versions, endpoints,
//! anything you choose between repeatedly) and a binary success signal per
//! trial. Each [`Arm`] keeps `(trials, successes)`; its posterior success
//! probability under a uniform prior is
//! `Beta(1 + successes, 1 + trials - successes)`.
//!
//! **Selection:** [`Bandit::select_arm`] draws one posterior sample per arm
//! and returns the index of the largest (lowest index on ties). Arms with
//! little evidence occasionally sample high, so exploration needs no
//! parameter.
//!
//! **Stopping rule:** [`Bandit::check_convergence`] finds the arm with the
//! highest observed success ratio and runs [`fisher_exact`] against every
//! other arm. Arms whose p-value is `<= alpha` are returned as the drop set.
//! Nothing is removed; indices stay stable.
//!
//! **Seams:** random variates come from a [`BetaSampler`] (default
//! [`RandBeta`], seedable) and binomial coefficients from an
//! [`ExactBinomial`] (default [`BigBinomial`], arbitrary precision). Both can
//! be replaced with deterministic fakes via [`Bandit::with_parts`].
//!
//! ```rust
//! use thompson_bandit::{ArmStats, Bandit, BanditConfig};
//!
//! let mut bandit = Bandit::with_seed(BanditConfig::EmptyCount(2), 7).unwrap();
//! let arm = bandit.select_arm().unwrap();
//! bandit.reward(arm, 1.0).unwrap();
//!
//! let done = Bandit::new(BanditConfig::FromStats(vec![
//!     ArmStats::new(1000, 900.0),
//!     ArmStats::new(1000, 100.0),
//! ]))
//! .unwrap();
//! assert!(done.check_convergence(0.01).unwrap().contains(&1));
//! ```
//!
//! **Non-goals:**
//! - Not an experimentation platform (no storage, dashboards, serving).
//! - One binary reward per arm; no contextual or multi-metric variants.

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod config;
pub use config::*;

mod sampler;
pub use sampler::*;

mod arm;
pub use arm::*;

mod fisher;
pub use fisher::*;

mod bandit;
pub use bandit::*;
