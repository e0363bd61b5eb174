//! Thompson-sampling bandit over an index-stable set of Bernoulli arms.
//!
//! Notes:
//! - Arm indices are the arms' external names. Arms are never reordered or
//!   removed; [`Bandit::check_convergence`] only *reports* arms to drop.
//! - Default construction uses a fixed seed (deterministic by default).
//! - All methods take `&mut self` when they mutate or draw samples, so a
//!   single owner serializes access. Share across threads behind a lock.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::fisher::{BigBinomial, ContingencyTable, ExactBinomial};
use crate::sampler::{BetaSampler, RandBeta};
use crate::{Arm, BanditConfig, Error, Result};

/// Result of one Thompson draw, with every per-arm sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Index of the arm with the highest sample.
    pub chosen: usize,
    /// One posterior sample per arm, in index order.
    pub samples: Vec<f64>,
}

/// One arm's comparison against the best arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub arm: usize,
    pub table: ContingencyTable,
    pub p_value: f64,
    pub dropped: bool,
}

/// Full record of a convergence check.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceReport {
    /// Significance level used.
    pub alpha: f64,
    /// Arm with the highest observed success ratio, if any arm has trials.
    pub best: Option<usize>,
    /// Arms with zero trials; they have no success ratio and are not compared.
    pub untried: Vec<usize>,
    /// One entry per compared arm, in index order.
    pub comparisons: Vec<Comparison>,
}

impl ConvergenceReport {
    /// Indices of arms significantly worse than the best arm.
    pub fn drop_set(&self) -> BTreeSet<usize> {
        self.comparisons
            .iter()
            .filter(|c| c.dropped)
            .map(|c| c.arm)
            .collect()
    }
}

/// Convert an accumulated reward to a whole count for the exact test.
fn whole_count(x: f64, arm: usize, what: &str) -> Result<u64> {
    if !x.is_finite() || x < 0.0 || x.fract() != 0.0 || x > u64::MAX as f64 {
        return Err(Error::InvalidParameter(format!(
            "arm {arm}: {what}={x} is not a whole non-negative count"
        )));
    }
    Ok(x as u64)
}

/// Bernoulli bandit with Thompson-sampling selection.
#[derive(Debug, Clone)]
pub struct Bandit<S = RandBeta, B = BigBinomial> {
    arms: Vec<Arm>,
    sampler: S,
    binomial: B,
}

impl Bandit {
    /// Create a bandit with a deterministic fixed seed (0).
    pub fn new(config: impl Into<BanditConfig>) -> Result<Self> {
        Self::with_seed(config, 0)
    }

    /// Create a bandit with a fixed seed (reproducible).
    pub fn with_seed(config: impl Into<BanditConfig>, seed: u64) -> Result<Self> {
        Self::with_parts(config, RandBeta::with_seed(seed), BigBinomial)
    }
}

impl<S: BetaSampler, B: ExactBinomial> Bandit<S, B> {
    /// Create a bandit with caller-supplied sampling and combinatorics.
    pub fn with_parts(config: impl Into<BanditConfig>, sampler: S, binomial: B) -> Result<Self> {
        let arms = config
            .into()
            .into_stats()?
            .into_iter()
            .map(Arm::from_stats)
            .collect::<Vec<_>>();
        debug!(arms = arms.len(), "bandit created");
        Ok(Self {
            arms,
            sampler,
            binomial,
        })
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// All arms in index order.
    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn arm(&self, index: usize) -> Result<&Arm> {
        let len = self.arms.len();
        self.arms
            .get(index)
            .ok_or(Error::ArmIndexOutOfRange { index, len })
    }

    pub fn arm_mut(&mut self, index: usize) -> Result<&mut Arm> {
        let len = self.arms.len();
        self.arms
            .get_mut(index)
            .ok_or(Error::ArmIndexOutOfRange { index, len })
    }

    /// Record one trial with reward `value` on arm `index`.
    pub fn reward(&mut self, index: usize, value: f64) -> Result<()> {
        self.arm_mut(index)?.reward(value);
        Ok(())
    }

    /// Record `n` trials totalling `total` reward on arm `index`.
    pub fn reward_multiple(&mut self, index: usize, n: u64, total: f64) -> Result<()> {
        self.arm_mut(index)?.reward_multiple(n, total);
        Ok(())
    }

    /// Sample every arm's posterior and report the argmax.
    ///
    /// Tie-break: lowest index.
    pub fn select_arm_explain(&mut self) -> Result<Selection> {
        if self.arms.is_empty() {
            return Err(Error::NoArmsAvailable);
        }
        let mut samples = Vec::with_capacity(self.arms.len());
        let mut chosen = 0;
        let mut best = f64::NEG_INFINITY;
        for (i, arm) in self.arms.iter().enumerate() {
            let x = arm.sample(&mut self.sampler)?;
            if x > best {
                best = x;
                chosen = i;
            }
            samples.push(x);
        }
        debug!(chosen, sample = best, "selected arm");
        Ok(Selection { chosen, samples })
    }

    /// Select an arm by Thompson sampling.
    pub fn select_arm(&mut self) -> Result<usize> {
        self.select_arm_explain().map(|s| s.chosen)
    }

    /// Compare every arm against the best one and report each test.
    ///
    /// Policy:
    /// - One arm (or none): nothing to compare.
    /// - Arms with zero trials are listed in `untried` and skipped.
    /// - Best arm: strictly highest `successes / trials`, lowest index on ties.
    /// - Every other arm is tested on `[[s_best, s_i], [f_best, f_i]]` and
    ///   dropped when the p-value is `<= alpha`.
    pub fn check_convergence_explain(&self, alpha: f64) -> Result<ConvergenceReport> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(Error::InvalidParameter(format!(
                "significance level must lie in [0, 1], got {alpha}"
            )));
        }
        let mut report = ConvergenceReport {
            alpha,
            ..ConvergenceReport::default()
        };
        if self.arms.len() <= 1 {
            return Ok(report);
        }

        let mut rates: Vec<Option<f64>> = Vec::with_capacity(self.arms.len());
        for (i, arm) in self.arms.iter().enumerate() {
            match arm.success_rate_of(i) {
                Ok(r) => rates.push(Some(r)),
                Err(Error::DivisionByZero { arm }) => {
                    warn!(arm, "arm has no trials; excluded from convergence check");
                    report.untried.push(arm);
                    rates.push(None);
                }
                Err(e) => return Err(e),
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, r) in rates.iter().enumerate() {
            if let Some(r) = *r {
                if best.map_or(true, |(_, b)| r > b) {
                    best = Some((i, r));
                }
            }
        }
        let Some((best_idx, _)) = best else {
            return Ok(report);
        };
        report.best = Some(best_idx);

        let best_arm = &self.arms[best_idx];
        let s_best = whole_count(best_arm.successes(), best_idx, "successes")?;
        let f_best = whole_count(best_arm.failures(), best_idx, "failures")?;

        for (i, arm) in self.arms.iter().enumerate() {
            if i == best_idx || rates[i].is_none() {
                continue;
            }
            let table = ContingencyTable::new(
                s_best,
                whole_count(arm.successes(), i, "successes")?,
                f_best,
                whole_count(arm.failures(), i, "failures")?,
            );
            let p_value = table.fisher_exact_with(&self.binomial)?;
            let dropped = p_value <= alpha;
            debug!(arm = i, best = best_idx, p_value, dropped, "fisher comparison");
            report.comparisons.push(Comparison {
                arm: i,
                table,
                p_value,
                dropped,
            });
        }

        let dropped = report.drop_set();
        if !dropped.is_empty() {
            info!(best = best_idx, alpha, ?dropped, "arms significantly worse than best");
        }
        Ok(report)
    }

    /// Indices of arms significantly worse than the best arm at level `alpha`.
    pub fn check_convergence(&self, alpha: f64) -> Result<BTreeSet<usize>> {
        self.check_convergence_explain(alpha).map(|r| r.drop_set())
    }
}
