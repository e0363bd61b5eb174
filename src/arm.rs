//! One bandit arm: sufficient statistics for a Bernoulli reward process.
//!
//! The posterior over the arm's success probability under a uniform
//! `Beta(1, 1)` prior is `Beta(1 + successes, 1 + trials - successes)`.

use crate::sampler::{check_shapes, BetaSampler};
use crate::{ArmStats, Error, Result};

/// Prior alpha (uniform prior).
pub const PRIOR_ALPHA: f64 = 1.0;
/// Prior beta (uniform prior).
pub const PRIOR_BETA: f64 = 1.0;

/// Trial count and cumulative reward for one option.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Arm {
    trials: u64,
    successes: f64,
}

impl Arm {
    /// An arm with no observations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stats(stats: ArmStats) -> Self {
        Self {
            trials: stats.trials,
            successes: stats.successes,
        }
    }

    /// Current statistics, exactly as accumulated.
    pub fn stats(&self) -> ArmStats {
        ArmStats {
            trials: self.trials,
            successes: self.successes,
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn successes(&self) -> f64 {
        self.successes
    }

    pub fn failures(&self) -> f64 {
        self.trials as f64 - self.successes
    }

    /// Record one trial with reward `value` (normally `0.0` or `1.0`).
    pub fn reward(&mut self, value: f64) {
        self.trials = self.trials.saturating_add(1);
        self.successes += value;
    }

    /// Record `n` trials whose rewards sum to `total`.
    pub fn reward_multiple(&mut self, n: u64, total: f64) {
        self.trials = self.trials.saturating_add(n);
        self.successes += total;
    }

    /// Observed success ratio `successes / trials`.
    ///
    /// `arm` is only used to label the error.
    pub(crate) fn success_rate_of(&self, arm: usize) -> Result<f64> {
        if self.trials == 0 {
            return Err(Error::DivisionByZero { arm });
        }
        Ok(self.successes / self.trials as f64)
    }

    /// Observed success ratio `successes / trials`.
    ///
    /// A standalone arm has no index, so the zero-trial error names arm 0.
    pub fn success_rate(&self) -> Result<f64> {
        self.success_rate_of(0)
    }

    /// Posterior shape parameters `(alpha, beta)`.
    ///
    /// Fails with [`Error::InvalidParameter`] when `successes` lies outside
    /// `[0, trials]`.
    pub fn posterior(&self) -> Result<(f64, f64)> {
        let s = self.successes;
        if !s.is_finite() || s < 0.0 || s > self.trials as f64 {
            return Err(Error::InvalidParameter(format!(
                "successes={s} outside [0, trials={}]",
                self.trials
            )));
        }
        let alpha = PRIOR_ALPHA + s;
        let beta = PRIOR_BETA + self.trials as f64 - s;
        check_shapes(alpha, beta)?;
        Ok((alpha, beta))
    }

    /// Posterior mean `alpha / (alpha + beta)`.
    pub fn posterior_mean(&self) -> Result<f64> {
        let (a, b) = self.posterior()?;
        Ok(a / (a + b))
    }

    /// Draw one sample of the success probability from the posterior.
    pub fn sample<S: BetaSampler + ?Sized>(&self, sampler: &mut S) -> Result<f64> {
        let (alpha, beta) = self.posterior()?;
        sampler.sample_beta(alpha, beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandBeta;
    use proptest::prelude::*;

    /// Returns the posterior mean instead of a random draw.
    struct MeanSampler;

    impl BetaSampler for MeanSampler {
        fn sample_beta(&mut self, alpha: f64, beta: f64) -> Result<f64> {
            check_shapes(alpha, beta)?;
            Ok(alpha / (alpha + beta))
        }
    }

    #[test]
    fn empty_arm_has_uniform_posterior() {
        let arm = Arm::new();
        assert_eq!(arm.posterior().unwrap(), (1.0, 1.0));
        assert_eq!(arm.sample(&mut MeanSampler).unwrap(), 0.5);
    }

    #[test]
    fn posterior_counts_successes_and_failures() {
        let arm = Arm::from_stats(ArmStats::new(10, 7.0));
        assert_eq!(arm.posterior().unwrap(), (8.0, 4.0));
        assert!((arm.posterior_mean().unwrap() - 8.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn reward_then_reward_multiple_accumulates() {
        let mut arm = Arm::new();
        arm.reward(1.0);
        arm.reward_multiple(9, 4.0);
        assert_eq!(arm.trials(), 10);
        assert_eq!(arm.successes(), 5.0);
        assert_eq!(arm.failures(), 5.0);
    }

    #[test]
    fn success_rate_requires_trials() {
        assert_eq!(
            Arm::new().success_rate(),
            Err(Error::DivisionByZero { arm: 0 })
        );
        let arm = Arm::from_stats(ArmStats::new(4, 1.0));
        assert_eq!(arm.success_rate().unwrap(), 0.25);
    }

    #[test]
    fn sampling_fails_once_successes_exceed_trials() {
        let mut arm = Arm::new();
        arm.reward(2.0);
        assert!(matches!(
            arm.sample(&mut RandBeta::default()),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn sampling_fails_on_negative_successes() {
        let mut arm = Arm::new();
        arm.reward(-1.0);
        assert!(matches!(arm.posterior(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn stats_round_trip() {
        let stats = ArmStats::new(5, 2.0);
        assert_eq!(Arm::from_stats(stats).stats(), stats);
    }

    proptest! {
        #[test]
        fn accounting_is_plain_accumulation(
            v in 0.0f64..=1.0,
            n in 0u64..10_000,
            t_frac in 0.0f64..=1.0,
        ) {
            let t = t_frac * n as f64;
            let mut arm = Arm::new();
            arm.reward(v);
            arm.reward_multiple(n, t);
            prop_assert_eq!(arm.trials(), 1 + n);
            prop_assert_eq!(arm.successes(), v + t);
        }

        #[test]
        fn samples_stay_in_unit_interval(
            trials in 0u64..5_000,
            frac in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let arm = Arm::from_stats(ArmStats::new(trials, (trials as f64 * frac).floor()));
            let mut s = RandBeta::with_seed(seed);
            let x = arm.sample(&mut s).unwrap();
            prop_assert!((0.0..=1.0).contains(&x));
        }
    }
}
