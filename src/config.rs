//! Construction input for a [`Bandit`](crate::Bandit).
//!
//! A bandit is built either from explicit per-arm statistics or from a count
//! of empty arms. The two forms are a tagged union so there is never a
//! question of which one wins.

use crate::{Error, Result};

/// Sufficient statistics for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStats {
    /// Number of times the arm was played.
    pub trials: u64,
    /// Cumulative reward observed on the arm.
    pub successes: f64,
}

impl ArmStats {
    pub fn new(trials: u64, successes: f64) -> Self {
        Self { trials, successes }
    }

    /// Observed failures (`trials - successes`).
    pub fn failures(&self) -> f64 {
        self.trials as f64 - self.successes
    }

    /// Check `0 <= successes <= trials`.
    pub fn validate(&self) -> Result<()> {
        let s = self.successes;
        if !s.is_finite() || s < 0.0 || s > self.trials as f64 {
            return Err(Error::InvalidConfiguration(format!(
                "successes must lie in [0, trials], got successes={s} trials={}",
                self.trials
            )));
        }
        Ok(())
    }
}

/// How to initialize a bandit's arms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BanditConfig {
    /// One arm per entry, in order.
    FromStats(Vec<ArmStats>),
    /// `n` arms with no observations.
    EmptyCount(usize),
}

impl BanditConfig {
    /// Resolve the loose two-option form once.
    ///
    /// `arms` takes precedence over `number_of_arms` when both are given.
    /// Supplying neither is an error.
    pub fn from_options(
        arms: Option<Vec<ArmStats>>,
        number_of_arms: Option<usize>,
    ) -> Result<Self> {
        match (arms, number_of_arms) {
            (Some(stats), _) => Ok(Self::FromStats(stats)),
            (None, Some(n)) => Ok(Self::EmptyCount(n)),
            (None, None) => Err(Error::InvalidConfiguration(
                "either initial arm statistics or a number of arms is required".to_string(),
            )),
        }
    }

    /// Number of arms this config produces.
    pub fn len(&self) -> usize {
        match self {
            Self::FromStats(stats) => stats.len(),
            Self::EmptyCount(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate and expand into per-arm statistics.
    pub(crate) fn into_stats(self) -> Result<Vec<ArmStats>> {
        match self {
            Self::FromStats(stats) => {
                for (i, s) in stats.iter().enumerate() {
                    s.validate().map_err(|e| match e {
                        Error::InvalidConfiguration(msg) => {
                            Error::InvalidConfiguration(format!("arm {i}: {msg}"))
                        }
                        other => other,
                    })?;
                }
                Ok(stats)
            }
            Self::EmptyCount(n) => Ok(vec![ArmStats::default(); n]),
        }
    }
}

impl From<Vec<ArmStats>> for BanditConfig {
    fn from(stats: Vec<ArmStats>) -> Self {
        Self::FromStats(stats)
    }
}

impl From<usize> for BanditConfig {
    fn from(n: usize) -> Self {
        Self::EmptyCount(n)
    }
}
