//! Beta random-variate source.
//!
//! The bandit never draws random numbers itself: it asks a [`BetaSampler`]
//! for one `Beta(alpha, beta)` draw per arm. The default implementation,
//! [`RandBeta`], is seedable so selection can be reproduced in tests.
//! Tests can substitute a deterministic fake.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution};

use crate::{Error, Result};

/// A source of `Beta(alpha, beta)` samples.
pub trait BetaSampler {
    /// Draw one sample in `[0, 1]`.
    ///
    /// Implementations must fail with [`Error::InvalidParameter`] when either
    /// shape is not finite and strictly positive.
    fn sample_beta(&mut self, alpha: f64, beta: f64) -> Result<f64>;
}

impl<S: BetaSampler + ?Sized> BetaSampler for &mut S {
    fn sample_beta(&mut self, alpha: f64, beta: f64) -> Result<f64> {
        (**self).sample_beta(alpha, beta)
    }
}

/// Check that `(alpha, beta)` are valid Beta shape parameters.
pub(crate) fn check_shapes(alpha: f64, beta: f64) -> Result<()> {
    if !(alpha.is_finite() && alpha > 0.0) || !(beta.is_finite() && beta > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "beta shapes must be finite and > 0, got alpha={alpha} beta={beta}"
        )));
    }
    Ok(())
}

/// Seedable Beta sampler backed by `rand_distr::Beta`.
#[derive(Debug, Clone)]
pub struct RandBeta {
    rng: StdRng,
}

impl RandBeta {
    /// Sampler with a fixed seed (reproducible).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandBeta {
    /// Deterministic by default: seed 0.
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl BetaSampler for RandBeta {
    fn sample_beta(&mut self, alpha: f64, beta: f64) -> Result<f64> {
        check_shapes(alpha, beta)?;
        let dist = Beta::new(alpha, beta)
            .map_err(|e| Error::InvalidParameter(format!("beta({alpha}, {beta}): {e}")))?;
        let x = dist.sample(&mut self.rng);
        if !(0.0..=1.0).contains(&x) {
            return Err(Error::NumericError(format!(
                "beta({alpha}, {beta}) produced {x}, outside [0, 1]"
            )));
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut s1 = RandBeta::with_seed(42);
        let mut s2 = RandBeta::with_seed(42);
        for _ in 0..16 {
            assert_eq!(
                s1.sample_beta(3.0, 7.0).unwrap(),
                s2.sample_beta(3.0, 7.0).unwrap()
            );
        }
    }

    #[test]
    fn rejects_non_positive_shapes() {
        let mut s = RandBeta::default();
        for (a, b) in [(0.0, 1.0), (1.0, 0.0), (-1.0, 2.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            assert!(
                matches!(s.sample_beta(a, b), Err(Error::InvalidParameter(_))),
                "alpha={a} beta={b}"
            );
        }
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut s = RandBeta::with_seed(7);
        for &(a, b) in &[(1.0, 1.0), (0.5, 0.5), (1001.0, 1.0), (1.0, 1001.0)] {
            for _ in 0..200 {
                let x = s.sample_beta(a, b).unwrap();
                assert!((0.0..=1.0).contains(&x), "x={x}");
            }
        }
    }

    #[test]
    fn mutable_reference_is_a_sampler() {
        fn draw<S: BetaSampler>(mut s: S) -> f64 {
            s.sample_beta(2.0, 2.0).unwrap()
        }
        let mut s = RandBeta::with_seed(1);
        let x = draw(&mut s);
        assert!((0.0..=1.0).contains(&x));
    }
}
