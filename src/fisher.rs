//! Fisher's exact test on a 2x2 contingency table.
//!
//! For the table
//!
//! ```text
//!   [[a, b],
//!    [c, d]]
//! ```
//!
//! the statistic is the hypergeometric point probability
//!
//! ```text
//!   p = C(a+b, a) * C(c+d, c) / C(n, a+c),   n = a + b + c + d
//! ```
//!
//! Binomial coefficients are computed exactly on big integers and the ratio
//! is kept as an exact rational. Only the final value is rounded to `f64`,
//! so counts in the tens of thousands keep full precision.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use crate::{Error, Result};

/// Exact binomial coefficients.
pub trait ExactBinomial {
    /// `C(n, k)`. Fails with [`Error::NumericError`] when `k > n`.
    fn binomial(&self, n: u64, k: u64) -> Result<BigUint>;
}

impl<B: ExactBinomial + ?Sized> ExactBinomial for &B {
    fn binomial(&self, n: u64, k: u64) -> Result<BigUint> {
        (**self).binomial(n, k)
    }
}

/// Multiplicative-formula binomial on [`BigUint`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BigBinomial;

impl ExactBinomial for BigBinomial {
    fn binomial(&self, n: u64, k: u64) -> Result<BigUint> {
        if k > n {
            return Err(Error::NumericError(format!("C({n}, {k}) with k > n")));
        }
        let k = k.min(n - k);
        let mut acc = BigUint::one();
        for i in 0..k {
            // acc * (n - i) is always divisible by (i + 1) at this step.
            acc *= n - i;
            acc /= i + 1;
        }
        Ok(acc)
    }
}

/// A 2x2 table of success and failure counts for two arms.
///
/// Column 0 is the reference arm, column 1 the arm compared against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContingencyTable {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub d: u64,
}

impl ContingencyTable {
    pub fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { a, b, c, d }
    }

    /// Build from a success row and a failure row; both must have length 2.
    pub fn from_rows(successes: &[u64], failures: &[u64]) -> Result<Self> {
        match (successes, failures) {
            (&[a, b], &[c, d]) => Ok(Self { a, b, c, d }),
            _ => Err(Error::InvalidShape {
                successes: successes.len(),
                failures: failures.len(),
            }),
        }
    }

    /// Total count `a + b + c + d`.
    pub fn total(&self) -> Result<u64> {
        self.a
            .checked_add(self.b)
            .and_then(|x| x.checked_add(self.c))
            .and_then(|x| x.checked_add(self.d))
            .ok_or_else(|| Error::NumericError(format!("table total overflows u64: {self:?}")))
    }

    /// The exact point probability as a rational (not reduced).
    pub fn point_probability_exact<B: ExactBinomial + ?Sized>(
        &self,
        binomial: &B,
    ) -> Result<BigRational> {
        let n = self.total()?;
        let row0 = binomial.binomial(self.a + self.b, self.a)?;
        let row1 = binomial.binomial(self.c + self.d, self.c)?;
        let denom = binomial.binomial(n, self.a + self.c)?;
        if denom.is_zero() {
            return Err(Error::NumericError(format!(
                "C({n}, {}) evaluated to zero",
                self.a + self.c
            )));
        }
        // Unreduced; comparison and f64 rounding do not need lowest terms.
        Ok(BigRational::new_raw(
            BigInt::from(row0 * row1),
            BigInt::from(denom),
        ))
    }

    /// The point probability rounded to `f64`.
    pub fn fisher_exact_with<B: ExactBinomial + ?Sized>(&self, binomial: &B) -> Result<f64> {
        let exact = self.point_probability_exact(binomial)?;
        if exact > BigRational::one() {
            return Err(Error::NumericError(format!(
                "exact probability {exact} exceeds 1 for {self:?}"
            )));
        }
        let p = exact.to_f64().ok_or_else(|| {
            Error::NumericError(format!("probability for {self:?} not representable as f64"))
        })?;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::NumericError(format!(
                "probability {p} outside [0, 1] for {self:?}"
            )));
        }
        Ok(p)
    }

    /// The point probability using [`BigBinomial`].
    pub fn fisher_exact(&self) -> Result<f64> {
        self.fisher_exact_with(&BigBinomial)
    }
}

/// Fisher's exact test for `[[successes[0], successes[1]], [failures[0], failures[1]]]`.
///
/// Fails with [`Error::InvalidShape`] unless both rows have exactly two entries.
pub fn fisher_exact(successes: &[u64], failures: &[u64]) -> Result<f64> {
    ContingencyTable::from_rows(successes, failures)?.fisher_exact()
}

/// [`fisher_exact`] with a caller-supplied binomial implementation.
pub fn fisher_exact_with<B: ExactBinomial + ?Sized>(
    successes: &[u64],
    failures: &[u64],
    binomial: &B,
) -> Result<f64> {
    ContingencyTable::from_rows(successes, failures)?.fisher_exact_with(binomial)
}
