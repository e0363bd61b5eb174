//! Error type shared by every bandit operation.
//!
//! All variants describe a precondition violated by caller-supplied data.
//! None of them are retryable.

use thiserror::Error;

/// Errors surfaced by arms, the bandit, and the exact test.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Construction input is missing or inconsistent.
    #[error("invalid bandit configuration: {0}")]
    InvalidConfiguration(String),

    /// `select_arm` was called on a bandit with zero arms.
    #[error("no arms available to select from")]
    NoArmsAvailable,

    /// A statistical parameter is outside its domain (posterior shapes,
    /// significance level, non-integral counts).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A success ratio was requested for an arm with zero trials.
    #[error("success ratio undefined for arm {arm}: zero trials")]
    DivisionByZero { arm: usize },

    /// The contingency table is not 2x2.
    #[error("contingency table must be 2x2, got {successes} success and {failures} failure columns")]
    InvalidShape { successes: usize, failures: usize },

    /// A computed probability fell outside `[0, 1]`, or an exact computation
    /// could not be carried out.
    #[error("numeric error: {0}")]
    NumericError(String),

    /// An arm index does not name an arm of this bandit.
    #[error("arm index {index} out of range for {len} arms")]
    ArmIndexOutOfRange { index: usize, len: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = Error::InvalidShape {
            successes: 3,
            failures: 2,
        };
        assert_eq!(
            e.to_string(),
            "contingency table must be 2x2, got 3 success and 2 failure columns"
        );
        let e = Error::ArmIndexOutOfRange { index: 4, len: 2 };
        assert!(e.to_string().contains("4"));
        assert!(e.to_string().contains("2 arms"));
    }
}
