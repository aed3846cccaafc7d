//! Error taxonomy shared by every policy.
//!
//! All failures are surfaced immediately to the caller; no policy retries or
//! recovers internally. A failed `update` leaves the policy state untouched.

/// Errors returned by policy construction, selection, and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BanditError {
    /// Context width (or update vector length) differs from the policy dimension.
    #[error("dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A context matrix with zero arms.
    #[error("context matrix has no arms")]
    EmptyArms,

    /// A context matrix with zero-width rows.
    #[error("context rows have no features")]
    EmptyFeatures,

    /// Rows of a context matrix with differing lengths.
    #[error("ragged context matrix: row {row} has {got} features, expected {expected}")]
    RaggedContexts {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// NaN or infinite value in a context or reward.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// The accumulated design / precision matrix could not be factorized.
    #[error("design matrix is numerically singular")]
    Singular,

    /// An arm index outside the current candidate set.
    #[error("arm index {arm} out of range for {narm} arms")]
    ArmOutOfRange { arm: usize, narm: usize },

    /// A policy with a fixed arm count received a different number of arms.
    #[error("arm count mismatch: policy tracks {expected} arms, got {got}")]
    ArmCountMismatch { expected: usize, got: usize },

    /// A hyperparameter failed validation.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Check that a hyperparameter is finite and satisfies `ok`.
pub(crate) fn check_param(
    name: &'static str,
    value: f64,
    ok: impl FnOnce(f64) -> bool,
) -> Result<f64, BanditError> {
    if value.is_finite() && ok(value) {
        Ok(value)
    } else {
        Err(BanditError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_param_rejects_nan_and_predicate_failures() {
        assert_eq!(check_param("alpha", 0.5, |v| v >= 0.0), Ok(0.5));
        assert!(check_param("alpha", f64::NAN, |v| v >= 0.0).is_err());
        assert_eq!(
            check_param("nu", 0.0, |v| v > 0.0),
            Err(BanditError::InvalidParameter {
                name: "nu",
                value: 0.0
            })
        );
    }

    #[test]
    fn messages_name_the_offending_values() {
        let e = BanditError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch: expected 3 features, got 2"
        );
        let e = BanditError::ArmOutOfRange { arm: 4, narm: 2 };
        assert_eq!(e.to_string(), "arm index 4 out of range for 2 arms");
    }
}
