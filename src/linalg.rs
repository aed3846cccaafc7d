//! Small dense linear-algebra and sampling helpers.
//!
//! Matrices here are always symmetric positive-definite by construction
//! (identity plus a sum of outer products), so Cholesky is the factorization
//! of choice for both inversion and Gaussian sampling.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::BanditError;

/// Relative epsilon used for floating-point tie-breaking in argmax.
pub(crate) const TIEBREAK_EPS: f64 = 1e-12;

/// Strategy for refreshing the stored inverse after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InverseUpdate {
    /// Re-invert the accumulated matrix from scratch (O(d³)).
    #[default]
    Full,
    /// Rank-one Sherman–Morrison update of the stored inverse (O(d²)).
    ShermanMorrison,
}

fn all_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}

/// `(m + mᵗ) / 2`, to wash out round-off asymmetry.
pub(crate) fn symmetrize(m: &DMatrix<f64>) -> DMatrix<f64> {
    (m + m.transpose()) * 0.5
}

/// Invert an SPD matrix via Cholesky.
pub(crate) fn invert_spd(m: &DMatrix<f64>) -> Result<DMatrix<f64>, BanditError> {
    if !all_finite(m) {
        return Err(BanditError::Singular);
    }
    let chol = m.clone().cholesky().ok_or(BanditError::Singular)?;
    let inv = chol.inverse();
    if all_finite(&inv) {
        Ok(symmetrize(&inv))
    } else {
        Err(BanditError::Singular)
    }
}

/// Sherman–Morrison: inverse of `A + x xᵗ` given `A⁻¹`.
///
/// `A⁻¹ - (A⁻¹x)(A⁻¹x)ᵗ / (1 + xᵗA⁻¹x)`; relies on `A⁻¹` being symmetric.
pub(crate) fn sherman_morrison(
    a_inv: &DMatrix<f64>,
    x: &DVector<f64>,
) -> Result<DMatrix<f64>, BanditError> {
    let ax = a_inv * x;
    let denom = 1.0 + x.dot(&ax);
    if !denom.is_finite() || denom <= TIEBREAK_EPS {
        return Err(BanditError::Singular);
    }
    let mut out = a_inv.clone();
    out.ger(-1.0 / denom, &ax, &ax, 1.0);
    if all_finite(&out) {
        Ok(symmetrize(&out))
    } else {
        Err(BanditError::Singular)
    }
}

/// Quadratic form `xᵗ M x`, clamped at zero against round-off.
pub(crate) fn quad_form(m: &DMatrix<f64>, x: &DVector<f64>) -> f64 {
    x.dot(&(m * x)).max(0.0)
}

/// Draw from `N(mean, scale² · cov)` using the Cholesky factor of `cov`.
pub(crate) fn sample_mvn<R: Rng + ?Sized>(
    rng: &mut R,
    mean: &DVector<f64>,
    cov: &DMatrix<f64>,
    scale: f64,
) -> Result<DVector<f64>, BanditError> {
    let chol = symmetrize(cov).cholesky().ok_or(BanditError::Singular)?;
    let z: DVector<f64> = DVector::from_fn(mean.len(), |_, _| StandardNormal.sample(rng));
    Ok(mean + chol.l() * z * scale)
}

/// Index of the maximum score; the first index wins ties.
///
/// Two scores tie when they agree to within `TIEBREAK_EPS` relative to the
/// larger magnitude, so the comparison is independent of the reward scale.
pub(crate) fn argmax_first(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b + TIEBREAK_EPS * b.abs().max(s.abs()) => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spd_from(rows: &[Vec<f64>], d: usize) -> DMatrix<f64> {
        let mut a = DMatrix::identity(d, d);
        for r in rows {
            let x = DVector::from_column_slice(r.as_slice());
            a.ger(1.0, &x, &x, 1.0);
        }
        a
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax_first(&[]), None);
        assert_eq!(argmax_first(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax_first(&[2.0, 2.0, 2.0]), Some(0));
        assert_eq!(argmax_first(&[-5.0, -1.0, -3.0]), Some(1));
    }

    #[test]
    fn argmax_resolves_tiny_and_huge_scores() {
        assert_eq!(argmax_first(&[1e-13, 5e-13]), Some(1));
        assert_eq!(argmax_first(&[-3e-20, -1e-20, -2e-20]), Some(1));
        assert_eq!(argmax_first(&[1e12, 1e12 + 1e3]), Some(1));
        // Round-off sized differences still count as ties.
        assert_eq!(argmax_first(&[0.3, 0.1 + 0.2]), Some(0));
    }

    #[test]
    fn invert_identity_is_identity() {
        let i = DMatrix::<f64>::identity(3, 3);
        assert_eq!(invert_spd(&i).unwrap(), i);
    }

    #[test]
    fn invert_rejects_indefinite_and_nan() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert_eq!(invert_spd(&m), Err(BanditError::Singular));
        let m = DMatrix::from_row_slice(1, 1, &[f64::NAN]);
        assert_eq!(invert_spd(&m), Err(BanditError::Singular));
    }

    #[test]
    fn mvn_with_zero_scale_returns_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        let mean = DVector::from_column_slice(&[1.0, -2.0]);
        let cov = DMatrix::identity(2, 2);
        let s = sample_mvn(&mut rng, &mean, &cov, 0.0).unwrap();
        assert_eq!(s, mean);
    }

    #[test]
    fn mvn_sample_mean_approaches_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let mean = DVector::from_column_slice(&[3.0, -1.0]);
        let cov = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
        let n = 4_000;
        let mut acc = DVector::<f64>::zeros(2);
        for _ in 0..n {
            acc += sample_mvn(&mut rng, &mean, &cov, 1.0).unwrap();
        }
        acc /= n as f64;
        assert!((acc[0] - 3.0).abs() < 0.1, "acc={acc}");
        assert!((acc[1] + 1.0).abs() < 0.1, "acc={acc}");
    }

    proptest! {
        #[test]
        fn sherman_morrison_matches_full_inverse(
            d in 1usize..6,
            rows in proptest::collection::vec(
                proptest::collection::vec(-3.0f64..3.0, 6),
                0..20,
            ),
        ) {
            let rows: Vec<Vec<f64>> = rows.into_iter().map(|r| r[..d].to_vec()).collect();
            let mut inc = DMatrix::identity(d, d);
            for r in &rows {
                inc = sherman_morrison(&inc, &DVector::from_column_slice(r.as_slice())).unwrap();
            }
            let full = invert_spd(&spd_from(&rows, d)).unwrap();
            for (a, b) in inc.iter().zip(full.iter()) {
                prop_assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
            }
        }

        #[test]
        fn quad_form_is_non_negative(
            d in 1usize..6,
            rows in proptest::collection::vec(
                proptest::collection::vec(-100.0f64..100.0, 6),
                0..30,
            ),
            x in proptest::collection::vec(-100.0f64..100.0, 6),
        ) {
            let rows: Vec<Vec<f64>> = rows.into_iter().map(|r| r[..d].to_vec()).collect();
            let inv = invert_spd(&spd_from(&rows, d)).unwrap();
            let q = quad_form(&inv, &DVector::from_column_slice(&x[..d]));
            prop_assert!(q >= 0.0 && q.is_finite());
        }
    }
}
