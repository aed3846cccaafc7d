//! Context matrices: one feature vector per candidate arm.
//!
//! Arm identity is positional: row `k` describes arm `k` for this decision
//! only. Successive decisions may present a different number of arms.

use crate::BanditError;

/// A validated `narm × dim` context matrix stored row-major.
///
/// Construction guarantees at least one arm, at least one feature, equal row
/// widths, and finite entries, so policies never see an empty or ragged set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contexts {
    narm: usize,
    dim: usize,
    data: Vec<f64>,
}

impl Contexts {
    /// Build from a slice of rows.
    ///
    /// ```rust
    /// use bdt::Contexts;
    ///
    /// let cts = Contexts::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    /// assert_eq!(cts.narm(), 2);
    /// assert_eq!(cts.row(1), &[0.0, 1.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, BanditError> {
        let first = rows.first().ok_or(BanditError::EmptyArms)?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(BanditError::EmptyFeatures);
        }
        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != dim {
                return Err(BanditError::RaggedContexts {
                    row,
                    expected: dim,
                    got: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        Self::from_row_major(rows.len(), dim, data)
    }

    /// Build from a flat row-major buffer of `narm * dim` values.
    pub fn from_row_major(narm: usize, dim: usize, data: Vec<f64>) -> Result<Self, BanditError> {
        if narm == 0 {
            return Err(BanditError::EmptyArms);
        }
        if dim == 0 {
            return Err(BanditError::EmptyFeatures);
        }
        if data.len() != narm * dim {
            return Err(BanditError::DimensionMismatch {
                expected: narm * dim,
                got: data.len(),
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(BanditError::NonFinite("context"));
        }
        Ok(Self { narm, dim, data })
    }

    /// Every arm sees the same feature vector.
    pub fn repeated(context: &[f64], narm: usize) -> Result<Self, BanditError> {
        let rows = vec![context; narm];
        Self::from_rows(&rows)
    }

    /// Number of arms (rows).
    pub fn narm(&self) -> usize {
        self.narm
    }

    /// Feature dimension (columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Feature vector of arm `k`.
    ///
    /// Panics if `k >= narm()`, like slice indexing.
    pub fn row(&self, k: usize) -> &[f64] {
        &self.data[k * self.dim..(k + 1) * self.dim]
    }

    /// Feature vector of arm `k`, or `None` when out of range.
    pub fn get(&self, k: usize) -> Option<&[f64]> {
        (k < self.narm).then(|| self.row(k))
    }

    /// Iterate over rows in arm order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Fail unless the width matches `dim`.
    pub(crate) fn expect_dim(&self, dim: usize) -> Result<(), BanditError> {
        if self.dim == dim {
            Ok(())
        } else {
            Err(BanditError::DimensionMismatch {
                expected: dim,
                got: self.dim,
            })
        }
    }
}

/// Validate a single context vector passed to `update`.
pub(crate) fn check_update(context: &[f64], dim: usize, reward: f64) -> Result<(), BanditError> {
    if context.len() != dim {
        return Err(BanditError::DimensionMismatch {
            expected: dim,
            got: context.len(),
        });
    }
    if !context.iter().all(|v| v.is_finite()) {
        return Err(BanditError::NonFinite("context"));
    }
    if !reward.is_finite() {
        return Err(BanditError::NonFinite("reward"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged_input() {
        let none: [Vec<f64>; 0] = [];
        assert_eq!(Contexts::from_rows(&none), Err(BanditError::EmptyArms));
        assert_eq!(
            Contexts::from_rows(&[Vec::<f64>::new()]),
            Err(BanditError::EmptyFeatures)
        );
        assert_eq!(
            Contexts::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(BanditError::RaggedContexts {
                row: 1,
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            Contexts::from_rows(&[vec![1.0, f64::NAN]]),
            Err(BanditError::NonFinite("context"))
        );
    }

    #[test]
    fn rows_are_returned_in_arm_order() {
        let cts = Contexts::from_row_major(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let rows: Vec<&[f64]> = cts.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..], &[5.0, 6.0][..]]);
        assert_eq!(cts.get(2), Some(&[5.0, 6.0][..]));
        assert_eq!(cts.get(3), None);
    }

    #[test]
    fn repeated_copies_the_context_per_arm() {
        let cts = Contexts::repeated(&[0.5, 1.5], 4).unwrap();
        assert_eq!(cts.narm(), 4);
        assert!(cts.rows().all(|r| r == [0.5, 1.5]));
    }

    #[test]
    fn update_check_catches_width_and_nan() {
        assert!(check_update(&[1.0, 2.0], 2, 0.0).is_ok());
        assert_eq!(
            check_update(&[1.0], 2, 0.0),
            Err(BanditError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            check_update(&[1.0, 2.0], 2, f64::INFINITY),
            Err(BanditError::NonFinite("reward"))
        );
    }
}
