//! Ridge-regression sufficient statistics shared by the linear policies.
//!
//! State for a `d`-dimensional model:
//! - `A = I + Σ x xᵗ` (design / precision matrix)
//! - `b = Σ r x`
//! - `A⁻¹` and `θ = A⁻¹ b`, refreshed after every observation.

use nalgebra::{DMatrix, DVector};

use crate::context::check_update;
use crate::linalg::{invert_spd, sherman_morrison};
use crate::{BanditError, InverseUpdate};

#[derive(Debug, Clone)]
pub(crate) struct RidgeState {
    a: DMatrix<f64>,
    a_inv: DMatrix<f64>,
    b: DVector<f64>,
    theta: DVector<f64>,
    uses: u64,
    inverse: InverseUpdate,
}

impl RidgeState {
    pub(crate) fn new(dim: usize, inverse: InverseUpdate) -> Self {
        Self {
            a: DMatrix::identity(dim, dim),
            a_inv: DMatrix::identity(dim, dim),
            b: DVector::zeros(dim),
            theta: DVector::zeros(dim),
            uses: 0,
            inverse,
        }
    }

    pub(crate) fn dim(&self) -> usize {
        self.b.len()
    }

    pub(crate) fn uses(&self) -> u64 {
        self.uses
    }

    pub(crate) fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub(crate) fn a_inv(&self) -> &DMatrix<f64> {
        &self.a_inv
    }

    #[cfg(test)]
    pub(crate) fn b(&self) -> &DVector<f64> {
        &self.b
    }

    pub(crate) fn theta(&self) -> &DVector<f64> {
        &self.theta
    }

    /// Fold in one `(x, r)` observation.
    ///
    /// The new state is computed first and committed only if the inverse is
    /// well-defined, so a `Singular` error leaves `self` unchanged.
    pub(crate) fn observe(&mut self, context: &[f64], reward: f64) -> Result<(), BanditError> {
        check_update(context, self.dim(), reward)?;
        let x = DVector::from_column_slice(context);

        let mut a = self.a.clone();
        a.ger(1.0, &x, &x, 1.0);
        let b = &self.b + &x * reward;
        let a_inv = match self.inverse {
            InverseUpdate::Full => invert_spd(&a),
            InverseUpdate::ShermanMorrison => sherman_morrison(&self.a_inv, &x),
        }
        .inspect_err(|_| {
            tracing::warn!(dim = self.dim(), uses = self.uses, "design matrix inversion failed");
        })?;
        let theta = &a_inv * &b;
        if !theta.iter().all(|v| v.is_finite()) {
            return Err(BanditError::Singular);
        }

        self.a = a;
        self.a_inv = a_inv;
        self.b = b;
        self.theta = theta;
        self.uses = self.uses.saturating_add(1);
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.dim(), self.inverse);
    }
}
