//! Linearized navigation system
use log::debug;
use nalgebra::{DVector, MatrixXx4, Vector4};

use crate::{candidate::Candidate, constants::MIN_SV_REQUIRED, prelude::Error};

mod estimate;
pub use estimate::PositionEstimate;

/// Normal equations are rejected past this conditioning ratio
const MAX_CONDITIONING: f64 = 1.0E12;

/// [Navigation] system `H.dx = b`, linearized at current [PositionEstimate]
#[derive(Debug, Clone)]
pub(crate) struct Navigation {
    /// Residual vector (observed - computed)
    b: DVector<f64>,
    /// Design matrix
    h: MatrixXx4<f64>,
}

impl Navigation {
    /// Create new [Navigation] system
    /// ## Input
    /// - estimate: current [PositionEstimate]
    /// - candidates: [Candidate]s pool
    /// - clock_sensitivity: fixed partial derivative of the clock term
    /// ## Returns
    /// - [Navigation], [Error]
    pub fn new(
        estimate: &PositionEstimate,
        candidates: &[Candidate],
        clock_sensitivity: f64,
    ) -> Result<Self, Error> {
        let size = candidates.len();
        if size < MIN_SV_REQUIRED {
            return Err(Error::InsufficientSatellites(size));
        }

        let mut b = DVector::<f64>::zeros(size);
        let mut h = MatrixXx4::<f64>::zeros(size);

        for (i, cd) in candidates.iter().enumerate() {
            let contribution = cd.matrix_contribution(estimate, clock_sensitivity);
            for j in 0..4 {
                h[(i, j)] = contribution.h[(0, j)];
            }
            b[i] = contribution.b;
        }

        Ok(Self { b, h })
    }

    /// Norm of the residual vector (m)
    pub fn residual_norm(&self) -> f64 {
        self.b.norm()
    }

    /// Least squares correction `dx = (HᵗH)⁻¹ Hᵗb`
    pub fn resolve(&self) -> Result<Vector4<f64>, Error> {
        let ht = self.h.transpose();
        let ht_h = &ht * &self.h;

        let singular_values = ht_h.singular_values();
        let (min, max) = (singular_values.min(), singular_values.max());
        if !(min > 0.0 && max / min < MAX_CONDITIONING) {
            debug!("rank deficient system: σ_min={:.3E} σ_max={:.3E}", min, max);
            return Err(Error::SingularSystem);
        }

        let ht_h_inv = ht_h.try_inverse().ok_or(Error::SingularSystem)?;
        let ht_b = ht * &self.b;

        Ok(ht_h_inv * ht_b)
    }
}
