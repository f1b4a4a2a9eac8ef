//! Solver configuration preset
use crate::{
    constants::SPEED_OF_LIGHT_M_S,
    prelude::{Constellation, Vector3},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const fn default_iterations() -> usize {
    10
}

/// Initial guess, close to central Europe. Any point on the
/// Earth surface sits within the basin of convergence.
const fn default_apriori_ecef_m() -> (f64, f64, f64) {
    (4331297.3480, 567555.6390, 4633133.7280)
}

const fn default_convergence_threshold() -> Option<f64> {
    None
}

fn default_constellation() -> Constellation {
    Constellation::GPS
}

const fn default_speed_of_light() -> f64 {
    SPEED_OF_LIGHT_M_S
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOpts {
    /// Number of Gauss-Newton iterations
    #[cfg_attr(feature = "serde", serde(default = "default_iterations"))]
    pub iterations: usize,
    /// Seed of the iterative process, ECEF (m)
    #[cfg_attr(feature = "serde", serde(default = "default_apriori_ecef_m"))]
    pub apriori_ecef_m: (f64, f64, f64),
    /// Stop iterating as soon as the residual norm (m) falls below this value.
    /// None (default) always runs the full iteration count.
    #[cfg_attr(feature = "serde", serde(default = "default_convergence_threshold"))]
    pub convergence_threshold_m: Option<f64>,
    /// Only satellites of this [Constellation] contribute,
    /// a single receiver clock offset is modeled.
    #[cfg_attr(feature = "serde", serde(default = "default_constellation"))]
    pub constellation: Constellation,
    /// Speed of light (m.s⁻¹) used in clock to range conversions
    #[cfg_attr(feature = "serde", serde(default = "default_speed_of_light"))]
    pub speed_of_light_m_s: f64,
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            apriori_ecef_m: default_apriori_ecef_m(),
            convergence_threshold_m: default_convergence_threshold(),
            constellation: default_constellation(),
            speed_of_light_m_s: default_speed_of_light(),
        }
    }
}

impl SolverOpts {
    /// Seed of the iterative process as [Vector3]
    pub(crate) fn apriori(&self) -> Vector3<f64> {
        let (x, y, z) = self.apriori_ecef_m;
        Vector3::new(x, y, z)
    }

    /// Partial derivative of the range with respect to the clock term.
    /// This is a fixed sensitivity, identical for every satellite.
    pub(crate) fn clock_sensitivity(&self) -> f64 {
        self.speed_of_light_m_s * 1.0E-9
    }
}
