//! Position solving candidate
use log::{debug, warn};

use crate::{
    cfg::SolverOpts,
    constants::{KM_TO_M, US_TO_S},
    matching::MatchedEpochPair,
    navigation::PositionEstimate,
    parsing::{ephemeris::EphemerisEntry, observation::ObservationEntry},
    prelude::{Vector3, SV},
};

use nalgebra::Matrix1x4;

/// Precise products use this value for unknown clock offsets
const UNKNOWN_CLOCK_US: f64 = 999999.0;

/// One row of the navigation system
pub(crate) struct MatrixContribution {
    /// Partial derivatives (x, y, z, t)
    pub h: Matrix1x4<f64>,
    /// Observed - computed (m)
    pub b: f64,
}

/// Satellite that may contribute to the navigation process: measurement
/// and state are joined, and expressed in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Satellite
    pub sv: SV,
    /// Raw pseudo range (m)
    pub pseudo_range_m: f64,
    /// Satellite clock offset, as range (m)
    pub clock_correction_m: f64,
    /// Satellite ECEF position (m)
    pub position_m: Vector3<f64>,
}

impl Candidate {
    /// Joins one measurement and one satellite state, normalizing
    /// the units on the fly: positions from km to m,
    /// clock offset from µs to meters of range.
    pub fn new(
        observation: &ObservationEntry,
        ephemeris: &EphemerisEntry,
        speed_of_light_m_s: f64,
    ) -> Self {
        let (x_km, y_km, z_km) = ephemeris.position_km;
        let clock_bias_s = ephemeris.clock_bias_us * US_TO_S;
        Self {
            sv: observation.sv,
            pseudo_range_m: observation.pseudo_range_m,
            clock_correction_m: clock_bias_s * speed_of_light_m_s,
            position_m: Vector3::new(x_km * KM_TO_M, y_km * KM_TO_M, z_km * KM_TO_M),
        }
    }

    /// Pseudo range compensated for the satellite clock offset (m)
    pub fn corrected_pseudo_range_m(&self) -> f64 {
        self.pseudo_range_m + self.clock_correction_m
    }

    /// Geometric range (m) from given receiver position
    pub fn range_m(&self, rx_m: &Vector3<f64>) -> f64 {
        (self.position_m - rx_m).norm()
    }

    /// Contribution to the linearized system, at current [PositionEstimate].
    /// The computed pseudo range accounts for the current receiver clock term.
    /// The clock estimate must feed back into the computed range: a purely geometric
    /// range keeps accumulating the common mode correction into the clock term,
    /// which then never converges.
    pub(crate) fn matrix_contribution(
        &self,
        estimate: &PositionEstimate,
        clock_sensitivity: f64,
    ) -> MatrixContribution {
        let rx_m = estimate.position_ecef_m();
        let rho = self.range_m(&rx_m);
        let los = (rx_m - self.position_m) / rho;
        let computed_m = rho + clock_sensitivity * estimate.clock_offset_ns();
        MatrixContribution {
            h: Matrix1x4::new(los[0], los[1], los[2], clock_sensitivity),
            b: self.corrected_pseudo_range_m() - computed_m,
        }
    }

    /// Forms the [Candidate]s pool from a [MatchedEpochPair].
    /// Measurements without satellite state (or the other way around)
    /// are discarded, as well as states flagged as unknown.
    pub fn pool(pair: &MatchedEpochPair, opts: &SolverOpts) -> Vec<Self> {
        let t = pair.observation.timestamp;
        pair.observation
            .entries
            .iter()
            .filter_map(|observation| {
                if observation.sv.constellation != opts.constellation {
                    debug!("{} ({}) - not a {} satellite", t, observation.sv, opts.constellation);
                    return None;
                }

                let ephemeris = pair
                    .ephemeris
                    .entries
                    .iter()
                    .find(|ephemeris| ephemeris.sv == observation.sv);

                let ephemeris = match ephemeris {
                    Some(ephemeris) => ephemeris,
                    None => {
                        debug!("{} ({}) - missing ephemeris", t, observation.sv);
                        return None;
                    },
                };

                if ephemeris.position_km == (0.0, 0.0, 0.0) {
                    warn!("{} ({}) - null satellite position", t, observation.sv);
                    return None;
                }

                if ephemeris.clock_bias_us >= UNKNOWN_CLOCK_US {
                    warn!("{} ({}) - unknown satellite clock offset", t, observation.sv);
                    return None;
                }

                Some(Self::new(observation, ephemeris, opts.speed_of_light_m_s))
            })
            .collect()
    }
}
