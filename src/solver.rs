//! Position solver
use log::{debug, error, info};

use crate::{
    candidate::Candidate,
    cfg::Config,
    constants::MIN_SV_REQUIRED,
    epoch::Timestamp,
    geodetic::{GeodeticConverter, UserLocation},
    matching::{MatchedEpochPair, Matcher},
    navigation::{Navigation, PositionEstimate},
    parsing::{ephemeris::EphemerisFile, observation::ObservationFile},
    prelude::{Error, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolved epoch, bundled with the records it was resolved from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Observation [Timestamp]
    pub timestamp: Timestamp,
    /// [UserLocation]
    pub location: UserLocation,
    /// Receiver clock term (ns)
    pub clock_offset_ns: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Residual norm (m) at the final estimate
    pub residual_norm_m: f64,
    /// Satellites that contributed
    pub satellites: Vec<SV>,
    /// Matched records this [Solution] was resolved from
    pub records: MatchedEpochPair,
}

/// [Solver] resolves one receiver location per [MatchedEpochPair].
/// It only holds its configuration, every resolution attempt is independent.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    /// Solver parametrization
    pub cfg: Config,
    /// Epoch [Matcher]
    matcher: Matcher,
    /// [GeodeticConverter]
    converter: GeodeticConverter,
}

impl Solver {
    /// Creates a new [Solver] from [Config] preset
    pub fn new(cfg: &Config) -> Self {
        Self {
            cfg: cfg.clone(),
            matcher: Matcher::new(&cfg.matching),
            converter: GeodeticConverter::new(cfg.ellipsoid),
        }
    }

    /// Epoch [Matcher] in use
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Iterates the Gauss-Newton process over the [Candidate]s pool,
    /// starting from the configured initial guess.
    /// Runs the full iteration count, unless the residual-norm criterion is enabled.
    pub fn estimate(&self, candidates: &[Candidate]) -> Result<PositionEstimate, Error> {
        let opts = &self.cfg.solver;
        let clock_sensitivity = opts.clock_sensitivity();

        if candidates.len() < MIN_SV_REQUIRED {
            return Err(Error::InsufficientSatellites(candidates.len()));
        }

        let mut estimate = PositionEstimate::from_ecef_m(opts.apriori());

        for _ in 0..opts.iterations {
            let nav = Navigation::new(&estimate, candidates, clock_sensitivity)?;

            if let Some(threshold_m) = opts.convergence_threshold_m {
                let residual_m = nav.residual_norm();
                if residual_m < threshold_m {
                    debug!(
                        "iter={} converged: |b|={:.3E}m",
                        estimate.iteration, residual_m
                    );
                    break;
                }
            }

            let dx = nav.resolve()?;
            estimate.update(dx);
            debug!("iter={} {}", estimate.iteration, estimate);
        }

        Ok(estimate)
    }

    /// Resolves one [MatchedEpochPair] into a [Solution]
    pub fn resolve(&self, pair: &MatchedEpochPair) -> Result<Solution, Error> {
        let t = pair.observation.timestamp;
        let candidates = Candidate::pool(pair, &self.cfg.solver);

        let estimate = self.estimate(&candidates)?;

        let postfit = Navigation::new(&estimate, &candidates, self.cfg.solver.clock_sensitivity())?;
        let location = self.converter.convert(&estimate.position_ecef_m())?;

        info!("{}: {} ({} sv)", t, location, candidates.len());

        Ok(Solution {
            timestamp: t,
            location,
            clock_offset_ns: estimate.clock_offset_ns(),
            iterations: estimate.iteration,
            residual_norm_m: postfit.residual_norm(),
            satellites: candidates.iter().map(|cd| cd.sv).collect(),
            records: pair.clone(),
        })
    }

    /// Runs the complete process: every observation epoch is paired with
    /// the ephemeris files, then resolved. One result per matched epoch:
    /// failures remain local to their epoch.
    pub fn process(
        &self,
        observations: &ObservationFile,
        ephemeris: &[EphemerisFile],
    ) -> Vec<(Timestamp, Result<Solution, Error>)> {
        self.matcher
            .pairs(observations, ephemeris)
            .iter()
            .map(|pair| {
                let t = pair.observation.timestamp;
                let solution = self.resolve(pair);
                if let Err(e) = &solution {
                    error!("{}: resolution failed: {}", t, e);
                }
                (t, solution)
            })
            .collect()
    }
}
