#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geodetic::ReferenceEllipsoid;

mod matching;
mod parsing;
mod solver;

pub use matching::{MatchingOpts, TieBreak};
pub use parsing::ParsingOpts;
pub use solver::SolverOpts;

/// Complete setup of the positioning process, from
/// file parsing to the geodetic conversion.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// [ParsingOpts] applied to both observation and ephemeris files
    #[cfg_attr(feature = "serde", serde(default))]
    pub parsing: ParsingOpts,
    /// Epoch [MatchingOpts]
    #[cfg_attr(feature = "serde", serde(default))]
    pub matching: MatchingOpts,
    /// [SolverOpts]
    #[cfg_attr(feature = "serde", serde(default))]
    pub solver: SolverOpts,
    /// [ReferenceEllipsoid] used in the final conversion
    #[cfg_attr(feature = "serde", serde(default))]
    pub ellipsoid: ReferenceEllipsoid,
}

impl Config {
    /// Returns [Config] with updated number of iterations
    pub fn with_iterations(&self, iterations: usize) -> Self {
        let mut s = self.clone();
        s.solver.iterations = iterations;
        s
    }

    /// Returns [Config] with updated initial guess (ECEF m)
    pub fn with_apriori_ecef_m(&self, ecef_m: (f64, f64, f64)) -> Self {
        let mut s = self.clone();
        s.solver.apriori_ecef_m = ecef_m;
        s
    }

    /// Returns [Config] with residual-norm stopping criterion
    pub fn with_convergence_threshold_m(&self, threshold_m: f64) -> Self {
        let mut s = self.clone();
        s.solver.convergence_threshold_m = Some(threshold_m);
        s
    }
}
