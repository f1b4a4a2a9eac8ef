#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod candidate;
mod cfg;
mod constants;
mod epoch;
mod error;
mod geodetic;
mod matching;
mod navigation;
mod parsing;
mod solver;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::candidate::Candidate;
    pub use crate::cfg::{Config, MatchingOpts, ParsingOpts, SolverOpts, TieBreak};
    pub use crate::constants::{EARTH_SEMI_MAJOR_AXIS_WGS84, MIN_SV_REQUIRED, SPEED_OF_LIGHT_M_S};
    pub use crate::epoch::{Date, EpochRecord, Timestamp};
    pub use crate::error::Error;
    pub use crate::geodetic::{GeodeticConverter, ReferenceEllipsoid, UserLocation};
    pub use crate::matching::{MatchedEpochPair, Matcher};
    pub use crate::navigation::PositionEstimate;
    pub use crate::parsing::{
        ephemeris::{EphemerisEntry, EphemerisEpoch, EphemerisFile},
        observation::{ObservationEntry, ObservationEpoch, ObservationFile},
        Coercion, Diagnostic, Lenient,
    };
    pub use crate::solver::{Solution, Solver};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::Duration;
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
