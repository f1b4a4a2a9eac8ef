//! Epoch matching preset
use crate::prelude::{Duration, Error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn default_window() -> Duration {
    Duration::from_seconds(15.0 * 60.0)
}

/// Policy applied when several ephemeris epochs fall
/// within the matching window of one observation epoch.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    /// Most recent ephemeris epoch, ie. the one closest in time
    /// to the observation epoch.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "closest", alias = "Closest"))]
    ClosestInTime,

    /// First qualifying ephemeris epoch, in file then record order.
    #[cfg_attr(feature = "serde", serde(alias = "first", alias = "First"))]
    FirstEncountered,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ClosestInTime => write!(f, "closest"),
            Self::FirstEncountered => write!(f, "first"),
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "closest" | "closest-in-time" => Ok(Self::ClosestInTime),
            "first" | "first-encountered" => Ok(Self::FirstEncountered),
            _ => Err(Error::UnknownTieBreak(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchingOpts {
    /// Maximal age of the ephemeris epoch, with respect to the
    /// observation epoch. Both ends of the window are inclusive.
    #[cfg_attr(feature = "serde", serde(default = "default_window"))]
    pub window: Duration,
    /// [TieBreak] policy
    #[cfg_attr(feature = "serde", serde(default))]
    pub tie_break: TieBreak,
}

impl Default for MatchingOpts {
    fn default() -> Self {
        Self {
            window: default_window(),
            tie_break: TieBreak::default(),
        }
    }
}
