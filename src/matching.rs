//! Observation / ephemeris epoch alignment
use log::debug;
use std::cmp::Ordering;

use crate::{
    cfg::{MatchingOpts, TieBreak},
    epoch::Timestamp,
    parsing::{
        ephemeris::{EphemerisEpoch, EphemerisFile},
        observation::{ObservationEpoch, ObservationFile},
    },
    prelude::Duration,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One observation epoch and the ephemeris epoch selected to resolve it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchedEpochPair {
    /// [ObservationEpoch]
    pub observation: ObservationEpoch,
    /// Selected [EphemerisEpoch]
    pub ephemeris: EphemerisEpoch,
}

impl MatchedEpochPair {
    /// Builds a new [MatchedEpochPair]
    pub fn new(observation: ObservationEpoch, ephemeris: EphemerisEpoch) -> Self {
        Self {
            observation,
            ephemeris,
        }
    }
}

/// [Matcher] selects, for each observation epoch, the most recent ephemeris epoch
/// of the same date and hour, no older than the matching window.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    opts: MatchingOpts,
}

impl Matcher {
    /// Creates a new [Matcher]
    pub fn new(opts: &MatchingOpts) -> Self {
        Self { opts: *opts }
    }

    /// Returns the age of the ephemeris [Timestamp] with respect to the
    /// observation [Timestamp], when it falls within the matching window.
    pub fn qualifies(&self, observation: &Timestamp, ephemeris: &Timestamp) -> Option<Duration> {
        let age = observation.minutes_since(ephemeris)?;
        if age >= Duration::ZERO && age <= self.opts.window {
            Some(age)
        } else {
            None
        }
    }

    /// Selects the [EphemerisEpoch] to pair with this [ObservationEpoch],
    /// browsing all files in order.
    pub fn select<'a>(
        &self,
        observation: &ObservationEpoch,
        files: &'a [EphemerisFile],
    ) -> Option<&'a EphemerisEpoch> {
        let mut qualified = files.iter().flat_map(|file| file.epochs.iter()).filter_map(|epoch| {
            let age = self.qualifies(&observation.timestamp, &epoch.timestamp)?;
            Some((age, epoch))
        });

        let selected = match self.opts.tie_break {
            TieBreak::FirstEncountered => qualified.next(),
            // min_by() retains the first of equally aged epochs
            TieBreak::ClosestInTime => {
                qualified.min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            },
        };

        selected.map(|(_, epoch)| epoch)
    }

    /// Forms a [MatchedEpochPair] if possible
    pub fn pair(
        &self,
        observation: &ObservationEpoch,
        files: &[EphemerisFile],
    ) -> Option<MatchedEpochPair> {
        let ephemeris = self.select(observation, files)?;
        debug!(
            "{}: paired with ephemeris epoch {}",
            observation.timestamp, ephemeris.timestamp
        );
        Some(MatchedEpochPair::new(observation.clone(), ephemeris.clone()))
    }

    /// Forms all possible [MatchedEpochPair]s. Observation epochs
    /// without qualifying ephemeris are skipped.
    pub fn pairs(
        &self,
        observations: &ObservationFile,
        files: &[EphemerisFile],
    ) -> Vec<MatchedEpochPair> {
        observations
            .epochs
            .iter()
            .filter_map(|observation| {
                let pair = self.pair(observation, files);
                if pair.is_none() {
                    debug!(
                        "{}: no ephemeris within {}",
                        observation.timestamp, self.opts.window
                    );
                }
                pair
            })
            .collect()
    }
}
