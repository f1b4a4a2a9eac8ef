//! Timestamped records
use crate::prelude::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calendar date
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Epoch timestamp, as described in the file headers.
/// Seconds are only described by observation epochs
/// and remain null for ephemeris epochs.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:06.3}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl Timestamp {
    /// Builds a new [Timestamp] without seconds
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second: 0.0,
        }
    }

    /// Returns [Timestamp] with updated seconds
    pub fn with_second(&self, second: f64) -> Self {
        let mut s = *self;
        s.second = second;
        s
    }

    /// Calendar [Date] of this [Timestamp]
    pub fn date(&self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// True if both [Timestamp]s share the same date and hour
    pub fn same_hour(&self, rhs: &Self) -> bool {
        self.date() == rhs.date() && self.hour == rhs.hour
    }

    /// Minute-resolution [Duration] elapsed from `rhs` to `self`,
    /// only defined within the same date and hour. Seconds are not accounted for.
    pub fn minutes_since(&self, rhs: &Self) -> Option<Duration> {
        if !self.same_hour(rhs) {
            return None;
        }
        let delta = self.minute as i32 - rhs.minute as i32;
        Some(Duration::from_seconds(delta as f64 * 60.0))
    }
}

/// One timestamped sample, holding one entry per satellite in sight.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochRecord<E> {
    /// [Timestamp] of this epoch
    pub timestamp: Timestamp,
    /// Entries, in order of appearance
    pub entries: Vec<E>,
}

impl<E> EpochRecord<E> {
    /// Creates an empty [EpochRecord]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            entries: Vec::new(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were gathered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
