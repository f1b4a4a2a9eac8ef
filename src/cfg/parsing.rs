//! Parsing preset
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const fn default_max_observation_epochs() -> Option<usize> {
    Some(10)
}

const fn default_max_ephemeris_epochs() -> Option<usize> {
    None
}

const fn default_strict() -> bool {
    false
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsingOpts {
    /// Maximal number of epochs gathered per observation file.
    /// Protects the service against unbounded input.
    /// Set to None to parse the whole file.
    #[cfg_attr(feature = "serde", serde(default = "default_max_observation_epochs"))]
    pub max_observation_epochs: Option<usize>,
    /// Maximal number of epochs gathered per ephemeris file.
    /// Daily precise products describe 96 epochs, the whole file is parsed by default.
    #[cfg_attr(feature = "serde", serde(default = "default_max_ephemeris_epochs"))]
    pub max_ephemeris_epochs: Option<usize>,
    /// Malformed numeric fields are coerced to zero (and reported as
    /// [crate::prelude::Diagnostic]s) by default.
    /// In strict mode, the first coercion aborts the parsing process.
    #[cfg_attr(feature = "serde", serde(default = "default_strict"))]
    pub strict: bool,
}

impl Default for ParsingOpts {
    fn default() -> Self {
        Self {
            max_observation_epochs: default_max_observation_epochs(),
            max_ephemeris_epochs: default_max_ephemeris_epochs(),
            strict: default_strict(),
        }
    }
}

impl ParsingOpts {
    /// Returns [ParsingOpts] with updated observation epoch cap
    pub fn with_max_observation_epochs(&self, max: Option<usize>) -> Self {
        let mut s = *self;
        s.max_observation_epochs = max;
        s
    }

    /// Returns [ParsingOpts] with updated ephemeris epoch cap
    pub fn with_max_ephemeris_epochs(&self, max: Option<usize>) -> Self {
        let mut s = *self;
        s.max_ephemeris_epochs = max;
        s
    }

    /// Returns [ParsingOpts] with strict parsing enabled
    pub fn strict(&self) -> Self {
        let mut s = *self;
        s.strict = true;
        s
    }
}
