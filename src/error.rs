use thiserror::Error;

/// Errors that may arise at any stage of the positioning process.
/// Apart from [Error::NonTextInput] and [Error::MalformedHeader],
/// which abort the parsing of one file, every [Error] is local
/// to the epoch being resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input bytes cannot be decoded as text at all.
    #[error("input is not valid utf-8 text")]
    NonTextInput,

    /// Epoch header line from which no timestamp could be derived.
    #[error("malformed epoch header (line {0}): \"{1}\"")]
    MalformedHeader(usize, String),

    /// A numeric field had to be coerced while strict parsing was requested.
    #[error("invalid {field} field (line {line}): \"{content}\"")]
    InvalidField {
        line: usize,
        field: &'static str,
        content: String,
    },

    /// Unknown epoch matching [crate::prelude::TieBreak] policy.
    #[error("unknown tie-break policy: \"{0}\"")]
    UnknownTieBreak(String),

    /// Less than 4 satellites are shared by the observation
    /// and the ephemeris epochs: cannot resolve (x, y, z, t).
    #[error("insufficient satellites: {0} matched, 4 required")]
    InsufficientSatellites(usize),

    /// Degenerate geometry: the navigation matrix is rank deficient
    /// or the normal equations cannot be inverted.
    #[error("singular navigation system (degenerate geometry)")]
    SingularSystem,

    /// Cartesian coordinates cannot be projected onto the reference ellipsoid.
    #[error("geodetic conversion error: {0}")]
    ConversionError(String),
}
