//! Precise ephemeris (SP3) records
use log::{debug, warn};
use std::str::FromStr;

use crate::{
    cfg::ParsingOpts,
    epoch::EpochRecord,
    parsing::{parse_sv_prefix, parse_timestamp, Diagnostic, FieldParser},
    prelude::{Error, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn new_epoch(line: &str) -> bool {
    line.starts_with('*')
}

fn end_of_file(line: &str) -> bool {
    line.starts_with("EOF")
}

/// Position lines start with `P`, the constellation code,
/// then the satellite number, like `PG01`.
fn position_entry(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > 2 && bytes[0] == b'P' && bytes[1].is_ascii_uppercase()
}

/// Satellite state, in the on-disk units. Unit normalization
/// takes place when preparing the navigation process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EphemerisEntry {
    /// Satellite
    pub sv: SV,
    /// ECEF position (km)
    pub position_km: (f64, f64, f64),
    /// Onboard clock offset (µs)
    pub clock_bias_us: f64,
}

impl EphemerisEntry {
    /// Builds a new [EphemerisEntry]
    pub fn new(sv: SV, position_km: (f64, f64, f64), clock_bias_us: f64) -> Self {
        Self {
            sv,
            position_km,
            clock_bias_us,
        }
    }

    /// Parses `id x_km y_km z_km clock_us`.
    /// Returns None for unknown constellations.
    fn parse(fields: &mut FieldParser, line_no: usize, line: &str) -> Result<Option<Self>, Error> {
        let mut words = line.split_whitespace();
        let id = words.next().unwrap_or_default();

        let sv = match parse_sv_prefix(fields, line_no, &id[1..2], &id[2..])? {
            Some(sv) => sv,
            None => return Ok(None),
        };

        let x_km = fields.field::<f64>(line_no, "x", words.next())?;
        let y_km = fields.field::<f64>(line_no, "y", words.next())?;
        let z_km = fields.field::<f64>(line_no, "z", words.next())?;
        let clock_us = fields.field::<f64>(line_no, "clock", words.next())?;

        Ok(Some(Self {
            sv,
            position_km: (x_km.value, y_km.value, z_km.value),
            clock_bias_us: clock_us.value,
        }))
    }
}

/// Ephemeris epoch
pub type EphemerisEpoch = EpochRecord<EphemerisEntry>;

/// Parsed precise ephemeris file
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EphemerisFile {
    /// Epochs, in chronological order of appearance
    pub epochs: Vec<EphemerisEpoch>,
    /// [Diagnostic]s for every coerced field
    pub diagnostics: Vec<Diagnostic>,
}

impl FromStr for EphemerisFile {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse(content, &ParsingOpts::default())
    }
}

impl EphemerisFile {
    /// Parses [EphemerisFile] from raw bytes.
    /// Bytes that are not valid text are the only fatal condition.
    pub fn from_bytes(bytes: &[u8], opts: &ParsingOpts) -> Result<Self, Error> {
        let content = std::str::from_utf8(bytes).or(Err(Error::NonTextInput))?;
        Self::parse(content, opts)
    }

    /// Parses [EphemerisFile] from text content.
    /// The `EOF` marker finalizes the last epoch, anything past it is ignored.
    pub fn parse(content: &str, opts: &ParsingOpts) -> Result<Self, Error> {
        let mut fields = FieldParser::new(opts.strict);
        let mut epochs = Vec::<EphemerisEpoch>::new();
        let mut pending = Option::<EphemerisEpoch>::None;
        let mut terminated = false;

        let capped = |epochs: &Vec<EphemerisEpoch>| match opts.max_ephemeris_epochs {
            Some(max) => epochs.len() >= max,
            None => false,
        };

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;

            if end_of_file(line) {
                terminated = true;
                break;
            }

            if new_epoch(line) {
                if let Some(epoch) = pending.take() {
                    epochs.push(epoch);
                }
                if capped(&epochs) {
                    debug!("epoch limit reached (line {})", line_no);
                    break;
                }
                let timestamp = parse_timestamp(&mut fields, line_no, &line[1..], false)?;
                pending = Some(EphemerisEpoch::new(timestamp));
            } else if position_entry(line) {
                if let Some(epoch) = pending.as_mut() {
                    if let Some(entry) = EphemerisEntry::parse(&mut fields, line_no, line)? {
                        epoch.entries.push(entry);
                    }
                }
            }
        }

        if let Some(epoch) = pending.take() {
            if !terminated {
                debug!("missing EOF marker: last epoch finalized at end of input");
            }
            if !capped(&epochs) {
                epochs.push(epoch);
            }
        }

        let diagnostics = fields.into_diagnostics();
        if !diagnostics.is_empty() {
            warn!("{} ephemeris field(s) coerced to zero", diagnostics.len());
        }

        Ok(Self {
            epochs,
            diagnostics,
        })
    }
}
