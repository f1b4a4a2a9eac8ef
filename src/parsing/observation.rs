//! Observation records
use itertools::Itertools;
use log::{debug, warn};
use std::str::FromStr;

use crate::{
    cfg::ParsingOpts,
    epoch::{Date, EpochRecord},
    parsing::{parse_sv_prefix, parse_timestamp, Diagnostic, FieldParser},
    prelude::{Error, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observation epochs are introduced by this sentinel
fn new_epoch(line: &str) -> bool {
    line.starts_with('>')
}

/// Observation lines start with a constellation code
/// immediately followed by the satellite number, like `G03`.
fn observation_entry(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(code), Some(number)) if code.is_ascii_uppercase() && number.is_ascii_digit()
    )
}

/// Pseudo range measurement, for one satellite
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationEntry {
    /// Satellite
    pub sv: SV,
    /// Raw pseudo range (m)
    pub pseudo_range_m: f64,
    /// Possible signal strength
    pub signal_strength: Option<f64>,
    /// Possible doppler shift
    pub doppler: Option<f64>,
}

impl ObservationEntry {
    /// Builds a new [ObservationEntry] from raw pseudo range (m)
    pub fn new(sv: SV, pseudo_range_m: f64) -> Self {
        Self {
            sv,
            pseudo_range_m,
            signal_strength: None,
            doppler: None,
        }
    }

    /// Parses `id pseudorange [signal-strength] [doppler]`.
    /// Returns None for unknown constellations.
    fn parse(fields: &mut FieldParser, line_no: usize, line: &str) -> Result<Option<Self>, Error> {
        let mut words = line.split_whitespace();
        let id = words.next().unwrap_or_default();

        let sv = match parse_sv_prefix(fields, line_no, &id[..1], &id[1..])? {
            Some(sv) => sv,
            None => return Ok(None),
        };

        let pseudo_range_m = fields.field::<f64>(line_no, "pseudo range", words.next())?;
        let signal_strength = fields.optional::<f64>(line_no, "signal strength", words.next())?;
        let doppler = fields.optional::<f64>(line_no, "doppler", words.next())?;

        Ok(Some(Self {
            sv,
            pseudo_range_m: pseudo_range_m.value,
            signal_strength,
            doppler,
        }))
    }
}

/// Observation epoch
pub type ObservationEpoch = EpochRecord<ObservationEntry>;

/// Parsed observation file
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationFile {
    /// Epochs, in chronological order of appearance
    pub epochs: Vec<ObservationEpoch>,
    /// [Diagnostic]s for every coerced field
    pub diagnostics: Vec<Diagnostic>,
}

impl FromStr for ObservationFile {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse(content, &ParsingOpts::default())
    }
}

impl ObservationFile {
    /// Parses [ObservationFile] from raw bytes.
    /// Bytes that are not valid text are the only fatal condition.
    pub fn from_bytes(bytes: &[u8], opts: &ParsingOpts) -> Result<Self, Error> {
        let content = std::str::from_utf8(bytes).or(Err(Error::NonTextInput))?;
        Self::parse(content, opts)
    }

    /// Parses [ObservationFile] from text content.
    /// Data lines that precede the first epoch header are ignored.
    pub fn parse(content: &str, opts: &ParsingOpts) -> Result<Self, Error> {
        let mut fields = FieldParser::new(opts.strict);
        let mut epochs = Vec::<ObservationEpoch>::new();
        let mut pending = Option::<ObservationEpoch>::None;

        let capped = |epochs: &Vec<ObservationEpoch>| match opts.max_observation_epochs {
            Some(max) => epochs.len() >= max,
            None => false,
        };

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;

            if new_epoch(line) {
                if let Some(epoch) = pending.take() {
                    epochs.push(epoch);
                }
                if capped(&epochs) {
                    debug!("epoch limit reached (line {})", line_no);
                    break;
                }
                let timestamp = parse_timestamp(&mut fields, line_no, &line[1..], true)?;
                pending = Some(ObservationEpoch::new(timestamp));
            } else if observation_entry(line) {
                if let Some(epoch) = pending.as_mut() {
                    if let Some(entry) = ObservationEntry::parse(&mut fields, line_no, line)? {
                        epoch.entries.push(entry);
                    }
                }
            }
        }

        if let Some(epoch) = pending.take() {
            if !capped(&epochs) {
                epochs.push(epoch);
            }
        }

        let diagnostics = fields.into_diagnostics();
        if !diagnostics.is_empty() {
            warn!("{} observation field(s) coerced to zero", diagnostics.len());
        }

        Ok(Self {
            epochs,
            diagnostics,
        })
    }

    /// Distinct calendar [Date]s covered by this file, in order of appearance.
    /// Each [Date] requires its own ephemeris file.
    pub fn dates(&self) -> Vec<Date> {
        self.epochs
            .iter()
            .map(|epoch| epoch.timestamp.date())
            .unique()
            .collect()
    }
}
