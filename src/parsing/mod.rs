//! Line oriented, best effort record parsing.
//!
//! Numeric fields are parsed leniently: a missing or malformed field
//! is coerced to its default (zero) value, and the coercion is reported
//! as a [Diagnostic] attached to the parsed file. Zero valued fields may
//! silently bias the solutions, so callers should inspect the diagnostics
//! or opt into strict parsing.
use log::debug;
use std::str::FromStr;

use crate::{
    epoch::Timestamp,
    prelude::{Constellation, Error, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod ephemeris;
pub mod observation;

/// Reason of a field coercion
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Coercion {
    /// Field was not present on the line
    Missing,
    /// Field content is not a valid number
    Invalid,
}

impl std::fmt::Display for Coercion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

/// [Diagnostic] emitted for each coerced field
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Line number (starting at 1)
    pub line: usize,
    /// Field name
    pub field: String,
    /// Raw content (empty when missing)
    pub content: String,
    /// [Coercion] cause
    pub coercion: Coercion,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "line {}: {} {} field \"{}\" coerced to zero",
            self.line, self.coercion, self.field, self.content
        )
    }
}

/// Leniently parsed value, carrying its validity flag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lenient<T> {
    /// Parsed value, or default value when coerced
    pub value: T,
    /// Possible [Coercion] that took place
    pub coercion: Option<Coercion>,
}

impl<T: FromStr + Default> Lenient<T> {
    /// Parses a possibly missing field
    pub fn parse(word: Option<&str>) -> Self {
        match word {
            None => Self {
                value: T::default(),
                coercion: Some(Coercion::Missing),
            },
            Some(word) => match T::from_str(word.trim()) {
                Ok(value) => Self {
                    value,
                    coercion: None,
                },
                Err(_) => Self {
                    value: T::default(),
                    coercion: Some(Coercion::Invalid),
                },
            },
        }
    }
}

impl<T> Lenient<T> {
    /// True if this field was correctly parsed
    pub fn is_valid(&self) -> bool {
        self.coercion.is_none()
    }
}

/// Collects [Diagnostic]s throughout one file, and
/// rejects any coercion in strict mode.
#[derive(Debug, Default)]
pub(crate) struct FieldParser {
    strict: bool,
    diagnostics: Vec<Diagnostic>,
}

impl FieldParser {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            diagnostics: Vec::new(),
        }
    }

    /// Parses one mandatory field
    pub fn field<T: FromStr + Default>(
        &mut self,
        line: usize,
        field: &'static str,
        word: Option<&str>,
    ) -> Result<Lenient<T>, Error> {
        let parsed = Lenient::<T>::parse(word);
        if let Some(coercion) = parsed.coercion {
            let content = word.unwrap_or_default().to_string();
            if self.strict {
                return Err(Error::InvalidField {
                    line,
                    field,
                    content,
                });
            }
            debug!("line {}: {} {} field \"{}\"", line, coercion, field, content);
            self.diagnostics.push(Diagnostic {
                line,
                field: field.to_string(),
                content,
                coercion,
            });
        }
        Ok(parsed)
    }

    /// Parses one optional field: absence is not reported.
    pub fn optional<T: FromStr + Default>(
        &mut self,
        line: usize,
        field: &'static str,
        word: Option<&str>,
    ) -> Result<Option<T>, Error> {
        match word {
            Some(_) => Ok(Some(self.field(line, field, word)?.value)),
            None => Ok(None),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Parses the content of an epoch header, following its sentinel:
/// `year month day hour minute [second]`. Excess fields are ignored.
/// Fails when no timestamp field can be derived at all.
pub(crate) fn parse_timestamp(
    fields: &mut FieldParser,
    line: usize,
    content: &str,
    with_seconds: bool,
) -> Result<Timestamp, Error> {
    let malformed = || Error::MalformedHeader(line, content.trim().to_string());

    let mut words = content.split_whitespace();
    if content.trim().is_empty() {
        return Err(malformed());
    }

    let year = fields.field::<i32>(line, "year", words.next())?;
    let month = fields.field::<u8>(line, "month", words.next())?;
    let day = fields.field::<u8>(line, "day", words.next())?;
    let hour = fields.field::<u8>(line, "hour", words.next())?;
    let minute = fields.field::<u8>(line, "minute", words.next())?;

    let mut valid = year.is_valid()
        || month.is_valid()
        || day.is_valid()
        || hour.is_valid()
        || minute.is_valid();

    let mut timestamp = Timestamp::new(
        year.value,
        month.value,
        day.value,
        hour.value,
        minute.value,
    );

    if with_seconds {
        let second = fields.field::<f64>(line, "second", words.next())?;
        valid |= second.is_valid();
        timestamp = timestamp.with_second(second.value);
    }

    if valid {
        Ok(timestamp)
    } else {
        Err(malformed())
    }
}

/// Splits a satellite identifier like `G03` into its
/// [Constellation] and raw identification number.
/// Returns None when the constellation code is unknown, or when
/// no valid (non null) satellite number can be derived.
pub(crate) fn parse_sv_prefix(
    fields: &mut FieldParser,
    line: usize,
    code: &str,
    number: &str,
) -> Result<Option<SV>, Error> {
    let constellation = match Constellation::from_str(code) {
        Ok(constellation) => constellation,
        Err(_) => {
            debug!("line {}: unknown constellation \"{}\"", line, code);
            return Ok(None);
        },
    };
    let prn = fields.field::<u8>(line, "satellite id", Some(number))?;
    if !prn.is_valid() || prn.value == 0 {
        debug!("line {}: invalid satellite number \"{}\"", line, number);
        return Ok(None);
    }
    Ok(Some(SV::new(constellation, prn.value)))
}
