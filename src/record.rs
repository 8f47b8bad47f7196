//! Fixed-column parsing of coordinate record lines.
//!
//! A record line starts with a keyword (`ATOM` for PDB files) and carries
//! the X, Y and Z coordinates in fixed-width fields at fixed offsets.
//! All other columns of the line are ignored.

use std::fmt;

use crate::errors::FieldError;
use crate::structure::Coordinate;

/// Coordinate axis, used to report which field of a record failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Column layout of a coordinate record line. Offsets are 0-based byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    pub keyword: &'static str,
    pub x_offset: usize,
    pub y_offset: usize,
    pub z_offset: usize,
    pub field_width: usize,
}

impl RecordFormat {
    /// PDB `ATOM` records: X in columns 31-38, Y in 39-46, Z in 47-54.
    pub const PDB: RecordFormat = RecordFormat {
        keyword: "ATOM",
        x_offset: 30,
        y_offset: 38,
        z_offset: 46,
        field_width: 8,
    };

    /// Check whether the line starts with the record keyword (exact, case-sensitive, untrimmed).
    pub fn is_record(&self, line: &str) -> bool {
        line.as_bytes().starts_with(self.keyword.as_bytes())
    }

    /// Text of the field starting at `offset`, cut short if the line ends early.
    pub fn field<'a>(&self, line: &'a str, offset: usize) -> &'a str {
        if offset >= line.len() {
            return "";
        }

        let end = (offset + self.field_width).min(line.len());
        line.get(offset..end).unwrap_or("")
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat::PDB
    }
}

/// What to do with a coordinate field that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MalformedPolicy {
    /// Read the field as 0.0 and keep the record
    #[default]
    Zero,
    /// Drop the whole line
    Skip,
    /// Fail the whole file
    Reject,
}

/// Trait for extracting a coordinate from one line of a structure file
pub trait RecordParser {
    /// Extract the coordinate of a record line.
    ///
    /// # Returns
    /// * `Ok(Some(coordinate))` for a record line
    /// * `Ok(None)` if the line is not a record
    /// * `Err(FieldError)` if the line is a record but a field could not be read
    ///   and the parser is not configured to substitute 0.0
    fn extract(&self, line: &str) -> Result<Option<Coordinate>, FieldError>;

    /// Policy the parser applies to malformed fields, if it has one.
    fn malformed_policy(&self) -> Option<MalformedPolicy> {
        None
    }
}

/// Implementation of RecordParser for fixed-column PDB records
#[derive(Debug, Clone, Copy, Default)]
pub struct PdbRecordParser {
    format: RecordFormat,
    policy: MalformedPolicy,
}

impl PdbRecordParser {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self {
            format: RecordFormat::PDB,
            policy,
        }
    }

    pub fn with_format(format: RecordFormat, policy: MalformedPolicy) -> Self {
        Self { format, policy }
    }

    pub fn format(&self) -> &RecordFormat {
        &self.format
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    fn read_field(&self, line: &str, offset: usize, axis: Axis) -> Result<f64, FieldError> {
        let text = self.format.field(line, offset);
        match parse_leading_float(text) {
            Some(value) => Ok(value),
            None if self.policy == MalformedPolicy::Zero => Ok(0.0),
            None => Err(FieldError {
                axis,
                text: text.to_string(),
            }),
        }
    }
}

impl RecordParser for PdbRecordParser {
    fn extract(&self, line: &str) -> Result<Option<Coordinate>, FieldError> {
        if !self.format.is_record(line) {
            return Ok(None);
        }

        let x = self.read_field(line, self.format.x_offset, Axis::X)?;
        let y = self.read_field(line, self.format.y_offset, Axis::Y)?;
        let z = self.read_field(line, self.format.z_offset, Axis::Z)?;

        Ok(Some(Coordinate::new(x, y, z)))
    }

    fn malformed_policy(&self) -> Option<MalformedPolicy> {
        Some(self.policy)
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace and any trailing content.
///
/// Accepts an optional sign, digits with an optional decimal point, and an optional exponent.
/// Returns `None` if no digits are found.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() && bytes[start].is_ascii_whitespace() {
        start += 1;
    }

    let mut end = start;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent is only consumed if at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[start..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
