//! Fixed width line decoding
use crate::{
    fortran::{FieldDescriptor, ValueKind},
    prelude::FormatError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded field
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldValue {
    /// `F` or `E` field
    Real(f64),
    /// `I` field
    Integer(i64),
    /// `A` field
    Char(String),
    /// Blank field, or field beyond the end of a short line
    Absent,
}

impl FieldValue {
    /// Returns true if this field was blank
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
    /// Returns true if this field holds a meaningful value:
    /// neither blank, nor a numerical zero.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Real(f) => *f != 0.0,
            Self::Integer(i) => *i != 0,
            Self::Char(s) => !s.is_empty(),
            Self::Absent => false,
        }
    }
    /// Numerical value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
    /// Integer value, if any
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
    /// Characters, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Char(s) => Some(s),
            _ => None,
        }
    }
}

/// [FixedWidthDecoder] slices one line into the fields
/// its [FieldDescriptor] describes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedWidthDecoder {
    descriptor: FieldDescriptor,
}

impl From<FieldDescriptor> for FixedWidthDecoder {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self { descriptor }
    }
}

impl FixedWidthDecoder {
    pub fn new(descriptor: FieldDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Decodes `repeat` fields from given line.
    /// Lines shorter than `repeat * width` are considered blank padded.
    pub fn decode(&self, line: &str) -> Result<Vec<FieldValue>, FormatError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let width = self.descriptor.width;
        let mut values = Vec::with_capacity(self.descriptor.repeat);

        for nth in 0..self.descriptor.repeat {
            let start = nth * width;
            let field = slice(line, start, start + width).ok_or_else(|| {
                FormatError::FieldParsing {
                    field: String::from_utf8_lossy(
                        &line.as_bytes()[start.min(line.len())..(start + width).min(line.len())],
                    )
                    .to_string(),
                    kind: self.descriptor.kind,
                }
            })?;
            values.push(self.decode_field(field)?);
        }

        Ok(values)
    }

    fn decode_field(&self, field: &str) -> Result<FieldValue, FormatError> {
        if field.trim().is_empty() {
            return Ok(FieldValue::Absent);
        }

        let kind = self.descriptor.kind;
        let faulty = || FormatError::FieldParsing {
            field: field.to_string(),
            kind,
        };

        match kind {
            ValueKind::Character => Ok(FieldValue::Char(field.to_string())),
            ValueKind::Integer => {
                let digits = without_blanks(field);
                let value = digits.parse::<i64>().map_err(|_| faulty())?;
                Ok(FieldValue::Integer(value))
            },
            ValueKind::Float | ValueKind::Scientific => {
                let value = parse_real(field, self.descriptor.precision).ok_or_else(faulty)?;
                Ok(FieldValue::Real(value))
            },
        }
    }
}

/// Returns the [start, end[ columns of this line.
/// Columns past the end of line are returned empty.
/// None when the bounds do not fall on character boundaries.
pub(crate) fn slice(line: &str, start: usize, end: usize) -> Option<&str> {
    let len = line.len();
    if start >= len {
        return Some("");
    }
    line.get(start..end.min(len))
}

/// Blanks within numeric fields are not significant
fn without_blanks(field: &str) -> String {
    field.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses F and E fields.
/// Exponent letter may be `E` or `D`, or omitted when the exponent is signed ("1.5-03").
/// Fields without decimal point use the descriptor's implied precision.
fn parse_real(field: &str, precision: Option<u32>) -> Option<f64> {
    let mut s = without_blanks(field).to_ascii_uppercase().replace('D', "E");

    if !s.contains('E') {
        // signed exponent, letter omitted
        if let Some(pos) = s.get(1..).and_then(|t| t.find(['+', '-'])) {
            s.insert(pos + 1, 'E');
        }
    }

    if !s.contains('.') {
        let (mantissa, exponent) = match s.split_once('E') {
            Some((m, e)) => (m, Some(e)),
            None => (s.as_str(), None),
        };
        let mut value = mantissa.parse::<f64>().ok()?;
        if let Some(p) = precision {
            value /= 10.0_f64.powi(p as i32);
        }
        if let Some(e) = exponent {
            value *= 10.0_f64.powi(e.parse::<i32>().ok()?);
        }
        return Some(value);
    }

    s.parse::<f64>().ok()
}
