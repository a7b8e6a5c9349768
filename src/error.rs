use thiserror::Error;

use crate::fortran::ValueKind;

/// Errors related to the content of a single field, descriptor or line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Descriptor token does not match any supported kind letter
    #[error("unknown field descriptor \"{0}\"")]
    UnknownDescriptor(String),
    /// Non blank field that does not parse as its declared kind
    #[error("failed to parse \"{field}\" as {kind}")]
    FieldParsing { field: String, kind: ValueKind },
    /// Axis whose step does not lead from start to stop
    #[error("faulty axis definition: ({start}, {stop}, {step})")]
    AxisDefinition { start: f64, stop: f64, step: f64 },
    /// Labeled record whose fields could not be interpreted
    #[error("failed to parse \"{0}\" record")]
    LabeledField(&'static str),
    /// Grid row or height level beyond the header dimensions
    #[error("map content exceeds grid dimensions")]
    GridOverflow,
    /// Map concluded without any EPOCH OF CURRENT MAP
    #[error("map {0} has no epoch")]
    MissingEpoch(u32),
    /// Calendar fields that do not describe a valid instant
    #[error("invalid epoch description")]
    InvalidEpoch,
    /// SAO time stamp group does not start with the expected sentinel
    #[error("time stamp sentinel not found")]
    TimeSentinel,
    /// Field group does not hold the expected value
    #[error("group {0} misses expected value")]
    MissingGroupValue(usize),
    /// Data index declares values for a group that has no layout
    #[error("group {0} is not supported")]
    UnsupportedGroup(usize),
    /// Map type that we do not support
    #[error("unknown map kind \"{0}\"")]
    UnknownMapKind(String),
}

/// Errors that may rise in the parsing process
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    /// Input stream ended in the middle of a header, a record or a grid row
    #[error("truncated input: {0}")]
    TruncatedInput(&'static str),
    /// Header section is not usable
    #[error("invalid header: {0}")]
    InvalidHeader(&'static str),
}
