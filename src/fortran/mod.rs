//! Fortran style fixed width fields, as found in SAO files.
//!
//! A [FieldDescriptor] is parsed from compact tokens like `16F7.3`,
//! then a [FixedWidthDecoder] converts one line into `repeat` [FieldValue]s:
//!
//! ```
//! use std::str::FromStr;
//! use iondata::fortran::{FieldDescriptor, FieldValue, FixedWidthDecoder};
//!
//! let descriptor = FieldDescriptor::from_str("3I3").unwrap();
//! let values = FixedWidthDecoder::new(descriptor)
//!     .decode("  1 12")
//!     .unwrap();
//! assert_eq!(values, vec![
//!     FieldValue::Integer(1),
//!     FieldValue::Integer(12),
//!     FieldValue::Absent,
//! ]);
//! ```
mod decoder;
mod descriptor;

pub use decoder::{FieldValue, FixedWidthDecoder};
pub use descriptor::{FieldDescriptor, ValueKind};

pub(crate) use decoder::slice;
