//! SAO layout: one descriptor per data group
use std::str::FromStr;

use crate::fortran::FieldDescriptor;

/// Number of entries of the data index, that precedes each record.
pub const DATA_INDEX_SIZE: usize = 80;

/// Data index is spread over two lines
pub const DATA_INDEX_FORMAT: &str = "40I3";

/// Number of data groups of one record. The last one has no layout
/// and is always empty.
pub const NB_GROUPS: usize = 57;

/// Data groups layout, in the order they appear within a record
pub const SAO_FORMAT: [&str; 56] = [
    "16F7.3",    // geophysical constants
    "A120",      // system description, operator message
    "120A1",     // time stamp and sounder settings
    "15F8.3",    // scaled characteristics
    "60I2",      // analysis flags
    "16F7.3",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "40I3",
    "40I3",
    "40I3",
    "10E11.6E1",
    "10E11.6E1",
    "10E11.6E1",
    "6E20.12E2",
    "120I1",
    "10E11.6E1",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",
    "40I3",
    "120I1",
    "15F8.3",
    "15F8.3",    // true heights
    "15F8.3",
    "15E8.3E1",  // electron densities
    "120A1",
    "120A1",
    "120I1",     // edit flags
];

lazy_static! {
    /// Decoded layout. The table is constant and valid.
    pub(crate) static ref SAO_DESCRIPTORS: Vec<FieldDescriptor> = SAO_FORMAT
        .iter()
        .map(|token| FieldDescriptor::from_str(token).unwrap())
        .collect();

    pub(crate) static ref DATA_INDEX_DESCRIPTOR: FieldDescriptor =
        FieldDescriptor::from_str(DATA_INDEX_FORMAT).unwrap();
}
