//! Data group
use crate::fortran::FieldValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [FieldGroup] holds all values of one data group, in file order.
/// A group with a null index in the data index is empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldGroup {
    /// Position of this group within the record
    pub index: usize,
    values: Vec<FieldValue>,
}

impl FieldGroup {
    pub(crate) fn new(index: usize, values: Vec<FieldValue>) -> Self {
        Self { index, values }
    }

    /// All decoded values, blanks and zeros included
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Value at given position, if it exists
    pub fn get(&self, nth: usize) -> Option<&FieldValue> {
        self.values.get(nth)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Filtered view: blank and null values are dropped,
    /// order is preserved.
    pub fn present(&self) -> impl Iterator<Item = &FieldValue> + '_ {
        self.values.iter().filter(|value| value.is_present())
    }

    /// Numerical values of the filtered view
    pub fn present_f64(&self) -> Vec<f64> {
        self.present().filter_map(FieldValue::as_f64).collect()
    }
}
