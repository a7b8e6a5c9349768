//! SAO (Standard Archiving Output) ionogram records.
//!
//! ```no_run
//! use iondata::prelude::*;
//!
//! let sao = IonogramFile::from_file("BP440_20170102.SAO")
//!     .unwrap();
//!
//! for record in sao.iter() {
//!     let profile = record.profile()
//!         .unwrap();
//!     for (altitude, density) in profile.iter() {
//!         // electron density (m^-3) at altitude (km)
//!     }
//! }
//! ```
use std::{
    fs::File,
    io::{BufReader, Read},
    ops::Index,
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{prelude::ParsingError, reader::LineReader};

pub mod format;

mod group;
mod record;

pub use group::FieldGroup;
pub use record::{IonogramRecord, ELECTRON_DENSITY, GEOPHYSICAL_CONSTANTS, TIME_STAMP, TRUE_HEIGHT};

/// [IonogramFile] gathers all records of one SAO file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonogramFile {
    records: Vec<IonogramRecord>,
}

impl IonogramFile {
    /// Parses [IonogramFile] from any readable interface.
    /// Records are decoded one after the other until input is exhausted,
    /// the first faulty record aborts the whole process.
    pub fn parse<R: Read>(reader: R) -> Result<Self, ParsingError> {
        let mut reader = LineReader::new(BufReader::new(reader));
        let mut records = Vec::new();

        while !reader.is_exhausted()? {
            let record = IonogramRecord::parse(&mut reader)?;
            #[cfg(feature = "log")]
            debug!(
                "record #{} ended at line {}",
                records.len(),
                reader.line_number()
            );
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Parses [IonogramFile] from local readable file.
    /// See [Self::from_gzip_file] for seamless Gzip support.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        Self::parse(fd)
    }

    /// Parses [IonogramFile] from local gzip compressed file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        Self::parse(GzDecoder::new(fd))
    }

    /// Returns [IonogramRecord] at given position
    pub fn get(&self, nth: usize) -> Option<&IonogramRecord> {
        self.records.get(nth)
    }

    /// Iterates records in file order
    pub fn iter(&self) -> std::slice::Iter<'_, IonogramRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Index<usize> for IonogramFile {
    type Output = IonogramRecord;
    fn index(&self, nth: usize) -> &Self::Output {
        &self.records[nth]
    }
}

impl<'a> IntoIterator for &'a IonogramFile {
    type Item = &'a IonogramRecord;
    type IntoIter = std::slice::Iter<'a, IonogramRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
