//! Ionogram record
use std::io::BufRead;

use itertools::Itertools;
use num_integer::div_ceil;

use crate::{
    fortran::{slice, FieldValue, FixedWidthDecoder, ValueKind},
    prelude::{Epoch, FormatError, IonosphericProfile, ParsingError},
    reader::LineReader,
    sao::{
        format::{DATA_INDEX_DESCRIPTOR, DATA_INDEX_SIZE, NB_GROUPS, SAO_DESCRIPTORS},
        FieldGroup,
    },
};

#[cfg(feature = "log")]
use log::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geophysical constants
pub const GEOPHYSICAL_CONSTANTS: usize = 0;
/// Time stamp and sounder settings
pub const TIME_STAMP: usize = 2;
/// True heights (km)
pub const TRUE_HEIGHT: usize = 50;
/// Electron densities (m^-3)
pub const ELECTRON_DENSITY: usize = 52;

/// Time stamp marker
const TIME_SENTINEL: &str = "FF";

/// [IonogramRecord] is one ionogram: every data group of the layout
/// is always present, possibly empty when the data index says so.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonogramRecord {
    data_index: Vec<u32>,
    groups: Vec<FieldGroup>,
}

impl IonogramRecord {
    /// Data index this record was built from: number of values per group
    pub fn data_index(&self) -> &[u32] {
        &self.data_index
    }

    /// Returns [FieldGroup] at given index
    pub fn group(&self, index: usize) -> Option<&FieldGroup> {
        self.groups.get(index)
    }

    /// Iterates over all groups, in record order
    pub fn groups(&self) -> std::slice::Iter<'_, FieldGroup> {
        self.groups.iter()
    }

    /// Decodes the time stamp group.
    /// Blank characters are kept as spaces so fixed offsets remain valid.
    pub fn time(&self) -> Result<Epoch, FormatError> {
        let text = self.groups[TIME_STAMP]
            .values()
            .iter()
            .map(|value| match value {
                FieldValue::Char(s) => s.clone(),
                FieldValue::Absent => " ".to_string(),
                FieldValue::Integer(i) => i.to_string(),
                FieldValue::Real(f) => f.to_string(),
            })
            .join("");

        if !text.starts_with(TIME_SENTINEL) {
            return Err(FormatError::TimeSentinel);
        }

        let field = |start: usize, end: usize| {
            slice(&text, start, end)
                .map(str::trim)
                .and_then(|s| s.parse::<u16>().ok())
                .ok_or(FormatError::InvalidEpoch)
        };
        let calendar = |start: usize, end: usize| {
            field(start, end).and_then(|v| u8::try_from(v).or(Err(FormatError::InvalidEpoch)))
        };

        let year = field(2, 6)? as i32;
        // [6, 9[ is the day of year
        let month = calendar(9, 11)?;
        let day = calendar(11, 13)?;
        let hour = calendar(13, 15)?;
        let minute = calendar(15, 17)?;
        let second = calendar(17, 19)?;

        Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0)
            .or(Err(FormatError::InvalidEpoch))
    }

    /// True height profile (km), null and blank values dropped
    pub fn true_height(&self) -> Vec<f64> {
        self.groups[TRUE_HEIGHT].present_f64()
    }

    /// Electron density profile (m^-3), null and blank values dropped
    pub fn electron_density(&self) -> Vec<f64> {
        self.groups[ELECTRON_DENSITY].present_f64()
    }

    /// Station (latitude, longitude) in degrees.
    /// Raw values: a null coordinate is valid.
    pub fn location(&self) -> Option<(f64, f64)> {
        let group = &self.groups[GEOPHYSICAL_CONSTANTS];
        let latitude = group.get(2)?.as_f64()?;
        let longitude = group.get(3)?.as_f64()?;
        Some((latitude, longitude))
    }

    /// Gathers this station profile
    pub fn profile(&self) -> Result<IonosphericProfile, FormatError> {
        let (latitude, longitude) = self
            .location()
            .ok_or(FormatError::MissingGroupValue(GEOPHYSICAL_CONSTANTS))?;
        Ok(IonosphericProfile {
            latitude,
            longitude,
            altitude: self.true_height(),
            electron_density: self.electron_density(),
            epoch: self.time()?,
        })
    }

    /// Decodes one record: the data index, then each group
    /// over as many lines as its value count requires.
    pub(crate) fn parse<B: BufRead>(reader: &mut LineReader<B>) -> Result<Self, ParsingError> {
        let data_index = Self::parse_data_index(reader)?;

        // lines of groups without layout could not be skipped
        if let Some(index) = data_index
            .iter()
            .enumerate()
            .skip(SAO_DESCRIPTORS.len())
            .find_map(|(index, count)| (*count > 0).then_some(index))
        {
            #[cfg(feature = "log")]
            error!("group {} ({} values) is not supported", index, data_index[index]);
            return Err(FormatError::UnsupportedGroup(index).into());
        }

        let mut groups = Vec::with_capacity(NB_GROUPS);
        for (index, descriptor) in SAO_DESCRIPTORS.iter().enumerate() {
            let count = data_index[index] as usize;
            let nb_lines = div_ceil(count, descriptor.repeat);

            let decoder = FixedWidthDecoder::new(*descriptor);
            let mut values = Vec::with_capacity(nb_lines * descriptor.repeat);
            for _ in 0..nb_lines {
                let line = reader.require_line("field group").map_err(|e| {
                    #[cfg(feature = "log")]
                    error!("group {} ended prematurely", index);
                    e
                })?;
                values.extend(decoder.decode(&line)?);
            }
            groups.push(FieldGroup::new(index, values));
        }

        for index in groups.len()..NB_GROUPS {
            groups.push(FieldGroup::new(index, Vec::new()));
        }

        Ok(Self { data_index, groups })
    }

    fn parse_data_index<B: BufRead>(reader: &mut LineReader<B>) -> Result<Vec<u32>, ParsingError> {
        let decoder = FixedWidthDecoder::new(*DATA_INDEX_DESCRIPTOR);
        let mut data_index = Vec::with_capacity(DATA_INDEX_SIZE);

        while data_index.len() < DATA_INDEX_SIZE {
            let line = reader.require_line("data index")?;
            for value in decoder.decode(&line)? {
                let count = value
                    .as_i64()
                    .and_then(|i| u32::try_from(i).ok())
                    .ok_or_else(|| FormatError::FieldParsing {
                        field: value.as_i64().map(|i| i.to_string()).unwrap_or_default(),
                        kind: ValueKind::Integer,
                    })?;
                data_index.push(count);
            }
        }

        Ok(data_index)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::BufReader;

    fn index_lines(counts: &[(usize, u32)]) -> String {
        let mut index = [0_u32; DATA_INDEX_SIZE];
        for (group, count) in counts {
            index[*group] = *count;
        }
        let mut content = String::new();
        for line in index.chunks(40) {
            for count in line {
                content.push_str(&format!("{:3}", count));
            }
            content.push('\n');
        }
        content
    }

    #[test]
    fn data_index() {
        let content = index_lines(&[(0, 4), (50, 3)]);
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        let index = IonogramRecord::parse_data_index(&mut reader).unwrap();
        assert_eq!(index.len(), DATA_INDEX_SIZE);
        assert_eq!(index[0], 4);
        assert_eq!(index[50], 3);
        assert_eq!(index.iter().sum::<u32>(), 7);
    }

    #[test]
    fn faulty_data_index() {
        let mut content = index_lines(&[]);
        content.replace_range(0..3, " -1");
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        assert!(matches!(
            IonogramRecord::parse_data_index(&mut reader),
            Err(ParsingError::Format(FormatError::FieldParsing { .. }))
        ));

        let content = "  1  2  3\n";
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        assert!(matches!(
            IonogramRecord::parse_data_index(&mut reader),
            Err(ParsingError::Format(FormatError::FieldParsing { .. }))
        ));

        let content = index_lines(&[]);
        let first_line = content.lines().next().unwrap();
        let mut reader = LineReader::new(BufReader::new(first_line.as_bytes()));
        assert!(matches!(
            IonogramRecord::parse_data_index(&mut reader),
            Err(ParsingError::TruncatedInput("data index"))
        ));
    }

    #[test]
    fn time_stamp() {
        let mut content = index_lines(&[(2, 19)]);
        content.push_str("FF20170020102143005\n");
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        let record = IonogramRecord::parse(&mut reader).unwrap();
        assert_eq!(
            record.time(),
            Ok(Epoch::from_gregorian_utc(2017, 1, 2, 14, 30, 5, 0))
        );
        let group = record.group(TIME_STAMP).unwrap();
        assert_eq!(group.len(), 120);
        assert_eq!(group.values()[18], FieldValue::Char("5".to_string()));
        assert!(group.values()[19].is_absent());

        let mut content = index_lines(&[(2, 19)]);
        content.push_str("EE20170020102143005\n");
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        let record = IonogramRecord::parse(&mut reader).unwrap();
        assert_eq!(record.time(), Err(FormatError::TimeSentinel));

        let mut content = index_lines(&[(2, 19)]);
        content.push_str("FF20170021302143005\n");
        let mut reader = LineReader::new(BufReader::new(content.as_bytes()));
        let record = IonogramRecord::parse(&mut reader).unwrap();
        assert_eq!(record.time(), Err(FormatError::InvalidEpoch));
    }
}
