//! IONEX (IONosphere map EXchange) global TEC maps.
//!
//! ```no_run
//! use iondata::prelude::*;
//!
//! let dataset = IonexReader::new(MapKind::Tec)
//!     .from_file("CKMG0020.22I")
//!     .unwrap();
//!
//! for (epoch, map) in dataset.iter() {
//!     for (height, layer) in map.grid.heights().iter().zip(map.grid.layers()) {
//!         for (lat_row, tec_row) in layer.latitude.iter().zip(layer.data.iter()) {
//!             // co-indexed latitude / TEC rows
//!         }
//!     }
//! }
//! ```
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use strum::EnumString;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    fortran::slice,
    prelude::{Duration, Epoch, FormatError, ParsingError},
    reader::LineReader,
};

mod grid;
mod header;
mod record;

pub use grid::{Grid, Grid2D, Grid3D, GridMap, Layer};
pub use header::IonexHeader;
pub use record::GridDataset;

/// Type of map to decode
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapKind {
    /// Total Electron Content maps
    #[default]
    #[strum(serialize = "TEC")]
    Tec,
    /// Height maps
    #[strum(serialize = "HEIGHT")]
    Height,
}

impl MapKind {
    /// Builds [MapKind] from host marker string, RMS maps are not supported.
    pub fn from_marker(marker: &str) -> Result<Self, FormatError> {
        Self::from_str(marker.trim()).or(Err(FormatError::UnknownMapKind(marker.to_string())))
    }
    pub(crate) fn start_label(&self) -> String {
        format!("START OF {} MAP", self)
    }
    pub(crate) fn end_label(&self) -> String {
        format!("END OF {} MAP", self)
    }
}

/// Mapping function used in when determining this IONEX
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MappingFunction {
    /// 1/cos(z)
    #[strum(serialize = "COSZ")]
    CosZ,
    /// Q-factor
    #[strum(serialize = "QFAC")]
    QFac,
}

/// [IonexReader] decodes one IONEX file into a [GridDataset],
/// gathering the maps of the selected [MapKind].
#[derive(Debug, Copy, Clone, Default)]
pub struct IonexReader {
    kind: MapKind,
}

impl IonexReader {
    pub fn new(kind: MapKind) -> Self {
        Self { kind }
    }

    /// Selected [MapKind]
    pub fn kind(&self) -> MapKind {
        self.kind
    }

    /// Parses [GridDataset] from any readable interface.
    /// Header must be valid for the body to be decoded.
    pub fn parse<R: Read>(&self, reader: R) -> Result<GridDataset, ParsingError> {
        let mut reader = LineReader::new(BufReader::new(reader));
        let header = IonexHeader::parse(&mut reader)?;
        GridDataset::parse(header, self.kind, &mut reader)
    }

    /// Parses [GridDataset] from local readable file.
    /// See [Self::from_gzip_file] for seamless Gzip support.
    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<GridDataset, ParsingError> {
        let fd = File::open(path)?;
        self.parse(fd)
    }

    /// Parses [GridDataset] from local gzip compressed file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(&self, path: P) -> Result<GridDataset, ParsingError> {
        let fd = File::open(path)?;
        self.parse(GzDecoder::new(fd))
    }
}

/// Splits one line into (content, label).
/// Label occupies columns 60 and beyond.
pub(crate) fn split_label(line: &str) -> (&str, &str) {
    let content = slice(line, 0, 60).unwrap_or(line);
    let label = line.get(60..).unwrap_or("").trim();
    (content, label)
}

/// Parses the [start, end[ columns of a labeled record
pub(crate) fn parse_field<T: FromStr>(
    content: &str,
    start: usize,
    end: usize,
    label: &'static str,
) -> Result<T, FormatError> {
    slice(content, start, end)
        .map(str::trim)
        .and_then(|field| field.parse::<T>().ok())
        .ok_or(FormatError::LabeledField(label))
}

/// Parses six 6-wide calendar fields (UTC).
/// Hour 24 designates midnight of the following day.
pub(crate) fn parse_epoch(content: &str) -> Result<Epoch, FormatError> {
    let mut fields = [0_i32; 6];
    for (nth, field) in fields.iter_mut().enumerate() {
        *field = slice(content, nth * 6, (nth + 1) * 6)
            .map(str::trim)
            .and_then(|s| s.parse::<i32>().ok())
            .ok_or(FormatError::InvalidEpoch)?;
    }
    let [y, m, d, hh, mm, ss] = fields;

    let calendar = |v: i32| u8::try_from(v).or(Err(FormatError::InvalidEpoch));

    let (hh, next_day) = if hh == 24 { (0, true) } else { (hh, false) };

    let epoch = Epoch::maybe_from_gregorian_utc(
        y,
        calendar(m)?,
        calendar(d)?,
        calendar(hh)?,
        calendar(mm)?,
        calendar(ss)?,
        0,
    )
    .or(Err(FormatError::InvalidEpoch))?;

    if next_day {
        Ok(epoch + Duration::from_days(1.0))
    } else {
        Ok(epoch)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn map_kinds() {
        assert_eq!(MapKind::from_marker("TEC"), Ok(MapKind::Tec));
        assert_eq!(MapKind::from_marker("HEIGHT"), Ok(MapKind::Height));
        assert_eq!(
            MapKind::from_marker("RMS"),
            Err(FormatError::UnknownMapKind("RMS".to_string()))
        );
        assert_eq!(MapKind::Tec.start_label(), "START OF TEC MAP");
        assert_eq!(MapKind::Height.end_label(), "END OF HEIGHT MAP");
    }
    #[test]
    fn labels() {
        let line = "     1                                                      START OF TEC MAP    ";
        let (content, label) = split_label(line);
        assert_eq!(label, "START OF TEC MAP");
        assert_eq!(content.len(), 60);
        assert_eq!(parse_field::<u32>(content, 0, 6, "START OF TEC MAP"), Ok(1));

        let (content, label) = split_label("   33   33   32");
        assert_eq!(label, "");
        assert_eq!(content, "   33   33   32");
    }
    #[test]
    fn epochs() {
        let epoch = parse_epoch("  2017     1     1     2    30    15").unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc(2017, 1, 1, 2, 30, 15, 0));

        let epoch = parse_epoch("  2017     1     1    24     0     0").unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_at_midnight(2017, 1, 2));

        assert_eq!(
            parse_epoch("  2017    13     1     0     0     0"),
            Err(FormatError::InvalidEpoch)
        );
        assert_eq!(parse_epoch("  2017     1"), Err(FormatError::InvalidEpoch));
    }
}
