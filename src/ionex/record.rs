//! IONEX body: time indexed maps
use std::{
    collections::{btree_map::Iter, BTreeMap},
    io::BufRead,
};

use num_integer::div_ceil;

use crate::{
    fortran::ValueKind,
    ionex::{parse_epoch, parse_field, split_label, Grid, GridMap, IonexHeader, MapKind},
    linspace::Linspace,
    prelude::{Epoch, FormatError, ParsingError},
    reader::LineReader,
};

#[cfg(feature = "log")]
use log::{debug, error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximal number of values per line
const VALUES_PER_LINE: usize = 16;

/// [GridDataset] gathers all maps of one IONEX file, sorted by [Epoch].
///
/// NB: two maps sharing the same [Epoch] are not merged,
/// the latter one replaces the former.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridDataset {
    /// Dataset wide definitions
    pub header: IonexHeader,
    maps: BTreeMap<Epoch, GridMap>,
}

impl GridDataset {
    /// Returns [GridMap] at given [Epoch]
    pub fn get(&self, epoch: &Epoch) -> Option<&GridMap> {
        self.maps.get(epoch)
    }

    /// Returns earliest [GridMap]
    pub fn first(&self) -> Option<&GridMap> {
        self.maps.values().next()
    }

    /// Iterates over all [Epoch]s, in chronological order
    pub fn epochs(&self) -> impl Iterator<Item = Epoch> + '_ {
        self.maps.keys().copied()
    }

    /// Iterates over all maps, in chronological order
    pub fn iter(&self) -> Iter<'_, Epoch, GridMap> {
        self.maps.iter()
    }

    /// Number of maps
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Decodes the body section, gathering maps of given [MapKind].
    /// Stops on `START OF RMS MAP` or end of input.
    pub(crate) fn parse<B: BufRead>(
        header: IonexHeader,
        kind: MapKind,
        reader: &mut LineReader<B>,
    ) -> Result<Self, ParsingError> {
        let mut assembler = Assembler::new(&header, kind);
        let mut maps = BTreeMap::<Epoch, GridMap>::new();

        while let Some(line) = reader.next_line()? {
            let (content, label) = split_label(&line);

            if label == "START OF RMS MAP" {
                break;
            } else if label == assembler.start_label {
                assembler.start(content)?;
            } else if label == "EPOCH OF CURRENT MAP" {
                assembler.epoch(content)?;
            } else if label == "LAT/LON1/LON2/DLON/H" {
                let row = RowHeader::parse(content)?;
                assembler.row(row, reader)?;
            } else if label == assembler.end_label {
                if let Some(map) = assembler.end()? {
                    #[cfg(feature = "log")]
                    debug!("{} - map #{}", map.epoch, map.number);
                    maps.insert(map.epoch, map);
                }
            } else if label == "EXPONENT" {
                assembler.exponent = parse_field(content, 0, 6, "EXPONENT")?;
            }
        }

        if assembler.pending.is_some() {
            #[cfg(feature = "log")]
            error!("end of input within a map");
            return Err(ParsingError::TruncatedInput("map"));
        }

        Ok(Self { header, maps })
    }
}

/// `LAT/LON1/LON2/DLON/H` record
#[derive(Debug, Clone, PartialEq)]
struct RowHeader {
    latitude: f64,
    longitude: Linspace,
    height: f64,
}

impl RowHeader {
    fn parse(content: &str) -> Result<Self, FormatError> {
        const LABEL: &str = "LAT/LON1/LON2/DLON/H";
        let latitude = parse_field(content, 2, 8, LABEL)?;
        let lon1 = parse_field(content, 8, 14, LABEL)?;
        let lon2 = parse_field(content, 14, 20, LABEL)?;
        let dlon = parse_field(content, 20, 26, LABEL)?;
        let height = parse_field(content, 26, 32, LABEL)?;
        Ok(Self {
            latitude,
            longitude: Linspace::new(lon1, lon2, dlon)?,
            height,
        })
    }
}

/// Map being assembled
#[derive(Debug)]
struct PendingMap {
    number: u32,
    epoch: Option<Epoch>,
    grid: Grid,
    height: Option<f64>,
}

/// Forward only state machine, that assembles maps row by row.
/// Height index is preserved from one map to the next:
/// 3D maps fill one height level per map block.
struct Assembler<'a> {
    header: &'a IonexHeader,
    start_label: String,
    end_label: String,
    exponent: i8,
    pending: Option<PendingMap>,
    lat_index: usize,
    height_index: usize,
}

impl<'a> Assembler<'a> {
    fn new(header: &'a IonexHeader, kind: MapKind) -> Self {
        Self {
            header,
            start_label: kind.start_label(),
            end_label: kind.end_label(),
            exponent: header.exponent,
            pending: None,
            lat_index: 0,
            height_index: 0,
        }
    }

    fn start(&mut self, content: &str) -> Result<(), FormatError> {
        let number = parse_field(content, 0, 6, "START OF MAP")?;

        let rows = self.header.latitude.length();
        let columns = self.header.longitude.length();

        let grid = if self.header.is_3d() {
            Grid::new_3d(self.header.height_levels(), rows, columns)
        } else {
            Grid::new_2d(rows, columns)
        };

        #[cfg(feature = "log")]
        if let Some(pending) = &self.pending {
            error!("map #{} was not terminated", pending.number);
        }

        self.pending = Some(PendingMap {
            number,
            epoch: None,
            grid,
            height: None,
        });
        self.lat_index = 0;
        Ok(())
    }

    fn epoch(&mut self, content: &str) -> Result<(), FormatError> {
        if let Some(pending) = &mut self.pending {
            pending.epoch = Some(parse_epoch(content)?);
        }
        Ok(())
    }

    /// Reads the values of one latitude row, that span
    /// as many lines as needed, 16 values per line.
    fn row<B: BufRead>(
        &mut self,
        row: RowHeader,
        reader: &mut LineReader<B>,
    ) -> Result<(), ParsingError> {
        let pending = match &mut self.pending {
            Some(pending) => pending,
            None => return Ok(()),
        };

        let columns = row.longitude.length();
        let nb_lines = div_ceil(columns, VALUES_PER_LINE);
        let scaling = 10.0_f64.powi(self.exponent as i32);

        let mut data = Vec::<f64>::with_capacity(columns);
        for _ in 0..nb_lines {
            let line = reader.require_line("grid row")?;
            for item in line.split_ascii_whitespace() {
                let value = item
                    .parse::<i64>()
                    .map_err(|_| FormatError::FieldParsing {
                        field: item.to_string(),
                        kind: ValueKind::Integer,
                    })?;
                data.push(value as f64 * scaling);
            }
        }

        data.resize(columns, f64::NAN);

        let longitude = row.longitude.values().collect::<Vec<_>>();

        pending
            .grid
            .layer_mut(self.height_index)?
            .set_row(self.lat_index, row.latitude, longitude, data)?;

        pending.height = Some(row.height);
        self.lat_index += 1;
        Ok(())
    }

    /// Concludes current map, if any
    fn end(&mut self) -> Result<Option<GridMap>, FormatError> {
        let mut pending = match self.pending.take() {
            Some(pending) => pending,
            None => return Ok(None),
        };

        let height = match pending.height {
            Some(height) => height,
            None => self
                .header
                .height
                .values()
                .nth(self.height_index)
                .unwrap_or(self.header.height.start),
        };

        pending.grid.set_height(self.height_index, height)?;

        self.lat_index = 0;
        if self.header.is_3d() {
            self.height_index += 1;
            if self.height_index == self.header.height_levels() {
                self.height_index = 0;
            }
        }

        let epoch = pending
            .epoch
            .ok_or(FormatError::MissingEpoch(pending.number))?;

        Ok(Some(GridMap {
            number: pending.number,
            epoch,
            grid: pending.grid,
        }))
    }
}
