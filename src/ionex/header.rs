//! IONEX header section
use std::{io::BufRead, str::FromStr};

use crate::{
    ionex::{parse_epoch, parse_field, split_label, MappingFunction},
    linspace::Linspace,
    prelude::{Duration, Epoch, FormatError, ParsingError},
    reader::LineReader,
};

#[cfg(feature = "log")]
use log::{debug, error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximal number of points of one map
const MAX_GRID_POINTS: usize = 10_000_000;

/// IONEX dataset wide definitions, as described by the header section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonexHeader {
    /// IONEX revision
    pub version: f32,
    /// Time interval between two maps
    pub interval: Duration,
    /// Minimum elevation angle filter used. In degrees.
    pub elevation_cutoff: f64,
    /// Maps dimension, can either be a 2D (= fixed altitude mode), or 3D
    pub map_dimension: u8,
    /// exponent: scaling to apply to TEC values
    pub exponent: i8,
    /// Latitude grid, in degrees
    pub latitude: Linspace,
    /// Longitude grid, in degrees
    pub longitude: Linspace,
    /// Altitude grid, in km. Single point for 2D maps.
    pub height: Linspace,
    /// Mean earth radius or bottom of height grid, in km.
    pub base_radius: f64,
    /// Mapping function adopted for TEC determination,
    /// if None: No mapping function, e.g altimetry
    pub mapping: Option<MappingFunction>,
    /// Epoch of first map
    pub epoch_of_first_map: Option<Epoch>,
    /// Epoch of last map
    pub epoch_of_last_map: Option<Epoch>,
    /// Number of maps announced
    pub number_of_maps: Option<u32>,
    /// Number of stations that contributed to following data
    pub nb_stations: Option<u32>,
    /// Number of satellites that contributed to following data
    pub nb_satellites: Option<u32>,
    /// Brief description of the technique, model..
    pub description: Option<String>,
    /// Verbose description of observables used in determination.
    pub observables: Option<String>,
    /// Comments found in header section
    pub comments: Vec<String>,
}

impl Default for IonexHeader {
    fn default() -> Self {
        Self {
            version: 1.0,
            interval: Duration::ZERO,
            elevation_cutoff: 0.0,
            // 2D by default
            map_dimension: 2,
            // default exponent value
            // this is very important: it allows to support
            // the parsing of IONEX that omit the exponent
            exponent: -1,
            latitude: Linspace::default(),
            longitude: Linspace::default(),
            height: Linspace::default(),
            // Standard Earth radius [km]
            base_radius: 6371.0,
            mapping: None,
            epoch_of_first_map: None,
            epoch_of_last_map: None,
            number_of_maps: None,
            nb_stations: None,
            nb_satellites: None,
            description: None,
            observables: None,
            comments: Vec::new(),
        }
    }
}

impl IonexHeader {
    /// Returns true if this header describes 2D maps
    pub fn is_2d(&self) -> bool {
        self.map_dimension == 2
    }

    /// Returns true if this header describes 3D maps
    pub fn is_3d(&self) -> bool {
        self.map_dimension == 3
    }

    /// Number of height levels of each map (1 for 2D maps)
    pub fn height_levels(&self) -> usize {
        if self.is_3d() {
            self.height.length()
        } else {
            1
        }
    }

    /// Scaling to apply to the raw values
    pub fn scaling(&self) -> f64 {
        10.0_f64.powi(self.exponent as i32)
    }

    /// Parses [IonexHeader] by consuming lines until `END OF HEADER`.
    /// First line must be the `IONEX VERSION / TYPE` record.
    pub(crate) fn parse<B: BufRead>(reader: &mut LineReader<B>) -> Result<Self, ParsingError> {
        let mut header = Self::default();

        let mut first_line = true;
        let mut latitude = Option::<Linspace>::None;
        let mut longitude = Option::<Linspace>::None;
        let mut height = Option::<Linspace>::None;

        while let Some(line) = reader.next_line()? {
            let (content, label) = split_label(&line);

            if first_line {
                if label != "IONEX VERSION / TYPE" {
                    #[cfg(feature = "log")]
                    error!("not an IONEX file: \"{}\"", line);
                    return Err(ParsingError::InvalidHeader("missing IONEX VERSION / TYPE"));
                }
                // blank or unusual revision: keep the default one
                if let Ok(version) = parse_field(content, 0, 20, "IONEX VERSION / TYPE") {
                    header.version = version;
                }
                first_line = false;
                continue;
            }

            match label {
                "INTERVAL" => {
                    let seconds: i64 = parse_field(content, 0, 6, "INTERVAL")?;
                    header.interval = Duration::from_seconds(seconds as f64);
                },
                "ELEVATION CUTOFF" => {
                    header.elevation_cutoff = parse_field(content, 0, 8, "ELEVATION CUTOFF")?;
                },
                "MAP DIMENSION" => {
                    header.map_dimension = parse_field(content, 0, 6, "MAP DIMENSION")?;
                },
                "EXPONENT" => {
                    header.exponent = parse_field(content, 0, 6, "EXPONENT")?;
                },
                "HGT1 / HGT2 / DHGT" => {
                    let (start, end, spacing) = parse_axis(content, "HGT1 / HGT2 / DHGT")?;
                    height = if spacing > 0.0 {
                        Some(Linspace::new(start, end, spacing)?)
                    } else {
                        Some(Linspace::single_point(start))
                    };
                },
                "LAT1 / LAT2 / DLAT" => {
                    let (start, end, spacing) = parse_axis(content, "LAT1 / LAT2 / DLAT")?;
                    latitude = Some(Linspace::new(start, end, spacing)?);
                },
                "LON1 / LON2 / DLON" => {
                    let (start, end, spacing) = parse_axis(content, "LON1 / LON2 / DLON")?;
                    longitude = Some(Linspace::new(start, end, spacing)?);
                },
                "BASE RADIUS" => {
                    header.base_radius = parse_field(content, 0, 8, "BASE RADIUS")?;
                },
                "MAPPING FUNCTION" => {
                    let mapf = content.trim();
                    header.mapping = match mapf {
                        "NONE" | "" => None,
                        _ => Some(
                            MappingFunction::from_str(mapf)
                                .or(Err(FormatError::LabeledField("MAPPING FUNCTION")))?,
                        ),
                    };
                },
                "EPOCH OF FIRST MAP" => {
                    header.epoch_of_first_map = Some(parse_epoch(content)?);
                },
                "EPOCH OF LAST MAP" => {
                    header.epoch_of_last_map = Some(parse_epoch(content)?);
                },
                "# OF MAPS IN FILE" => {
                    header.number_of_maps = Some(parse_field(content, 0, 6, "# OF MAPS IN FILE")?);
                },
                "# OF STATIONS" => {
                    header.nb_stations = Some(parse_field(content, 0, 6, "# OF STATIONS")?);
                },
                "# OF SATELLITES" => {
                    header.nb_satellites = Some(parse_field(content, 0, 6, "# OF SATELLITES")?);
                },
                "DESCRIPTION" => {
                    let desc = content.trim();
                    if let Some(ref mut d) = header.description {
                        d.push(' ');
                        d.push_str(desc);
                    } else {
                        header.description = Some(desc.to_string());
                    }
                },
                "OBSERVABLES USED" => {
                    let observables = content.trim();
                    if !observables.is_empty() {
                        header.observables = Some(observables.to_string());
                    }
                },
                "COMMENT" => {
                    header.comments.push(content.trim_end().to_string());
                },
                "END OF HEADER" => {
                    header.latitude =
                        latitude.ok_or(ParsingError::InvalidHeader("missing LAT1 / LAT2 / DLAT"))?;
                    header.longitude = longitude
                        .ok_or(ParsingError::InvalidHeader("missing LON1 / LON2 / DLON"))?;
                    match header.map_dimension {
                        2 => {
                            header.height = height.unwrap_or_default();
                        },
                        3 => {
                            header.height = height
                                .ok_or(ParsingError::InvalidHeader("missing HGT1 / HGT2 / DHGT"))?;
                        },
                        _ => {
                            return Err(ParsingError::InvalidHeader("unsupported MAP DIMENSION"));
                        },
                    }
                    let points = header
                        .height_levels()
                        .checked_mul(header.latitude.length())
                        .and_then(|n| n.checked_mul(header.longitude.length()));
                    if !matches!(points, Some(n) if n <= MAX_GRID_POINTS) {
                        return Err(ParsingError::InvalidHeader("grid too large"));
                    }
                    #[cfg(feature = "log")]
                    debug!(
                        "ionex header: {}D, {}x{}x{} grid, exponent {}",
                        header.map_dimension,
                        header.height_levels(),
                        header.latitude.length(),
                        header.longitude.length(),
                        header.exponent
                    );
                    return Ok(header);
                },
                _ => {},
            }
        }

        if first_line {
            Err(ParsingError::InvalidHeader("missing IONEX VERSION / TYPE"))
        } else {
            Err(ParsingError::InvalidHeader("missing END OF HEADER"))
        }
    }
}

/// Parses (start, end, spacing) axis definition
fn parse_axis(content: &str, label: &'static str) -> Result<(f64, f64, f64), FormatError> {
    let start = parse_field(content, 2, 8, label)?;
    let end = parse_field(content, 8, 14, label)?;
    let spacing = parse_field(content, 14, 20, label)?;
    Ok((start, end, spacing))
}
