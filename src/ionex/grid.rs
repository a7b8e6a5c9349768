//! Ionosphere maps
use crate::prelude::{Epoch, FormatError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Layer] is one isosurface of a map: three co-indexed
/// arrays of `[latitude row][longitude column]`.
/// Latitude is repeated on each column for the convenience
/// of rendering.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layer {
    /// Latitude of each point (ddeg)
    pub latitude: Vec<Vec<f64>>,
    /// Longitude of each point (ddeg)
    pub longitude: Vec<Vec<f64>>,
    /// Scaled values
    pub data: Vec<Vec<f64>>,
}

impl Layer {
    /// Builds a null [Layer] of `rows` latitudes by `columns` longitudes
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        Self {
            latitude: vec![vec![0.0; columns]; rows],
            longitude: vec![vec![0.0; columns]; rows],
            data: vec![vec![0.0; columns]; rows],
        }
    }

    /// Number of latitude rows
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Value at given (row, column), if it exists
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row)?.get(column).copied()
    }

    /// Replaces one latitude row. Each row has its own longitude count.
    pub(crate) fn set_row(
        &mut self,
        row: usize,
        latitude: f64,
        longitude: Vec<f64>,
        data: Vec<f64>,
    ) -> Result<(), FormatError> {
        if row >= self.rows() {
            return Err(FormatError::GridOverflow);
        }
        self.latitude[row] = vec![latitude; data.len()];
        self.longitude[row] = longitude;
        self.data[row] = data;
        Ok(())
    }
}

/// Map at fixed altitude
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid2D {
    /// Fixed altitude (km)
    pub height: f64,
    pub layer: Layer,
}

/// Map spanning several altitudes
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid3D {
    /// Altitude of each layer (km)
    pub heights: Vec<f64>,
    /// One [Layer] per altitude
    pub layers: Vec<Layer>,
}

/// [Grid] is either 2D or 3D. Both are browsed
/// the same way, as a list of layers with their altitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grid {
    Grid2D(Grid2D),
    Grid3D(Grid3D),
}

impl Grid {
    /// Builds a null 2D grid
    pub(crate) fn new_2d(rows: usize, columns: usize) -> Self {
        Self::Grid2D(Grid2D {
            height: 0.0,
            layer: Layer::new(rows, columns),
        })
    }

    /// Builds a null 3D grid
    pub(crate) fn new_3d(levels: usize, rows: usize, columns: usize) -> Self {
        Self::Grid3D(Grid3D {
            heights: vec![0.0; levels],
            layers: vec![Layer::new(rows, columns); levels],
        })
    }

    /// Returns 2 or 3
    pub fn dimension(&self) -> u8 {
        match self {
            Self::Grid2D(_) => 2,
            Self::Grid3D(_) => 3,
        }
    }

    /// Altitude of each layer (km)
    pub fn heights(&self) -> &[f64] {
        match self {
            Self::Grid2D(grid) => std::slice::from_ref(&grid.height),
            Self::Grid3D(grid) => &grid.heights,
        }
    }

    /// All layers, shaped `[height][latitude][longitude]`
    pub fn layers(&self) -> &[Layer] {
        match self {
            Self::Grid2D(grid) => std::slice::from_ref(&grid.layer),
            Self::Grid3D(grid) => &grid.layers,
        }
    }

    /// Returns [Layer] at given height index
    pub fn layer(&self, level: usize) -> Option<&Layer> {
        self.layers().get(level)
    }

    /// Returns value at given (height, latitude, longitude) indexes
    pub fn value(&self, level: usize, row: usize, column: usize) -> Option<f64> {
        self.layer(level)?.value(row, column)
    }

    pub(crate) fn layer_mut(&mut self, level: usize) -> Result<&mut Layer, FormatError> {
        match self {
            Self::Grid2D(grid) => Ok(&mut grid.layer),
            Self::Grid3D(grid) => grid.layers.get_mut(level).ok_or(FormatError::GridOverflow),
        }
    }

    pub(crate) fn set_height(&mut self, level: usize, height: f64) -> Result<(), FormatError> {
        match self {
            Self::Grid2D(grid) => {
                grid.height = height;
                Ok(())
            },
            Self::Grid3D(grid) => {
                let h = grid.heights.get_mut(level).ok_or(FormatError::GridOverflow)?;
                *h = height;
                Ok(())
            },
        }
    }
}

/// [GridMap] is one time stamped snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridMap {
    /// Map number, as found in the START OF MAP record
    pub number: u32,
    /// Epoch of current map
    pub epoch: Epoch,
    pub grid: Grid,
}

impl GridMap {
    /// Returns 2 or 3
    pub fn dimension(&self) -> u8 {
        self.grid.dimension()
    }
}
