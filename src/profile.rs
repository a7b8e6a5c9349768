//! Station profile
use crate::prelude::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [IonosphericProfile] is the electron density profile
/// of one sounding station, at one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonosphericProfile {
    /// Station latitude (ddeg)
    pub latitude: f64,
    /// Station longitude (ddeg)
    pub longitude: f64,
    /// True heights (km)
    pub altitude: Vec<f64>,
    /// Electron densities (m^-3)
    pub electron_density: Vec<f64>,
    /// Sounding instant
    pub epoch: Epoch,
}

impl IonosphericProfile {
    /// Number of (altitude, density) pairs
    pub fn len(&self) -> usize {
        self.altitude.len().min(self.electron_density.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates (altitude, density) pairs, in ascending record order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.altitude
            .iter()
            .copied()
            .zip(self.electron_density.iter().copied())
    }

    /// Returns (altitude, density) of the density peak
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}
