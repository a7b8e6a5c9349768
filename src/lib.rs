#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod fortran;
pub mod ionex;
pub mod linspace;
pub mod profile;
pub mod sao;

mod reader;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        error::{FormatError, ParsingError},
        fortran::{FieldDescriptor, FieldValue, FixedWidthDecoder, ValueKind},
        ionex::{
            Grid, Grid2D, Grid3D, GridDataset, GridMap, IonexHeader, IonexReader, Layer,
            MapKind, MappingFunction,
        },
        linspace::Linspace,
        profile::IonosphericProfile,
        sao::{FieldGroup, IonogramFile, IonogramRecord},
    };

    // pub re-export
    pub use hifitime::{Duration, Epoch};
}
