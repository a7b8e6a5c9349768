//! Compact edit descriptors, like `16F7.3`, `10E11.6E1` or `120A1`
use std::{fmt::Display, str::FromStr};

use regex::Regex;

use crate::prelude::FormatError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `[repeat]kind width[.precision][Eexponent]`
    static ref DESCRIPTOR: Regex =
        Regex::new(r"^(\d{0,3})([AEFI])(\d+)(?:\.(\d+))?(?:E(\d+))?$").unwrap();
}

/// Kind of value a field holds
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// `F`: fixed decimal
    Float,
    /// `E`: scientific notation, with explicit exponent field
    Scientific,
    /// `I`: integer
    Integer,
    /// `A`: characters
    Character,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Scientific => write!(f, "scientific float"),
            Self::Integer => write!(f, "integer"),
            Self::Character => write!(f, "character"),
        }
    }
}

impl ValueKind {
    fn from_letter(c: &str) -> Option<Self> {
        match c {
            "F" => Some(Self::Float),
            "E" => Some(Self::Scientific),
            "I" => Some(Self::Integer),
            "A" => Some(Self::Character),
            _ => None,
        }
    }
    fn letter(&self) -> char {
        match self {
            Self::Float => 'F',
            Self::Scientific => 'E',
            Self::Integer => 'I',
            Self::Character => 'A',
        }
    }
}

/// [FieldDescriptor] describes how one line is split into
/// `repeat` fields of identical `width` and [ValueKind].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDescriptor {
    /// Number of fields per line, at least 1
    pub repeat: usize,
    /// Kind of value
    pub kind: ValueKind,
    /// Characters per field
    pub width: usize,
    /// Digits after the decimal point, when specified
    pub precision: Option<u32>,
    /// Digits of the exponent (E descriptors only)
    pub exponent: Option<u32>,
}

impl FieldDescriptor {
    /// Number of characters a complete line occupies
    pub fn line_width(&self) -> usize {
        self.repeat * self.width
    }
}

impl FromStr for FieldDescriptor {
    type Err = FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FormatError::UnknownDescriptor(s.to_string());
        let token = s.trim().to_ascii_uppercase();
        let caps = DESCRIPTOR.captures(&token).ok_or_else(unknown)?;

        let kind = ValueKind::from_letter(&caps[2]).ok_or_else(unknown)?;

        let repeat = match &caps[1] {
            "" => 1,
            digits => digits.parse::<usize>().map_err(|_| unknown())?,
        };
        if repeat == 0 {
            return Err(unknown());
        }

        let width = caps[3].parse::<usize>().map_err(|_| unknown())?;
        if width == 0 {
            return Err(unknown());
        }

        let precision = match caps.get(4) {
            Some(m) => Some(m.as_str().parse::<u32>().map_err(|_| unknown())?),
            None => None,
        };

        let exponent = match caps.get(5) {
            Some(m) => {
                if kind != ValueKind::Scientific {
                    return Err(unknown());
                }
                Some(m.as_str().parse::<u32>().map_err(|_| unknown())?)
            },
            None => None,
        };

        Ok(Self {
            repeat,
            kind,
            width,
            precision,
            exponent,
        })
    }
}

impl Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.repeat > 1 {
            write!(f, "{}", self.repeat)?;
        }
        write!(f, "{}{}", self.kind.letter(), self.width)?;
        if let Some(p) = self.precision {
            write!(f, ".{}", p)?;
        }
        if let Some(e) = self.exponent {
            write!(f, "E{}", e)?;
        }
        Ok(())
    }
}
