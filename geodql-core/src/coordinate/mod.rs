//! Human-entered coordinate text.
//!
//! Accepts decimal degrees (`-73.7562317`) and degree/minute/second forms
//! (`79:56:55W`, `40°26'46"N`, `40° 26′ 46″ N`) and yields range-checked
//! decimal degrees.

mod lexer;
mod parser;

use std::fmt;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_latitude, parse_longitude, CoordinateComponents, CoordinateParser};

use crate::error::RangeError;

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value allowed on this axis.
    pub const fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            Axis::Latitude => "-90 to 90",
            Axis::Longitude => "-180 to 180",
        }
    }

    /// Compass letters that belong to this axis, positive direction first.
    pub const fn cardinals(self) -> [char; 2] {
        match self {
            Axis::Latitude => ['N', 'S'],
            Axis::Longitude => ['E', 'W'],
        }
    }

    pub fn contains(self, value: f64) -> bool {
        (-self.limit()..=self.limit()).contains(&value)
    }

    /// Range-check an already numeric value.
    pub fn validate_numeric(self, value: f64) -> Result<f64, RangeError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(RangeError::NumericOutOfRange { axis: self, value })
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        })
    }
}
