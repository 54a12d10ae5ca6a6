//! Validated geographic point built from numeric or textual coordinates.

use std::fmt;

use geo::Geometry;
use geozero::{ToJson, ToWkt};

use crate::coordinate::{Axis, CoordinateParser};
use crate::error::{GeoDqlError, Result};

/// One coordinate input: a number, or text for [`CoordinateParser`].
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Decimal degrees on `axis`, range-checked.
    pub fn resolve(&self, axis: Axis) -> Result<f64> {
        match self {
            Coordinate::Number(value) => Ok(axis.validate_numeric(*value)?),
            Coordinate::Text(text) => CoordinateParser::new(axis).parse(text),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<i32> for Coordinate {
    fn from(value: i32) -> Self {
        Coordinate::Number(f64::from(value))
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate::Text(value)
    }
}

/// Dynamically shaped constructor argument, see [`CoordinatePoint::from_args`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointArg {
    Number(f64),
    Text(String),
    Array(Vec<PointArg>),
    Null,
}

impl PointArg {
    fn describe(&self) -> String {
        match self {
            PointArg::Number(value) => format!("\"{value}\""),
            PointArg::Text(text) => format!("\"{text}\""),
            PointArg::Array(_) => "Array".to_string(),
            PointArg::Null => "NULL".to_string(),
        }
    }

    fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PointArg::Number(value) => Some(Coordinate::Number(*value)),
            PointArg::Text(text) => Some(Coordinate::Text(text.clone())),
            PointArg::Array(_) | PointArg::Null => None,
        }
    }

    fn srid(&self) -> Option<u32> {
        match self {
            PointArg::Number(value)
                if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(value) =>
            {
                Some(*value as u32)
            }
            PointArg::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<f64> for PointArg {
    fn from(value: f64) -> Self {
        PointArg::Number(value)
    }
}

impl From<i32> for PointArg {
    fn from(value: i32) -> Self {
        PointArg::Number(f64::from(value))
    }
}

impl From<&str> for PointArg {
    fn from(value: &str) -> Self {
        PointArg::Text(value.to_string())
    }
}

impl From<Vec<PointArg>> for PointArg {
    fn from(value: Vec<PointArg>) -> Self {
        PointArg::Array(value)
    }
}

/// A longitude/latitude pair with an optional spatial reference identifier.
///
/// Both coordinates are validated before a value exists; there is no
/// partially valid point.
///
/// # Example
///
/// ```
/// use geodql_core::point::CoordinatePoint;
///
/// let p = CoordinatePoint::new("79:56:55W", "40:26:46N", Some(4326)).unwrap();
/// assert!((p.longitude() + 79.948611111111).abs() < 1e-9);
/// assert!((p.latitude() - 40.446111111111).abs() < 1e-9);
/// assert_eq!(p.srid(), Some(4326));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePoint {
    longitude: f64,
    latitude: f64,
    srid: Option<u32>,
}

impl CoordinatePoint {
    pub const GEOMETRY_TYPE: &'static str = "Point";

    /// Build from `(x, y)` = `(longitude, latitude)` order.
    pub fn new(
        longitude: impl Into<Coordinate>,
        latitude: impl Into<Coordinate>,
        srid: Option<u32>,
    ) -> Result<Self> {
        let longitude = longitude.into().resolve(Axis::Longitude)?;
        let latitude = latitude.into().resolve(Axis::Latitude)?;
        Ok(Self {
            longitude,
            latitude,
            srid,
        })
    }

    /// Build from loosely typed arguments: `[x, y]`, `[x, y, srid]` or a
    /// single `Array` holding `[x, y]`.
    ///
    /// The shape is checked before any value, and a bad shape reports every
    /// received argument.
    pub fn from_args(args: &[PointArg]) -> Result<Self> {
        let shape_error = || GeoDqlError::InvalidArgument {
            constructor: "CoordinatePoint::from_args",
            received: args.iter().map(PointArg::describe).collect(),
        };

        if let [PointArg::Array(inner)] = args {
            return match inner.as_slice() {
                [x, y] => match (x.coordinate(), y.coordinate()) {
                    (Some(x), Some(y)) => Self::new(x, y, None),
                    _ => Err(shape_error()),
                },
                _ => Err(shape_error()),
            };
        }

        let (x, y, srid) = match args {
            [x, y] => (x, y, None),
            [x, y, srid] => (x, y, Some(srid.srid().ok_or_else(shape_error)?)),
            _ => return Err(shape_error()),
        };
        match (x.coordinate(), y.coordinate()) {
            (Some(x), Some(y)) => Self::new(x, y, srid),
            _ => Err(shape_error()),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }

    /// `Some(0)` is an explicit "unspecified" SRID, distinct from `None`.
    pub fn srid(&self) -> Option<u32> {
        self.srid
    }

    pub fn set_srid(&mut self, srid: Option<u32>) {
        self.srid = srid;
    }

    /// Replace the longitude; on error the point is unchanged.
    pub fn set_longitude(&mut self, value: impl Into<Coordinate>) -> Result<()> {
        self.longitude = value.into().resolve(Axis::Longitude)?;
        Ok(())
    }

    /// Replace the latitude; on error the point is unchanged.
    pub fn set_latitude(&mut self, value: impl Into<Coordinate>) -> Result<()> {
        self.latitude = value.into().resolve(Axis::Latitude)?;
        Ok(())
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn geometry_type(&self) -> &'static str {
        Self::GEOMETRY_TYPE
    }

    pub fn to_wkt(&self) -> Result<String> {
        Ok(Geometry::Point(geo::Point::from(*self)).to_wkt()?)
    }

    /// EWKT (`SRID=n;POINT(..)`); identical to WKT without an SRID.
    pub fn to_ewkt(&self) -> Result<String> {
        let srid = self
            .srid
            .map(|srid| {
                i32::try_from(srid).map_err(|_| GeoDqlError::InvalidArgument {
                    constructor: "CoordinatePoint::to_ewkt",
                    received: vec![format!("\"{srid}\"")],
                })
            })
            .transpose()?;
        Ok(Geometry::Point(geo::Point::from(*self)).to_ewkt(srid)?)
    }

    pub fn to_geojson(&self) -> Result<String> {
        Ok(Geometry::Point(geo::Point::from(*self)).to_json()?)
    }
}

/// `"<x> <y>"`, the coordinate part of a WKT point.
impl fmt::Display for CoordinatePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.longitude, self.latitude)
    }
}

impl From<CoordinatePoint> for geo::Point<f64> {
    fn from(point: CoordinatePoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}
