#![doc = include_str!("../../README.md")]
//! Crate-specific API surface for `geodql-core`.

pub mod call;
pub mod coordinate;
pub mod error;
pub mod function_catalog;
pub mod point;
pub mod registry;

pub use call::{ArgumentRenderer, ArgumentSource, FunctionCallNode};
pub use coordinate::{parse_latitude, parse_longitude, Axis, CoordinateParser};
pub use error::{GeoDqlError, RangeError, Result, SyntaxError};
pub use point::{Coordinate, CoordinatePoint, PointArg};
pub use registry::{Arity, FunctionRegistry, ResolvedFunction};
