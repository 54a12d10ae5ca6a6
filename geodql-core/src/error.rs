use std::fmt;

use thiserror::Error;

use crate::coordinate::Axis;

#[derive(Debug, Error)]
pub enum GeoDqlError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("DBAL platform \"{platform}\" is not currently supported.")]
    UnsupportedPlatform { platform: String, function: String },

    #[error(
        "Function \"{function}\" on platform \"{platform}\" accepts {window} arguments, got {count}."
    )]
    ArgumentCount {
        function: String,
        platform: String,
        window: String,
        count: usize,
    },

    #[error("Invalid parameters passed to {constructor}: {}", .received.join(", "))]
    InvalidArgument {
        constructor: &'static str,
        received: Vec<String>,
    },

    #[error("invalid function catalog: {0}")]
    InvalidCatalog(String),

    #[error("geozero error: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),
}

pub type Result<T> = std::result::Result<T, GeoDqlError>;

/// A token the coordinate lexer produced where the grammar wanted something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Text(String),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Text(text) => write!(f, "\"{text}\""),
            Found::EndOfInput => f.write_str("end of string"),
        }
    }
}

/// Malformed coordinate text, reported at a zero-based character offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "[Syntax Error] line 0, col {position}: Error: Expected {}, got {found} in value \"{raw}\"",
    join_expected(.expected)
)]
pub struct SyntaxError {
    pub position: usize,
    pub expected: Vec<&'static str>,
    pub found: Found,
    pub raw: String,
}

fn join_expected(expected: &[&'static str]) -> String {
    match expected.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

/// A well-formed coordinate whose value falls outside its domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("[Range Error] Error: Minutes greater than 60 in value \"{raw}\"")]
    MinutesOverflow { raw: String },

    #[error("[Range Error] Error: Seconds greater than 60 in value \"{raw}\"")]
    SecondsOverflow { raw: String },

    #[error(
        "[Range Error] Error: Degrees out of range {} in value \"{raw}\"",
        .axis.range_label()
    )]
    DegreesOutOfRange { axis: Axis, raw: String },

    #[error(
        "Invalid {axis} value \"{value}\", must be in range {}.",
        .axis.range_label()
    )]
    NumericOutOfRange { axis: Axis, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_kinds_join_with_or() {
        assert_eq!(join_expected(&["T_INTEGER"]), "T_INTEGER");
        assert_eq!(join_expected(&["T_INTEGER", "T_FLOAT"]), "T_INTEGER or T_FLOAT");
        assert_eq!(
            join_expected(&["T_QUOTE", "T_CARDINAL_LAT", "T_END"]),
            "T_QUOTE, T_CARDINAL_LAT or T_END"
        );
    }

    #[test]
    fn unsupported_platform_message() {
        let err = GeoDqlError::UnsupportedPlatform {
            platform: "YourSQL".into(),
            function: "st_within".into(),
        };
        assert_eq!(
            err.to_string(),
            "DBAL platform \"YourSQL\" is not currently supported."
        );
    }

    #[test]
    fn numeric_range_message_uses_shortest_float_form() {
        let err = RangeError::NumericOutOfRange {
            axis: Axis::Latitude,
            value: -90.00001,
        };
        assert_eq!(
            err.to_string(),
            "Invalid latitude value \"-90.00001\", must be in range -90 to 90."
        );
        let err = RangeError::NumericOutOfRange {
            axis: Axis::Longitude,
            value: -230.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid longitude value \"-230\", must be in range -180 to 180."
        );
    }

    #[test]
    fn invalid_argument_lists_every_input() {
        let err = GeoDqlError::InvalidArgument {
            constructor: "CoordinatePoint::from_args",
            received: vec!["Array".into(), "Array".into(), "\"1234\"".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameters passed to CoordinatePoint::from_args: Array, Array, \"1234\""
        );
    }
}
