//! Recursive-descent parser over the coordinate token stream.
//!
//! ```text
//! coordinate  := [ '-' ] number [ degree-tail ] [ cardinal ]
//! degree-tail := ( ':' | '°' ) [ number [ minute-tail ] ]
//! minute-tail := ( ':' | '\'' | '′' ) [ number [ '"' | '″' ] ]
//! ```
//!
//! A `:` must be followed by a number. Validation runs syntax first, then
//! minutes, seconds and finally the assembled degree range.

#[cfg(feature = "tracing")]
use tracing::trace;

use super::lexer::{tokenize, Token, TokenKind};
use super::Axis;
use crate::error::{Found, GeoDqlError, RangeError, Result, SyntaxError};

const NUMBER: &[TokenKind] = &[TokenKind::Integer, TokenKind::Float];

/// Sign and unsigned parts of one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateComponents {
    /// `1.0` or `-1.0`.
    pub sign: f64,
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl CoordinateComponents {
    pub fn value(&self) -> f64 {
        self.sign * (self.degrees + self.minutes / 60.0 + self.seconds / 3600.0)
    }
}

/// Parses coordinate text for one axis.
///
/// # Example
///
/// ```
/// use geodql_core::coordinate::{Axis, CoordinateParser};
///
/// let lat = CoordinateParser::new(Axis::Latitude).parse("40:26:46N").unwrap();
/// assert!((lat - 40.446111111111).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateParser {
    axis: Axis,
}

impl CoordinateParser {
    pub const fn new(axis: Axis) -> Self {
        Self { axis }
    }

    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Parse and range-check `input`, returning decimal degrees.
    pub fn parse(&self, input: &str) -> Result<f64> {
        let result = self.components(input).and_then(|c| {
            let value = c.value();
            if self.axis.contains(value) {
                Ok(value)
            } else {
                Err(RangeError::DegreesOutOfRange {
                    axis: self.axis,
                    raw: input.to_string(),
                }
                .into())
            }
        });

        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            trace!(axis = %self.axis, input, error = %err, "coordinate rejected");
        }

        result
    }

    /// Parse `input` and check minutes and seconds, without the final degree
    /// range check.
    pub fn components(&self, input: &str) -> Result<CoordinateComponents> {
        let components = Cursor::new(input, self.axis).coordinate()?;
        if components.minutes >= 60.0 {
            return Err(RangeError::MinutesOverflow {
                raw: input.to_string(),
            }
            .into());
        }
        if components.seconds >= 60.0 {
            return Err(RangeError::SecondsOverflow {
                raw: input.to_string(),
            }
            .into());
        }
        Ok(components)
    }
}

pub fn parse_latitude(input: &str) -> Result<f64> {
    CoordinateParser::new(Axis::Latitude).parse(input)
}

pub fn parse_longitude(input: &str) -> Result<f64> {
    CoordinateParser::new(Axis::Longitude).parse(input)
}

struct Cursor<'a> {
    raw: &'a str,
    tokens: Vec<Token<'a>>,
    index: usize,
    axis: Axis,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a str, axis: Axis) -> Self {
        Self {
            raw,
            tokens: tokenize(raw),
            index: 0,
            axis,
        }
    }

    fn peek(&self) -> Token<'a> {
        // `tokenize` always ends with `End`, and `bump` never moves past it.
        self.tokens[self.index]
    }

    fn bump(&mut self) -> Token<'a> {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.index += 1;
        }
        token
    }

    fn at(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    fn cardinal_kind(&self) -> TokenKind {
        match self.axis {
            Axis::Latitude => TokenKind::CardinalLatitude,
            Axis::Longitude => TokenKind::CardinalLongitude,
        }
    }

    fn error(&self, expected: &[TokenKind]) -> SyntaxError {
        let token = self.peek();
        let found = match token.kind {
            TokenKind::End => Found::EndOfInput,
            _ => Found::Text(token.text.to_string()),
        };
        SyntaxError {
            position: token.position,
            expected: expected.iter().map(|k| k.name()).collect(),
            found,
            raw: self.raw.to_string(),
        }
    }

    fn number(&mut self) -> std::result::Result<f64, SyntaxError> {
        if !self.at(NUMBER) {
            return Err(self.error(NUMBER));
        }
        let token = self.peek();
        let value = token.text.parse::<f64>().map_err(|_| self.error(NUMBER))?;
        self.bump();
        Ok(value)
    }

    fn coordinate(&mut self) -> std::result::Result<CoordinateComponents, GeoDqlError> {
        let negative = self.at(&[TokenKind::Minus]);
        if negative {
            self.bump();
        }

        let degrees = self.number()?;
        let mut minutes = 0.0;
        let mut seconds = 0.0;

        if self.at(&[TokenKind::Colon, TokenKind::Degree]) {
            let separator = self.bump();
            if self.at(NUMBER) {
                minutes = self.number()?;
                if self.at(&[TokenKind::Colon, TokenKind::Apostrophe]) {
                    let separator = self.bump();
                    if self.at(NUMBER) {
                        seconds = self.number()?;
                        if self.at(&[TokenKind::Quote]) {
                            self.bump();
                        }
                    } else if separator.kind == TokenKind::Colon {
                        return Err(self.error(NUMBER).into());
                    }
                }
            } else if separator.kind == TokenKind::Colon {
                return Err(self.error(NUMBER).into());
            }
        }

        let cardinal = self.cardinal_kind();
        let sign = if self.at(&[cardinal]) {
            let letter = self.bump().text.to_ascii_uppercase();
            if letter.starts_with(self.axis.cardinals()[1]) {
                -1.0
            } else {
                1.0
            }
        } else if negative {
            -1.0
        } else {
            1.0
        };

        // Anything left over is reported against the numeric kinds.
        if !self.at(&[TokenKind::End]) {
            return Err(self.error(NUMBER).into());
        }

        Ok(CoordinateComponents {
            sign,
            degrees,
            minutes,
            seconds,
        })
    }
}
