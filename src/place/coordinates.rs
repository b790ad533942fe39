//! Coordinate annotation → signed decimal degrees.
//!
//! The annotation is split on `|` and walked left to right. Numbers collect in
//! a buffer; a hemisphere marker (N/S/E/W) converts the buffer according to its
//! length and clears it. Anything else is ignored.
//!
//! | buffer | meaning                    |
//! |--------|----------------------------|
//! | 1      | decimal degrees            |
//! | 2      | degrees, minutes           |
//! | 3      | degrees, minutes, seconds  |

use super::types::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateToken {
    Numeric(f64),
    Direction(Hemisphere),
    /// Region codes, `type:edu`, `display=inline,title` and the like.
    Ignorable,
}

impl CoordinateToken {
    pub fn classify(raw: &str) -> Self {
        let token = raw.trim();
        if let Ok(value) = token.parse::<f64>() {
            if value.is_finite() {
                return Self::Numeric(value);
            }
        }
        match Hemisphere::parse(token) {
            Some(h) => Self::Direction(h),
            None => Self::Ignorable,
        }
    }
}

pub fn tokenize(raw: &str) -> impl Iterator<Item = CoordinateToken> + '_ {
    raw.split('|').map(CoordinateToken::classify)
}

pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Degrees, minutes, seconds. `copysign(1, d) * |d|` is just `d`.
/// With zero degrees the degree term is dropped entirely, so the hemisphere
/// marker alone decides the sign.
fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let decimal = if degrees == 0.0 {
        minutes / 60.0 + seconds / 3600.0
    } else {
        degrees + minutes / 60.0 + seconds / 3600.0
    };
    round6(decimal)
}

fn dm_to_decimal(degrees: f64, minutes: f64) -> f64 {
    round6(degrees + minutes / 60.0)
}

/// Converts the buffered numbers, or `None` when the buffer length has no
/// meaning (empty or more than three values).
fn convert_buffer(buffer: &[f64]) -> Option<f64> {
    match *buffer {
        [d, m, s] => Some(dms_to_decimal(d, m, s)),
        [d, m] => Some(dm_to_decimal(d, m)),
        // Already decimal: passed through at the precision it was written with.
        [value] => Some(value),
        _ => None,
    }
}

/// Normalize a pipe-delimited coordinate annotation.
///
/// Returns [`Coordinates::Raw`] with the leftover buffer when numbers remain
/// after the last hemisphere marker.
pub fn normalize(raw: &str) -> Coordinates {
    let mut buffer: Vec<f64> = Vec::with_capacity(3);
    let mut output = Vec::with_capacity(2);

    for token in tokenize(raw) {
        match token {
            CoordinateToken::Numeric(value) => buffer.push(value),
            CoordinateToken::Direction(hemisphere) => {
                // An unrecognised buffer length keeps accumulating.
                if let Some(value) = convert_buffer(&buffer) {
                    output.push(value * hemisphere.sign());
                    buffer.clear();
                }
            }
            CoordinateToken::Ignorable => {}
        }
    }

    if buffer.is_empty() {
        Coordinates::Decimal(output)
    } else {
        Coordinates::Raw(buffer)
    }
}
