//! Reading colors from text.

use lazy_static::lazy_static;
use regex::Regex;
use std::num::ParseFloatError;
use thiserror::Error;
use tracing::trace;
use crate::Color;

/// Error returned by [`parse_color`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The text is in none of the accepted formats.
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    /// A `(r, g, b)` component is outside \[0, 1\].
    #[error("color components out of range {0:?}")]
    OutOfRange(String),
    /// A `(r, g, b)` component looks like a number but is not one
    /// (e.g. `1.2.3`).
    #[error("invalid number {number:?} in {color:?}")]
    InvalidNumber {
        number: String,
        color: String,
        #[source]
        source: ParseFloatError,
    },
}

lazy_static! {
    static ref TUPLE_RE: Regex = Regex::new(
        r"^\(([0-9.eE+-]+),\s*([0-9.eE+-]+),\s*([0-9.eE+-]+)\)").unwrap();
    static ref HEX6_RE: Regex = Regex::new(
        r"^(?:#|0x)?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})").unwrap();
    static ref HEX3_RE: Regex = Regex::new(
        r"^(?:#|0x)?([0-9A-Fa-f])([0-9A-Fa-f])([0-9A-Fa-f])").unwrap();
}

/// Parse a color.  The accepted formats, tried in this order, are:
///
/// 1. `(r, g, b)` where `r`, `g`, `b` are floats in \[0, 1\];
/// 2. `rrggbb`, `#rrggbb` or `0xrrggbb` (hex digits, each channel
///    divided by 255);
/// 3. `rgb`, `#rgb` or `0xrgb`.  Each hex digit is divided by 15,
///    so `#f80` is `(1, 8/15, 0)`, not `#ff8800`.
///
/// Only the start of `s` has to match; what follows the color is
/// ignored.
///
/// # Example
///
/// ```
/// use cmaputil::{parse_color, Color};
/// assert_eq!(parse_color("#ff0000")?, Color::new(1., 0., 0.));
/// assert_eq!(parse_color("(0.5, 0, 1)")?, Color::new(0.5, 0., 1.));
/// assert!(parse_color("xyz").is_err());
/// # Ok::<(), cmaputil::ParseError>(())
/// ```
pub fn parse_color(s: &str) -> Result<Color, ParseError> {
    if let Some(m) = TUPLE_RE.captures(s) {
        let num = |i: usize| {
            m[i].parse::<f64>().map_err(|source| ParseError::InvalidNumber {
                number: m[i].to_string(),
                color: s.to_string(),
                source })
        };
        let (r, g, b) = (num(1)?, num(2)?, num(3)?);
        let unit = 0. ..= 1.;
        if !(unit.contains(&r) && unit.contains(&g) && unit.contains(&b)) {
            return Err(ParseError::OutOfRange(s.to_string()))
        }
        trace!(s, r, g, b, "tuple color");
        return Ok(Color { r, g, b })
    }
    if let Some(m) = HEX6_RE.captures(s) {
        trace!(s, "6-digit hex color");
        return hex_color(s, &m, 255.)
    }
    if let Some(m) = HEX3_RE.captures(s) {
        trace!(s, "3-digit hex color");
        return hex_color(s, &m, 15.)
    }
    Err(ParseError::InvalidColor(s.to_string()))
}

/// Color whose channels are the three hex captures of `m`, each
/// divided by `max`.
fn hex_color(s: &str, m: &regex::Captures, max: f64)
             -> Result<Color, ParseError> {
    let c = |i: usize| {
        u8::from_str_radix(&m[i], 16)
            .map(|x| x as f64 / max)
            .map_err(|_| ParseError::InvalidColor(s.to_string()))
    };
    Ok(Color { r: c(1)?, g: c(2)?, b: c(3)? })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGBColor;

    #[test]
    fn tuple() {
        for (r, g, b) in [(0., 0., 0.), (1., 1., 1.), (0.25, 0.5, 0.125),
                          (0.1, 0.7, 0.3)] {
            let c = parse_color(&format!("({r},{g},{b})")).unwrap();
            assert_eq!(c, Color::new(r, g, b));
            let c = parse_color(&format!("({r}, {g},   {b})")).unwrap();
            assert_eq!(c, Color::new(r, g, b));
        }
        assert_eq!(parse_color("(1e-1, 5E-1, +1)").unwrap(),
                   Color::new(0.1, 0.5, 1.));
    }

    #[test]
    fn tuple_out_of_range() {
        assert_eq!(parse_color("(1.5, 0, 0)"),
                   Err(ParseError::OutOfRange("(1.5, 0, 0)".to_string())));
        assert!(matches!(parse_color("(0, -0.1, 0)"),
                         Err(ParseError::OutOfRange(_))));
    }

    #[test]
    fn tuple_bad_number() {
        match parse_color("(0.1.2, 0, 0)") {
            Err(ParseError::InvalidNumber { number, .. }) =>
                assert_eq!(number, "0.1.2"),
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn hex6() {
        for s in ["ff8000", "#ff8000", "0xff8000", "#FF8000"] {
            let c = parse_color(s).unwrap();
            assert_eq!(c, Color::new(1., 128. / 255., 0.), "{s}");
        }
    }

    #[test]
    fn hex6_to_hex() {
        for s in ["000000", "ffffff", "123456", "abcdef", "7f00fe", "010203"] {
            assert_eq!(parse_color(s).unwrap().to_hex(), s);
        }
    }

    #[test]
    fn hex3_divides_by_15() {
        assert_eq!(parse_color("#f80").unwrap(),
                   Color::new(1., 8. / 15., 0.));
        assert_eq!(parse_color("0x00f").unwrap(), Color::new(0., 0., 1.));
        // Five digits: only the first three are read.
        assert_eq!(parse_color("fff0f").unwrap(), Color::new(1., 1., 1.));
    }

    #[test]
    fn hex_channels() {
        let m = HEX6_RE.captures("0a8000").unwrap();
        assert_eq!(hex_color("0a8000", &m, 255.),
                   Ok(Color::new(10. / 255., 128. / 255., 0.)));
        let m = HEX3_RE.captures("#a0f").unwrap();
        assert_eq!(hex_color("#a0f", &m, 15.),
                   Ok(Color::new(10. / 15., 0., 1.)));
    }

    #[test]
    fn prefix_match() {
        assert_eq!(parse_color("#00ff00 green").unwrap(),
                   Color::new(0., 1., 0.));
    }

    #[test]
    fn invalid() {
        assert_eq!(parse_color("xyz"),
                   Err(ParseError::InvalidColor("xyz".to_string())));
        assert!(matches!(parse_color(""), Err(ParseError::InvalidColor(_))));
        assert!(matches!(parse_color("#ff"), Err(ParseError::InvalidColor(_))));
        assert!(matches!(parse_color("(0.1, 0.2)"),
                         Err(ParseError::InvalidColor(_))));
    }

    #[test]
    fn messages() {
        assert_eq!(ParseError::InvalidColor("xyz".into()).to_string(),
                   "invalid color \"xyz\"");
    }
}
