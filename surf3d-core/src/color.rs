//! RGB colors and the `#rrggbb` notation used for base colors
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 128, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse six hex digits, optionally prefixed with `#`
    pub fn from_hex(input: &str) -> Result<Color> {
        all_consuming(hex_color)(input)
            .map(|(_, color)| color)
            .map_err(|_| Error::InvalidColor(input.to_string()))
    }

    /// Scale every channel by `intensity`, truncating and clamping to [0, 255]
    pub fn shade(self, intensity: f64) -> Color {
        let channel = |c: u8| (c as f64 * intensity).clamp(0.0, 255.0) as u8;
        Color::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn hex_channel(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits| u8::from_str_radix(digits, 16),
    )(input)
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    let (input, (r, g, b)) = preceded(
        opt(char('#')),
        tuple((hex_channel, hex_channel, hex_channel)),
    )(input)?;

    Ok((input, Color::new(r, g, b)))
}
