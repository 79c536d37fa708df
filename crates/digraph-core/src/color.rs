//! RGB colors used for node and link display attributes.
//!
//! Colors travel through the clipboard as `#rrggbb` names, so parsing and
//! formatting live next to the type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color name must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color name must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color name: {0:?}")]
    BadDigit(String),
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DARK_RED: Color = Color::rgb(128, 0, 0);
    pub const DARK_GREEN: Color = Color::rgb(0, 128, 0);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `#rrggbb`, lowercase.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }

        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };

        match digits.len() {
            // #rgb expands each digit: #f80 == #ff8800
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.name()
    }
}
