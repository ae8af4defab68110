use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de::Error};
use crossterm::style::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RGBColor{
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "color must be 6 hex digits, got {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for RGBColor {
    type Err = ParseColorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let error = || ParseColorError(text.to_string());

        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) { return Err(error()); }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at+2], 16).map_err(|_| error());

        Ok(Self{r: channel(0)?, g: channel(2)?, b: channel(4)?})
    }
}

impl<'de> Deserialize<'de> for RGBColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: String = Deserialize::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

impl From<RGBColor> for Color {
    fn from(rgb: RGBColor) -> Color {
        Color::Rgb{r: rgb.r, g: rgb.g, b: rgb.b}
    }
}
