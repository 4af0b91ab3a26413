use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex length")]
    InvalidLength,
    #[error("invalid hex digits")]
    InvalidHex,
}

/// Opaque sRGB color stored as `#rrggbb` in preference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    /// Accepts `#RGB` and `#RRGGBB`; the leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ColorParseError::*;

        let hex = s.trim();
        if hex.is_empty() {
            return Err(Empty);
        }
        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();

        let nibble = |c: u8| -> Result<u8, ColorParseError> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(InvalidHex),
            }
        };

        match bytes.len() {
            3 => Ok(Self([
                nibble(bytes[0])? * 17,
                nibble(bytes[1])? * 17,
                nibble(bytes[2])? * 17,
            ])),
            6 => {
                let pair = |i: usize| -> Result<u8, ColorParseError> {
                    Ok(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?)
                };
                Ok(Self([pair(0)?, pair(2)?, pair(4)?]))
            }
            _ => Err(InvalidLength),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!("#3b82f6".parse::<HexColor>(), Ok(HexColor::rgb(0x3b, 0x82, 0xf6)));
        assert_eq!("020617".parse::<HexColor>(), Ok(HexColor::rgb(2, 6, 23)));
        assert_eq!("#FFF".parse::<HexColor>(), Ok(HexColor::rgb(255, 255, 255)));
        assert_eq!(" #abc ".parse::<HexColor>(), Ok(HexColor::rgb(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<HexColor>(), Err(ColorParseError::Empty));
        assert_eq!("#12345".parse::<HexColor>(), Err(ColorParseError::InvalidLength));
        assert_eq!("#gg0000".parse::<HexColor>(), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(HexColor::rgb(0x3B, 0x82, 0xF6).to_string(), "#3b82f6");
        assert_eq!(String::from(HexColor::rgb(0, 0, 0)), "#000000");
    }
}
