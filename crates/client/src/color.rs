//! Hex colour parsing for palette swatches and render config colours.

use std::fmt;

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Shown for strings that are not a 3, 6 or 8 digit hex colour.
    pub const FALLBACK: Rgba = Rgba::new(200, 200, 200, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `RGB`, `RRGGBB` or `AARRGGBB`.
    ///
    /// Non-hex characters (`#`, spaces) are skipped. Anything else yields
    /// [`Rgba::FALLBACK`].
    pub fn from_hex(hex: &str) -> Self {
        let digits: String = hex.chars().filter(|c| c.is_ascii_hexdigit()).collect();
        let Ok(value) = u32::from_str_radix(&digits, 16) else {
            return Self::FALLBACK;
        };

        match digits.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 17;
                Self::new(nibble(8), nibble(4), nibble(0), 255)
            }
            6 => Self::new(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                255,
            ),
            8 => Self::new(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                (value >> 24) as u8,
            ),
            _ => Self::FALLBACK,
        }
    }

    /// `#RRGGBB`; alpha is not rendered.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digits_are_opaque() {
        assert_eq!(Rgba::from_hex("FFFFFF"), Rgba::new(255, 255, 255, 255));
        assert_eq!(Rgba::from_hex("#1a2B3c"), Rgba::new(0x1A, 0x2B, 0x3C, 255));
    }

    #[test]
    fn three_digits_expand() {
        assert_eq!(Rgba::from_hex("F00"), Rgba::new(255, 0, 0, 255));
        assert_eq!(Rgba::from_hex("#8af"), Rgba::new(0x88, 0xAA, 0xFF, 255));
    }

    #[test]
    fn eight_digits_are_argb() {
        assert_eq!(Rgba::from_hex("80FF0000"), Rgba::new(255, 0, 0, 0x80));
    }

    #[test]
    fn garbage_falls_back_to_gray() {
        assert_eq!(Rgba::from_hex("not a colour"), Rgba::FALLBACK);
        assert_eq!(Rgba::from_hex(""), Rgba::FALLBACK);
        assert_eq!(Rgba::from_hex("12345"), Rgba::FALLBACK);
        assert_eq!(Rgba::FALLBACK, Rgba::new(200, 200, 200, 255));
    }

    #[test]
    fn hex_output() {
        assert_eq!(Rgba::from_hex("fff").to_hex(), "#FFFFFF");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#010203");
    }
}
