use std::str::FromStr;

use crate::error::Error;

/// 32 bit colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba32Color {
    /// Red, out of 255.
    pub r: u8,
    /// Green, out of 255.
    pub g: u8,
    /// Blue, out of 255.
    pub b: u8,
    /// Alpha, out of 255.
    pub a: u8,
}

impl Rgba32Color {
    /// Builds a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba32Color { r, g, b, a }
    }

    /// Parses a `#RRGGBB` or `#AARRGGBB` string. Alpha is 255 for the short form.
    pub fn from_hex(color_hex: &str) -> Result<Self, Error> {
        let invalid =
            || Error::invalid_argument(format!("String was not a valid color string: \"{color_hex}\""));

        let digits = match color_hex.strip_prefix('#') {
            Some(digits) if digits.len() == 6 || digits.len() == 8 => digits,
            _ => return Err(invalid()),
        };
        // from_str_radix tolerates a leading sign, so check every byte first
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channels = digits
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(invalid)
            })
            .collect::<Result<Vec<u8>, Error>>()?;

        Ok(match channels[..] {
            [r, g, b] => Rgba32Color::new(r, g, b, 0xFF),
            [a, r, g, b] => Rgba32Color::new(r, g, b, a),
            _ => return Err(invalid()),
        })
    }
}

impl FromStr for Rgba32Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba32Color::from_hex(s)
    }
}

impl From<Rgba32Color> for macroquad::color::Color {
    fn from(c: Rgba32Color) -> Self {
        macroquad::color::Color::from_rgba(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn short_form_is_opaque() {
        for (hex, expected) in [
            ("#000000", Rgba32Color::new(0, 0, 0, 255)),
            ("#ff8000", Rgba32Color::new(255, 128, 0, 255)),
            ("#A0b1C2", Rgba32Color::new(0xA0, 0xB1, 0xC2, 255)),
        ] {
            assert_eq!(Rgba32Color::from_hex(hex).unwrap(), expected, "{hex}");
        }
    }

    #[test]
    fn long_form_reads_alpha_first() {
        let c: Rgba32Color = "#80112233".parse().unwrap();
        assert_eq!(c, Rgba32Color::new(0x11, 0x22, 0x33, 0x80));
        let c: Rgba32Color = "#00ffffff".parse().unwrap();
        assert_eq!(c.a, 0);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "", "#", "000000", "#00000", "#0000000", "#0000000000", "#gg0000", "#+f0000",
            "#12345é", "$000000",
        ] {
            let err = Rgba32Color::from_hex(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains(&format!("\"{bad}\"")), "{err}");
        }
    }

    #[test]
    fn converts_to_renderer_color() {
        let c: macroquad::color::Color = Rgba32Color::new(255, 0, 0, 255).into();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.a, 1.0);
    }
}
