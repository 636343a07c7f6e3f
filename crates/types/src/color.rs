use serde::{Deserialize, Deserializer, Serialize, de};

/// An opaque device-RGB color with 8-bit channels.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Channels divided by 255 and clamped to `[0, 1]`, in r, g, b order.
    pub fn normalized(&self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| (c as f32 / 255.0).clamp(0.0, 1.0))
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(format!("Color must start with #, got: {}", s));
        };
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => Ok(Color {
                r: channel(&hex[0..1].repeat(2), "red")?,
                g: channel(&hex[1..2].repeat(2), "green")?,
                b: channel(&hex[2..3].repeat(2), "blue")?,
            }),
            6 => Ok(Color {
                r: channel(&hex[0..2], "red")?,
                g: channel(&hex[2..4], "green")?,
                b: channel(&hex[4..6], "blue")?,
            }),
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
            Triple([u8; 3]),
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
            ColorDef::Triple([r, g, b]) => Ok(Color { r, g, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Color::parse_hex("#ff8000").unwrap(), Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Color::parse_hex("#0f0").unwrap(), Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_hex_rejects_missing_hash() {
        assert!(Color::parse_hex("ff0000").is_err());
        assert!(Color::parse_hex("#ff00").is_err());
    }

    #[test]
    fn test_normalized_components() {
        let [r, g, b] = Color::rgb(255, 0, 51).normalized();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_all_forms() {
        let hex: Color = serde_json::from_str("\"#336699\"").unwrap();
        let map: Color = serde_json::from_str(r#"{"r": 51, "g": 102, "b": 153}"#).unwrap();
        let triple: Color = serde_json::from_str("[51, 102, 153]").unwrap();
        assert_eq!(hex, map);
        assert_eq!(map, triple);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_channel() {
        let result: Result<Color, _> = serde_json::from_str(r#"{"r": 300, "g": 0, "b": 0}"#);
        assert!(result.is_err());
    }
}
