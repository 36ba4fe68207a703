//! CSS colors for canvas styles
//!
//! Parses the color syntaxes scripts commonly assign to `fillStyle` and
//! friends, and serializes back the way browsers report them: `#rrggbb` for
//! opaque colors, `rgba(r, g, b, a)` otherwise.

/// Color (RGBA, straight alpha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("gold", [255, 215, 0]),
    ("indigo", [75, 0, 130]),
    ("violet", [238, 130, 238]),
    ("coral", [255, 127, 80]),
    ("salmon", [250, 128, 114]),
    ("tomato", [255, 99, 71]),
    ("crimson", [220, 20, 60]),
    ("steelblue", [70, 130, 180]),
    ("skyblue", [135, 206, 235]),
    ("lightgray", [211, 211, 211]),
    ("darkgray", [169, 169, 169]),
    ("cornflowerblue", [100, 149, 237]),
    ("rebeccapurple", [102, 51, 153]),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS color; `None` for anything unrecognized
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_ascii_lowercase();
        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if input == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        if let Some(args) = input
            .strip_prefix("rgba(")
            .or_else(|| input.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb_args(args);
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `r, g, b[, a]` or `r g b [/ a]`
    fn parse_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let value = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? * 2.55,
                None => s.parse::<f64>().ok()?,
            };
            value.is_finite().then(|| value.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = match parts.get(3) {
            None => 255,
            Some(s) => {
                let value = match s.strip_suffix('%') {
                    Some(pct) => pct.parse::<f64>().ok()? / 100.0,
                    None => s.parse::<f64>().ok()?,
                };
                if !value.is_finite() {
                    return None;
                }
                (value.clamp(0.0, 1.0) * 255.0).round() as u8
            }
        };
        Some(Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
    }

    /// Alpha in 0.0..=1.0
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Serialize as a browser reports a canvas color
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            return format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        }
        let alpha = (self.alpha() * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}
