#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

static STRICT_FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9.]+)\s*)?\)$")
        .expect("strict functional color pattern")
});

static LENIENT_FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)")
        .expect("lenient functional color pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation, rounded to the nearest integer.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }

    /// Source-over compositing of `self` at `alpha` onto `background`.
    #[must_use]
    pub fn over(self, background: Self, alpha: Alpha) -> Self {
        background.lerp(self, alpha.as_f64())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Opacity in hundredths, matching the two-decimal output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alpha(u8);

impl Alpha {
    pub const OPAQUE: Self = Self(100);

    #[must_use]
    pub fn from_f64(alpha: f64) -> Self {
        Self((alpha.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    #[must_use]
    pub fn hundredths(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("hex color must have 6 digits, found {found}")]
    HexLength { found: usize },
    #[error("invalid hex digits in {0:?}")]
    HexDigit(String),
    #[error("color channel {0} is out of range 0..=255")]
    ChannelRange(u32),
    #[error("alpha {0:?} is not a number in 0..=1")]
    AlphaRange(String),
    #[error("unrecognized color {0:?}")]
    Unrecognized(String),
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Strict parsing for configuration input. Accepts `#rrggbb`, `rgb(r,g,b)`
    /// and `rgba(r,g,b,a)`; the alpha component is validated then dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(digits) = s.strip_prefix('#') {
            return parse_hex_strict(digits);
        }
        parse_functional_strict(s)
    }
}

fn parse_hex_strict(digits: &str) -> Result<Rgb, ColorParseError> {
    let found = digits.chars().count();
    if found != 6 {
        return Err(ColorParseError::HexLength { found });
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::HexDigit(digits.to_string()));
    }
    let channel = |at: usize| {
        u8::from_str_radix(&digits[at..at + 2], 16)
            .map_err(|_| ColorParseError::HexDigit(digits.to_string()))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_functional_strict(s: &str) -> Result<Rgb, ColorParseError> {
    let caps = STRICT_FUNCTIONAL
        .captures(s)
        .ok_or_else(|| ColorParseError::Unrecognized(s.to_string()))?;
    let channel = |idx: usize| -> Result<u8, ColorParseError> {
        let raw = caps.get(idx).map_or("", |m| m.as_str());
        let value = raw
            .parse::<u32>()
            .map_err(|_| ColorParseError::Unrecognized(s.to_string()))?;
        u8::try_from(value).map_err(|_| ColorParseError::ChannelRange(value))
    };
    let rgb = Rgb::new(channel(1)?, channel(2)?, channel(3)?);
    if let Some(alpha) = caps.get(4) {
        let valid = alpha
            .as_str()
            .parse::<f64>()
            .is_ok_and(|a| (0.0..=1.0).contains(&a));
        if !valid {
            return Err(ColorParseError::AlphaRange(alpha.as_str().to_string()));
        }
    }
    Ok(rgb)
}

/// Lenient parse of `#rrggbb`, `rgb()` or `rgba()`.
///
/// Missing or invalid hex digits turn that channel into 0, and anything that is
/// neither hex nor a functional color becomes black. Use [`Rgb::from_str`] when
/// bad input must be reported.
#[must_use]
pub fn parse_color(s: &str) -> Rgb {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix('#') {
        return Rgb::new(
            hex_channel(digits, 0),
            hex_channel(digits, 2),
            hex_channel(digits, 4),
        );
    }
    functional_channels(s).unwrap_or(Rgb::BLACK)
}

fn hex_channel(digits: &str, start: usize) -> u8 {
    let end = (start + 2).min(digits.len());
    let Some(pair) = digits.get(start..end) else {
        return 0;
    };
    let prefix_len = pair
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
        .map_or(pair.len(), |(idx, _)| idx);
    u8::from_str_radix(&pair[..prefix_len], 16).unwrap_or(0)
}

fn functional_channels(s: &str) -> Option<Rgb> {
    let caps = LENIENT_FUNCTIONAL.captures(s)?;
    let channel = |idx: usize| {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map_or(255, |v| v.min(255)) as u8
    };
    Some(Rgb::new(channel(1), channel(2), channel(3)))
}

/// Interpolate two color strings, returning `rgb(r,g,b)`.
///
/// Identical inputs come back unchanged, whatever their format.
#[must_use]
pub fn lerp_color(a: &str, b: &str, t: f64) -> String {
    if a == b {
        return a.to_string();
    }
    parse_color(a).lerp(parse_color(b), t).to_string()
}

#[must_use]
pub fn rgb_with_alpha(color: &str, alpha: f64) -> String {
    let Rgb { r, g, b } = parse_color(color);
    format!("rgba({r},{g},{b},{alpha:.2})")
}
