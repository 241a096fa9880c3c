#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::style::Color;

use crate::{
    cli::{ColorArg, ThemeArg},
    scene::{Palette, Rgb},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
    /// Glyphs only.
    Off,
}

pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_color_capability_from(mode, term.as_deref(), colorterm.as_deref(), no_color.as_deref())
}

pub fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if mode == ColorArg::Never
        || (mode == ColorArg::Auto && no_color.is_some_and(|value| !value.is_empty()))
    {
        return ColorCapability::Off;
    }
    if mode == ColorArg::Auto && term.is_some_and(|value| value.eq_ignore_ascii_case("dumb")) {
        return ColorCapability::Off;
    }
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    let term = term.unwrap_or_default().to_lowercase();
    if truecolor_hint(&colorterm) || truecolor_hint(&term) || mode == ColorArg::Always {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn truecolor_hint(value: &str) -> bool {
    value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
}

fn palette(sky_top: &str, sky_bottom: &str, cloud: &str, hill: &str, hill_far: &str) -> Palette {
    Palette {
        sky_top: sky_top.to_string(),
        sky_bottom: sky_bottom.to_string(),
        cloud: cloud.to_string(),
        hill: hill.to_string(),
        hill_far: hill_far.to_string(),
    }
}

#[must_use]
pub fn palette_for(theme: ThemeArg) -> Palette {
    match theme {
        ThemeArg::Dawn => palette("#2b1f4a", "#e8936b", "#ffd9c7", "#3d2c3e", "#8a6a7d"),
        ThemeArg::Day => Palette::default(),
        ThemeArg::Dusk => palette("#1c1442", "#b4506a", "#f3b7a6", "#241a2e", "#5e4a6e"),
        ThemeArg::Night => palette("#090b1c", "#152b4f", "#adc8e6", "#0c1a14", "#2a3d4f"),
        ThemeArg::Mono => palette("#111118", "#2c2f38", "#d4d7de", "#6e7280", "#3a3d46"),
    }
}

/// Map a scene color onto what the terminal can show. `None` leaves the cell
/// at the terminal's default foreground.
#[must_use]
pub fn quantize(rgb: Rgb, capability: ColorCapability) -> Option<Color> {
    match capability {
        ColorCapability::TrueColor => Some(Color::Rgb(rgb.r, rgb.g, rgb.b)),
        ColorCapability::Xterm256 => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Some(Color::Indexed(
                16 + 36 * to_cube(rgb.r) + 6 * to_cube(rgb.g) + to_cube(rgb.b),
            ))
        }
        ColorCapability::Basic16 => Some(basic16_from_rgb(rgb)),
        ColorCapability::Off => None,
    }
}

/// (hue upper bound, dark, bright)
const HUE_BUCKETS: [(f32, Color, Color); 6] = [
    (30.0, Color::Red, Color::LightRed),
    (90.0, Color::Yellow, Color::LightYellow),
    (150.0, Color::Green, Color::LightGreen),
    (210.0, Color::Cyan, Color::LightCyan),
    (270.0, Color::Blue, Color::LightBlue),
    (330.0, Color::Magenta, Color::LightMagenta),
];

fn basic16_from_rgb(rgb: Rgb) -> Color {
    let rf = f32::from(rgb.r) / 255.0;
    let gf = f32::from(rgb.g) / 255.0;
    let bf = f32::from(rgb.b) / 255.0;

    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (_, dark, light_variant) = HUE_BUCKETS
        .iter()
        .find(|(bound, _, _)| hue < *bound)
        .copied()
        .unwrap_or(HUE_BUCKETS[0]);
    if bright { light_variant } else { dark }
}
