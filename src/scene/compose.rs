#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use super::{
    clouds::Cloud,
    color::{Alpha, Rgb, parse_color},
    density::cloud_density_at,
    hash::hash,
    terrain::ground_row,
};

/// Mostly blank, with a little dust.
const SKY_GLYPHS: &[char] = &[
    ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', '.', '`', '\'',
];
const SPARKLE_GLYPH: char = '·';
/// Lightest to solid.
const CLOUD_GLYPHS: &[char] = &['.', '░', '▒', '▓', '█'];
const TERRAIN_GLYPHS: &[char] = &['.', ':', ';', '+', '%', '#'];

const SPARKLE_BAND: f64 = 0.15;
const SPARKLE_THRESHOLD: f64 = 0.97;
const SPARKLE_RATE: f64 = 0.3;
const CLOUD_THRESHOLD: f64 = 0.05;
const TERRAIN_HASH_OFFSET: i32 = 500;
const RIDGE_DEPTH: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellColor {
    Rgb(Rgb),
    Rgba(Rgb, Alpha),
    /// Any other CSS color, emitted verbatim.
    Literal(String),
}

impl CellColor {
    /// Flatten to an opaque color, compositing translucent values onto
    /// `background`.
    #[must_use]
    pub fn resolve(&self, background: Rgb) -> Rgb {
        match self {
            Self::Rgb(rgb) => *rgb,
            Self::Rgba(rgb, alpha) => rgb.over(background, *alpha),
            Self::Literal(raw) => parse_color(raw),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(rgb) => fmt::Display::fmt(rgb, f),
            Self::Rgba(Rgb { r, g, b }, alpha) => write!(f, "rgba({r},{g},{b},{alpha})"),
            Self::Literal(raw) => f.write_str(raw),
        }
    }
}

impl From<Rgb> for CellColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<&str> for CellColor {
    fn from(raw: &str) -> Self {
        Self::Literal(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: CellColor,
}

impl Cell {
    pub fn new(ch: char, color: impl Into<CellColor>) -> Self {
        Self {
            ch,
            color: color.into(),
        }
    }
}

pub type Grid = Vec<Vec<Cell>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub sky_top: String,
    pub sky_bottom: String,
    pub cloud: String,
    /// Near hill color, used along the ridge.
    pub hill: String,
    pub hill_far: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky_top: "#0d3566".to_string(),
            sky_bottom: "#1e669e".to_string(),
            cloud: "#e6eef5".to_string(),
            hill: "#2f5d3a".to_string(),
            hill_far: "#6b8f9c".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneConfig<'a> {
    pub cols: usize,
    pub rows: usize,
    pub clouds: &'a [Cloud],
    pub show_hills: bool,
    pub palette: &'a Palette,
    /// Seconds since the scene started; only drives sparkle.
    pub time: f64,
}

struct ResolvedPalette {
    sky_top: Rgb,
    sky_bottom: Rgb,
    cloud: Rgb,
    hill: Rgb,
    hill_far: Rgb,
}

impl ResolvedPalette {
    fn new(palette: &Palette) -> Self {
        Self {
            sky_top: parse_color(&palette.sky_top),
            sky_bottom: parse_color(&palette.sky_bottom),
            cloud: parse_color(&palette.cloud),
            hill: parse_color(&palette.hill),
            hill_far: parse_color(&palette.hill_far),
        }
    }
}

struct Painter<'a> {
    config: &'a SceneConfig<'a>,
    palette: ResolvedPalette,
    ground: Vec<i64>,
    sparkle_shift: i32,
}

impl<'a> Painter<'a> {
    fn new(config: &'a SceneConfig<'a>) -> Self {
        let ground = if config.show_hills {
            (0..config.cols)
                .map(|col| ground_row(col, config.cols, config.rows))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            config,
            palette: ResolvedPalette::new(config.palette),
            ground,
            sparkle_shift: (config.time * SPARKLE_RATE).floor() as i32,
        }
    }

    fn row(&self, row: usize) -> Vec<Cell> {
        let sky = self.sky_color(row);
        (0..self.config.cols)
            .map(|col| self.cell(col, row, &sky))
            .collect()
    }

    fn sky_color(&self, row: usize) -> CellColor {
        let t = if self.config.rows <= 1 {
            0.0
        } else {
            row as f64 / (self.config.rows - 1) as f64
        };
        blend(
            (self.config.palette.sky_top.as_str(), self.palette.sky_top),
            (self.config.palette.sky_bottom.as_str(), self.palette.sky_bottom),
            t,
        )
    }

    fn cell(&self, col: usize, row: usize, sky: &CellColor) -> Cell {
        let (c, r) = (col as i32, row as i32);
        let mut cell = Cell::new(pick(SKY_GLYPHS, hash(c, r)), sky.clone());

        if (row as f64) < self.config.rows as f64 * SPARKLE_BAND
            && hash(c.wrapping_add(self.sparkle_shift), r) > SPARKLE_THRESHOLD
        {
            cell.ch = SPARKLE_GLYPH;
        }

        let sample = cloud_density_at(col as f64, row as f64, self.config.clouds, self.config.cols);
        if sample.density > CLOUD_THRESHOLD {
            cell = Cell::new(
                pick(CLOUD_GLYPHS, sample.density),
                CellColor::Rgba(
                    self.palette.cloud,
                    Alpha::from_f64(0.4 + sample.density * 0.6),
                ),
            );
        }

        if let Some(terrain) = self.terrain(col, row) {
            cell = terrain;
        }
        cell
    }

    fn terrain(&self, col: usize, row: usize) -> Option<Cell> {
        let ground = *self.ground.get(col)?;
        let row = row as i64;
        if row < ground {
            return None;
        }
        let span = (self.config.rows as i64 - ground).max(1) as f64;
        let depth = (row - ground) as f64 / span;
        let ch = if row == ground && depth < RIDGE_DEPTH {
            self.ridge_glyph(col, ground)
        } else {
            pick(
                TERRAIN_GLYPHS,
                hash(col as i32, (row as i32).wrapping_add(TERRAIN_HASH_OFFSET)),
            )
        };
        let color = blend(
            (self.config.palette.hill_far.as_str(), self.palette.hill_far),
            (self.config.palette.hill.as_str(), self.palette.hill),
            1.0 - depth * 0.6,
        );
        Some(Cell::new(ch, color))
    }

    fn ridge_glyph(&self, col: usize, here: i64) -> char {
        let left = col
            .checked_sub(1)
            .and_then(|c| self.ground.get(c))
            .copied()
            .unwrap_or(here);
        let right = self.ground.get(col + 1).copied().unwrap_or(here);
        ridge_glyph(left, here, right)
    }
}

/// Larger row numbers are lower on screen.
fn ridge_glyph(left: i64, here: i64, right: i64) -> char {
    match (left.cmp(&here), right.cmp(&here)) {
        (Ordering::Greater, Ordering::Greater) => '^',
        (Ordering::Less, Ordering::Less) | (Ordering::Equal, Ordering::Equal) => '_',
        (Ordering::Greater, _) | (_, Ordering::Less) => '/',
        _ => '\\',
    }
}

/// Identical endpoints pass through in their original spelling.
fn blend(from: (&str, Rgb), to: (&str, Rgb), t: f64) -> CellColor {
    if from.0 == to.0 {
        CellColor::Literal(from.0.to_string())
    } else {
        CellColor::Rgb(from.1.lerp(to.1, t))
    }
}

fn pick(table: &[char], unit: f64) -> char {
    let idx = (unit * table.len() as f64) as usize;
    table[idx.min(table.len() - 1)]
}

/// Render one full frame.
#[must_use]
pub fn compute_scene(config: &SceneConfig<'_>) -> Grid {
    let painter = Painter::new(config);
    let grid: Grid = (0..config.rows).map(|row| painter.row(row)).collect();
    tracing::trace!(
        cols = config.cols,
        rows = config.rows,
        clouds = config.clouds.len(),
        "computed scene"
    );
    grid
}

/// Render a single row. Rows never depend on each other, so hosts may split
/// work across threads by row.
#[must_use]
pub fn compute_row(config: &SceneConfig<'_>, row: usize) -> Vec<Cell> {
    Painter::new(config).row(row)
}
