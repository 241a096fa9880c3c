#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use serde::{Deserialize, Serialize};

use super::hash::hash;

/// Rescales `hash` output from `[0, 1]` to `[0, 1)`.
const HALF_OPEN: f64 = 32767.0 / 32768.0;

/// Fraction of the grid height that clouds may be centered in.
const SKY_BAND: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
    pub speed: f64,
    pub density: f64,
}

fn unit(index: i32, salt: i32) -> f64 {
    hash(index, salt) * HALF_OPEN
}

fn span(index: i32, salt: i32, min: f64, max: f64) -> f64 {
    min + unit(index, salt) * (max - min)
}

/// Seed a reproducible cloud population for a `cols × rows` grid.
#[must_use]
pub fn generate_initial_clouds(cols: usize, rows: usize, count: usize) -> Vec<Cloud> {
    let cols = cols as f64;
    let rows = rows as f64;
    (0..count)
        .map(|i| {
            let i = i as i32;
            Cloud {
                x: unit(i, 11) * cols,
                y: unit(i, 23) * rows * SKY_BAND,
                rx: span(i, 37, 6.0, 20.0),
                ry: span(i, 41, 1.5, 4.0),
                speed: span(i, 53, 1.5, 4.5),
                density: span(i, 67, 0.4, 0.9),
            }
        })
        .collect()
}

/// Drift every cloud by `speed * dt` columns.
///
/// A cloud whose left edge has passed `cols` re-enters with its right edge at
/// column 0.
#[must_use]
pub fn advance_clouds(clouds: &[Cloud], dt: f64, cols: usize) -> Vec<Cloud> {
    let cols = cols as f64;
    let advanced: Vec<Cloud> = clouds
        .iter()
        .map(|cloud| {
            let x = cloud.x + cloud.speed * dt;
            let x = if x - cloud.rx > cols { -cloud.rx } else { x };
            Cloud { x, ..*cloud }
        })
        .collect();
    tracing::trace!(count = advanced.len(), dt, "advanced clouds");
    advanced
}
