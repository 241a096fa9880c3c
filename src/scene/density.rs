#![allow(clippy::cast_precision_loss)]

use super::clouds::Cloud;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DensitySample {
    pub density: f64,
    /// Index of the cloud that produced `density`.
    pub closest: Option<usize>,
}

/// Strongest cloud contribution at `(col, row)`.
///
/// The horizontal axis wraps, so each cloud is also tested one grid width to
/// the left and right.
#[must_use]
pub fn cloud_density_at(col: f64, row: f64, clouds: &[Cloud], cols: usize) -> DensitySample {
    let width = cols as f64;
    let mut best = DensitySample::default();
    for (idx, cloud) in clouds.iter().enumerate() {
        for offset in [0.0, width, -width] {
            let dx = (col - (cloud.x + offset)) / cloud.rx;
            let dy = (row - cloud.y) / cloud.ry;
            let dist = dx * dx + dy * dy;
            if dist >= 1.0 {
                continue;
            }
            let contribution = (1.0 - dist) * cloud.density;
            if contribution > best.density {
                best = DensitySample {
                    density: contribution,
                    closest: Some(idx),
                };
            }
        }
    }
    best
}
