#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::f64::consts::TAU;

/// Share of the grid height one unit of hill height occupies.
pub const HILL_SCALE: f64 = 0.3;

/// (amplitude, cycles across the grid, phase)
const HARMONICS: [(f64, f64, f64); 4] = [
    (0.54, 1.0, 4.5),
    (0.34, 2.3, 0.2),
    (0.21, 5.1, 5.5),
    (0.12, 11.7, 1.2),
];

const BASELINE: f64 = 0.3;

/// Silhouette height at `col`, roughly in `[-0.2, 1.3]`.
#[must_use]
pub fn hill_height(col: f64, cols: usize) -> f64 {
    let t = col / cols.max(1) as f64;
    BASELINE
        + HARMONICS
            .iter()
            .map(|(amp, freq, phase)| amp * (t * freq * TAU + phase).sin())
            .sum::<f64>()
}

/// Topmost terrain row for `col`. Values at or past `rows` mean the column
/// has no terrain.
#[must_use]
pub fn ground_row(col: usize, cols: usize, rows: usize) -> i64 {
    let h = hill_height(col as f64, cols);
    (rows as f64 * (1.0 - HILL_SCALE * h)).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_bit_identical_across_calls() {
        for col in 0..200 {
            assert_eq!(
                hill_height(f64::from(col), 200).to_bits(),
                hill_height(f64::from(col), 200).to_bits()
            );
        }
    }

    #[test]
    fn height_stays_in_documented_band() {
        for col in 0..1000 {
            let h = hill_height(f64::from(col), 1000);
            assert!((-0.2..=1.3).contains(&h), "col {col}: {h}");
        }
    }

    #[test]
    fn height_spans_the_whole_band() {
        let (min, max) = (0..10_000)
            .map(|col| hill_height(f64::from(col), 10_000))
            .fold((f64::MAX, f64::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));
        assert!((min + 0.2).abs() < 0.03, "min {min}");
        assert!((max - 1.3).abs() < 0.03, "max {max}");
    }

    #[test]
    fn tallest_ridge_rises_well_into_the_grid() {
        let (cols, rows) = (10_000, 24);
        let top = (0..cols)
            .map(|col| ground_row(col, cols, rows))
            .min()
            .expect("columns");
        // floor(24 * (1 - 0.3 * 1.3)) == 14
        assert!(top <= 15, "ridge top {top}");
        let covered = (0..cols)
            .filter(|col| ground_row(*col, cols, rows) < rows as i64)
            .count();
        assert!(covered * 2 > cols, "{covered} of {cols} columns have terrain");
    }

    #[test]
    fn height_is_continuous() {
        let cols = 400;
        for col in 0..cols {
            let a = hill_height(f64::from(col), cols as usize);
            let b = hill_height(f64::from(col) + 0.01, cols as usize);
            assert!((a - b).abs() < 0.01);
        }
    }

    #[test]
    fn profile_is_not_flat() {
        let heights = (0..80).map(|c| hill_height(f64::from(c), 80));
        let (min, max) = heights.fold((f64::MAX, f64::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));
        assert!(max - min > 0.3);
    }

    #[test]
    fn ground_row_sits_in_lower_part_of_grid() {
        let rows = 40;
        for col in 0..120 {
            let ground = ground_row(col, 120, rows);
            assert!(ground >= (rows as f64 * 0.55) as i64, "col {col}: {ground}");
            assert!(ground <= (rows as f64 * 1.1) as i64, "col {col}: {ground}");
        }
    }
}
