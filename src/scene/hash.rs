/// Position-keyed pseudo-random value in `[0, 1]`.
///
/// Neighbouring coordinates land far apart. The masked 15-bit result is divided
/// by `0x7fff`, so `1.0` itself is reachable.
#[must_use]
pub fn hash(x: i32, y: i32) -> f64 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    f64::from((h ^ (h >> 16)) & 0x7fff) / f64::from(0x7fff)
}
