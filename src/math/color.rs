//! RGB color distance metrics

/// Euclidean distance between two colors in RGB space
///
/// Channel deltas are taken in floating point; for 8-bit channels the result
/// ranges from 0.0 to roughly 441.7 (black against white).
pub fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&left, &right)| f64::from(left) - f64::from(right))
        .fold(0.0_f64, |acc, delta| delta.mul_add(delta, acc))
        .sqrt()
}
