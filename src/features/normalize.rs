/// Guard against a degenerate (near-constant) sequence; keeps the division
/// finite instead of raising an error for silent tracks.
const EPS: f64 = 1e-9;

/// Map a raw feature sequence into [0, 1] using its 5th/95th percentile as
/// the effective min/max, clipping outliers. Two passes: sort a copy for the
/// percentiles, then apply the affine clip. Deterministic for identical
/// input.
pub fn normalize01(values: &[f32]) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let p5 = percentile(&sorted, 5.0);
    let p95 = percentile(&sorted, 95.0);

    values
        .iter()
        .map(|&x| (((x as f64 - p5) / (p95 - p5 + EPS)).clamp(0.0, 1.0)) as f32)
        .collect()
}

/// Percentile of a pre-sorted slice, with linear interpolation between
/// order statistics.
pub fn percentile(sorted: &[f32], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0] as f64,
        n => {
            let rank = p / 100.0 * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let frac = rank - lo as f64;
            if lo + 1 < n {
                sorted[lo] as f64 * (1.0 - frac) + sorted[lo + 1] as f64 * frac
            } else {
                sorted[lo] as f64
            }
        }
    }
}
