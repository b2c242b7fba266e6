/// Sort ascending in place. NaN sorts after every number.
pub fn sort_samples(data: &mut [f64]) {
    data.sort_unstable_by(f64::total_cmp);
}

/// Quantile of already-sorted data, approximately median unbiased
/// (Hyndman & Fan definition 8).
///
/// Returns NaN for empty data or `tau` outside `[0, 1]`.
pub fn sorted_quantile(sorted: &[f64], tau: f64) -> f64 {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&tau) {
        return f64::NAN;
    }
    if tau == 0.0 || n == 1 {
        return sorted[0];
    }
    if tau == 1.0 {
        return sorted[n - 1];
    }

    let h = (n as f64 + 1.0 / 3.0) * tau + 1.0 / 3.0;
    let hf = h.floor() as usize;

    if hf < 1 {
        sorted[0]
    } else if hf >= n {
        sorted[n - 1]
    } else {
        let lo = sorted[hf - 1];
        lo + (h - hf as f64) * (sorted[hf] - lo)
    }
}
