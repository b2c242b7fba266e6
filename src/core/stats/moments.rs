// ============================================================================
// Running moments (Terriberry's one-pass update of central moments 2 and 3)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    n: u64,
    mean: f64,
    sum2: f64,
    sum3: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(data: &[f64]) -> Self {
        let mut stats = Self::new();
        for &y in data {
            stats.push(y);
        }
        stats
    }

    pub fn push(&mut self, y: f64) {
        if self.n == 0 {
            self.n = 1;
            self.mean = y;
            self.sum2 = 0.0;
            self.sum3 = 0.0;
            return;
        }

        let n = self.n as f64;
        let np1 = n + 1.0;
        let delta = y - self.mean;
        let dsquare = delta * delta;

        self.mean += delta / np1;
        self.sum3 += n * (n - 1.0) * dsquare * delta / (np1 * np1);
        self.sum3 -= 3.0 * self.sum2 * delta / np1;
        self.sum2 += n * dsquare / np1;

        self.n += 1;
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        if self.n == 0 { f64::NAN } else { self.mean }
    }

    /// Bias-adjusted sample skewness (G1). Needs at least three values.
    pub fn skewness(&self) -> f64 {
        if self.n < 3 {
            return f64::NAN;
        }
        let n = self.n as f64;
        (n * (n - 1.0).sqrt() / (n - 2.0)) * self.sum3 / self.sum2.powf(1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_mean() {
        let stats = RunningStats::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.count(), 5);
        assert!(close(stats.mean(), 3.0));
    }

    #[test]
    fn test_symmetric_has_zero_skew() {
        let stats = RunningStats::from_slice(&[-3.0, -1.0, 0.0, 1.0, 3.0]);
        assert!(close(stats.skewness(), 0.0));
    }

    #[test]
    fn test_skewness_matches_direct_formula() {
        let data = [1.0, 2.0, 2.0, 3.0, 9.0];
        let stats = RunningStats::from_slice(&data);

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let m2: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
        let m3: f64 = data.iter().map(|x| (x - mean).powi(3)).sum();

        let g1 = n.sqrt() * m3 / m2.powf(1.5);
        assert!(close(stats.skewness(), g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)));
        assert!(stats.skewness() > 0.0);
    }

    #[test]
    fn test_uniform_grid() {
        let data: Vec<f64> = (0..10_000).map(|i| i as f64).collect();
        let stats = RunningStats::from_slice(&data);
        assert!(close(stats.mean(), 4999.5));
        assert!(stats.skewness().abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let stats = RunningStats::new();
        assert!(stats.mean().is_nan());
        assert!(stats.skewness().is_nan());

        let stats = RunningStats::from_slice(&[1.0, 2.0]);
        assert!(stats.skewness().is_nan());
    }
}
