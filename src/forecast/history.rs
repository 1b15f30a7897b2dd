use rand::{Rng, SeedableRng, rngs::StdRng};

/// A seeded generator of seasonal series used as forecasting history.
///
/// Each series is a sinusoid around `base` with Gaussian noise. Series `i`
/// gets a phase offset of `2*pi*i/n_series` and its own RNG seeded with
/// `seed + i`, so output is deterministic for a given seed.
///
/// # Examples
///
/// ```
/// use feature_recorder::forecast::history::SyntheticHistory;
///
/// let history = SyntheticHistory::new(10.0, 3.0, 24, 0.0, 42).generate(2, 48);
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[0].len(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticHistory {
    /// Level the series oscillates around.
    pub base: f64,
    /// Amplitude of the seasonal component.
    pub amplitude: f64,
    /// Season length in steps.
    pub period: usize,
    /// Standard deviation of the Gaussian noise.
    pub noise_std: f64,
    /// Master random seed.
    pub seed: u64,
}

impl SyntheticHistory {
    /// Creates a new generator.
    ///
    /// # Arguments
    ///
    /// * `base` - Level the series oscillates around
    /// * `amplitude` - Amplitude of the seasonal component
    /// * `period` - Season length in steps (clamped to at least 1)
    /// * `noise_std` - Gaussian noise standard deviation (0 disables noise)
    /// * `seed` - Master random seed
    pub fn new(base: f64, amplitude: f64, period: usize, noise_std: f64, seed: u64) -> Self {
        Self {
            base,
            amplitude,
            period: period.max(1),
            noise_std,
            seed,
        }
    }

    /// Generates `n_series` series of `length` values each.
    pub fn generate(&self, n_series: usize, length: usize) -> Vec<Vec<f64>> {
        (0..n_series)
            .map(|i| {
                let phase = 2.0 * std::f64::consts::PI * i as f64 / n_series as f64;
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(i as u64));
                (0..length)
                    .map(|t| {
                        let angle = 2.0 * std::f64::consts::PI * (t % self.period) as f64
                            / self.period as f64
                            + phase;
                        self.base + self.amplitude * angle.sin() + gaussian_noise(&mut rng, self.noise_std)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
