use std::f64::consts::PI;

/// Running univariate normal summary (count, mean and sum of squared deviations).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gaussian {
    n: f64,
    mean: f64,
    m2: f64,
}

impl Gaussian {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, x: f64) {
        self.n += 1.0;
        let delta = x - self.mean;
        self.mean += delta / self.n;
        self.m2 += delta * (x - self.mean);
    }

    pub fn merge(&mut self, other: &Gaussian) {
        if other.n == 0.0 {
            return;
        }
        if self.n == 0.0 {
            *self = other.clone();
            return;
        }
        let n = self.n + other.n;
        let delta = other.mean - self.mean;
        self.mean += delta * other.n / n;
        self.m2 += other.m2 + delta * delta * self.n * other.n / n;
        self.n = n;
    }

    /// Removes the observations summarised by `other`, which must be a subset of `self`.
    pub fn subtract(&mut self, other: &Gaussian) {
        let n = self.n - other.n;
        if n <= 0.0 {
            *self = Gaussian::new();
            return;
        }
        let mean = (self.n * self.mean - other.n * other.mean) / n;
        let delta = mean - other.mean;
        self.m2 = (self.m2 - other.m2 - delta * delta * other.n * n / self.n).max(0.0);
        self.mean = mean;
        self.n = n;
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn mode(&self) -> f64 {
        self.mean
    }

    /// Sample variance, zero below two observations.
    pub fn variance(&self) -> f64 {
        if self.n < 2.0 {
            return 0.0;
        }
        self.m2 / (self.n - 1.0)
    }

    /// Density at `x`. A degenerate (zero variance) summary has no density.
    pub fn pdf(&self, x: f64) -> f64 {
        let variance = self.variance();
        if variance <= 0.0 {
            return 0.0;
        }
        (-(x - self.mean).powi(2) / (2.0 * variance)).exp() / (2.0 * PI * variance).sqrt()
    }
}
