//! Distributions of connection weights and delays.
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::SNNError;

/// Maximum number of redraws before a clipped normal sample is clamped into its range.
pub const MAX_REDRAWS: usize = 1_000;

/// A normal distribution restricted to `[low, high]` by redrawing out-of-range samples.
/// Either bound may be infinite.
#[derive(Debug, Clone, Copy)]
pub struct ClippedNormal {
    normal: Normal<f64>,
    low: f64,
    high: f64,
}

impl ClippedNormal {
    /// Create a clipped normal distribution with mean `mu` and standard deviation `sigma`.
    /// Returns an error for a negative or non-finite `sigma`, or for an empty range.
    pub fn build(mu: f64, sigma: f64, low: f64, high: f64) -> Result<Self, SNNError> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(SNNError::InvalidParameter(format!(
                "Invalid clipping range [{}, {}]",
                low, high
            )));
        }
        if !sigma.is_finite() || !mu.is_finite() {
            return Err(SNNError::InvalidParameter(format!(
                "Invalid normal distribution: mu = {}, sigma = {}",
                mu, sigma
            )));
        }
        let normal = Normal::new(mu, sigma).map_err(|e| {
            SNNError::InvalidParameter(format!("Invalid normal distribution: {}", e))
        })?;
        Ok(ClippedNormal { normal, low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Distribution<f64> for ClippedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut value = self.normal.sample(rng);
        for _ in 0..MAX_REDRAWS {
            if value >= self.low && value <= self.high {
                return value;
            }
            value = self.normal.sample(rng);
        }
        value.clamp(self.low, self.high)
    }
}
