use serde::Deserialize;

use waves::error::ConfigError;
use waves::stage::smooth::SmoothingMethod;

/// Configuration knobs for one pipeline instance.
///
/// Constructed once, validated up front, immutable for the run. Every
/// recognized option of the external configuration bundle lives here; a
/// map of loose keyword thresholds is deliberately not supported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Noise filter variant applied before extrema detection.
    pub smoothing_method: SmoothingMethod,

    /// Smoothing window length in bars.
    ///
    /// The polynomial variant forces this to the next odd integer that
    /// can hold a fit of `poly_order`; the low-pass variant derives its
    /// kernel sigma from it.
    pub window: usize,

    /// Polynomial order for the polynomial variant.
    pub poly_order: usize,

    /// Minimum index distance between two accepted extrema.
    pub min_extrema_distance: usize,

    /// Amplitude factor: a wave must exceed lambda1 x mean amplitude to
    /// classify as impulse.
    pub lambda1: f64,

    /// Velocity factor: a wave must exceed lambda2 x mean velocity to
    /// classify as impulse.
    pub lambda2: f64,

    /// Minimum continuation strength: A3 >= alpha x A1.
    pub alpha: f64,

    /// Correction-ratio acceptance band.
    pub r_min: f64,
    pub r_max: f64,

    /// Weights of the ratio / symmetry / slope quality sub-scores.
    /// Summing to 1 is a convention, not enforced.
    pub quality_weights: (f64, f64, f64),

    /// Composite score below which a structurally valid triple is
    /// demoted.
    pub quality_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_method: SmoothingMethod::Polynomial,
            window: 11,
            poly_order: 3,
            min_extrema_distance: 3,
            lambda1: 0.85,
            lambda2: 0.70,
            alpha: 0.618,
            r_min: 0.30,
            r_max: 0.80,
            quality_weights: (0.40, 0.30, 0.30),
            quality_threshold: 0.55,
        }
    }
}

impl AnalysisConfig {
    /// Check every knob that is not already validated by the smoother's
    /// own constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_extrema_distance < 1 {
            return Err(ConfigError::ZeroExtremaDistance);
        }

        if self.r_min > self.r_max {
            return Err(ConfigError::RatioBoundsInverted {
                r_min: self.r_min,
                r_max: self.r_max,
            });
        }

        let (w1, w2, w3) = self.quality_weights;
        let bounded = [
            ("lambda1", self.lambda1),
            ("lambda2", self.lambda2),
            ("alpha", self.alpha),
            ("r_min", self.r_min),
            ("r_max", self.r_max),
            ("quality_weights.0", w1),
            ("quality_weights.1", w2),
            ("quality_weights.2", w3),
            ("quality_threshold", self.quality_threshold),
        ];

        for (name, value) in bounded {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        Ok(())
    }
}
