use tracing::debug;

use super::Stage;
use crate::types::{Wave, WaveType};

/// WaveClassifier
///
/// Labels each wave against its batch: impulse when both amplitude and
/// velocity clear their factors of the batch means, correction otherwise.
///
/// Classification is batch-global. Adding one wave shifts the means, so a
/// rerun over the grown set may relabel earlier waves; callers needing a
/// consistent view must classify once per wave set.
#[derive(Debug, Clone)]
pub struct WaveClassifier {
    /// Amplitude factor applied to the batch mean.
    lambda1: f64,

    /// Velocity factor applied to the batch mean.
    lambda2: f64,
}

impl WaveClassifier {
    pub fn new(lambda1: f64, lambda2: f64) -> Self {
        Self { lambda1, lambda2 }
    }
}

impl Stage for WaveClassifier {
    type Input = [Wave];
    type Output = Vec<Wave>;

    fn evaluate(&self, waves: &[Wave]) -> Vec<Wave> {
        if waves.is_empty() {
            return Vec::new();
        }

        let n = waves.len() as f64;
        let mean_amplitude = waves.iter().map(|w| w.amplitude).sum::<f64>() / n;
        let mean_velocity = waves.iter().map(|w| w.velocity).sum::<f64>() / n;

        let classified = waves
            .iter()
            .map(|w| {
                let wave_type = if w.amplitude > self.lambda1 * mean_amplitude
                    && w.velocity > self.lambda2 * mean_velocity
                {
                    WaveType::Impulse
                } else {
                    WaveType::Correction
                };

                Wave {
                    wave_type,
                    ..w.clone()
                }
            })
            .collect();

        debug!(
            waves = waves.len(),
            mean_amplitude, mean_velocity, "batch classified"
        );

        classified
    }
}
