use super::{EPS, Stage};
use crate::types::{StructuralTriple, Wave, WaveType};

/// TripleDetector
///
/// Slides a three-wave window over the classified list and emits one
/// StructuralTriple per window, in wave-index order. Invalid windows are
/// emitted too; they carry diagnostic value for the reporting side.
///
/// A window is valid when it reads impulse-correction-impulse, the third
/// wave carries at least alpha of the first wave's amplitude, the
/// correction ratio sits inside [r_min, r_max], and the correction moves
/// against the opening impulse.
#[derive(Debug, Clone)]
pub struct TripleDetector {
    /// Minimum continuation strength: A3 >= alpha * A1.
    alpha: f64,

    /// Correction-ratio acceptance band.
    r_min: f64,
    r_max: f64,
}

impl TripleDetector {
    pub fn new(alpha: f64, r_min: f64, r_max: f64) -> Self {
        Self { alpha, r_min, r_max }
    }

    fn build_triple(&self, w1: &Wave, w2: &Wave, w3: &Wave) -> StructuralTriple {
        let correction_ratio = w2.amplitude / (w1.amplitude + EPS);

        let is_valid = w1.wave_type == WaveType::Impulse
            && w2.wave_type == WaveType::Correction
            && w3.wave_type == WaveType::Impulse
            && w3.amplitude >= self.alpha * w1.amplitude
            && (self.r_min..=self.r_max).contains(&correction_ratio)
            && w1.direction != w2.direction;

        StructuralTriple {
            w1: w1.clone(),
            w2: w2.clone(),
            w3: w3.clone(),
            correction_ratio,
            quality_score: 0.0,
            phase: 0,
            is_valid,
        }
    }
}

impl Stage for TripleDetector {
    type Input = [Wave];
    type Output = Vec<StructuralTriple>;

    fn evaluate(&self, waves: &[Wave]) -> Vec<StructuralTriple> {
        waves
            .windows(3)
            .map(|w| self.build_triple(&w[0], &w[1], &w[2]))
            .collect()
    }
}
