use tracing::debug;

use super::{EPS, Stage};
use crate::types::StructuralTriple;

/// Correction-ratio band inside which the fit peaks at the golden point.
const BAND_LO: f64 = 0.3;
const BAND_HI: f64 = 0.8;
const GOLDEN: f64 = 0.618;

/// QualityScorer
///
/// Computes a weighted composite of ratio, symmetry and slope fits for
/// every triple. A structurally valid triple whose score misses the
/// threshold is demoted to invalid; this is a second gate, independent of
/// the detector's rules. Scores are stored on invalid triples too.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    /// Weights of the ratio / symmetry / slope sub-scores. Summing to 1
    /// is a convention, not enforced.
    weights: (f64, f64, f64),

    threshold: f64,
}

impl QualityScorer {
    pub fn new(weights: (f64, f64, f64), threshold: f64) -> Self {
        Self { weights, threshold }
    }
}

impl Stage for QualityScorer {
    type Input = [StructuralTriple];
    type Output = Vec<StructuralTriple>;

    fn evaluate(&self, triples: &[StructuralTriple]) -> Vec<StructuralTriple> {
        let (wr, ws, wl) = self.weights;

        let scored: Vec<StructuralTriple> = triples
            .iter()
            .map(|t| {
                let score = wr * ratio_fit(t) + ws * symmetry_fit(t) + wl * slope_fit(t);

                StructuralTriple {
                    quality_score: score,
                    is_valid: t.is_valid && score >= self.threshold,
                    ..t.clone()
                }
            })
            .collect();

        let demoted = triples
            .iter()
            .zip(&scored)
            .filter(|(before, after)| before.is_valid && !after.is_valid)
            .count();
        if demoted > 0 {
            debug!(demoted, threshold = self.threshold, "triples demoted by quality gate");
        }

        scored
    }
}

/// Closeness of the correction ratio to the golden point.
///
/// Inside [0.3, 0.8] the fit peaks at 0.618; outside, a softer fallback
/// centered on 0.55 applies, clamped at zero.
fn ratio_fit(t: &StructuralTriple) -> f64 {
    let r = t.correction_ratio;

    if (BAND_LO..=BAND_HI).contains(&r) {
        1.0 - (r - GOLDEN).abs() / (GOLDEN - BAND_LO)
    } else {
        (1.0 - (r - 0.55).abs() / 0.55).max(0.0)
    }
}

/// Temporal symmetry of the two impulses: rewards T1 close to T3.
fn symmetry_fit(t: &StructuralTriple) -> f64 {
    let (t1, t3) = (t.w1.duration, t.w3.duration);
    1.0 - (t1 - t3).abs() / (t1.max(t3) + EPS)
}

/// Direction stability: impulses aligned, correction opposed.
fn slope_fit(t: &StructuralTriple) -> f64 {
    let same_impulse = (t.w1.direction == t.w3.direction) as u8 as f64;
    let opposed_correction = (t.w2.direction != t.w1.direction) as u8 as f64;
    (same_impulse + opposed_correction) / 2.0
}
