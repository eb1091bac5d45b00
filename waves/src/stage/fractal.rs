use tracing::debug;

use super::EPS;
use crate::types::{FractalResult, Wave};

/// Coefficient-of-variation bound under which the amplitude ratios count
/// as scale-invariant.
pub const STABILITY_BOUND: f64 = 0.30;

/// FractalityAnalyzer
///
/// Compares wave amplitudes of two independently analyzed series, for
/// example two timeframes of one instrument.
///
/// It answers: "Do the two scales move with a constant amplitude ratio?"
#[derive(Debug, Clone, Default)]
pub struct FractalityAnalyzer;

impl FractalityAnalyzer {
    /// Collect the full cross product of amplitude ratios and judge their
    /// spread. Pairs whose denominator amplitude is near zero are skipped.
    pub fn self_similarity(&self, a: &[Wave], b: &[Wave]) -> FractalResult {
        let mut ratios = Vec::with_capacity(a.len() * b.len());

        for wa in a {
            for wb in b {
                if wb.amplitude > EPS {
                    ratios.push(wa.amplitude / wb.amplitude);
                }
            }
        }

        if ratios.is_empty() {
            debug!("no amplitude pairs, fractality undecidable");
            return FractalResult::default();
        }

        let cv = stdev(&ratios) / (mean(&ratios) + EPS);
        let coefficient = median(&mut ratios);

        FractalResult {
            coefficient: Some(coefficient),
            coefficient_of_variation: cv,
            stable: cv < STABILITY_BOUND,
            pair_count: ratios.len(),
        }
    }
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation.
fn stdev(xs: &[f64]) -> f64 {
    let mu = mean(xs);
    (xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / xs.len() as f64).sqrt()
}

/// Median by full sort; the even split averages the two middle values.
fn median(xs: &mut [f64]) -> f64 {
    xs.sort_by(|a, b| a.total_cmp(b));

    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        (xs[n / 2 - 1] + xs[n / 2]) / 2.0
    }
}
