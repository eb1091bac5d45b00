use tracing::debug;

use super::Stage;
use crate::series::PriceFrame;
use crate::types::{Extremum, ExtremumKind};

/// ExtremaDetector
///
/// Finds local maxima and minima of the smoothed series via sign changes
/// of the discrete first difference.
///
/// It answers: "Where does the smoothed series turn?"
///
/// The output strictly alternates kinds: candidates that survive the scan
/// with a same-kind neighbor are collapsed to the more extreme one, so
/// flat or noisy regions cannot break the alternation downstream stages
/// rely on.
#[derive(Debug, Clone)]
pub struct ExtremaDetector {
    /// Minimum index distance between two accepted extrema.
    min_distance: usize,
}

impl ExtremaDetector {
    pub fn new(min_distance: usize) -> Self {
        Self { min_distance }
    }
}

impl Stage for ExtremaDetector {
    type Input = PriceFrame;
    type Output = Vec<Extremum>;

    fn evaluate(&self, frame: &PriceFrame) -> Vec<Extremum> {
        let candidates = scan_candidates(frame.analysis_column(), &frame.times, self.min_distance);
        let alternating = enforce_alternation(candidates);

        if alternating.len() < 2 {
            debug!(
                found = alternating.len(),
                "fewer than two alternating extrema, returning empty set"
            );
            return Vec::new();
        }

        alternating
    }
}

/// Raw sign-change scan.
///
/// A max at i needs a positive difference into i and a negative one out
/// of it; a min the reverse. Boundary samples are never candidates.
/// Candidates closer than `min_distance` to the previously accepted one
/// are dropped in scan order.
fn scan_candidates(values: &[f64], times: &[f64], min_distance: usize) -> Vec<Extremum> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut delta = Vec::with_capacity(values.len());
    delta.push(0.0);
    for i in 1..values.len() {
        delta.push(values[i] - values[i - 1]);
    }
    delta[0] = delta[1];

    let mut out = Vec::new();
    let mut last = -(min_distance as isize);

    for i in 1..values.len() - 1 {
        if (i as isize - last) < min_distance as isize {
            continue;
        }

        let kind = if delta[i] > 0.0 && delta[i + 1] < 0.0 {
            Some(ExtremumKind::Max)
        } else if delta[i] < 0.0 && delta[i + 1] > 0.0 {
            Some(ExtremumKind::Min)
        } else {
            None
        };

        if let Some(kind) = kind {
            out.push(Extremum {
                index: i,
                time: times[i],
                price: values[i],
                kind,
            });
            last = i as isize;
        }
    }

    out
}

/// Collapse same-kind neighbors, keeping the more extreme one.
fn enforce_alternation(candidates: Vec<Extremum>) -> Vec<Extremum> {
    let mut filtered: Vec<Extremum> = Vec::with_capacity(candidates.len());

    for e in candidates {
        match filtered.last_mut() {
            Some(prev) if prev.kind == e.kind => {
                let replace = match e.kind {
                    ExtremumKind::Max => e.price > prev.price,
                    ExtremumKind::Min => e.price < prev.price,
                };
                if replace {
                    *prev = e;
                }
            }
            _ => filtered.push(e),
        }
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(values: Vec<f64>, min_distance: usize) -> Vec<Extremum> {
        ExtremaDetector::new(min_distance).evaluate(&PriceFrame::from_closes(values))
    }

    fn mk(index: usize, price: f64, kind: ExtremumKind) -> Extremum {
        Extremum {
            index,
            time: index as f64,
            price,
            kind,
        }
    }

    #[test]
    fn zigzag_yields_alternating_extrema() {
        let out = detect(vec![0.0, 5.0, 1.0, 6.0, 2.0, 7.0, 3.0], 1);

        let kinds: Vec<_> = out.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ExtremumKind::Max,
                ExtremumKind::Min,
                ExtremumKind::Max,
                ExtremumKind::Min,
                ExtremumKind::Max
            ]
        );
        assert_eq!(out[0].index, 1);
        assert_eq!(out[0].price, 5.0);
    }

    #[test]
    fn single_turning_point_scans_one_max() {
        // 10 rising then 10 falling samples: the scan sees exactly one
        // candidate, at the turn.
        let mut values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        values.extend((0..10).map(|i| 9.0 - i as f64));
        let times: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

        let candidates = scan_candidates(&values, &times, 1);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].index, 9);
        assert_eq!(candidates[0].kind, ExtremumKind::Max);
    }

    #[test]
    fn fewer_than_two_extrema_returns_empty() {
        let mut values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        values.extend((0..10).map(|i| 9.0 - i as f64));

        assert!(detect(values, 1).is_empty());
        assert!(detect(vec![1.0, 2.0, 3.0, 4.0], 1).is_empty());
        assert!(detect(Vec::new(), 1).is_empty());
    }

    #[test]
    fn min_distance_drops_close_candidates() {
        // Peaks at 1, 3, 5, 7 with dips between; distance 4 keeps only
        // every other accepted turn.
        let values = vec![0.0, 5.0, 1.0, 6.0, 2.0, 7.0, 3.0, 8.0, 4.0];

        let dense = detect(values.clone(), 1);
        let sparse = scan_candidates(
            &values,
            &(0..values.len()).map(|i| i as f64).collect::<Vec<_>>(),
            4,
        );

        assert_eq!(dense.len(), 7);
        assert_eq!(sparse.len(), 2);
        assert_eq!(sparse[0].index, 1);
        assert_eq!(sparse[1].index, 5);
    }

    #[test]
    fn alternation_pass_keeps_the_more_extreme() {
        let collapsed = enforce_alternation(vec![
            mk(1, 5.0, ExtremumKind::Max),
            mk(4, 7.0, ExtremumKind::Max),
            mk(8, 2.0, ExtremumKind::Min),
            mk(11, 3.0, ExtremumKind::Min),
            mk(15, 6.0, ExtremumKind::Max),
        ]);

        assert_eq!(collapsed.len(), 3);
        assert_eq!(collapsed[0].index, 4);
        assert_eq!(collapsed[0].price, 7.0);
        assert_eq!(collapsed[1].index, 8);
        assert_eq!(collapsed[1].price, 2.0);
        assert_eq!(collapsed[2].index, 15);
    }

    #[test]
    fn plateau_series_degrades_to_empty() {
        // Flat tops never produce the strict sign change a candidate
        // needs; the lone trough that remains is below the two-extrema
        // minimum.
        assert!(detect(vec![1.0, 2.0, 2.0, 2.0, 1.0, 2.0, 2.0, 1.0], 1).is_empty());
    }
}
