use serde::Serialize;

/// A single observation of the input series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub price: f64,
}

/// Working frame carried through the pipeline.
///
/// Holds the raw closes, their timestamps and, once the smoother has run,
/// the smoothed column. Timestamps are expected non-decreasing; when the
/// caller supplies none, positional indices are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceFrame {
    pub times: Vec<f64>,
    pub close: Vec<f64>,
    pub smooth: Option<Vec<f64>>,
}

impl PriceFrame {
    pub fn new(times: Vec<f64>, close: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), close.len());
        Self {
            times,
            close,
            smooth: None,
        }
    }

    /// Build a frame from closes alone, indexing time positionally.
    pub fn from_closes(close: Vec<f64>) -> Self {
        let times = (0..close.len()).map(|i| i as f64).collect();
        Self::new(times, close)
    }

    pub fn from_samples(samples: &[Sample]) -> Self {
        Self::new(
            samples.iter().map(|s| s.time).collect(),
            samples.iter().map(|s| s.price).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Column the extrema scan reads: the smoothed series when available,
    /// the raw closes otherwise.
    pub fn analysis_column(&self) -> &[f64] {
        self.smooth.as_deref().unwrap_or(&self.close)
    }
}
