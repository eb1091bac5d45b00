use serde::Serialize;

/// Kind of a detected local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Max,
    Min,
}

/// Direction of a wave, from the sign of end price minus start price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Classification of a wave relative to its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveType {
    Impulse,
    Correction,

    #[default]
    Unknown,
}

/// A local peak or trough on the smoothed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    /// Position in the input series.
    pub index: usize,
    pub time: f64,
    pub price: f64,
    pub kind: ExtremumKind,
}

/// The price move between two consecutive extrema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wave {
    /// Position of the wave in the wave list.
    pub idx: usize,
    pub start: Extremum,
    pub end: Extremum,

    /// |price(end) - price(start)|
    pub amplitude: f64,

    /// time(end) - time(start), floored to a small positive epsilon.
    pub duration: f64,

    /// arctan(amplitude / duration)
    pub angle: f64,

    /// amplitude / duration
    pub velocity: f64,

    pub direction: Direction,

    /// Unknown until the classifier has run over the batch.
    pub wave_type: WaveType,
}

/// Three consecutive waves screened for an impulse-correction-impulse
/// motif. Emitted for every sliding window, valid or not; invalid ones
/// carry diagnostic value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralTriple {
    pub w1: Wave,
    pub w2: Wave,
    pub w3: Wave,

    /// R = amplitude(w2) / amplitude(w1)
    pub correction_ratio: f64,

    /// Composite quality score, written by the scorer.
    pub quality_score: f64,

    /// Structural phase of the current regime, written by the phase
    /// assigner onto every valid triple.
    pub phase: u8,

    pub is_valid: bool,
}

/// Self-similarity measurement across two independently analyzed wave
/// sets. Derived, not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FractalResult {
    /// Median amplitude ratio; None when no pair produced a ratio.
    pub coefficient: Option<f64>,

    pub coefficient_of_variation: f64,

    pub stable: bool,

    /// Number of amplitude pairs that entered the statistic.
    pub pair_count: usize,
}
