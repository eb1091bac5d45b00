//! The analysis engine.
//!
//! For each input frame it:
//!   1. Smooths the close series.
//!   2. Detects alternating extrema.
//!   3. Builds and classifies waves.
//!   4. Emits and quality-gates structural triples.
//!   5. Resolves the structural phase of the latest bar.
//!
//! Two frames share no state, so a paired run executes both sides in
//! parallel and joins them in the fractality stage.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use common::logger::{RunId, run_span, stage_span};
use waves::error::ConfigError;
use waves::series::PriceFrame;
use waves::stage::Stage;
use waves::stage::classify::WaveClassifier;
use waves::stage::extrema::ExtremaDetector;
use waves::stage::fractal::FractalityAnalyzer;
use waves::stage::phase::PhaseAssigner;
use waves::stage::quality::QualityScorer;
use waves::stage::smooth::Smoother;
use waves::stage::triple::TripleDetector;
use waves::stage::wave::WaveBuilder;
use waves::types::{Extremum, FractalResult, StructuralTriple, Wave, WaveType};

use super::config::AnalysisConfig;

/// Everything one run produces for the reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Input frame with the smoothed column filled in.
    pub frame: PriceFrame,

    pub extrema: Vec<Extremum>,

    pub waves: Vec<Wave>,

    /// Every emitted triple, valid and invalid.
    pub triples: Vec<StructuralTriple>,

    /// The valid subset, phases written.
    pub valid_triples: Vec<StructuralTriple>,

    pub current_phase: u8,

    pub phase_description: String,
}

impl Analysis {
    pub fn impulse_count(&self) -> usize {
        self.waves
            .iter()
            .filter(|w| w.wave_type == WaveType::Impulse)
            .count()
    }

    pub fn correction_count(&self) -> usize {
        self.waves
            .iter()
            .filter(|w| w.wave_type == WaveType::Correction)
            .count()
    }
}

/// Two analyses joined by their amplitude self-similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairAnalysis {
    pub first: Analysis,
    pub second: Analysis,
    pub fractal: FractalResult,
}

/// An ordered set of labeled analyses with fractality between each
/// consecutive pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiframeAnalysis {
    pub analyses: Vec<(String, Analysis)>,
    pub fractality: Vec<(String, FractalResult)>,
}

/// One configured pipeline instance: the full stage set, built once and
/// reused across runs.
pub struct Pipeline {
    smoother: Smoother,
    detector: ExtremaDetector,
    builder: WaveBuilder,
    classifier: WaveClassifier,
    tripler: TripleDetector,
    scorer: QualityScorer,
    phaser: PhaseAssigner,
    fractal: FractalityAnalyzer,
}

impl Pipeline {
    /// Build a pipeline from a configuration.
    ///
    /// The only fallible call; runs never fail afterwards.
    pub fn new(cfg: &AnalysisConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        Ok(Self {
            smoother: Smoother::new(cfg.smoothing_method, cfg.window, cfg.poly_order)?,
            detector: ExtremaDetector::new(cfg.min_extrema_distance),
            builder: WaveBuilder,
            classifier: WaveClassifier::new(cfg.lambda1, cfg.lambda2),
            tripler: TripleDetector::new(cfg.alpha, cfg.r_min, cfg.r_max),
            scorer: QualityScorer::new(cfg.quality_weights, cfg.quality_threshold),
            phaser: PhaseAssigner,
            fractal: FractalityAnalyzer,
        })
    }

    /// Run the per-series stages left to right over one frame.
    ///
    /// Total: insufficient data degrades to empty collections and phase 0
    /// instead of erroring.
    pub fn run(&self, frame: &PriceFrame) -> Analysis {
        let run_id = RunId::new();
        let span = run_span(&run_id, frame.len());
        let _guard = span.enter();

        let mut frame = frame.clone();
        let smooth = self.smoother.evaluate(&frame);
        frame.smooth = Some(smooth);

        let extrema = self.detector.evaluate(&frame);
        let waves = self.classifier.evaluate(&self.builder.evaluate(&extrema));
        let triples = self.scorer.evaluate(&self.tripler.evaluate(&waves));

        let current_index = frame.len().saturating_sub(1);
        let resolved = self.phaser.assign(&triples, current_index);

        let valid_triples: Vec<StructuralTriple> = resolved
            .triples
            .iter()
            .filter(|t| t.is_valid)
            .cloned()
            .collect();

        debug!(
            extrema = extrema.len(),
            waves = waves.len(),
            triples = resolved.triples.len(),
            valid = valid_triples.len(),
            phase = resolved.phase,
            "run complete"
        );

        Analysis {
            frame,
            extrema,
            waves,
            triples: resolved.triples,
            valid_triples,
            current_phase: resolved.phase,
            phase_description: resolved.description,
        }
    }

    /// Analyze two frames (typically two timeframes of one instrument) in
    /// parallel and measure amplitude self-similarity between them.
    pub fn run_pair(&self, first: &PriceFrame, second: &PriceFrame) -> PairAnalysis {
        let (first, second) = rayon::join(|| self.run(first), || self.run(second));

        let fractal = {
            let span = stage_span("fractality");
            let _guard = span.enter();
            self.fractal.self_similarity(&first.waves, &second.waves)
        };

        PairAnalysis {
            first,
            second,
            fractal,
        }
    }

    /// Analyze an ordered set of labeled frames and measure fractality
    /// between each consecutive pair. Output order follows input order.
    pub fn run_multiframe(&self, frames: &[(String, PriceFrame)]) -> MultiframeAnalysis {
        let analyses: Vec<(String, Analysis)> = frames
            .par_iter()
            .map(|(label, frame)| (label.clone(), self.run(frame)))
            .collect();

        let fractality = analyses
            .windows(2)
            .map(|pair| {
                let (label_a, a) = &pair[0];
                let (label_b, b) = &pair[1];
                (
                    format!("{label_a}->{label_b}"),
                    self.fractal.self_similarity(&a.waves, &b.waves),
                )
            })
            .collect();

        MultiframeAnalysis {
            analyses,
            fractality,
        }
    }
}
