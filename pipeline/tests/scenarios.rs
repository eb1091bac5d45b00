//! End-to-end scenarios over the full stage chain.

use common::logger::init_logger;
use pipeline::{AnalysisConfig, Pipeline, SmoothingMethod};
use pipeline::locator::{self, StructureLeg};
use pipeline::report;
use waves::series::{PriceFrame, Sample};
use waves::stage::phase::NO_STRUCTURE;

/// EMA keeps piecewise-linear segments monotone, so turn counts in these
/// scenarios are exact.
fn ema_config() -> AnalysisConfig {
    AnalysisConfig {
        smoothing_method: SmoothingMethod::Ema,
        window: 5,
        min_extrema_distance: 2,
        ..Default::default()
    }
}

/// A clean impulse-correction-impulse shape: a short decline, a 100-point
/// rise, a 61.8% retrace, a 100-point continuation and a trailing fade so
/// the last turn is interior.
fn structured_series() -> Vec<f64> {
    let mut p = Vec::new();
    for i in 0..10 {
        p.push(30.0 - 3.0 * i as f64);
    }
    for i in 0..20 {
        p.push(5.0 * i as f64);
    }
    for i in 0..20 {
        p.push(100.0 - 3.09 * i as f64);
    }
    for i in 0..20 {
        p.push(38.2 + 5.0 * i as f64);
    }
    for i in 0..=10 {
        p.push(138.2 - 5.0 * i as f64);
    }
    p
}

#[test]
fn triangle_series_finds_no_structure() {
    init_logger("pipeline-tests");
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let mut closes: Vec<f64> = (0..50).map(|i| i as f64).collect();
    closes.extend((0..50).map(|i| 49.0 - i as f64));

    let out = pipeline.run(&PriceFrame::from_closes(closes));

    // A single turning point cannot form a wave, let alone a triple.
    assert!(out.extrema.is_empty());
    assert!(out.waves.is_empty());
    assert!(out.triples.is_empty());
    assert!(out.valid_triples.is_empty());
    assert_eq!(out.current_phase, 0);
    assert_eq!(out.phase_description, NO_STRUCTURE);
}

#[test]
fn empty_series_degrades_without_raising() {
    let pipeline = Pipeline::new(&AnalysisConfig::default()).unwrap();

    let out = pipeline.run(&PriceFrame::from_closes(Vec::new()));

    assert!(out.extrema.is_empty());
    assert!(out.waves.is_empty());
    assert!(out.triples.is_empty());
    assert_eq!(out.current_phase, 0);
    assert_eq!(out.phase_description, NO_STRUCTURE);
}

#[test]
fn short_series_passes_through_the_smoother() {
    let pipeline = Pipeline::new(&AnalysisConfig::default()).unwrap();
    let closes = vec![3.0, 9.0, 2.0, 8.0];

    let out = pipeline.run(&PriceFrame::from_closes(closes.clone()));

    assert_eq!(out.frame.smooth, Some(closes));
    assert!(out.waves.is_empty());
    assert_eq!(out.current_phase, 0);
}

#[test]
fn structured_zigzag_yields_one_valid_triple() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let out = pipeline.run(&PriceFrame::from_closes(structured_series()));

    assert_eq!(out.extrema.len(), 4);
    assert_eq!(out.waves.len(), 3);
    assert_eq!(out.triples.len(), 1);
    assert_eq!(out.valid_triples.len(), 1);

    let t = &out.valid_triples[0];
    assert!(t.correction_ratio >= 0.30 && t.correction_ratio <= 0.80);
    assert!(t.w3.amplitude >= 0.618 * t.w1.amplitude);
    assert_ne!(t.w1.direction, t.w2.direction);
    assert_eq!(t.w1.direction, t.w3.direction);
    assert!(t.quality_score >= 0.55);

    // The final bar sits past the continuation impulse.
    assert_eq!(out.current_phase, 3);
    assert!(out.phase_description.contains("Post-structure"));
    assert_eq!(t.phase, 3);
}

#[test]
fn explicit_timestamps_scale_durations_not_structure() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();
    let closes = structured_series();

    let indexed = pipeline.run(&PriceFrame::from_closes(closes.clone()));

    let samples: Vec<Sample> = closes
        .iter()
        .enumerate()
        .map(|(i, &price)| Sample {
            time: i as f64 * 60.0,
            price,
        })
        .collect();
    let timed = pipeline.run(&PriceFrame::from_samples(&samples));

    // Same turns, same validity; only the time axis stretches.
    assert_eq!(timed.extrema.len(), indexed.extrema.len());
    assert_eq!(timed.valid_triples.len(), indexed.valid_triples.len());
    assert_eq!(timed.current_phase, indexed.current_phase);
    assert!(
        (timed.waves[0].duration - 60.0 * indexed.waves[0].duration).abs() < 1e-9
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let cfg = AnalysisConfig::default();
    let frame = PriceFrame::from_closes(structured_series());

    let a = Pipeline::new(&cfg).unwrap().run(&frame);
    let b = Pipeline::new(&cfg).unwrap().run(&frame);

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn paired_run_measures_fractality() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let big = PriceFrame::from_closes(structured_series());
    let small = PriceFrame::from_closes(
        structured_series().iter().map(|p| p * 0.5).collect(),
    );

    let out = pipeline.run_pair(&big, &small);

    assert_eq!(out.first.waves.len(), 3);
    assert_eq!(out.second.waves.len(), 3);
    assert_eq!(out.fractal.pair_count, 9);
    assert!(out.fractal.coefficient.is_some());
    assert!(out.fractal.coefficient_of_variation.is_finite());
}

#[test]
fn multiframe_run_links_consecutive_frames() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let frames = vec![
        ("1h".to_string(), PriceFrame::from_closes(structured_series())),
        ("15m".to_string(), PriceFrame::from_closes(structured_series())),
        ("5m".to_string(), PriceFrame::from_closes(structured_series())),
    ];

    let out = pipeline.run_multiframe(&frames);

    assert_eq!(out.analyses.len(), 3);
    assert_eq!(out.analyses[0].0, "1h");
    assert_eq!(out.analyses[2].0, "5m");
    assert_eq!(out.fractality.len(), 2);
    assert_eq!(out.fractality[0].0, "1h->15m");
    assert_eq!(out.fractality[1].0, "15m->5m");
    assert!(out.fractality[0].1.coefficient.is_some());
}

#[test]
fn report_renders_the_detected_structure() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let out = pipeline.run(&PriceFrame::from_closes(structured_series()));
    let text = report::render(&out);

    assert!(text.contains("Total bars analysed  : 81"));
    assert!(text.contains("Waves detected       : 3"));
    assert!(text.contains("Valid triples (W1W2W3): 1"));
    assert!(text.contains("VALID STRUCTURES:"));
    assert!(text.contains("Phase=3"));
    assert!(text.contains("CURRENT PHASE  : Phase 3+"));
}

#[test]
fn locator_flags_the_correction_leg() {
    let pipeline = Pipeline::new(&ema_config()).unwrap();

    let out = pipeline.run(&PriceFrame::from_closes(structured_series()));

    // Bar 45 sits mid-retrace of the detected structure.
    let pos = locator::locate(&out, 45);
    assert_eq!(pos.leg, StructureLeg::W2);
    assert!(pos.entry_signal);

    // The final bar is past every leg.
    let tail = locator::locate(&out, 100);
    assert_eq!(tail.leg, StructureLeg::PostStructure);
    assert!(!tail.entry_signal);
}

#[test]
fn inverted_ratio_bounds_fail_at_construction() {
    let cfg = AnalysisConfig {
        r_min: 0.9,
        r_max: 0.2,
        ..Default::default()
    };

    assert!(Pipeline::new(&cfg).is_err());
}
