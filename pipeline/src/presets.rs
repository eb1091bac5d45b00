//! Per-timeframe parameter presets.
//!
//! Shorter frames carry more noise: windows shrink with the bar size and
//! the impulse and quality bars drop with them. The tables here are the
//! tuned starting points; callers may still override any knob afterwards.

use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;

/// Standard chart timeframes the presets are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M1,
    M5,
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Minutes per bar.
    pub fn minutes(self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::H1 => 60,
            Timeframe::H4 => 240,
            Timeframe::D1 => 1440,
        }
    }

    /// Conventional companion one level below, for pairing a higher-level
    /// view with a zoomed-in one.
    pub fn companion(self) -> Timeframe {
        match self {
            Timeframe::D1 => Timeframe::H4,
            Timeframe::H4 => Timeframe::H1,
            Timeframe::H1 => Timeframe::M15,
            Timeframe::M15 => Timeframe::M5,
            Timeframe::M5 | Timeframe::M1 => Timeframe::M1,
        }
    }

    /// Tuned analysis parameters for this timeframe, applied over `base`.
    pub fn apply(self, base: AnalysisConfig) -> AnalysisConfig {
        let (window, min_distance, lambda1, lambda2, threshold) = match self {
            Timeframe::D1 => (13, 5, 0.80, 0.65, 0.50),
            Timeframe::H4 => (12, 4, 0.78, 0.62, 0.47),
            Timeframe::H1 => (11, 4, 0.75, 0.60, 0.45),
            Timeframe::M15 => (9, 3, 0.70, 0.55, 0.42),
            Timeframe::M5 => (7, 3, 0.65, 0.50, 0.40),
            Timeframe::M1 => (5, 2, 0.60, 0.45, 0.38),
        };

        AnalysisConfig {
            window,
            min_extrema_distance: min_distance,
            lambda1,
            lambda2,
            quality_threshold: threshold,
            ..base
        }
    }
}

/// Motif bounds for the primary (higher) frame of a paired run.
pub fn primary_bounds(cfg: AnalysisConfig) -> AnalysisConfig {
    AnalysisConfig {
        alpha: 0.618,
        r_min: 0.25,
        r_max: 0.85,
        ..cfg
    }
}

/// Looser motif bounds for the zoomed (lower) companion frame.
pub fn companion_bounds(cfg: AnalysisConfig) -> AnalysisConfig {
    AnalysisConfig {
        alpha: 0.50,
        r_min: 0.20,
        r_max: 0.90,
        ..cfg
    }
}
