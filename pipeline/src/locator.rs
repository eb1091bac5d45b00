//! Locates the current bar inside the detected structure.
//!
//! Consumed by the alerting collaborator: a bar sitting in the correction
//! leg of the latest valid triple is the classic wait-for-continuation
//! entry setup.

use serde::Serialize;

use waves::types::WaveType;

use super::engine::Analysis;

/// Minimum extension, in bars, granted around each leg of a triple.
const MIN_LEG_EXTENSION: usize = 3;

/// Fraction of a leg's index span granted as extension on both sides.
const LEG_EXTENSION: f64 = 0.35;

/// Which part of the structure the current bar falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureLeg {
    /// Opening impulse of the most recent valid triple.
    W1,

    /// Correction leg of the most recent valid triple.
    W2,

    /// Continuation impulse of the most recent valid triple.
    W3,

    /// Inside some wave outside any valid triple.
    CurrentWave,

    /// Beyond the last detected wave.
    PostStructure,

    /// Nothing detected at all.
    Unlocated,
}

impl StructureLeg {
    fn name(self) -> &'static str {
        match self {
            StructureLeg::W1 => "W1",
            StructureLeg::W2 => "W2",
            StructureLeg::W3 => "W3",
            StructureLeg::CurrentWave => "current wave",
            StructureLeg::PostStructure => "post-structure",
            StructureLeg::Unlocated => "unlocated",
        }
    }
}

/// Where the current bar sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructurePosition {
    pub leg: StructureLeg,

    pub wave_type: WaveType,

    /// True when the bar sits in a correction that a continuation impulse
    /// may follow.
    pub entry_signal: bool,

    /// How the position was derived.
    pub method: String,
}

/// Resolve the position of `current_bar` within `analysis`.
///
/// Preference order: a leg of the most recent valid triple (each leg
/// extended by 35% of its span, at least three bars), then the innermost
/// containing wave, then the zone after the last wave.
pub fn locate(analysis: &Analysis, current_bar: usize) -> StructurePosition {
    if let Some(last) = analysis
        .valid_triples
        .iter()
        .max_by_key(|t| t.w3.end.index)
    {
        let legs = [
            (StructureLeg::W1, &last.w1),
            (StructureLeg::W2, &last.w2),
            (StructureLeg::W3, &last.w3),
        ];

        for (leg, wave) in legs {
            let span = wave.end.index.saturating_sub(wave.start.index);
            let ext = ((span as f64 * LEG_EXTENSION) as usize).max(MIN_LEG_EXTENSION);
            let lo = wave.start.index.saturating_sub(ext);
            let hi = wave.end.index + ext;

            if (lo..=hi).contains(&current_bar) {
                return StructurePosition {
                    leg,
                    wave_type: wave.wave_type,
                    entry_signal: leg == StructureLeg::W2,
                    method: format!("in {} of last structure", leg.name()),
                };
            }
        }
    }

    for wave in analysis.waves.iter().rev() {
        if (wave.start.index..=wave.end.index).contains(&current_bar) {
            return StructurePosition {
                leg: StructureLeg::CurrentWave,
                wave_type: wave.wave_type,
                entry_signal: wave.wave_type == WaveType::Correction,
                method: "current wave".to_string(),
            };
        }
    }

    if let Some(wave) = analysis.waves.last() {
        return StructurePosition {
            leg: StructureLeg::PostStructure,
            wave_type: wave.wave_type,
            entry_signal: false,
            method: "after structure".to_string(),
        };
    }

    StructurePosition {
        leg: StructureLeg::Unlocated,
        wave_type: WaveType::Unknown,
        entry_signal: false,
        method: "no waves detected".to_string(),
    }
}
