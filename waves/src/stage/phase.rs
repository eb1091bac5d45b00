use serde::Serialize;

use crate::types::StructuralTriple;

/// Phase-0 description; consumers match this string verbatim.
pub const NO_STRUCTURE: &str = "No valid structure found";

/// Result of a phase resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseResult {
    /// 0 = searching, 1 = impulse, 2 = correction, 3 = continuation or
    /// post-structure.
    pub phase: u8,

    pub description: String,

    /// The input triples with the resolved phase written onto every
    /// currently valid one. Inputs are left untouched.
    pub triples: Vec<StructuralTriple>,
}

/// PhaseAssigner
///
/// Resolves which leg of the most recent valid triple the current bar
/// sits in. The phase is a property of the current structural regime, so
/// it is written onto every valid triple, not only the most recent one.
///
/// Recomputed fresh per call; nothing persists between calls.
#[derive(Debug, Clone, Default)]
pub struct PhaseAssigner;

impl PhaseAssigner {
    pub fn assign(&self, triples: &[StructuralTriple], current_index: usize) -> PhaseResult {
        let last = triples
            .iter()
            .filter(|t| t.is_valid)
            .max_by_key(|t| t.w3.end.index);

        let Some(last) = last else {
            return PhaseResult {
                phase: 0,
                description: NO_STRUCTURE.to_string(),
                triples: triples.to_vec(),
            };
        };

        let (phase, description) = if current_index <= last.w1.end.index {
            (1, "Phase 1 - First Impulse")
        } else if current_index <= last.w2.end.index {
            (2, "Phase 2 - Correction")
        } else if current_index <= last.w3.end.index {
            (3, "Phase 3 - Continuation Impulse")
        } else {
            (3, "Phase 3+ - Post-structure zone")
        };

        let triples = triples
            .iter()
            .map(|t| {
                if t.is_valid {
                    StructuralTriple { phase, ..t.clone() }
                } else {
                    t.clone()
                }
            })
            .collect();

        PhaseResult {
            phase,
            description: description.to_string(),
            triples,
        }
    }
}
