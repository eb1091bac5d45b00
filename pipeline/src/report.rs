//! Textual summary of one analysis run.
//!
//! Downstream consumers (report panel, prompt builder) parse this shape;
//! keep it stable.

use super::engine::Analysis;

/// Render the human-readable run summary.
pub fn render(analysis: &Analysis) -> String {
    let mut lines: Vec<String> = vec![
        "=".repeat(50),
        "  PATTERN RECOGNITION REPORT".to_string(),
        "=".repeat(50),
        format!("  Total bars analysed  : {}", analysis.frame.len()),
        format!("  Waves detected       : {}", analysis.waves.len()),
        format!("    Impulses           : {}", analysis.impulse_count()),
        format!("    Corrections        : {}", analysis.correction_count()),
        format!("  Valid triples (W1W2W3): {}", analysis.valid_triples.len()),
        "-".repeat(50),
    ];

    if !analysis.valid_triples.is_empty() {
        lines.push("  VALID STRUCTURES:".to_string());
        for (i, t) in analysis.valid_triples.iter().enumerate() {
            lines.push(format!(
                "  [{}] A1={:.4}  A2={:.4}  A3={:.4}",
                i + 1,
                t.w1.amplitude,
                t.w2.amplitude,
                t.w3.amplitude
            ));
            lines.push(format!(
                "      R={:.3}  Quality S={:.3}  Phase={}",
                t.correction_ratio, t.quality_score, t.phase
            ));
        }
    }

    lines.push("-".repeat(50));
    lines.push(format!("  CURRENT PHASE  : {}", analysis.phase_description));
    lines.push("=".repeat(50));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use waves::series::PriceFrame;
    use waves::stage::phase::NO_STRUCTURE;

    fn empty_analysis() -> Analysis {
        Analysis {
            frame: PriceFrame::from_closes(vec![1.0, 2.0, 3.0]),
            extrema: Vec::new(),
            waves: Vec::new(),
            triples: Vec::new(),
            valid_triples: Vec::new(),
            current_phase: 0,
            phase_description: NO_STRUCTURE.to_string(),
        }
    }

    #[test]
    fn report_carries_the_counts_and_phase() {
        let report = render(&empty_analysis());

        assert!(report.contains("PATTERN RECOGNITION REPORT"));
        assert!(report.contains("Total bars analysed  : 3"));
        assert!(report.contains("Waves detected       : 0"));
        assert!(report.contains("Valid triples (W1W2W3): 0"));
        assert!(report.contains(NO_STRUCTURE));
    }

    #[test]
    fn empty_run_omits_the_structure_block() {
        assert!(!render(&empty_analysis()).contains("VALID STRUCTURES"));
    }
}
