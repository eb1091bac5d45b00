use super::{EPS, Stage};
use crate::types::{Direction, Extremum, Wave, WaveType};

/// WaveBuilder
///
/// Pairs consecutive extrema into waves and derives their metrics.
/// Total: k extrema always yield k - 1 waves, zero when fewer than two
/// exist.
#[derive(Debug, Clone, Default)]
pub struct WaveBuilder;

impl Stage for WaveBuilder {
    type Input = [Extremum];
    type Output = Vec<Wave>;

    fn evaluate(&self, extrema: &[Extremum]) -> Vec<Wave> {
        extrema
            .windows(2)
            .enumerate()
            .map(|(j, pair)| build_wave(j, pair[0], pair[1]))
            .collect()
    }
}

fn build_wave(idx: usize, start: Extremum, end: Extremum) -> Wave {
    let amplitude = (end.price - start.price).abs();
    // Floored so downstream divisions stay finite.
    let duration = (end.time - start.time).abs().max(EPS);

    let direction = if end.price > start.price {
        Direction::Up
    } else {
        Direction::Down
    };

    Wave {
        idx,
        start,
        end,
        amplitude,
        duration,
        angle: (amplitude / duration).atan(),
        velocity: amplitude / duration,
        direction,
        wave_type: WaveType::Unknown,
    }
}
