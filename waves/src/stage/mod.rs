pub mod classify;
pub mod extrema;
pub mod fractal;
pub mod phase;
pub mod quality;
pub mod smooth;
pub mod triple;
pub mod wave;

/// Epsilon floor applied wherever a near-zero duration or amplitude would
/// otherwise reach a denominator.
pub const EPS: f64 = 1e-9;

/// Core Stage trait.
///
/// A stage:
/// - owns its configuration
/// - consumes the previous stage's output by reference
/// - produces a fresh value, never mutating its input
pub trait Stage {
    /// Input type consumed per run
    type Input: ?Sized;

    /// Output type produced per run
    type Output;

    fn evaluate(&self, input: &Self::Input) -> Self::Output;
}
