use thiserror::Error;

/// Configuration failures, reported at construction time before any data
/// is processed. Runs themselves never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("smoothing window {window} incompatible with polynomial order {poly_order} (need window >= poly_order + 2)")]
    WindowTooSmall { window: usize, poly_order: usize },

    #[error("smoothing window must be at least 5, got {0}")]
    WindowBelowMinimum(usize),

    #[error("min_extrema_distance must be at least 1")]
    ZeroExtremaDistance,

    #[error("correction ratio bounds inverted: r_min {r_min} > r_max {r_max}")]
    RatioBoundsInverted { r_min: f64, r_max: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
