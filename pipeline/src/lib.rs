pub mod config;
pub mod engine;
pub mod locator;
pub mod presets;
pub mod report;

pub use config::AnalysisConfig;
pub use engine::{Analysis, MultiframeAnalysis, PairAnalysis, Pipeline};
pub use waves::stage::smooth::SmoothingMethod;
