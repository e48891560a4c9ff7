pub mod config;
pub mod engine;
pub mod evaluators;
pub mod extract;
pub mod leverage;
pub mod percentile;
pub mod tiering;
pub mod validation;
pub mod weights;

pub use config::ScoringConfig;
pub use engine::{score_slate, RunOutput};
pub use extract::{extract_slate, FeatureVector};
pub use validation::validate_scoring;
