pub mod config;
pub mod engines;
pub mod error;
pub mod services;
pub mod types;

pub use engines::evaluation::{FieldAverageEvaluator, FnEvaluator, QualityEvaluator};
pub use engines::generation::{EvolutionEngine, Gene, GenePool, GeneValue, QualityHistogram};
pub use error::{GenePoolError, Result};
pub use types::{OptimizationDirection, Quality};
