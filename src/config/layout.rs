use super::pool::DEFAULT_CROSSOVER_RATE;
use super::traits::ConfigSection;
use crate::error::GenePoolError;
use serde::{Deserialize, Serialize};

/// Parameters for optimizing a diagram layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub generations: usize,
    /// Typical node extent in pixels, scales the position range
    pub avg_node_size: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            generations: 30,
            avg_node_size: 60,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: 0.005,
            seed: None,
        }
    }
}

impl ConfigSection for LayoutConfig {
    fn section_name() -> &'static str {
        "layout"
    }

    fn validate(&self) -> Result<(), GenePoolError> {
        if self.avg_node_size == 0 {
            return Err(GenePoolError::Configuration(
                "Average node size must be positive".to_string()
            ));
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(GenePoolError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}
