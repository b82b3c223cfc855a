use super::traits::ConfigSection;
use crate::error::GenePoolError;
use crate::types::OptimizationDirection;
use serde::{Deserialize, Serialize};

/// Crossover rate used whenever the requested one is outside `[0, 0.5)`.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.35;

/// Sizing and rate parameters of a gene pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Bytes per gene, must be a multiple of the value field width
    pub gene_byte_size: usize,
    pub gene_count: usize,
    /// Fraction of the population used as best parents and worst targets
    pub crossover_rate: f64,
    /// Fraction of all population bits driving the mutation event count
    pub mutation_rate: f64,
    pub min_value: u64,
    pub max_value: u64,
    pub direction: OptimizationDirection,
    pub seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            gene_byte_size: 20,
            gene_count: 100,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: 0.005,
            min_value: 0,
            max_value: 255,
            direction: OptimizationDirection::Maximize,
            seed: None,
        }
    }
}

impl PoolConfig {
    /// The crossover rate actually applied. Rates of 0.5 and above, negative
    /// rates and NaN are silently replaced by 0.35.
    pub fn effective_crossover_rate(&self) -> f64 {
        if (0.0..0.5).contains(&self.crossover_rate) {
            self.crossover_rate
        } else {
            DEFAULT_CROSSOVER_RATE
        }
    }

    /// Size of both the best and the worst list, always even.
    pub fn num_best_genes(&self) -> usize {
        let mut num_best = (self.gene_count as f64 * self.effective_crossover_rate()) as usize;
        if num_best & 1 == 1 {
            num_best += 1;
        }
        num_best
    }

    /// Number of randomize-field events applied per generation.
    pub fn mutation_events(&self) -> usize {
        let total_bytes = self.gene_byte_size.saturating_mul(self.gene_count) as f64;
        (self.mutation_rate * 8.0 * total_bytes) as usize
    }
}

impl ConfigSection for PoolConfig {
    fn section_name() -> &'static str {
        "pool"
    }

    fn validate(&self) -> Result<(), GenePoolError> {
        if self.gene_count == 0 {
            return Err(GenePoolError::Configuration(
                "Gene count must be at least 1".to_string()
            ));
        }
        if self.gene_byte_size == 0 {
            return Err(GenePoolError::Configuration(
                "Gene byte size must be at least 1".to_string()
            ));
        }
        if self.gene_byte_size.checked_mul(self.gene_count).is_none() {
            return Err(GenePoolError::Configuration(format!(
                "Population of {} genes x {} bytes is too large",
                self.gene_count, self.gene_byte_size
            )));
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(GenePoolError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.min_value > self.max_value {
            return Err(GenePoolError::Configuration(format!(
                "Minimum value {} exceeds maximum value {}",
                self.min_value, self.max_value
            )));
        }
        if self.num_best_genes() == 0 {
            return Err(GenePoolError::Configuration(format!(
                "Population of {} genes is too small for crossover rate {}",
                self.gene_count,
                self.effective_crossover_rate()
            )));
        }
        Ok(())
    }
}
