//! Single-population genetic algorithm.
//!
//! The pool never copies the population into a second generation buffer.
//! Each epoch overwrites the worst genes with children of the best genes and
//! then mutates random fields anywhere in the population, so memory stays at
//! one population for the whole search.

use crate::config::{ConfigSection, PoolConfig};
use crate::engines::evaluation::QualityEvaluator;
use crate::engines::generation::{
    gene::{Gene, GeneValue},
    histogram::QualityHistogram,
    operators::{self, pick_parents, random_split, randomize_gene, remove_consumed, splice},
    selection::{fill_best_worst, SelectionThresholds},
};
use crate::error::{GenePoolError, Result};
use crate::types::{OptimizationDirection, Quality};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Quality figures measured on the scores evaluated during one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub best_quality: Quality,
    pub worst_quality: Quality,
    pub mean_quality: f64,
}

pub struct GenePool<V: GeneValue, R: Rng = StdRng> {
    genes: Vec<Gene<V>>,
    gene_bytes: usize,
    num_best_genes: usize,
    mutation_events: usize,
    min_value: u64,
    max_value: u64,
    direction: OptimizationDirection,
    best_genes: Vec<usize>,
    worst_genes: Vec<usize>,
    scratch_a: Vec<V>,
    scratch_b: Vec<V>,
    rng: R,
}

impl<V: GeneValue> GenePool<V, StdRng> {
    /// Create a pool whose random source is seeded from `config.seed`, or from
    /// OS entropy when no seed is configured.
    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<V: GeneValue, R: Rng> GenePool<V, R> {
    /// Allocate the population and fill every field with a random value in
    /// `[min_value, max_value]`. A crossover rate outside `[0, 0.5)` is
    /// replaced by 0.35; configurations that would leave no genes to cross
    /// over are rejected.
    pub fn new(config: &PoolConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        if config.gene_byte_size % V::WIDTH != 0 {
            return Err(GenePoolError::Configuration(format!(
                "Gene size of {} bytes is not a multiple of the {}-byte value width",
                config.gene_byte_size,
                V::WIDTH
            )));
        }
        if config.max_value > V::MAX {
            return Err(GenePoolError::Configuration(format!(
                "Maximum value {} does not fit a {}-byte gene value",
                config.max_value,
                V::WIDTH
            )));
        }

        let crossover_rate = config.effective_crossover_rate();
        if crossover_rate != config.crossover_rate {
            warn!(
                "Crossover rate {} must be below 0.5, using {}",
                config.crossover_rate, crossover_rate
            );
        }

        let num_fields = config.gene_byte_size / V::WIDTH;
        let num_best_genes = config.num_best_genes();
        let mut genes = vec![Gene::zeroed(num_fields); config.gene_count];
        for gene in genes.iter_mut() {
            randomize_gene(gene, config.min_value, config.max_value, &mut rng);
        }

        debug!(
            "Initialized gene pool: {} genes x {} fields, {} best/worst, {} mutations per generation",
            config.gene_count, num_fields, num_best_genes, config.mutation_events()
        );

        Ok(Self {
            genes,
            gene_bytes: config.gene_byte_size,
            num_best_genes,
            mutation_events: config.mutation_events(),
            min_value: config.min_value,
            max_value: config.max_value,
            direction: config.direction,
            best_genes: Vec::with_capacity(num_best_genes),
            worst_genes: Vec::with_capacity(num_best_genes),
            scratch_a: vec![V::default(); num_fields],
            scratch_b: vec![V::default(); num_fields],
            rng,
        })
    }

    /// Run one generation: quality, selection, crossover, mutation.
    pub fn single_generation<E>(&mut self, evaluator: &mut E) -> Result<GenerationStats>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        self.compute_quality(evaluator)?;

        let histogram = self.quality_histogram();
        let stats = GenerationStats {
            best_quality: self.best_occupied(&histogram),
            worst_quality: self.worst_occupied(&histogram),
            mean_quality: histogram.mean(),
        };

        self.select_with(&histogram);
        self.crossover();
        self.mutate();

        Ok(stats)
    }

    /// Score every gene. Stored qualities are replaced only after all genes
    /// scored successfully.
    pub fn compute_quality<E>(&mut self, evaluator: &mut E) -> Result<()>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        evaluator.prepare(&self.genes)?;
        let qualities = self
            .genes
            .iter()
            .enumerate()
            .map(|(index, gene)| evaluator.score(index, gene))
            .collect::<Result<Vec<_>>>()?;

        for (gene, quality) in self.genes.iter_mut().zip(qualities) {
            gene.set_quality(quality);
        }
        Ok(())
    }

    /// Histogram of the stored qualities. Does not re-evaluate.
    pub fn quality_histogram(&self) -> QualityHistogram {
        QualityHistogram::from_qualities(self.genes.iter().map(|gene| gene.quality()))
    }

    /// Rebuild the best and worst lists from the stored qualities.
    pub fn build_best_worst_list(&mut self) {
        let histogram = self.quality_histogram();
        self.select_with(&histogram);
    }

    fn select_with(&mut self, histogram: &QualityHistogram) {
        let thresholds =
            SelectionThresholds::from_histogram(histogram, self.num_best_genes, self.direction);
        let qualities: Vec<Quality> = self.genes.iter().map(|gene| gene.quality()).collect();
        fill_best_worst(
            &qualities,
            thresholds,
            self.num_best_genes,
            self.direction,
            &mut self.best_genes,
            &mut self.worst_genes,
        );
        debug!(
            "Selection thresholds: best {} worst {}",
            thresholds.best, thresholds.worst
        );
    }

    /// Cross pairs of best genes into successive worst slots until the best
    /// list is used up. Consumes the current best list.
    pub fn crossover(&mut self) {
        let mut genes_remaining = self.best_genes.len();
        let mut dst = 0;

        while genes_remaining >= 2 {
            let split = random_split::<V, _>(self.gene_bytes, &mut self.rng);
            let (src1, src2) = pick_parents(genes_remaining, &mut self.rng);

            // Parents are copied out first, a parent may also be a target.
            self.scratch_a
                .copy_from_slice(self.genes[self.best_genes[src1]].fields());
            self.scratch_b
                .copy_from_slice(self.genes[self.best_genes[src2]].fields());

            let dst1 = self.worst_genes[dst];
            let dst2 = self.worst_genes[dst + 1];
            dst += 2;

            splice(&self.scratch_a, &self.scratch_b, split, self.genes[dst1].fields_mut());
            splice(&self.scratch_b, &self.scratch_a, split, self.genes[dst2].fields_mut());

            remove_consumed(&mut self.best_genes, genes_remaining, src1, src2);
            genes_remaining -= 2;
        }
        self.best_genes.truncate(genes_remaining);
    }

    /// Re-randomize `floor(mutation_rate * 8 * gene_bytes * gene_count)`
    /// randomly chosen fields. The same field may be hit more than once.
    /// Returns the number of events applied.
    pub fn mutate(&mut self) -> usize {
        let mut applied = 0;
        for _ in 0..self.mutation_events {
            let gene = operators::rand_max(self.genes.len() - 1, &mut self.rng);
            let offset = operators::rand_max(self.gene_bytes - 1, &mut self.rng);
            self.randomize_gene_value(gene, offset);
            applied += 1;
        }
        applied
    }

    /// Re-randomize the field containing byte `offset` of a gene.
    pub fn randomize_gene_value(&mut self, gene_index: usize, offset: usize) {
        let field = operators::field_boundary::<V>(offset);
        let value = operators::random_value(self.min_value, self.max_value, &mut self.rng);
        self.genes[gene_index].set_field(field, value);
    }

    /// Re-evaluate the population and return the index of the first gene
    /// holding the best occupied quality.
    pub fn best_gene_index<E>(&mut self, evaluator: &mut E) -> Result<usize>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        self.compute_quality(evaluator)?;
        Ok(self.current_best_index())
    }

    /// Fields of the best gene after a fresh evaluation.
    pub fn best_gene<E>(&mut self, evaluator: &mut E) -> Result<&Gene<V>>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        let index = self.best_gene_index(evaluator)?;
        Ok(&self.genes[index])
    }

    /// Little-endian bytes of the best gene after a fresh evaluation.
    pub fn best_gene_bytes<E>(&mut self, evaluator: &mut E) -> Result<Vec<u8>>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        Ok(self.best_gene(evaluator)?.to_bytes())
    }

    /// Run `generations` epochs back to back, returning per-generation stats.
    pub fn run_generations<E>(
        &mut self,
        generations: usize,
        evaluator: &mut E,
    ) -> Result<Vec<GenerationStats>>
    where
        E: QualityEvaluator<V> + ?Sized,
    {
        let mut stats = Vec::with_capacity(generations);
        for _ in 0..generations {
            stats.push(self.single_generation(&mut *evaluator)?);
        }
        Ok(stats)
    }

    fn current_best_index(&self) -> usize {
        let best = self.best_occupied(&self.quality_histogram());
        self.genes
            .iter()
            .position(|gene| gene.quality() == best)
            .unwrap_or(0)
    }

    fn best_occupied(&self, histogram: &QualityHistogram) -> Quality {
        match self.direction {
            OptimizationDirection::Maximize => histogram.highest_occupied(),
            OptimizationDirection::Minimize => histogram.lowest_occupied(),
        }
    }

    fn worst_occupied(&self, histogram: &QualityHistogram) -> Quality {
        match self.direction {
            OptimizationDirection::Maximize => histogram.lowest_occupied(),
            OptimizationDirection::Minimize => histogram.highest_occupied(),
        }
    }

    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn gene_bytes(&self) -> usize {
        self.gene_bytes
    }

    pub fn num_best_genes(&self) -> usize {
        self.num_best_genes
    }

    pub fn mutation_events(&self) -> usize {
        self.mutation_events
    }

    pub fn direction(&self) -> OptimizationDirection {
        self.direction
    }

    pub fn genes(&self) -> &[Gene<V>] {
        &self.genes
    }

    pub fn gene(&self, index: usize) -> &Gene<V> {
        &self.genes[index]
    }

    pub fn gene_quality(&self, index: usize) -> Quality {
        self.genes[index].quality()
    }

    pub fn best_genes(&self) -> &[usize] {
        &self.best_genes
    }

    pub fn worst_genes(&self) -> &[usize] {
        &self.worst_genes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::{FieldAverageEvaluator, FnEvaluator};
    use rand::rngs::StdRng;

    fn pool_config(gene_count: usize) -> PoolConfig {
        PoolConfig {
            gene_byte_size: 8,
            gene_count,
            crossover_rate: 0.35,
            mutation_rate: 0.005,
            min_value: 0,
            max_value: 255,
            direction: OptimizationDirection::Maximize,
            seed: Some(1),
        }
    }

    fn pool(config: &PoolConfig) -> GenePool<u16, StdRng> {
        GenePool::new(config, StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_initialize_sizes() {
        let pool = pool(&pool_config(20));
        assert_eq!(pool.num_genes(), 20);
        // 20 * 0.35 = 7 -> 8
        assert_eq!(pool.num_best_genes(), 8);
        assert!(pool.genes().iter().all(|g| g.num_fields() == 4 && g.byte_len() == 8));
    }

    #[test]
    fn test_initialize_rejects_unaligned_gene_size() {
        let config = PoolConfig { gene_byte_size: 7, ..pool_config(20) };
        let result = GenePool::<u16, _>::new(&config, StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(GenePoolError::Configuration(_))));
    }

    #[test]
    fn test_initialize_rejects_value_range_overflow() {
        let config = PoolConfig { max_value: 300, ..pool_config(20) };
        assert!(GenePool::<u8, _>::new(&config, StdRng::seed_from_u64(0)).is_err());
        assert!(GenePool::<u16, _>::new(&config, StdRng::seed_from_u64(0)).is_ok());
    }

    #[test]
    fn test_initialize_rejects_tiny_population() {
        let result = GenePool::<u16, _>::new(&pool_config(2), StdRng::seed_from_u64(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_same_seed_same_population() {
        let config = pool_config(10);
        let a = pool(&config);
        let b = pool(&config);
        assert_eq!(a.genes(), b.genes());
    }

    #[test]
    fn test_failed_evaluation_keeps_previous_qualities() {
        let mut pool = pool(&pool_config(10));
        pool.compute_quality(&mut FieldAverageEvaluator).unwrap();
        let before: Vec<Quality> = pool.genes().iter().map(|g| g.quality()).collect();

        let mut failing = FnEvaluator::new(|index: usize, _gene: &Gene<u16>| -> Result<Quality> {
            if index == 5 {
                Err(GenePoolError::Evaluation { gene_index: index, reason: "no layout".to_string() })
            } else {
                Ok(1)
            }
        });
        assert!(pool.single_generation(&mut failing).is_err());

        let after: Vec<Quality> = pool.genes().iter().map(|g| g.quality()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_crossover_writes_only_worst_slots() {
        let mut pool = pool(&pool_config(20));
        pool.compute_quality(&mut FieldAverageEvaluator).unwrap();
        pool.build_best_worst_list();
        let worst: Vec<usize> = pool.worst_genes().to_vec();
        let before: Vec<Gene<u16>> = pool.genes().to_vec();

        pool.crossover();

        assert!(pool.best_genes().is_empty());
        for (index, gene) in pool.genes().iter().enumerate() {
            if !worst.contains(&index) {
                assert_eq!(gene.fields(), before[index].fields());
            }
        }
    }

    #[test]
    fn test_best_gene_index_first_match_wins() {
        let mut pool = pool(&pool_config(10));
        let mut evaluator = FnEvaluator::new(|index: usize, _gene: &Gene<u16>| -> Result<Quality> {
            Ok(if index == 3 || index == 7 { 50 } else { 10 })
        });
        assert_eq!(pool.best_gene_index(&mut evaluator).unwrap(), 3);
    }

    #[test]
    fn test_best_gene_minimize() {
        let config = PoolConfig { direction: OptimizationDirection::Minimize, ..pool_config(10) };
        let mut pool = pool(&config);
        let mut evaluator = FnEvaluator::new(|index: usize, _gene: &Gene<u16>| -> Result<Quality> {
            Ok(if index == 6 { 2 } else { 40 })
        });
        assert_eq!(pool.best_gene_index(&mut evaluator).unwrap(), 6);
    }

    #[test]
    fn test_best_gene_bytes_length() {
        let mut pool = pool(&pool_config(10));
        let bytes = pool.best_gene_bytes(&mut FieldAverageEvaluator).unwrap();
        assert_eq!(bytes.len(), 8);
    }
}
