use crate::engines::evaluation::QualityEvaluator;
use crate::engines::generation::{
    gene::{Gene, GeneValue},
    gene_pool::{GenePool, GenerationStats},
};
use crate::error::Result;
use crate::types::Quality;
use log::info;
use rand::rngs::StdRng;
use rand::Rng;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize);
    fn on_generation_complete(&mut self, generation: usize, stats: &GenerationStats, best_so_far: Quality);
    /// Checked before every generation; returning false stops the run.
    fn should_continue(&mut self) -> bool {
        true
    }
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        (**self).on_generation_start(generation, total)
    }

    fn on_generation_complete(&mut self, generation: usize, stats: &GenerationStats, best_so_far: Quality) {
        (**self).on_generation_complete(generation, stats, best_so_far)
    }

    fn should_continue(&mut self) -> bool {
        (**self).should_continue()
    }
}

/// Callback that ignores every event.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation_start(&mut self, _generation: usize, _total: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _stats: &GenerationStats, _best_so_far: Quality) {}
}

/// Outcome of `EvolutionEngine::run`
#[derive(Debug, Clone)]
pub struct RunSummary<V: GeneValue> {
    pub generations_run: usize,
    pub cancelled: bool,
    /// Per-generation stats in run order
    pub history: Vec<GenerationStats>,
    /// Best quality seen up to and including each generation
    pub best_so_far: Vec<Quality>,
    pub best_index: usize,
    pub best_quality: Quality,
    pub best_gene: Gene<V>,
}

/// Drives a gene pool for a number of generations against one evaluator.
pub struct EvolutionEngine<V: GeneValue, E: QualityEvaluator<V>, R: Rng = StdRng> {
    pool: GenePool<V, R>,
    evaluator: E,
}

impl<V: GeneValue, E: QualityEvaluator<V>, R: Rng> EvolutionEngine<V, E, R> {
    pub fn new(pool: GenePool<V, R>, evaluator: E) -> Self {
        Self { pool, evaluator }
    }

    /// Run up to `generations` epochs, then re-evaluate and report the best
    /// gene. The callback can stop the run between epochs.
    pub fn run<C: ProgressCallback>(
        &mut self,
        generations: usize,
        mut callback: C,
    ) -> Result<RunSummary<V>> {
        let direction = self.pool.direction();
        let mut history = Vec::with_capacity(generations);
        let mut best_so_far: Vec<Quality> = Vec::with_capacity(generations);
        let mut cancelled = false;

        for generation in 0..generations {
            if !callback.should_continue() {
                info!("Evolution stopped before generation {}", generation + 1);
                cancelled = true;
                break;
            }
            callback.on_generation_start(generation, generations);

            let stats = self.pool.single_generation(&mut self.evaluator)?;
            let best = match best_so_far.last() {
                Some(&previous) => direction.better(previous, stats.best_quality),
                None => stats.best_quality,
            };
            best_so_far.push(best);

            callback.on_generation_complete(generation, &stats, best);
            history.push(stats);
        }

        let best_index = self.pool.best_gene_index(&mut self.evaluator)?;
        let best_gene = self.pool.gene(best_index).clone();

        Ok(RunSummary {
            generations_run: history.len(),
            cancelled,
            history,
            best_so_far,
            best_index,
            best_quality: best_gene.quality(),
            best_gene,
        })
    }

    pub fn pool(&self) -> &GenePool<V, R> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut GenePool<V, R> {
        &mut self.pool
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn into_parts(self) -> (GenePool<V, R>, E) {
        (self.pool, self.evaluator)
    }
}
