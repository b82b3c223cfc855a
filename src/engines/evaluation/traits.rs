use crate::engines::generation::gene::{Gene, GeneValue};
use crate::error::Result;
use crate::types::Quality;

/// Scores candidate genes for a gene pool.
///
/// `prepare` runs once per quality computation, before any gene is scored,
/// and may gather population-wide statistics that `score` relies on.
pub trait QualityEvaluator<V: GeneValue> {
    fn prepare(&mut self, _population: &[Gene<V>]) -> Result<()> {
        Ok(())
    }

    /// Quality of the gene at `gene_index`. Errors abandon the generation.
    fn score(&self, gene_index: usize, gene: &Gene<V>) -> Result<Quality>;
}

impl<V: GeneValue, E: QualityEvaluator<V> + ?Sized> QualityEvaluator<V> for &mut E {
    fn prepare(&mut self, population: &[Gene<V>]) -> Result<()> {
        (**self).prepare(population)
    }

    fn score(&self, gene_index: usize, gene: &Gene<V>) -> Result<Quality> {
        (**self).score(gene_index, gene)
    }
}

/// Adapts a closure into an evaluator
pub struct FnEvaluator<F> {
    score_fn: F,
}

impl<F> FnEvaluator<F> {
    pub fn new(score_fn: F) -> Self {
        Self { score_fn }
    }
}

impl<V, F> QualityEvaluator<V> for FnEvaluator<F>
where
    V: GeneValue,
    F: Fn(usize, &Gene<V>) -> Result<Quality>,
{
    fn score(&self, gene_index: usize, gene: &Gene<V>) -> Result<Quality> {
        (self.score_fn)(gene_index, gene)
    }
}
