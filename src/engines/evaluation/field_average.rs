use super::traits::QualityEvaluator;
use crate::engines::generation::gene::{Gene, GeneValue};
use crate::error::{GenePoolError, Result};
use crate::types::Quality;

/// Rewards genes with large field values: the quality is the mean field value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAverageEvaluator;

impl<V: GeneValue> QualityEvaluator<V> for FieldAverageEvaluator {
    fn score(&self, gene_index: usize, gene: &Gene<V>) -> Result<Quality> {
        if gene.num_fields() == 0 {
            return Err(GenePoolError::Evaluation {
                gene_index,
                reason: "gene has no fields".to_string(),
            });
        }
        let average = gene.field_sum() / gene.num_fields() as u64;
        Quality::try_from(average).map_err(|_| GenePoolError::Evaluation {
            gene_index,
            reason: format!("average {} does not fit a quality score", average),
        })
    }
}
