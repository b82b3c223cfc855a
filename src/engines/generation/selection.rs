use super::histogram::QualityHistogram;
use crate::types::{OptimizationDirection, Quality};

/// Quality cut points separating the best and worst parts of a population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionThresholds {
    pub best: Quality,
    pub worst: Quality,
}

impl SelectionThresholds {
    /// One pass over the histogram from each end. More than `list_size` genes
    /// sit at or beyond each threshold, so both lists always fill completely.
    pub fn from_histogram(
        histogram: &QualityHistogram,
        list_size: usize,
        direction: OptimizationDirection,
    ) -> Self {
        let lower = histogram.lower_cut(list_size);
        let upper = histogram.upper_cut(list_size);
        match direction {
            OptimizationDirection::Maximize => Self { best: upper, worst: lower },
            OptimizationDirection::Minimize => Self { best: lower, worst: upper },
        }
    }
}

/// Fill `best` and `worst` with population indices in population order,
/// stopping each list once it holds `list_size` entries.
pub fn fill_best_worst(
    qualities: &[Quality],
    thresholds: SelectionThresholds,
    list_size: usize,
    direction: OptimizationDirection,
    best: &mut Vec<usize>,
    worst: &mut Vec<usize>,
) {
    best.clear();
    worst.clear();

    for (index, &quality) in qualities.iter().enumerate() {
        if best.len() == list_size {
            break;
        }
        if direction.at_least(quality, thresholds.best) {
            best.push(index);
        }
    }

    for (index, &quality) in qualities.iter().enumerate() {
        if worst.len() == list_size {
            break;
        }
        if direction.at_most(quality, thresholds.worst) {
            worst.push(index);
        }
    }
}
