use serde::{Deserialize, Serialize};

/// Score attached to a gene by the last quality computation.
pub type Quality = u16;

/// Whether larger or smaller quality scores are preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OptimizationDirection {
    #[default]
    Maximize,
    Minimize,
}

impl OptimizationDirection {
    /// True when `quality` is at least as good as `threshold`.
    pub fn at_least(self, quality: Quality, threshold: Quality) -> bool {
        match self {
            OptimizationDirection::Maximize => quality >= threshold,
            OptimizationDirection::Minimize => quality <= threshold,
        }
    }

    /// True when `quality` is no better than `threshold`.
    pub fn at_most(self, quality: Quality, threshold: Quality) -> bool {
        match self {
            OptimizationDirection::Maximize => quality <= threshold,
            OptimizationDirection::Minimize => quality >= threshold,
        }
    }

    /// Pick the better of two scores.
    pub fn better(self, a: Quality, b: Quality) -> Quality {
        match self {
            OptimizationDirection::Maximize => a.max(b),
            OptimizationDirection::Minimize => a.min(b),
        }
    }
}
