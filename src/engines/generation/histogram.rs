use crate::types::Quality;

/// Number of genes holding each quality score, indexed by score.
///
/// Always `max_quality + 1` buckets long. It is a derived view and is rebuilt
/// from the population whenever it is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityHistogram {
    counts: Vec<usize>,
}

impl QualityHistogram {
    pub fn from_qualities<I>(qualities: I) -> Self
    where
        I: IntoIterator<Item = Quality> + Clone,
    {
        let max_quality = qualities.clone().into_iter().max().unwrap_or(0);
        let mut counts = vec![0; max_quality as usize + 1];
        for quality in qualities {
            counts[quality as usize] += 1;
        }
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn count(&self, quality: Quality) -> usize {
        self.counts.get(quality as usize).copied().unwrap_or(0)
    }

    /// Number of buckets, `max_quality + 1`.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn top(&self) -> Quality {
        (self.counts.len() - 1) as Quality
    }

    /// Smallest score whose cumulative count from the bottom exceeds `limit`.
    /// Falls back to the highest bucket when no score qualifies.
    pub fn lower_cut(&self, limit: usize) -> Quality {
        let mut cumulative = 0;
        for (quality, count) in self.counts.iter().enumerate() {
            cumulative += count;
            if cumulative > limit {
                return quality as Quality;
            }
        }
        self.top()
    }

    /// Largest score whose cumulative count from the top exceeds `limit`.
    /// Falls back to zero when no score qualifies.
    pub fn upper_cut(&self, limit: usize) -> Quality {
        let mut cumulative = 0;
        for (quality, count) in self.counts.iter().enumerate().rev() {
            cumulative += count;
            if cumulative > limit {
                return quality as Quality;
            }
        }
        0
    }

    /// Highest score held by at least one gene.
    pub fn highest_occupied(&self) -> Quality {
        self.counts
            .iter()
            .rposition(|&count| count > 0)
            .unwrap_or(0) as Quality
    }

    /// Lowest score held by at least one gene.
    pub fn lowest_occupied(&self) -> Quality {
        self.counts
            .iter()
            .position(|&count| count > 0)
            .unwrap_or(0) as Quality
    }

    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(quality, &count)| quality as f64 * count as f64)
            .sum();
        weighted / total as f64
    }
}
