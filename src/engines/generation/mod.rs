pub mod gene;
pub mod histogram;
pub mod selection;
pub mod operators;
pub mod gene_pool;
pub mod evolution_engine;
pub mod progress;

pub use gene::{Gene, GeneValue};
pub use histogram::QualityHistogram;
pub use selection::SelectionThresholds;
pub use gene_pool::{GenePool, GenerationStats};
pub use evolution_engine::{EvolutionEngine, NoProgress, ProgressCallback, RunSummary};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
