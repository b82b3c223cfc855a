//! Class diagram layout on top of the gene pool.
//!
//! Every node gets an x and a y `u16` field in the gene. The evaluator rewards
//! layouts whose boxes do not overlap, whose connection lines avoid other
//! boxes, and which stay compact.

pub mod geometry;
pub mod graph;
pub mod evaluator;

pub use evaluator::{node_position, LayoutEvaluator, FIELDS_PER_NODE};
pub use geometry::{Point, Rect, Segment, Size};
pub use graph::{Connection, LayoutGraph};

use crate::config::{ConfigSection, LayoutConfig, PoolConfig};
use crate::engines::generation::{EvolutionEngine, GeneValue, GenePool, ProgressCallback, RunSummary};
use crate::error::Result;
use crate::types::OptimizationDirection;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Population size for a diagram: large graphs get fewer genes per node to
/// keep each generation affordable.
pub fn population_size(num_nodes: usize) -> usize {
    let root = (num_nodes as f64).sqrt() as usize;
    if num_nodes > 100 {
        root * 3
    } else if num_nodes > 50 {
        root * 5
    } else {
        root * 30 + 50
    }
}

/// Largest coordinate a node may be placed at.
pub fn max_position(num_nodes: usize, avg_node_size: u32) -> u64 {
    let max = (num_nodes as f64).sqrt() * (avg_node_size as f64 * 1.5);
    (max as u64).min(<u16 as GeneValue>::MAX)
}

/// Pool configuration for laying out `num_nodes` nodes.
pub fn pool_config(num_nodes: usize, config: &LayoutConfig) -> PoolConfig {
    PoolConfig {
        gene_byte_size: num_nodes * FIELDS_PER_NODE * <u16 as GeneValue>::WIDTH,
        gene_count: population_size(num_nodes),
        crossover_rate: config.crossover_rate,
        mutation_rate: config.mutation_rate,
        min_value: 0,
        max_value: max_position(num_nodes, config.avg_node_size),
        direction: OptimizationDirection::Maximize,
        seed: config.seed,
    }
}

/// Final node positions together with the run that produced them.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub positions: Vec<Point>,
    pub summary: RunSummary<u16>,
}

/// Evolve positions for every node of `graph`.
pub fn optimize_layout<C: ProgressCallback>(
    graph: &LayoutGraph,
    config: &LayoutConfig,
    callback: C,
) -> Result<LayoutResult> {
    graph.validate()?;
    config.validate()?;

    let pool_config = pool_config(graph.num_nodes(), config);
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pool = GenePool::<u16, _>::new(&pool_config, rng)?;
    info!(
        "Optimizing layout of {} nodes with {} genes for {} generations",
        graph.num_nodes(),
        pool.num_genes(),
        config.generations
    );

    let mut engine = EvolutionEngine::new(pool, LayoutEvaluator::new(graph));
    let summary = engine.run(config.generations, callback)?;
    let positions = (0..graph.num_nodes())
        .map(|node| node_position(&summary.best_gene, node))
        .collect();

    Ok(LayoutResult { positions, summary })
}
