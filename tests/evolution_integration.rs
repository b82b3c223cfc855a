use genepool::config::PoolConfig;
use genepool::engines::evaluation::FieldAverageEvaluator;
use genepool::engines::generation::{
    EvolutionEngine, GenePool, GenerationStats, NoProgress, ProgressCallback,
};
use genepool::{OptimizationDirection, Quality};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Progress callback that records what it was told
#[derive(Default)]
struct RecordingCallback {
    started: Vec<usize>,
    completed: Vec<(usize, Quality)>,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        assert_eq!(total, 10);
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, generation: usize, _stats: &GenerationStats, best_so_far: Quality) {
        self.completed.push((generation, best_so_far));
    }
}

fn reference_config() -> PoolConfig {
    PoolConfig {
        gene_byte_size: 20,
        gene_count: 100,
        crossover_rate: 0.35,
        mutation_rate: 0.005,
        min_value: 0,
        max_value: 255,
        direction: OptimizationDirection::Maximize,
        seed: Some(2024),
    }
}

#[test]
fn test_field_average_evolution_improves() {
    let pool = GenePool::<u16, _>::new(&reference_config(), StdRng::seed_from_u64(2024)).unwrap();
    let mut engine = EvolutionEngine::new(pool, FieldAverageEvaluator);
    let mut callback = RecordingCallback::default();

    let summary = engine.run(10, &mut callback).unwrap();

    assert_eq!(summary.generations_run, 10);
    assert!(!summary.cancelled);
    assert_eq!(callback.started, (0..10).collect::<Vec<_>>());
    assert_eq!(callback.completed.len(), 10);

    // best so far never decreases
    assert!(summary.best_so_far.windows(2).all(|w| w[0] <= w[1]));
    let reported: Vec<Quality> = callback.completed.iter().map(|&(_, best)| best).collect();
    assert_eq!(reported, summary.best_so_far);

    let initial_mean = summary.history[0].mean_quality;
    let final_mean = summary.history[9].mean_quality;
    assert!(
        final_mean > initial_mean,
        "mean quality did not improve: {:.2} -> {:.2}",
        initial_mean,
        final_mean
    );

    assert!(summary.best_quality <= 255);
    assert_eq!(summary.best_gene.byte_len(), 20);
    assert_eq!(summary.best_gene.quality(), summary.best_quality);
    assert_eq!(engine.pool().gene_quality(summary.best_index), summary.best_quality);
}

#[test]
fn test_minimize_drives_quality_down() {
    let config = PoolConfig {
        direction: OptimizationDirection::Minimize,
        ..reference_config()
    };
    let pool = GenePool::<u8, _>::new(&config, StdRng::seed_from_u64(9)).unwrap();
    let mut engine = EvolutionEngine::new(pool, FieldAverageEvaluator);

    let summary = engine.run(10, NoProgress).unwrap();

    assert!(summary.best_so_far.windows(2).all(|w| w[0] >= w[1]));
    assert!(summary.history[9].mean_quality < summary.history[0].mean_quality);
    assert_eq!(summary.best_gene.byte_len(), 20);
}

#[test]
fn test_from_config_uses_seed() {
    let config = reference_config();
    let mut a = EvolutionEngine::new(GenePool::<u8>::from_config(&config).unwrap(), FieldAverageEvaluator);
    let mut b = EvolutionEngine::new(GenePool::<u8>::from_config(&config).unwrap(), FieldAverageEvaluator);

    let first = a.run(4, NoProgress).unwrap();
    let second = b.run(4, NoProgress).unwrap();

    assert_eq!(first.history, second.history);
    assert_eq!(first.best_gene, second.best_gene);
}

#[test]
fn test_zero_generations_still_reports_best() {
    let pool = GenePool::<u16, _>::new(&reference_config(), StdRng::seed_from_u64(1)).unwrap();
    let mut engine = EvolutionEngine::new(pool, FieldAverageEvaluator);

    let summary = engine.run(0, NoProgress).unwrap();

    assert_eq!(summary.generations_run, 0);
    assert!(summary.history.is_empty());
    assert_eq!(engine.pool().quality_histogram().highest_occupied(), summary.best_quality);
}
