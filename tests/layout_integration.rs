use genepool::config::LayoutConfig;
use genepool::engines::generation::{NoProgress, ProgressMessage};
use genepool::engines::generation::GenePool;
use genepool::engines::layout::{
    max_position, optimize_layout, pool_config, LayoutEvaluator, LayoutGraph, Size,
};
use genepool::services::LayoutRunner;
use genepool::Quality;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Duration;

fn chain_graph(num_nodes: usize) -> LayoutGraph {
    let mut graph = LayoutGraph::default();
    for _ in 0..num_nodes {
        graph.add_node(Size::new(40, 30));
    }
    for node in 1..num_nodes {
        graph.connect(node - 1, node).unwrap();
    }
    graph
}

fn layout_config(generations: usize) -> LayoutConfig {
    LayoutConfig {
        generations,
        avg_node_size: 35,
        seed: Some(17),
        ..LayoutConfig::default()
    }
}

#[test]
fn test_optimize_layout_places_every_node() {
    let graph = chain_graph(5);
    let config = layout_config(8);

    let result = optimize_layout(&graph, &config, NoProgress).unwrap();

    assert_eq!(result.positions.len(), 5);
    assert_eq!(result.summary.generations_run, 8);
    let limit = max_position(5, 35) as i64;
    for position in &result.positions {
        assert!((0..=limit).contains(&position.x));
        assert!((0..=limit).contains(&position.y));
    }
    assert!(result.summary.best_so_far.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_optimize_layout_is_reproducible_with_seed() {
    let graph = chain_graph(4);
    let config = layout_config(5);

    let first = optimize_layout(&graph, &config, NoProgress).unwrap();
    let second = optimize_layout(&graph, &config, NoProgress).unwrap();

    assert_eq!(first.positions, second.positions);
    assert_eq!(first.summary.best_quality, second.summary.best_quality);
}

#[test]
fn test_optimize_layout_rejects_empty_graph() {
    let result = optimize_layout(&LayoutGraph::default(), &layout_config(3), NoProgress);
    assert!(result.is_err());
}

#[test]
fn test_large_graph_population_is_not_saturated() {
    let graph = chain_graph(60);
    let config = pool_config(graph.num_nodes(), &layout_config(1));
    let mut pool = GenePool::<u16, _>::new(&config, StdRng::seed_from_u64(5)).unwrap();
    let mut evaluator = LayoutEvaluator::new(&graph);

    pool.compute_quality(&mut evaluator).unwrap();

    let qualities: Vec<Quality> = pool.genes().iter().map(|g| g.quality()).collect();
    let min = *qualities.iter().min().unwrap();
    let max = *qualities.iter().max().unwrap();
    assert!(min < max, "all {} layouts scored {}", qualities.len(), min);
    assert!(max < Quality::MAX);
}

#[test]
fn test_runner_reports_progress() {
    let mut runner = LayoutRunner::start(chain_graph(4), layout_config(6)).unwrap();

    let result = loop {
        if let Some(result) = runner.try_get_results() {
            break result;
        }
        thread::sleep(Duration::from_millis(5));
    };
    let result = result.unwrap();
    assert_eq!(result.positions.len(), 4);

    let mut completed = 0;
    while let Some(message) = runner.poll_progress() {
        if let ProgressMessage::GenerationComplete { .. } = message {
            completed += 1;
        }
    }
    assert_eq!(completed, 6);
}

#[test]
fn test_runner_cancel_stops_early() {
    let mut runner = LayoutRunner::start(chain_graph(4), layout_config(100_000)).unwrap();
    runner.cancel();
    assert!(runner.is_cancelled());

    let result = runner.wait().unwrap();
    assert!(result.summary.cancelled);
    assert!(result.summary.generations_run < 100_000);
    assert_eq!(result.positions.len(), 4);
}
