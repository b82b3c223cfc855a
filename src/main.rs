use anyhow::Context;
use genepool::config::ConfigManager;
use genepool::engines::evaluation::FieldAverageEvaluator;
use genepool::engines::generation::{EvolutionEngine, GenePool, LogProgressCallback};
use log::info;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?;
    }
    let config = manager.get()?;
    config.validate()?;

    let pool = GenePool::<u8>::from_config(&config.pool)?;
    info!(
        "Evolving {} genes of {} bytes for {} generations",
        pool.num_genes(),
        pool.gene_bytes(),
        config.run.generations
    );

    let mut engine = EvolutionEngine::new(pool, FieldAverageEvaluator);
    let summary = engine.run(config.run.generations, LogProgressCallback)?;

    let report = json!({
        "generations": summary.generations_run,
        "best_index": summary.best_index,
        "best_quality": summary.best_quality,
        "best_so_far": summary.best_so_far,
        "best_gene": summary.best_gene.to_bytes(),
        "final_histogram": engine.pool().quality_histogram().counts(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
