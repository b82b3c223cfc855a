use super::evolution_engine::ProgressCallback;
use super::gene_pool::GenerationStats;
use crate::types::Quality;
use log::{debug, info};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Writes generation progress to the `log` facade.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        debug!("Generation {}/{} starting...", generation + 1, total);
    }

    fn on_generation_complete(&mut self, generation: usize, stats: &GenerationStats, best_so_far: Quality) {
        info!(
            "Generation {} complete. Best: {}, worst: {}, mean: {:.2}, best so far: {}",
            generation + 1,
            stats.best_quality,
            stats.worst_quality,
            stats.mean_quality,
            best_so_far
        );
    }
}

// For reporting to a thread that owns the caller's UI or event loop
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart { generation: usize, total: usize },
    GenerationComplete { generation: usize, stats: GenerationStats, best_so_far: Quality },
}

pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
    cancel_flag: Arc<Mutex<bool>>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>, cancel_flag: Arc<Mutex<bool>>) -> Self {
        Self { sender, cancel_flag }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart { generation, total });
    }

    fn on_generation_complete(&mut self, generation: usize, stats: &GenerationStats, best_so_far: Quality) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            stats: *stats,
            best_so_far,
        });
    }

    fn should_continue(&mut self) -> bool {
        !self.cancel_flag.lock().map(|f| *f).unwrap_or(false)
    }
}
