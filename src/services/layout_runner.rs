use crate::config::LayoutConfig;
use crate::engines::generation::progress::{ChannelProgressCallback, ProgressMessage};
use crate::engines::layout::{optimize_layout, LayoutGraph, LayoutResult};
use log::info;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Result from a background layout run
pub type LayoutRunResult = Result<LayoutResult, String>;

/// Runs a layout search on a worker thread so the caller stays responsive.
/// The search itself is single threaded; this only moves it off the caller's
/// thread and relays progress through a channel.
pub struct LayoutRunner {
    handle: Option<JoinHandle<LayoutRunResult>>,
    progress_rx: Option<Receiver<ProgressMessage>>,
    cancel_flag: Arc<Mutex<bool>>,
}

impl LayoutRunner {
    /// Start the layout search in a background thread
    pub fn start(graph: LayoutGraph, config: LayoutConfig) -> Result<Self, String> {
        let (progress_tx, progress_rx) = channel();
        let cancel_flag = Arc::new(Mutex::new(false));
        let callback = ChannelProgressCallback::new(progress_tx, Arc::clone(&cancel_flag));

        let handle = thread::Builder::new()
            .name("layout-search".to_string())
            .spawn(move || {
                info!("Layout thread started for {} nodes", graph.num_nodes());
                optimize_layout(&graph, &config, callback).map_err(|e| e.to_string())
            })
            .map_err(|e| format!("Failed to spawn layout thread: {}", e))?;

        Ok(Self {
            handle: Some(handle),
            progress_rx: Some(progress_rx),
            cancel_flag,
        })
    }

    /// Poll for progress updates (non-blocking)
    pub fn poll_progress(&mut self) -> Option<ProgressMessage> {
        if let Some(rx) = &self.progress_rx {
            rx.try_recv().ok()
        } else {
            None
        }
    }

    /// Check if the search is complete and take its result
    pub fn try_get_results(&mut self) -> Option<LayoutRunResult> {
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                match handle.join() {
                    Ok(result) => Some(result),
                    Err(_) => Some(Err("Layout thread panicked".to_string())),
                }
            } else {
                // Not finished yet, put handle back
                self.handle = Some(handle);
                None
            }
        } else {
            None
        }
    }

    /// Block until the search finishes
    pub fn wait(mut self) -> LayoutRunResult {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err("Layout thread panicked".to_string())),
            None => Err("Layout result already taken".to_string()),
        }
    }

    /// Ask the search to stop before its next generation
    pub fn cancel(&mut self) {
        if let Ok(mut flag) = self.cancel_flag.lock() {
            *flag = true;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.lock().map(|f| *f).unwrap_or(false)
    }
}
