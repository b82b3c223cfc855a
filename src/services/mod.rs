pub mod layout_runner;

pub use layout_runner::{LayoutRunner, LayoutRunResult};
