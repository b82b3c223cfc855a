use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenePoolError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evaluation of gene {gene_index} failed: {reason}")]
    Evaluation { gene_index: usize, reason: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GenePoolError>;
