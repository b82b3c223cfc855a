use super::traits::ConfigSection;
use crate::error::GenePoolError;
use serde::{Deserialize, Serialize};

/// Driver settings for the command line demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub generations: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { generations: 10 }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), GenePoolError> {
        if self.generations == 0 {
            return Err(GenePoolError::Configuration(
                "At least one generation must be run".to_string()
            ));
        }
        Ok(())
    }
}
