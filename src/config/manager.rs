use super::{
    layout::LayoutConfig,
    pool::PoolConfig,
    run::RunConfig,
    traits::ConfigSection,
};
use crate::error::GenePoolError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `GENEPOOL__POOL__GENE_COUNT=200`.
pub const ENV_PREFIX: &str = "GENEPOOL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pool: PoolConfig,
    pub layout: LayoutConfig,
    pub run: RunConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GenePoolError> {
        validate_section(&self.pool)?;
        validate_section(&self.layout)?;
        validate_section(&self.run)?;
        Ok(())
    }
}

/// Validate one section, naming it in configuration errors.
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), GenePoolError> {
    section.validate().map_err(|e| match e {
        GenePoolError::Configuration(msg) => {
            GenePoolError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON file, layering `GENEPOOL__*` environment
    /// variables on top.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenePoolError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;
        self.install(settings)
    }

    /// Load TOML text, layering environment overrides on top.
    pub fn load_from_str(&self, contents: &str) -> Result<(), GenePoolError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .add_source(Self::environment())
            .build()?;
        self.install(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenePoolError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GenePoolError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, GenePoolError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| GenePoolError::Configuration("Config lock poisoned".to_string()))
    }

    /// Apply `f` and keep the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), GenePoolError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self
            .config
            .write()
            .map_err(|_| GenePoolError::Configuration("Config lock poisoned".to_string()))?;
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn install(&self, settings: Config) -> Result<(), GenePoolError> {
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        let mut current = self
            .config
            .write()
            .map_err(|_| GenePoolError::Configuration("Config lock poisoned".to_string()))?;
        *current = config;
        Ok(())
    }
}
