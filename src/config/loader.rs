//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and seed data from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::store::InMemoryStore;

use super::types::{EngineConfig, MAX_PAYMENT_DELAY_DAYS, PayrollSettings, SeedData, ServerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml   # Server and payroll settings
/// └── seed.yaml     # Employees and contribution rules
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.server().bind_address);
/// let store = loader.build_store();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    engine: EngineConfig,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML,
    /// if the payroll settings are inconsistent, or if a seeded employee or
    /// rule is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let engine = Self::load_yaml::<EngineConfig>(&engine_path)?;
        Self::validate_settings(&engine.payroll, &engine_path)?;

        let seed_path = path.join("seed.yaml");
        let seed = Self::load_yaml::<SeedData>(&seed_path)?;
        Self::validate_seed(&seed, &seed_path)?;

        Ok(Self { engine, seed })
    }

    /// Creates a loader from already-parsed parts.
    pub fn from_parts(engine: EngineConfig, seed: SeedData) -> Self {
        Self { engine, seed }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &PayrollSettings, path: &Path) -> EngineResult<()> {
        let message = if settings.payment_delay_days < 0 {
            "payment_delay_days must not be negative".to_string()
        } else if settings.payment_delay_days > MAX_PAYMENT_DELAY_DAYS {
            format!(
                "payment_delay_days must not exceed {} (got {})",
                MAX_PAYMENT_DELAY_DAYS, settings.payment_delay_days
            )
        } else if settings.min_period_year > settings.max_period_year {
            "min_period_year must not exceed max_period_year".to_string()
        } else {
            return Ok(());
        };

        Err(EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        })
    }

    /// Rejects seeded employees and rules the calculation cannot take.
    fn validate_seed(seed: &SeedData, path: &Path) -> EngineResult<()> {
        let employees = seed.employees.iter().map(|e| e.validate());
        let rules = seed.contribution_rules.iter().map(|r| r.validate());

        employees
            .chain(rules)
            .collect::<EngineResult<()>>()
            .map_err(|e| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.engine.server
    }

    /// Returns the payroll settings.
    pub fn payroll(&self) -> PayrollSettings {
        self.engine.payroll
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Builds an in-memory store populated with the seed data.
    pub fn build_store(&self) -> InMemoryStore {
        InMemoryStore::from_seed(
            self.seed.employees.clone(),
            self.seed.contribution_rules.clone(),
        )
    }
}
