//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlyParams, WeavingConfig, WeavingMachine};

use super::types::{EngineConfig, MachinesConfig, StylingDefaults};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── styling.yaml   # Default pool parameters for new months
/// ├── weaving.yaml   # Weaving bonus benchmarks and coefficients
/// └── machines.yaml  # Loom registry
/// ```
///
/// # Example
///
/// ```no_run
/// use points_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// println!("Admin team size: {}", loader.weaving().admin_team_size);
/// println!("Active looms: {}", loader.active_machines().count());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML, if
    /// the weaving configuration breaks its invariants, or if two machines
    /// share an id.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let styling = Self::load_yaml::<StylingDefaults>(&path.join("styling.yaml"))?;

        let weaving = Self::load_yaml::<WeavingConfig>(&path.join("weaving.yaml"))?;
        weaving.validate()?;

        let machines = Self::load_yaml::<MachinesConfig>(&path.join("machines.yaml"))?.machines;
        Self::check_unique_ids(&machines)?;

        info!(
            path = %path.display(),
            machines = machines.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(styling, weaving, machines),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_unique_ids(machines: &[WeavingMachine]) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for machine in machines {
            if !seen.insert(machine.id.as_str()) {
                return Err(EngineError::InvalidConfig {
                    field: "machines".to_string(),
                    message: format!("duplicate machine id '{}'", machine.id),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a copy of the pool parameters a new month starts with.
    pub fn default_params(&self) -> MonthlyParams {
        self.config.styling().default_params.clone()
    }

    /// Returns the weaving bonus configuration.
    pub fn weaving(&self) -> &WeavingConfig {
        self.config.weaving()
    }

    /// Returns every registered machine.
    pub fn machines(&self) -> &[WeavingMachine] {
        self.config.machines()
    }

    /// Iterates over the machines currently in service.
    pub fn active_machines(&self) -> impl Iterator<Item = &WeavingMachine> {
        self.config.machines().iter().filter(|m| m.is_active)
    }

    /// Gets a machine by its id.
    pub fn get_machine(&self, id: &str) -> Option<&WeavingMachine> {
        self.config.machines().iter().find(|m| m.id == id)
    }
}
