//! Configuration types for the allocation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{MonthlyParams, WeavingConfig, WeavingMachine};

/// Styling section defaults (`styling.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct StylingDefaults {
    /// Pool parameters a new month starts with.
    pub default_params: MonthlyParams,
}

/// Weaving fleet registry (`machines.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct MachinesConfig {
    /// Every loom, in registry order.
    pub machines: Vec<WeavingMachine>,
}

/// Complete engine configuration.
///
/// This struct aggregates all configuration loaded from the YAML files in a
/// configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    styling: StylingDefaults,
    weaving: WeavingConfig,
    machines: Vec<WeavingMachine>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(styling: StylingDefaults, weaving: WeavingConfig, machines: Vec<WeavingMachine>) -> Self {
        Self {
            styling,
            weaving,
            machines,
        }
    }

    /// Returns the styling defaults.
    pub fn styling(&self) -> &StylingDefaults {
        &self.styling
    }

    /// Returns the weaving bonus configuration.
    pub fn weaving(&self) -> &WeavingConfig {
        &self.weaving
    }

    /// Returns the whole fleet registry.
    pub fn machines(&self) -> &[WeavingMachine] {
        &self.machines
    }

    /// Sum of the monthly target output of every active machine.
    pub fn fleet_target_output(&self) -> Decimal {
        self.machines
            .iter()
            .filter(|m| m.is_active)
            .map(|m| m.target_output)
            .sum()
    }
}
