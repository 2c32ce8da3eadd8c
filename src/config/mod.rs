//! Configuration loading for the Points Allocation Engine.
//!
//! This module loads the styling defaults, the weaving bonus configuration
//! and the loom registry from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use points_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} looms", config.machines().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, MachinesConfig, StylingDefaults};
