//! Incentive Points Allocation Engine
//!
//! This crate allocates a monthly incentive-points pool among factory workers
//! in the styling section (proportional allocator) and the weaving section
//! (tiered bonus allocator), together with the attendance aggregation and
//! month-record assembly that feed them.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
