//! Configuration module for Finboard
//!
//! - Platform path resolution with an environment override
//! - User settings persistence (latency, paging, fixture source, audit file)

pub mod paths;
pub mod settings;

pub use paths::FinboardPaths;
pub use settings::{LatencySettings, Settings};
