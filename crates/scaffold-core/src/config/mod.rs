//! Configuration system for scaffold.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod coverage_config;
pub mod generation_config;
pub mod scaffold_config;
pub mod scan_config;

pub use coverage_config::CoverageConfig;
pub use generation_config::{GenerationConfig, TestFramework};
pub use scaffold_config::{CliOverrides, ScaffoldConfig};
pub use scan_config::ScanConfig;
