//! Top-level scaffold configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CoverageConfig, GenerationConfig, ScanConfig, TestFramework};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "scaffold.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SCAFFOLD_*`)
/// 3. Project config (`scaffold.toml` in project root, or an explicit path)
/// 4. User config (`~/.scaffold/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub scan: ScanConfig,
    pub generation: GenerationConfig,
    pub coverage: CoverageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub framework: Option<TestFramework>,
    pub variants: Option<bool>,
    pub coverage_enabled: Option<bool>,
    pub coverage_threshold: Option<f64>,
}

impl ScaffoldConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Project config: explicit path must exist, implicit one is optional
        let explicit = cli_overrides.and_then(|c| c.config_path.clone());
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, &path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ScaffoldConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.coverage.threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "coverage.threshold".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(suffix) = config.generation.test_suffix.as_deref() {
            if suffix.is_empty() || suffix.contains(['/', '\\', '.']) {
                return Err(ConfigError::ValidationFailed {
                    field: "generation.test_suffix".to_string(),
                    message: "must be a non-empty name without dots or separators".to_string(),
                });
            }
        }
        if let Some(dir) = config.generation.test_directory.as_deref() {
            if dir.is_empty() || Path::new(dir).is_absolute() || dir.contains("..") {
                return Err(ConfigError::ValidationFailed {
                    field: "generation.test_directory".to_string(),
                    message: "must be a relative directory below the source file".to_string(),
                });
            }
        }
        if config.generation.wrapper_import.is_some() != config.generation.wrapper_name.is_some() {
            return Err(ConfigError::ValidationFailed {
                field: "generation.wrapper_import".to_string(),
                message: "wrapper_import and wrapper_name must be set together".to_string(),
            });
        }
        if config.coverage.command.first().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "coverage.command".to_string(),
                message: "program name must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.scaffold/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".scaffold").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ScaffoldConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ScaffoldConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut ScaffoldConfig, other: &ScaffoldConfig) {
        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if !other.scan.include.is_empty() {
            base.scan.include = other.scan.include.clone();
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if !other.scan.test_dir_names.is_empty() {
            base.scan.test_dir_names = other.scan.test_dir_names.clone();
        }
        if !other.scan.test_file_markers.is_empty() {
            base.scan.test_file_markers = other.scan.test_file_markers.clone();
        }

        // Generation
        let (g, og) = (&mut base.generation, &other.generation);
        if og.framework.is_some() {
            g.framework = og.framework;
        }
        if og.variants.is_some() {
            g.variants = og.variants;
        }
        if og.max_buttons.is_some() {
            g.max_buttons = og.max_buttons;
        }
        if og.max_inputs.is_some() {
            g.max_inputs = og.max_inputs;
        }
        if og.test_suffix.is_some() {
            g.test_suffix = og.test_suffix.clone();
        }
        if og.test_directory.is_some() {
            g.test_directory = og.test_directory.clone();
        }
        if og.render_module.is_some() {
            g.render_module = og.render_module.clone();
        }
        if og.user_event_module.is_some() {
            g.user_event_module = og.user_event_module.clone();
        }
        if og.wrapper_import.is_some() {
            g.wrapper_import = og.wrapper_import.clone();
        }
        if og.wrapper_name.is_some() {
            g.wrapper_name = og.wrapper_name.clone();
        }

        // Coverage
        let (c, oc) = (&mut base.coverage, &other.coverage);
        if oc.enabled.is_some() {
            c.enabled = oc.enabled;
        }
        if oc.threshold.is_some() {
            c.threshold = oc.threshold;
        }
        if !oc.command.is_empty() {
            c.command = oc.command.clone();
        }
        if oc.summary_path.is_some() {
            c.summary_path = oc.summary_path.clone();
        }
        if oc.timeout_seconds.is_some() {
            c.timeout_seconds = oc.timeout_seconds;
        }
        if oc.inherit_output.is_some() {
            c.inherit_output = oc.inherit_output;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SCAFFOLD_COVERAGE_THRESHOLD`, `SCAFFOLD_FRAMEWORK`, etc.
    fn apply_env_overrides(config: &mut ScaffoldConfig) {
        if let Ok(val) = std::env::var("SCAFFOLD_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCAFFOLD_FRAMEWORK") {
            if let Some(v) = TestFramework::from_name(&val) {
                config.generation.framework = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCAFFOLD_VARIANTS") {
            if let Ok(v) = val.parse::<bool>() {
                config.generation.variants = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCAFFOLD_COVERAGE_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.coverage.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCAFFOLD_COVERAGE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.coverage.threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCAFFOLD_COVERAGE_TIMEOUT") {
            if let Ok(v) = val.parse::<u64>() {
                config.coverage.timeout_seconds = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut ScaffoldConfig, cli: &CliOverrides) {
        if let Some(v) = cli.framework {
            config.generation.framework = Some(v);
        }
        if let Some(v) = cli.variants {
            config.generation.variants = Some(v);
        }
        if let Some(v) = cli.coverage_enabled {
            config.coverage.enabled = Some(v);
        }
        if let Some(v) = cli.coverage_threshold {
            config.coverage.threshold = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
