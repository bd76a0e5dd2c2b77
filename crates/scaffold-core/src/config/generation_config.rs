//! Scaffold generation configuration.

use serde::{Deserialize, Serialize};

/// Test framework the generated files target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    #[default]
    Jest,
    Vitest,
}

impl TestFramework {
    /// Parse a framework name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jest" => Some(Self::Jest),
            "vitest" => Some(Self::Vitest),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Jest => "jest",
            Self::Vitest => "vitest",
        }
    }
}

/// Configuration for the test scaffold generator and the placement policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenerationConfig {
    /// Target test framework. Default: jest.
    pub framework: Option<TestFramework>,
    /// Emit true/false variants for boolean props in pass 2. Default: true.
    pub variants: Option<bool>,
    /// Button presence checks emitted per component. Default: 2.
    pub max_buttons: Option<usize>,
    /// Input presence checks emitted per component. Default: 2.
    pub max_inputs: Option<usize>,
    /// Infix between the file stem and extension. Default: "test".
    pub test_suffix: Option<String>,
    /// Subdirectory (relative to the source file) for generated tests.
    /// Default: none, tests are written next to the source.
    pub test_directory: Option<String>,
    /// Module providing `render` and `screen`. Default: "@testing-library/react".
    pub render_module: Option<String>,
    /// Module providing `userEvent`. Default: "@testing-library/user-event".
    pub user_event_module: Option<String>,
    /// Import specifier of an application-context wrapper component.
    pub wrapper_import: Option<String>,
    /// Name of the wrapper component exported by `wrapper_import`.
    pub wrapper_name: Option<String>,
}

impl GenerationConfig {
    pub fn effective_framework(&self) -> TestFramework {
        self.framework.unwrap_or_default()
    }

    pub fn effective_variants(&self) -> bool {
        self.variants.unwrap_or(true)
    }

    pub fn effective_max_buttons(&self) -> usize {
        self.max_buttons.unwrap_or(2)
    }

    pub fn effective_max_inputs(&self) -> usize {
        self.max_inputs.unwrap_or(2)
    }

    pub fn effective_test_suffix(&self) -> &str {
        self.test_suffix.as_deref().unwrap_or("test")
    }

    pub fn effective_render_module(&self) -> &str {
        self.render_module
            .as_deref()
            .unwrap_or("@testing-library/react")
    }

    pub fn effective_user_event_module(&self) -> &str {
        self.user_event_module
            .as_deref()
            .unwrap_or("@testing-library/user-event")
    }

    /// The wrapper, only when both the import and the name are configured.
    pub fn wrapper(&self) -> Option<(&str, &str)> {
        match (self.wrapper_import.as_deref(), self.wrapper_name.as_deref()) {
            (Some(import), Some(name)) => Some((import, name)),
            _ => None,
        }
    }
}
