//! Framework-specific syntax of generated tests.

use scaffold_core::config::TestFramework;

pub(crate) trait FrameworkSyntax {
    /// Object exposing `fn()` and `clearAllMocks()`.
    fn mock_namespace(&self) -> &'static str;

    /// Import line for framework globals, when they are not ambient.
    fn globals_import(&self, used: &[&str]) -> Option<String>;

    /// Side-effect import registering the DOM matchers.
    fn matchers_import(&self) -> &'static str;

    fn clear_mocks(&self) -> String {
        format!("{}.clearAllMocks();", self.mock_namespace())
    }
}

impl FrameworkSyntax for TestFramework {
    fn mock_namespace(&self) -> &'static str {
        match self {
            TestFramework::Jest => "jest",
            TestFramework::Vitest => "vi",
        }
    }

    fn globals_import(&self, used: &[&str]) -> Option<String> {
        match self {
            TestFramework::Jest => None,
            TestFramework::Vitest => {
                let mut names: Vec<&str> = used.to_vec();
                names.sort_unstable();
                names.dedup();
                Some(format!("import {{ {} }} from 'vitest';", names.join(", ")))
            }
        }
    }

    fn matchers_import(&self) -> &'static str {
        match self {
            TestFramework::Jest => "import '@testing-library/jest-dom';",
            TestFramework::Vitest => "import '@testing-library/jest-dom/vitest';",
        }
    }
}
