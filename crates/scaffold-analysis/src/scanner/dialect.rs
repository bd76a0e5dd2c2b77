//! Source dialect detection from file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The four JavaScript-family dialects the loader can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Tsx,
    Jsx,
    TypeScript,
    JavaScript,
}

impl Dialect {
    /// Detect the dialect from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Dialect> {
        match ext? {
            "tsx" => Some(Dialect::Tsx),
            "jsx" => Some(Dialect::Jsx),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "js" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            _ => None,
        }
    }

    /// Detect the dialect of a path.
    pub fn from_path(path: &Path) -> Option<Dialect> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Whether files of this dialect can contain markup.
    /// Plain `.ts` cannot; its grammar rejects JSX.
    pub fn is_markup_capable(&self) -> bool {
        !matches!(self, Dialect::TypeScript)
    }

    /// Whether the dialect carries static type annotations.
    pub fn is_typed(&self) -> bool {
        matches!(self, Dialect::Tsx | Dialect::TypeScript)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Tsx => "TSX",
            Dialect::Jsx => "JSX",
            Dialect::TypeScript => "TypeScript",
            Dialect::JavaScript => "JavaScript",
        }
    }

    /// All dialects, in grammar-loading order.
    pub fn all() -> [Dialect; 4] {
        [
            Dialect::Tsx,
            Dialect::Jsx,
            Dialect::TypeScript,
            Dialect::JavaScript,
        ]
    }

    /// Get the tree-sitter grammar for this dialect.
    /// JSX and plain JavaScript share the JavaScript grammar, which accepts markup.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Jsx | Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
