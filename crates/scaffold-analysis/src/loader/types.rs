//! Parsed source representation.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Tree};

use crate::scanner::Dialect;

/// One parsed source file: path, dialect, text, and syntax tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub source: String,
    pub tree: Tree,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text of a node. Empty when the node spans invalid UTF-8,
    /// which cannot happen for text loaded through the context.
    pub fn text<'a>(&'a self, node: &Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// File stem, e.g. `Button` for `src/Button.tsx`.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}
