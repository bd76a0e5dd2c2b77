//! SourceContext: the per-batch parsing context.
//!
//! Constructed once per invocation and passed by reference into every stage.
//! Owns one tree-sitter parser per dialect and the parse cache, so cross-file
//! type lookups during one batch all see the same parsed modules.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scaffold_core::errors::{EnvironmentError, LoadError};
use tree_sitter::Parser;

use super::cache::{hash_content, ParseCache, DEFAULT_CACHE_CAPACITY};
use super::error_tolerant::count_errors;
use super::types::SourceFile;
use crate::scanner::Dialect;

/// Extensions tried, in order, when resolving an extensionless import specifier.
const RESOLVE_SUFFIXES: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx"];
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// Lookup of other modules referenced from a file (for imported prop types).
pub trait ModuleSource {
    /// Resolve `specifier` as imported from the file at `from`.
    /// Returns `None` for bare package specifiers and unresolvable paths.
    fn resolve(&self, from: &Path, specifier: &str) -> Option<Arc<SourceFile>>;
}

/// A module source that never resolves anything.
pub struct NoModules;

impl ModuleSource for NoModules {
    fn resolve(&self, _from: &Path, _specifier: &str) -> Option<Arc<SourceFile>> {
        None
    }
}

struct Parsers {
    tsx: Parser,
    typescript: Parser,
    javascript: Parser,
}

impl Parsers {
    fn for_dialect(&mut self, dialect: Dialect) -> &mut Parser {
        match dialect {
            Dialect::Tsx => &mut self.tsx,
            Dialect::TypeScript => &mut self.typescript,
            Dialect::Jsx | Dialect::JavaScript => &mut self.javascript,
        }
    }
}

/// The explicit parsing context for one batch.
pub struct SourceContext {
    parsers: RefCell<Parsers>,
    cache: ParseCache,
}

impl SourceContext {
    /// Load every grammar into a parser.
    ///
    /// Fails with [`EnvironmentError`] when a grammar is incompatible with the
    /// linked tree-sitter runtime; no file could be processed in that case.
    pub fn new() -> Result<Self, EnvironmentError> {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create a context with a specific parse-cache capacity.
    pub fn with_cache_capacity(capacity: u64) -> Result<Self, EnvironmentError> {
        let parsers = Parsers {
            tsx: parser_for(Dialect::Tsx)?,
            typescript: parser_for(Dialect::TypeScript)?,
            javascript: parser_for(Dialect::JavaScript)?,
        };
        Ok(Self {
            parsers: RefCell::new(parsers),
            cache: ParseCache::new(capacity),
        })
    }

    /// Load a component-bearing source: the extension must be markup-capable.
    pub fn load_component_source(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        let dialect = dialect_of(path)?;
        if !dialect.is_markup_capable() {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: extension_of(path),
            });
        }
        self.load_with_dialect(path, dialect)
    }

    /// Load any supported module (used for cross-file type lookups).
    pub fn load_module(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        let dialect = dialect_of(path)?;
        self.load_with_dialect(path, dialect)
    }

    /// Parse in-memory text as if it had been read from `path`.
    pub fn parse_str(
        &self,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<SourceFile, LoadError> {
        let path = path.into();
        let dialect = dialect_of(&path)?;
        self.parse(path, dialect, source.into())
    }

    /// Number of cached syntax trees.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    fn load_with_dialect(&self, path: &Path, dialect: Dialect) -> Result<Arc<SourceFile>, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(path.to_path_buf(), dialect, source).map(Arc::new)
    }

    fn parse(&self, path: PathBuf, dialect: Dialect, source: String) -> Result<SourceFile, LoadError> {
        let content_hash = hash_content(source.as_bytes());

        let tree = match self.cache.get(content_hash, dialect) {
            Some(tree) => tree,
            None => {
                let tree = self
                    .parsers
                    .borrow_mut()
                    .for_dialect(dialect)
                    .parse(source.as_bytes(), None)
                    .ok_or_else(|| LoadError::ParseFailed {
                        path: path.clone(),
                        error_count: 1,
                        first_error_line: 1,
                    })?;
                self.cache.insert(content_hash, dialect, tree.clone());
                tree
            }
        };

        let root = tree.root_node();
        if root.has_error() {
            let (error_count, first_error_line) = count_errors(root);
            return Err(LoadError::ParseFailed {
                path,
                error_count,
                first_error_line,
            });
        }

        tracing::debug!(path = %path.display(), dialect = %dialect, "parsed source");
        Ok(SourceFile {
            path,
            dialect,
            source,
            tree,
        })
    }
}

impl ModuleSource for SourceContext {
    fn resolve(&self, from: &Path, specifier: &str) -> Option<Arc<SourceFile>> {
        if !specifier.starts_with('.') {
            return None;
        }
        let base = from.parent().unwrap_or_else(|| Path::new("")).join(specifier);
        let path = resolve_candidate(&base)?;
        match self.load_module(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::debug!(specifier, error = %e, "imported module not loadable");
                None
            }
        }
    }
}

fn parser_for(dialect: Dialect) -> Result<Parser, EnvironmentError> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.ts_language())
        .map_err(|e| EnvironmentError::GrammarUnavailable {
            dialect: dialect.name().to_string(),
            message: e.to_string(),
        })?;
    Ok(parser)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("none")
        .to_string()
}

fn dialect_of(path: &Path) -> Result<Dialect, LoadError> {
    Dialect::from_path(path).ok_or_else(|| LoadError::UnsupportedExtension {
        path: path.to_path_buf(),
        extension: extension_of(path),
    })
}

fn resolve_candidate(base: &Path) -> Option<PathBuf> {
    if Dialect::from_path(base).is_some() && base.is_file() {
        return Some(base.to_path_buf());
    }
    for suffix in RESOLVE_SUFFIXES {
        let mut candidate = base.as_os_str().to_os_string();
        candidate.push(suffix);
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    INDEX_FILES
        .iter()
        .map(|index| base.join(index))
        .find(|candidate| candidate.is_file())
}
