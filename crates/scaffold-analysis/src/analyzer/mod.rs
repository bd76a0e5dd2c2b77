//! Component analyzer: from a parsed module to the contracts of its
//! exported components.
//!
//! A component is a capitalized top-level function declaration or a
//! function-valued variable, exported by name or as default, whose body
//! renders at least one markup node. Components wrapped in higher-order
//! calls (`memo(...)`, `forwardRef(...)`) are not recognized.

mod declarations;
mod markup;
mod props;
mod typedefs;
pub mod types;

pub use types::{ComponentInfo, ConditionalElementInfo, ExportKind, InteractiveElement, PropInfo};

use crate::loader::{ModuleSource, SourceFile};

/// Analyze every exported component in a module, in declaration order.
///
/// `modules` resolves imported prop types; pass [`crate::loader::NoModules`]
/// to restrict analysis to the file itself.
pub fn analyze(file: &SourceFile, modules: &dyn ModuleSource) -> Vec<ComponentInfo> {
    let (candidates, exports) = declarations::collect(file);
    let mut components = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let Some((export_kind, exported_as)) = exports.lookup(&candidate.name) else {
            tracing::trace!(name = %candidate.name, "candidate not exported");
            continue;
        };
        let props = props::resolve_props(file, &candidate, modules);
        let scan = markup::scan(file, candidate.function, &props);
        if scan.markup_count == 0 {
            tracing::trace!(name = %candidate.name, "candidate renders no markup");
            continue;
        }
        components.push(ComponentInfo {
            name: candidate.name,
            export_kind,
            exported_as,
            props,
            interactive_elements: scan.interactive,
            conditional_elements: scan.conditional,
            markup_count: scan.markup_count,
            line: candidate.line,
        });
    }

    tracing::debug!(
        path = %file.path.display(),
        components = components.len(),
        "analyzed module"
    );
    components
}
