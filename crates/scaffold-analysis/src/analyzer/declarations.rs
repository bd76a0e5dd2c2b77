//! Top-level declarations: component candidates and the module's exports.

use tree_sitter::Node;

use super::types::ExportKind;
use crate::loader::SourceFile;

const FUNCTION_VALUE_KINDS: &[&str] = &["arrow_function", "function_expression", "function"];

/// A capitalized top-level function that may be a component.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<'t> {
    pub name: String,
    pub function: Node<'t>,
    /// Annotation on the declaring variable, e.g. `React.FC<Props>`.
    pub declared_type: Option<Node<'t>>,
    pub line: usize,
}

/// Names the module exports, by local binding.
#[derive(Debug, Default)]
pub(crate) struct Exports {
    default: Option<String>,
    named: Vec<(String, String)>,
}

impl Exports {
    /// How a local binding is exported. A default export wins over a
    /// named export of the same binding.
    pub fn lookup(&self, local: &str) -> Option<(ExportKind, String)> {
        if self.default.as_deref() == Some(local) {
            return Some((ExportKind::Default, "default".to_string()));
        }
        self.named
            .iter()
            .find(|(l, _)| l == local)
            .map(|(_, exported)| (ExportKind::Named, exported.clone()))
    }

    fn add_named(&mut self, local: &str, exported: &str) {
        if !self.named.iter().any(|(l, e)| l == local && e == exported) {
            self.named.push((local.to_string(), exported.to_string()));
        }
    }
}

/// Collect candidates (in declaration order) and exports from the module's
/// top-level statements.
pub(crate) fn collect<'t>(file: &'t SourceFile) -> (Vec<Candidate<'t>>, Exports) {
    let mut candidates = Vec::new();
    let mut exports = Exports::default();
    let root = file.root();
    let mut cursor = root.walk();

    for statement in root.named_children(&mut cursor) {
        match statement.kind() {
            "function_declaration" => {
                declared_function(file, statement, &mut candidates);
            }
            "lexical_declaration" | "variable_declaration" => {
                declared_variables(file, statement, &mut candidates);
            }
            "export_statement" => export_statement(file, statement, &mut candidates, &mut exports),
            _ => {}
        }
    }

    (candidates, exports)
}

fn export_statement<'t>(
    file: &'t SourceFile,
    statement: Node<'t>,
    candidates: &mut Vec<Candidate<'t>>,
    exports: &mut Exports,
) {
    // `export { X } from './x'` re-exports another module's binding.
    if statement.child_by_field_name("source").is_some() {
        return;
    }
    let is_default = has_token(statement, "default");

    if let Some(declaration) = statement.child_by_field_name("declaration") {
        match declaration.kind() {
            "function_declaration" => {
                if let Some(name) = declared_function(file, declaration, candidates) {
                    if is_default {
                        exports.default = Some(name);
                    } else {
                        exports.add_named(&name, &name);
                    }
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                for name in declared_variables(file, declaration, candidates) {
                    exports.add_named(&name, &name);
                }
            }
            _ => {}
        }
        return;
    }

    if let Some(value) = statement.child_by_field_name("value") {
        if is_default && value.kind() == "identifier" {
            exports.default = Some(file.text(&value).to_string());
        }
        return;
    }

    let mut cursor = statement.walk();
    let clauses: Vec<Node<'t>> = statement
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "export_clause")
        .collect();
    for clause in clauses {
        let mut inner = clause.walk();
        for specifier in clause.named_children(&mut inner) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(local) = specifier.child_by_field_name("name") else {
                continue;
            };
            let local = file.text(&local);
            let exported = specifier
                .child_by_field_name("alias")
                .map(|alias| file.text(&alias))
                .unwrap_or(local);
            if exported == "default" {
                exports.default = Some(local.to_string());
            } else {
                exports.add_named(local, exported);
            }
        }
    }
}

/// Record a `function Name() {}` declaration. Returns its name whether or
/// not it qualifies as a candidate.
fn declared_function<'t>(
    file: &'t SourceFile,
    node: Node<'t>,
    candidates: &mut Vec<Candidate<'t>>,
) -> Option<String> {
    let name = node
        .child_by_field_name("name")
        .map(|n| file.text(&n).to_string())?;
    if is_component_name(&name) {
        candidates.push(Candidate {
            name: name.clone(),
            function: node,
            declared_type: None,
            line: node.start_position().row + 1,
        });
    }
    Some(name)
}

/// Record `const Name = () => {}` declarators. Returns every declared
/// identifier, component or not.
fn declared_variables<'t>(
    file: &'t SourceFile,
    node: Node<'t>,
    candidates: &mut Vec<Candidate<'t>>,
) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        if name_node.kind() != "identifier" {
            continue;
        }
        let name = file.text(&name_node).to_string();
        let function = declarator
            .child_by_field_name("value")
            .filter(|v| FUNCTION_VALUE_KINDS.contains(&v.kind()));
        if let Some(function) = function {
            if is_component_name(&name) {
                candidates.push(Candidate {
                    name: name.clone(),
                    function,
                    declared_type: declarator.child_by_field_name("type"),
                    line: declarator.start_position().row + 1,
                });
            }
        }
        names.push(name);
    }
    names
}

fn is_component_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Whether `node` has a direct (anonymous) child token of this kind.
pub(crate) fn has_token(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}
