//! Resolution of prop-type declarations into member lists.
//!
//! Follows named interfaces and type aliases in the same module, then
//! imported ones through [`ModuleSource`]. Intersections and `extends`
//! clauses contribute members in order so later members can override.

use std::path::PathBuf;

use tree_sitter::Node;

use super::declarations::has_token;
use crate::loader::{ModuleSource, SourceFile};
use crate::mocks::union_members;
use crate::selector::attributes::strip_quotes;
use scaffold_core::FxHashSet;

/// Aliases deeper than this are treated as opaque.
const MAX_TYPE_DEPTH: usize = 8;

const CALL_TYPE_KINDS: &[&str] = &["function_type", "constructor_type"];

/// A prop member before requiredness and shape are finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawProp {
    pub name: String,
    pub type_text: String,
    pub optional: bool,
    pub has_default: bool,
    pub call_shape: bool,
}

impl RawProp {
    pub fn inferred(name: &str, has_default: bool) -> Self {
        Self {
            name: name.to_string(),
            type_text: "unknown".to_string(),
            optional: false,
            has_default,
            call_shape: false,
        }
    }
}

/// Walks type declarations, guarding against alias cycles.
pub(crate) struct TypeResolver<'m> {
    modules: &'m dyn ModuleSource,
    in_progress: FxHashSet<(PathBuf, String)>,
}

impl<'m> TypeResolver<'m> {
    pub fn new(modules: &'m dyn ModuleSource) -> Self {
        Self {
            modules,
            in_progress: FxHashSet::default(),
        }
    }

    /// Members of a type node (annotation, literal, reference, or composite).
    pub fn members(&mut self, file: &SourceFile, node: Node<'_>, depth: usize) -> Vec<RawProp> {
        if depth > MAX_TYPE_DEPTH {
            return Vec::new();
        }
        match node.kind() {
            "type_annotation" | "parenthesized_type" => first_named(node)
                .map(|inner| self.members(file, inner, depth))
                .unwrap_or_default(),
            "object_type" | "interface_body" => object_members(file, node),
            "type_identifier" => self.named(file, file.text(&node), depth + 1),
            "generic_type" => self.generic(file, node, depth),
            "intersection_type" => {
                let mut cursor = node.walk();
                let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
                parts
                    .into_iter()
                    .flat_map(|part| self.members(file, part, depth + 1))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Members of a named interface or alias, local or imported.
    fn named(&mut self, file: &SourceFile, name: &str, depth: usize) -> Vec<RawProp> {
        let key = (file.path.clone(), name.to_string());
        if !self.in_progress.insert(key.clone()) {
            return Vec::new();
        }
        let members = if let Some(declaration) = find_type_declaration(file, name) {
            self.declaration_members(file, declaration, depth)
        } else if let Some((specifier, imported)) = find_import(file, name) {
            match self.modules.resolve(file.path(), &specifier) {
                Some(module) => self.named(&module, &imported, depth + 1),
                None => {
                    tracing::debug!(name, specifier = %specifier, "prop type import not resolved");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        self.in_progress.remove(&key);
        members
    }

    fn declaration_members(
        &mut self,
        file: &SourceFile,
        declaration: Node<'_>,
        depth: usize,
    ) -> Vec<RawProp> {
        let mut members = Vec::new();
        match declaration.kind() {
            "interface_declaration" => {
                let mut cursor = declaration.walk();
                let clauses: Vec<Node<'_>> = declaration
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() == "extends_type_clause")
                    .collect();
                for clause in clauses {
                    let mut inner = clause.walk();
                    let bases: Vec<Node<'_>> = clause.named_children(&mut inner).collect();
                    for base in bases {
                        members.extend(self.members(file, base, depth + 1));
                    }
                }
                if let Some(body) = declaration.child_by_field_name("body") {
                    members.extend(object_members(file, body));
                }
            }
            "type_alias_declaration" => {
                if let Some(value) = declaration.child_by_field_name("value") {
                    members.extend(self.members(file, value, depth + 1));
                }
            }
            _ => {}
        }
        members
    }

    fn generic(&mut self, file: &SourceFile, node: Node<'_>, depth: usize) -> Vec<RawProp> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Vec::new();
        };
        let name = file.text(&name_node);
        let base = name.rsplit('.').next().unwrap_or(name);
        let arguments: Vec<Node<'_>> = match node.child_by_field_name("type_arguments") {
            Some(args) => {
                let mut cursor = args.walk();
                let collected = args
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() != "comment")
                    .collect();
                collected
            }
            None => Vec::new(),
        };
        let first = arguments.first().copied();
        let first_members = |resolver: &mut Self| {
            first
                .map(|arg| resolver.members(file, arg, depth + 1))
                .unwrap_or_default()
        };

        match base {
            "PropsWithChildren" => {
                let mut members = first_members(self);
                members.push(RawProp {
                    name: "children".to_string(),
                    type_text: "React.ReactNode".to_string(),
                    optional: true,
                    has_default: false,
                    call_shape: false,
                });
                members
            }
            "Partial" | "Required" => {
                let optional = base == "Partial";
                first_members(self)
                    .into_iter()
                    .map(|member| RawProp { optional, ..member })
                    .collect()
            }
            "Readonly" => first_members(self),
            "Omit" | "Pick" => {
                let keys: Vec<String> = arguments
                    .get(1)
                    .map(|keys| literal_keys(file.text(keys)))
                    .unwrap_or_default();
                let keep = base == "Pick";
                first_members(self)
                    .into_iter()
                    .filter(|member| keys.contains(&member.name) == keep)
                    .collect()
            }
            _ if name_node.kind() == "type_identifier" => self.named(file, name, depth + 1),
            _ => Vec::new(),
        }
    }
}

/// Members declared directly in an object type or interface body.
fn object_members(file: &SourceFile, body: Node<'_>) -> Vec<RawProp> {
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        let Some(name) = member
            .child_by_field_name("name")
            .map(|n| strip_quotes(file.text(&n)).to_string())
        else {
            continue;
        };
        let optional = has_token(member, "?");
        match member.kind() {
            "property_signature" => {
                let annotated = member.child_by_field_name("type").and_then(first_named);
                let type_text = annotated
                    .map(|t| normalize_type_text(file.text(&t)))
                    .unwrap_or_else(|| "any".to_string());
                let call_shape = annotated.is_some_and(|t| is_call_type(file, t));
                members.push(RawProp {
                    name,
                    type_text,
                    optional,
                    has_default: false,
                    call_shape,
                });
            }
            "method_signature" => {
                let parameters = member
                    .child_by_field_name("parameters")
                    .map(|p| file.text(&p))
                    .unwrap_or("()");
                let returns = member
                    .child_by_field_name("return_type")
                    .and_then(first_named)
                    .map(|r| file.text(&r))
                    .unwrap_or("void");
                members.push(RawProp {
                    name,
                    type_text: normalize_type_text(&format!("{parameters} => {returns}")),
                    optional,
                    has_default: false,
                    call_shape: true,
                });
            }
            _ => {}
        }
    }
    members
}

/// A function type, or a same-module alias of one.
fn is_call_type(file: &SourceFile, annotated: Node<'_>) -> bool {
    if CALL_TYPE_KINDS.contains(&annotated.kind()) {
        return true;
    }
    if annotated.kind() != "type_identifier" {
        return false;
    }
    find_type_declaration(file, file.text(&annotated))
        .filter(|d| d.kind() == "type_alias_declaration")
        .and_then(|d| d.child_by_field_name("value"))
        .is_some_and(|value| CALL_TYPE_KINDS.contains(&value.kind()))
}

/// Find a top-level (optionally exported) interface or type alias.
pub(crate) fn find_type_declaration<'t>(file: &'t SourceFile, name: &str) -> Option<Node<'t>> {
    let root = file.root();
    let mut cursor = root.walk();
    let found = root.named_children(&mut cursor).find_map(|statement| {
        let declaration = if statement.kind() == "export_statement" {
            statement.child_by_field_name("declaration")?
        } else {
            statement
        };
        let declares = matches!(
            declaration.kind(),
            "interface_declaration" | "type_alias_declaration"
        ) && declaration
            .child_by_field_name("name")
            .is_some_and(|n| file.text(&n) == name);
        declares.then_some(declaration)
    });
    found
}

/// The module specifier and imported name behind a local binding.
pub(crate) fn find_import(file: &SourceFile, local: &str) -> Option<(String, String)> {
    let root = file.root();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        if statement.kind() != "import_statement" {
            continue;
        }
        let Some(source) = statement.child_by_field_name("source") else {
            continue;
        };
        let specifier = strip_quotes(file.text(&source)).to_string();
        let mut clause_cursor = statement.walk();
        for clause in statement.named_children(&mut clause_cursor) {
            if clause.kind() != "import_clause" {
                continue;
            }
            let mut named_cursor = clause.walk();
            for named in clause.named_children(&mut named_cursor) {
                if named.kind() != "named_imports" {
                    continue;
                }
                let mut spec_cursor = named.walk();
                for spec in named.named_children(&mut spec_cursor) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(imported) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let imported = file.text(&imported);
                    let bound = spec
                        .child_by_field_name("alias")
                        .map(|a| file.text(&a))
                        .unwrap_or(imported);
                    if bound == local {
                        return Some((specifier, imported.to_string()));
                    }
                }
            }
        }
    }
    None
}

/// Collapse whitespace and drop separators left over from member syntax.
pub(crate) fn normalize_type_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches([';', ','])
        .trim_start_matches('|')
        .trim()
        .to_string()
}

fn literal_keys(text: &str) -> Vec<String> {
    union_members(text)
        .into_iter()
        .map(|key| strip_quotes(key).to_string())
        .collect()
}

pub(crate) fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}
