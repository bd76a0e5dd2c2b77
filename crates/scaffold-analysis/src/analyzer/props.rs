//! Prop discovery for one component candidate.
//!
//! Sources, merged by name in this order: the first parameter's type
//! annotation (or the `React.FC<P>` annotation on the declaring variable),
//! destructuring defaults, `props.x` member accesses, then `propTypes` and
//! `defaultProps` assignments.

use tree_sitter::Node;

use super::declarations::Candidate;
use super::typedefs::{first_named, normalize_type_text, RawProp, TypeResolver};
use super::types::PropInfo;
use crate::loader::{ModuleSource, SourceFile};
use crate::mocks::{includes_undefined, is_handler_name, TypeShape};
use crate::selector::attributes::strip_quotes;

const FUNCTION_COMPONENT_TYPES: &[&str] = &[
    "FC",
    "FunctionComponent",
    "VFC",
    "VoidFunctionComponent",
];

/// Props of a candidate, in declaration order.
pub(crate) fn resolve_props(
    file: &SourceFile,
    candidate: &Candidate<'_>,
    modules: &dyn ModuleSource,
) -> Vec<PropInfo> {
    let mut props = PropSet::default();
    let mut resolver = TypeResolver::new(modules);

    let (pattern, annotation) = match first_parameter(candidate.function) {
        Some(param) => split_parameter(param),
        None => (None, None),
    };

    let declared = annotation.or_else(|| {
        candidate
            .declared_type
            .and_then(|t| component_type_argument(file, t))
    });
    if let Some(declared) = declared {
        for member in resolver.members(file, declared, 0) {
            props.merge(member);
        }
    }

    match pattern {
        Some(p) if p.kind() == "object_pattern" => destructured(file, p, &mut props),
        Some(p) if p.kind() == "identifier" => {
            if let Some(body) = candidate.function.child_by_field_name("body") {
                accessed_members(file, body, file.text(&p), &mut props);
            }
        }
        _ => {}
    }

    prop_types(file, &candidate.name, &mut props);
    props.finalize()
}

/// Props accumulated by name. A concrete type replaces `any`/`unknown`,
/// and a later concrete declaration replaces an earlier one.
#[derive(Debug, Default)]
struct PropSet {
    props: Vec<RawProp>,
}

impl PropSet {
    fn merge(&mut self, incoming: RawProp) {
        match self.props.iter_mut().find(|p| p.name == incoming.name) {
            None => self.props.push(incoming),
            Some(existing) => {
                if is_concrete(&incoming.type_text) || !is_concrete(&existing.type_text) {
                    existing.type_text = incoming.type_text;
                    existing.optional = incoming.optional;
                    existing.call_shape = incoming.call_shape;
                }
                existing.has_default |= incoming.has_default;
            }
        }
    }

    /// Record a prop seen without a type (destructuring, member access).
    fn observe(&mut self, name: &str, has_default: bool) {
        match self.props.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.has_default |= has_default,
            None => self.props.push(RawProp::inferred(name, has_default)),
        }
    }

    fn finalize(self) -> Vec<PropInfo> {
        self.props
            .into_iter()
            .map(|raw| {
                let shape = TypeShape::classify(&raw.type_text);
                let is_callback = raw.call_shape
                    || shape.is_callback()
                    || (!shape.is_value() && is_handler_name(&raw.name));
                PropInfo {
                    is_required: !(raw.has_default
                        || raw.optional
                        || includes_undefined(&raw.type_text)),
                    is_callback,
                    is_boolean: raw.type_text == "boolean",
                    name: raw.name,
                    type_text: raw.type_text,
                }
            })
            .collect()
    }
}

fn is_concrete(type_text: &str) -> bool {
    !matches!(type_text, "" | "any" | "unknown")
}

fn first_parameter(function: Node<'_>) -> Option<Node<'_>> {
    if let Some(single) = function.child_by_field_name("parameter") {
        return Some(single);
    }
    let parameters = function.child_by_field_name("parameters")?;
    first_named(parameters)
}

/// Split a parameter into its binding pattern and type annotation.
fn split_parameter(param: Node<'_>) -> (Option<Node<'_>>, Option<Node<'_>>) {
    match param.kind() {
        "required_parameter" | "optional_parameter" => (
            param.child_by_field_name("pattern"),
            param.child_by_field_name("type"),
        ),
        "assignment_pattern" => (param.child_by_field_name("left"), None),
        _ => (Some(param), None),
    }
}

/// `P` from a `React.FC<P>` style annotation.
fn component_type_argument<'t>(file: &SourceFile, annotation: Node<'t>) -> Option<Node<'t>> {
    let generic = first_named(annotation).filter(|n| n.kind() == "generic_type")?;
    let name = generic.child_by_field_name("name")?;
    let name = file.text(&name);
    let base = name.rsplit('.').next().unwrap_or(name);
    if !FUNCTION_COMPONENT_TYPES.contains(&base) {
        return None;
    }
    first_named(generic.child_by_field_name("type_arguments")?)
}

/// Names and defaults from `{ a, b = 1, c: renamed = 2 }`.
fn destructured(file: &SourceFile, pattern: Node<'_>, props: &mut PropSet) {
    let mut cursor = pattern.walk();
    for entry in pattern.named_children(&mut cursor) {
        match entry.kind() {
            "shorthand_property_identifier_pattern" => props.observe(file.text(&entry), false),
            "object_assignment_pattern" => {
                if let Some(left) = entry.child_by_field_name("left") {
                    props.observe(file.text(&left), true);
                }
            }
            "pair_pattern" => {
                let Some(key) = entry.child_by_field_name("key") else {
                    continue;
                };
                let has_default = entry
                    .child_by_field_name("value")
                    .is_some_and(|v| v.kind() == "assignment_pattern");
                props.observe(strip_quotes(file.text(&key)), has_default);
            }
            _ => {}
        }
    }
}

/// Props reached through a named parameter: `props.title` accesses and
/// `const { title = 'x' } = props` destructuring in the body.
fn accessed_members(file: &SourceFile, body: Node<'_>, param: &str, props: &mut PropSet) {
    let mut stack = vec![body];
    let mut seen_in_order = Vec::new();
    while let Some(node) = stack.pop() {
        match node.kind() {
            "member_expression" => {
                let object = node.child_by_field_name("object");
                let property = node.child_by_field_name("property");
                if let (Some(object), Some(property)) = (object, property) {
                    if object.kind() == "identifier" && file.text(&object) == param {
                        seen_in_order.push((node.start_byte(), file.text(&property), None));
                    }
                }
            }
            "variable_declarator" => {
                let value = node.child_by_field_name("value");
                let name = node.child_by_field_name("name");
                if let (Some(value), Some(name)) = (value, name) {
                    if value.kind() == "identifier"
                        && file.text(&value) == param
                        && name.kind() == "object_pattern"
                    {
                        seen_in_order.push((node.start_byte(), "", Some(name)));
                    }
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }

    seen_in_order.sort_by_key(|(start, _, _)| *start);
    for (_, name, pattern) in seen_in_order {
        match pattern {
            Some(pattern) => destructured(file, pattern, props),
            None => props.observe(name, false),
        }
    }
}

/// Legacy runtime declarations: `Name.propTypes = {...}` and
/// `Name.defaultProps = {...}` at module level.
fn prop_types(file: &SourceFile, component: &str, props: &mut PropSet) {
    let root = file.root();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(assignment) = first_named(statement).filter(|n| n.kind() == "assignment_expression")
        else {
            continue;
        };
        let (Some(left), Some(right)) = (
            assignment.child_by_field_name("left"),
            assignment.child_by_field_name("right"),
        ) else {
            continue;
        };
        if left.kind() != "member_expression" || right.kind() != "object" {
            continue;
        }
        let object = left.child_by_field_name("object").map(|n| file.text(&n));
        let property = left.child_by_field_name("property").map(|n| file.text(&n));
        if object != Some(component) {
            continue;
        }
        match property {
            Some("propTypes") => {
                for (name, value) in object_entries(file, right) {
                    props.merge(prop_type_member(name, value));
                }
            }
            Some("defaultProps") => {
                for (name, _) in object_entries(file, right) {
                    props.observe(name, true);
                }
            }
            _ => {}
        }
    }
}

fn object_entries<'t>(file: &'t SourceFile, object: Node<'_>) -> Vec<(&'t str, &'t str)> {
    let mut entries = Vec::new();
    let mut cursor = object.walk();
    for entry in object.named_children(&mut cursor) {
        match entry.kind() {
            "pair" => {
                let key = entry.child_by_field_name("key");
                let value = entry.child_by_field_name("value");
                if let (Some(key), Some(value)) = (key, value) {
                    entries.push((strip_quotes(file.text(&key)), file.text(&value)));
                }
            }
            "shorthand_property_identifier" => {
                let name = file.text(&entry);
                entries.push((name, name));
            }
            _ => {}
        }
    }
    entries
}

/// Map a `PropTypes.x[.isRequired]` validator onto a type.
fn prop_type_member(name: &str, validator: &str) -> RawProp {
    let validator = normalize_type_text(validator);
    let required = validator.ends_with(".isRequired");
    let body = validator
        .trim_end_matches(".isRequired")
        .trim_start_matches("PropTypes.");
    let kind = body.split('(').next().unwrap_or(body);
    let (type_text, call_shape) = match kind {
        "string" => ("string".to_string(), false),
        "number" => ("number".to_string(), false),
        "bool" => ("boolean".to_string(), false),
        "func" => ("() => void".to_string(), true),
        "node" | "element" => ("React.ReactNode".to_string(), false),
        "array" | "arrayOf" => ("unknown[]".to_string(), false),
        "object" | "shape" | "objectOf" | "exact" | "instanceOf" => ("object".to_string(), false),
        "oneOf" => (one_of_literals(body), false),
        _ => ("any".to_string(), false),
    };
    RawProp {
        name: name.to_string(),
        type_text,
        optional: !required,
        has_default: false,
        call_shape,
    }
}

/// `oneOf(['a', 'b'])` becomes `'a' | 'b'`; anything else is `any`.
fn one_of_literals(body: &str) -> String {
    let inner = body
        .trim_start_matches("oneOf(")
        .trim_end_matches(')')
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let literals: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let all_strings = !literals.is_empty()
        && literals
            .iter()
            .all(|l| l.len() >= 2 && (l.starts_with('\'') || l.starts_with('"')));
    if all_strings {
        literals.join(" | ")
    } else {
        "any".to_string()
    }
}
