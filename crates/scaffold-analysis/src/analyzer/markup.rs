//! Markup scan: one pass over a component body.
//!
//! Every element is visited once, in source order. Elements gated by a
//! prop-referencing condition are recorded as conditional; the rest feed the
//! interactive catalog.

use scaffold_core::types::collections::PropNames;
use tree_sitter::Node;

use super::typedefs::first_named;
use super::types::{ConditionalElementInfo, InteractiveElement, PropInfo};
use crate::loader::SourceFile;
use crate::mocks::is_handler_name;
use crate::selector::attributes::strip_quotes;
use crate::selector::{derive_selector, AttrValue, AttributeBag, ElementKind};

/// Everything the markup scan learns about one component.
#[derive(Debug, Default)]
pub(crate) struct MarkupScan {
    pub markup_count: usize,
    pub interactive: Vec<InteractiveElement>,
    pub conditional: Vec<ConditionalElementInfo>,
}

/// Props that gate an element, and whether the element is the outermost
/// markup of the gated branch.
#[derive(Debug, Default, PartialEq, Eq)]
struct Gate {
    required: PropNames,
    falsy: PropNames,
    branch_root: bool,
}

impl Gate {
    fn add(&mut self, name: String, truthy: bool) {
        if self.required.contains(&name) || self.falsy.contains(&name) {
            return;
        }
        if truthy {
            self.required.push(name);
        } else {
            self.falsy.push(name);
        }
    }
}

pub(crate) fn scan(file: &SourceFile, function: Node<'_>, props: &[PropInfo]) -> MarkupScan {
    let mut result = MarkupScan::default();
    let Some(body) = function.child_by_field_name("body") else {
        return result;
    };

    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "jsx_fragment" => result.markup_count += 1,
            "jsx_element" | "jsx_self_closing_element" => {
                result.markup_count += 1;
                if let Some(tag) = opening_tag(node) {
                    if !is_fragment(tag) {
                        visit_element(file, node, tag, function, props, &mut result);
                    }
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    result
}

fn visit_element(
    file: &SourceFile,
    node: Node<'_>,
    tag: Node<'_>,
    function: Node<'_>,
    props: &[PropInfo],
    result: &mut MarkupScan,
) {
    let tag_name = tag
        .child_by_field_name("name")
        .map(|n| file.text(&n))
        .unwrap_or_default();
    let attributes = AttributeBag::from_tag(tag, file.source.as_bytes());
    let kind = ElementKind::classify(tag_name, &attributes);
    let text = if kind.is_input() {
        None
    } else {
        static_text(file, node)
    };
    let line = node.start_position().row + 1;

    match gate(file, node, function, props) {
        Some(gate) => {
            if kind.is_interactive() || gate.branch_root {
                result.conditional.push(ConditionalElementInfo {
                    kind,
                    tag: tag_name.to_string(),
                    selector: derive_selector(&attributes, text.as_deref(), kind),
                    required_props: gate.required,
                    falsy_props: gate.falsy,
                    line,
                });
            }
        }
        None if kind.is_interactive() => {
            result.interactive.push(InteractiveElement {
                kind,
                tag: tag_name.to_string(),
                selector: derive_selector(&attributes, text.as_deref(), kind),
                handler_props: handler_props(file, tag, props),
                controlled: attributes.contains("value") || attributes.contains("checked"),
                disabled: matches!(attributes.get("disabled"), Some(AttrValue::Flag(true))),
                line,
            });
        }
        None => {}
    }
}

/// The node carrying the tag name and attributes.
fn opening_tag(element: Node<'_>) -> Option<Node<'_>> {
    if element.kind() == "jsx_self_closing_element" {
        return Some(element);
    }
    element.child_by_field_name("open_tag").or_else(|| {
        let mut cursor = element.walk();
        let open = element
            .named_children(&mut cursor)
            .find(|n| n.kind() == "jsx_opening_element");
        open
    })
}

fn is_fragment(tag: Node<'_>) -> bool {
    tag.child_by_field_name("name").is_none()
}

fn is_markup(node: Node<'_>) -> bool {
    match node.kind() {
        "jsx_element" | "jsx_self_closing_element" => {
            opening_tag(node).is_some_and(|tag| !is_fragment(tag))
        }
        _ => false,
    }
}

/// Walk up from `node` to the component boundary, collecting every guard
/// whose rendered side contains the node.
fn gate(file: &SourceFile, node: Node<'_>, boundary: Node<'_>, props: &[PropInfo]) -> Option<Gate> {
    let mut gate: Option<Gate> = None;
    let mut passed_markup = false;
    let mut child = node;

    while let Some(parent) = child.parent() {
        if parent.id() == boundary.id() {
            break;
        }
        if is_markup(parent) {
            passed_markup = true;
        }
        if let Some((condition, truthy)) = guard_of(file, parent, child) {
            let referenced = condition_props(file, condition, props);
            if !referenced.is_empty() {
                let gate = gate.get_or_insert_with(|| Gate {
                    branch_root: !passed_markup,
                    ..Gate::default()
                });
                for (name, negated) in referenced {
                    gate.add(name, truthy != negated);
                }
            }
        }
        child = parent;
    }
    gate
}

/// If `parent` only renders `child` under a condition, return the condition
/// and whether it must be truthy.
fn guard_of<'t>(file: &SourceFile, parent: Node<'t>, child: Node<'t>) -> Option<(Node<'t>, bool)> {
    let is_field = |field: &str| {
        parent
            .child_by_field_name(field)
            .is_some_and(|n| n.id() == child.id())
    };
    match parent.kind() {
        "binary_expression" if is_field("right") => {
            let operator = parent
                .child_by_field_name("operator")
                .map(|op| file.text(&op))?;
            let left = parent.child_by_field_name("left")?;
            match operator {
                "&&" => Some((left, true)),
                "||" => Some((left, false)),
                _ => None,
            }
        }
        "ternary_expression" | "if_statement" => {
            let condition = parent.child_by_field_name("condition")?;
            if is_field("consequence") {
                Some((condition, true))
            } else if is_field("alternative") {
                Some((condition, false))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Props referenced by a condition, each with whether it is negated.
fn condition_props(file: &SourceFile, condition: Node<'_>, props: &[PropInfo]) -> Vec<(String, bool)> {
    let mut found: Vec<(String, bool)> = Vec::new();
    let mut stack = vec![(condition, false)];
    let push = |name: &str, negated: bool, found: &mut Vec<(String, bool)>| {
        if props.iter().any(|p| p.name == name) && !found.iter().any(|(n, _)| n == name) {
            found.push((name.to_string(), negated));
        }
    };

    while let Some((node, negated)) = stack.pop() {
        match node.kind() {
            "identifier" => {
                push(file.text(&node), negated, &mut found);
                continue;
            }
            "member_expression" => {
                let object = node.child_by_field_name("object");
                let property = node.child_by_field_name("property");
                if let (Some(object), Some(property)) = (object, property) {
                    if object.kind() == "identifier" && file.text(&object) == "props" {
                        push(file.text(&property), negated, &mut found);
                        continue;
                    }
                }
            }
            _ => {}
        }
        let flips = node.kind() == "unary_expression"
            && node
                .child_by_field_name("operator")
                .is_some_and(|op| file.text(&op) == "!");
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push((child, negated != flips));
        }
    }
    found
}

/// Callback props referenced from `on*` attribute values, in order.
fn handler_props(file: &SourceFile, tag: Node<'_>, props: &[PropInfo]) -> PropNames {
    let mut handlers = PropNames::new();
    let mut cursor = tag.walk();
    for attribute in tag.named_children(&mut cursor) {
        if attribute.kind() != "jsx_attribute" {
            continue;
        }
        let Some(name) = first_named(attribute) else {
            continue;
        };
        if !is_handler_name(file.text(&name)) {
            continue;
        }
        let mut stack = vec![attribute];
        while let Some(node) = stack.pop() {
            let referenced = match node.kind() {
                "identifier" => Some(file.text(&node)),
                "member_expression" => node
                    .child_by_field_name("object")
                    .filter(|o| o.kind() == "identifier" && file.text(o) == "props")
                    .and_then(|_| node.child_by_field_name("property"))
                    .map(|p| file.text(&p)),
                _ => None,
            };
            if let Some(referenced) = referenced {
                let is_callback = props.iter().any(|p| p.name == referenced && p.is_callback);
                if is_callback && !handlers.iter().any(|h| h == referenced) {
                    handlers.push(referenced.to_string());
                }
            }
            let mut inner = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut inner).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    handlers
}

/// Static visible text of an element, as Testing Library matches it: the
/// element's own text nodes, or the text of its only text-bearing child
/// element when it has none of its own. `None` when there is no text, when
/// own and nested text are mixed, or when part of it is computed at render
/// time.
fn static_text(file: &SourceFile, element: Node<'_>) -> Option<String> {
    if element.kind() != "jsx_element" {
        return None;
    }
    let mut pieces: Vec<&str> = Vec::new();
    let mut nested: Vec<Node<'_>> = Vec::new();
    let mut cursor = element.walk();
    for node in element.named_children(&mut cursor) {
        match node.kind() {
            "jsx_text" => {
                let text = file.text(&node).trim();
                if !text.is_empty() {
                    pieces.push(text);
                }
            }
            "jsx_expression" => match first_named(node) {
                None => {}
                Some(inner) if inner.kind() == "string" => {
                    pieces.push(strip_quotes(file.text(&inner)));
                }
                Some(inner)
                    if inner.kind() == "template_string" && !file.text(&inner).contains("${") =>
                {
                    pieces.push(strip_quotes(file.text(&inner)));
                }
                Some(_) => return None,
            },
            "jsx_element" => nested.push(node),
            _ => {}
        }
    }

    let own = pieces.join(" ");
    let own = own.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut nested_texts = nested.into_iter().filter_map(|n| static_text(file, n));
    match (own.is_empty(), nested_texts.next(), nested_texts.next()) {
        (false, None, _) => Some(own),
        (true, Some(only), None) => Some(only),
        _ => None,
    }
}

