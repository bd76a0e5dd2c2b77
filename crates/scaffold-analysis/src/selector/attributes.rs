//! Markup attributes as an explicit, total key/value bag.

use serde::Serialize;
use tree_sitter::Node;

/// The value side of one markup attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    /// A static string, from `name="x"` or `name={'x'}`.
    Text(String),
    /// A boolean, from a bare `name` or `name={true}` / `name={false}`.
    Flag(bool),
    /// Any other expression, kept as source text.
    Expression(String),
}

/// Attributes of one markup node, in source order.
/// Later duplicates replace earlier ones, as they do at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeBag {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The static, non-blank string value of an attribute.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            AttrValue::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read the attributes of a `jsx_opening_element` or `jsx_self_closing_element`.
    /// Spread attributes (`{...rest}`) carry no name and are skipped.
    pub fn from_tag(tag: Node<'_>, source: &[u8]) -> Self {
        let mut bag = Self::new();
        let mut cursor = tag.walk();
        for attr in tag.named_children(&mut cursor) {
            if attr.kind() != "jsx_attribute" {
                continue;
            }
            let mut inner = attr.walk();
            let mut parts = attr.named_children(&mut inner);
            let Some(name_node) = parts.next() else {
                continue;
            };
            let Ok(name) = name_node.utf8_text(source) else {
                continue;
            };
            let value = match parts.next() {
                None => AttrValue::Flag(true),
                Some(value_node) => attribute_value(value_node, source),
            };
            bag.insert(name, value);
        }
        bag
    }
}

fn attribute_value(node: Node<'_>, source: &[u8]) -> AttrValue {
    let text = node.utf8_text(source).unwrap_or_default();
    match node.kind() {
        "string" => AttrValue::Text(strip_quotes(text).to_string()),
        "jsx_expression" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|n| n.kind() != "comment");
            match inner {
                Some(expr) => expression_value(expr, source),
                None => AttrValue::Expression(String::new()),
            }
        }
        _ => AttrValue::Expression(text.to_string()),
    }
}

fn expression_value(expr: Node<'_>, source: &[u8]) -> AttrValue {
    let text = expr.utf8_text(source).unwrap_or_default();
    match expr.kind() {
        "string" => AttrValue::Text(strip_quotes(text).to_string()),
        "template_string" if !text.contains("${") => {
            AttrValue::Text(strip_quotes(text).to_string())
        }
        "true" => AttrValue::Flag(true),
        "false" => AttrValue::Flag(false),
        _ => AttrValue::Expression(text.to_string()),
    }
}

/// Strip one pair of matching quotes (`'`, `"`, or backtick).
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'\'' | b'"' | b'`') {
            return &text[1..text.len() - 1];
        }
    }
    text
}
