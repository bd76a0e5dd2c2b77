//! Coarse classification of declared type text.
//!
//! Only the shape matters for picking a mock value: a union of string
//! literals is a string, `(() => void) | undefined` is a callback.

use serde::Serialize;

/// The shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "shape", content = "literal")]
pub enum TypeShape {
    /// Renderable markup: `ReactNode`, `ReactElement`, `JSX.Element`.
    Node,
    /// `string`, or a string literal kept as written.
    String(Option<String>),
    /// `number`, or a numeric literal kept as written.
    Number(Option<String>),
    Boolean,
    Callback,
    Array,
    Object,
    Unknown,
}

const NODE_TYPES: &[&str] = &[
    "ReactNode",
    "React.ReactNode",
    "ReactElement",
    "React.ReactElement",
    "JSX.Element",
    "ReactChild",
    "React.ReactChild",
];

const CALLBACK_TYPES: &[&str] = &["Function", "VoidFunction", "Dispatch", "React.Dispatch"];

const OBJECT_TYPES: &[&str] = &[
    "object",
    "Object",
    "Record",
    "Partial",
    "Required",
    "Readonly",
    "Pick",
    "Omit",
    "Map",
    "Set",
];

const ARRAY_TYPES: &[&str] = &["Array", "ReadonlyArray"];

impl TypeShape {
    /// Classify a type annotation. Union members that are `undefined` or
    /// `null` are ignored; the remaining members must agree on a shape.
    pub fn classify(type_text: &str) -> Self {
        let mut shapes = union_members(type_text)
            .into_iter()
            .filter(|m| !is_nullish(m))
            .map(classify_member);
        let Some(first) = shapes.next() else {
            return Self::Unknown;
        };
        for shape in shapes {
            if std::mem::discriminant(&shape) != std::mem::discriminant(&first) {
                return Self::Unknown;
            }
        }
        first
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback)
    }

    /// Node, string, number and boolean shapes take precedence over
    /// handler naming.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Node | Self::String(_) | Self::Number(_) | Self::Boolean
        )
    }
}

/// Whether a union type admits `undefined`.
pub fn includes_undefined(type_text: &str) -> bool {
    union_members(type_text).iter().any(|m| *m == "undefined")
}

/// Split a type on top-level `|`, ignoring bars nested in brackets or quotes.
pub fn union_members(type_text: &str) -> Vec<&str> {
    split_top_level(type_text, '|')
        .into_iter()
        .map(|m| strip_parens(m.trim()))
        .filter(|m| !m.is_empty())
        .collect()
}

fn classify_member(member: &str) -> TypeShape {
    if has_top_level_arrow(member) {
        return TypeShape::Callback;
    }
    if member.ends_with("[]") || member.starts_with('[') {
        return TypeShape::Array;
    }
    if member.starts_with('{') {
        return TypeShape::Object;
    }
    if is_string_literal(member) {
        return TypeShape::String(Some(member.to_string()));
    }
    if member.starts_with('`') {
        return TypeShape::String(None);
    }
    if member.parse::<f64>().is_ok() {
        return TypeShape::Number(Some(member.to_string()));
    }

    let base = member.split('<').next().unwrap_or(member).trim();
    match base {
        "string" => TypeShape::String(None),
        "number" => TypeShape::Number(None),
        "boolean" | "true" | "false" => TypeShape::Boolean,
        _ if NODE_TYPES.contains(&base) => TypeShape::Node,
        _ if CALLBACK_TYPES.contains(&base) || base.ends_with("Handler") => TypeShape::Callback,
        _ if ARRAY_TYPES.contains(&base) => TypeShape::Array,
        _ if OBJECT_TYPES.contains(&base) => TypeShape::Object,
        _ if base.starts_with(|c: char| c.is_ascii_uppercase()) => TypeShape::Object,
        _ => TypeShape::Unknown,
    }
}

fn is_nullish(member: &str) -> bool {
    matches!(member, "undefined" | "null")
}

fn is_string_literal(member: &str) -> bool {
    let bytes = member.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'\'' | b'"')
        && bytes[bytes.len() - 1] == bytes[0]
}

fn strip_parens(member: &str) -> &str {
    let mut current = member;
    while current.starts_with('(') && current.ends_with(')') && wraps_whole(current) {
        current = current[1..current.len() - 1].trim();
    }
    current
}

/// True when the opening paren at index 0 closes at the final byte.
fn wraps_whole(text: &str) -> bool {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

fn has_top_level_arrow(text: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for c in text.chars() {
        if let Some(q) = quote {
            if c == q && prev != '\\' {
                quote = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' | '<' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '>' if prev == '=' => {
                    if depth == 0 {
                        return true;
                    }
                }
                '>' => depth -= 1,
                _ => {}
            }
        }
        prev = c;
    }
    false
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q && prev != '\\' {
                quote = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' | '<' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '>' if prev != '=' => depth -= 1,
                c if c == separator && depth == 0 => {
                    parts.push(&text[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            }
        }
        prev = c;
    }
    parts.push(&text[start..]);
    parts
}
