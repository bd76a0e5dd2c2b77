//! Mock value synthesis: a literal source expression for every prop.
//!
//! Rules are applied in order, first match wins. Synthesis is a pure
//! function of the prop and the target framework.

pub mod shape;

use scaffold_core::config::TestFramework;

pub use shape::{includes_undefined, union_members, TypeShape};

use crate::analyzer::PropInfo;

pub const NODE_MOCK: &str = "<div>Test content</div>";
pub const NUMBER_MOCK: &str = "42";
pub const UNDEFINED_MOCK: &str = "undefined";

const BOOLEAN_PREFIXES: &[&str] = &["is", "has", "show", "can", "should"];

/// Produces mock expressions for props.
#[derive(Debug, Clone, Copy)]
pub struct MockSynthesizer {
    framework: TestFramework,
}

impl MockSynthesizer {
    pub fn new(framework: TestFramework) -> Self {
        Self { framework }
    }

    /// The stub expression for callbacks: `jest.fn()` or `vi.fn()`.
    pub fn stub(&self) -> &'static str {
        match self.framework {
            TestFramework::Jest => "jest.fn()",
            TestFramework::Vitest => "vi.fn()",
        }
    }

    /// Synthesize the default mock value for a prop.
    pub fn mock_for(&self, prop: &PropInfo) -> String {
        let shape = TypeShape::classify(&prop.type_text);
        if prop.name == "children" || shape == TypeShape::Node {
            return NODE_MOCK.to_string();
        }
        match shape {
            TypeShape::String(literal) => {
                return literal.unwrap_or_else(|| js_string(&format!("Test {}", prop.name)));
            }
            TypeShape::Number(literal) => {
                return literal.unwrap_or_else(|| NUMBER_MOCK.to_string());
            }
            TypeShape::Boolean => return "true".to_string(),
            TypeShape::Unknown if is_boolean_name(&prop.name) => return "true".to_string(),
            _ => {}
        }
        if prop.is_callback || shape == TypeShape::Callback || is_handler_name(&prop.name) {
            return self.stub().to_string();
        }
        match shape {
            TypeShape::Array => "[]".to_string(),
            TypeShape::Object => "{}".to_string(),
            _ if is_identifier_name(&prop.name) => js_string(&format!("{}-1", prop.name)),
            _ => UNDEFINED_MOCK.to_string(),
        }
    }

    /// The value that forces a conditional prop to the given truthiness.
    pub fn forced_value(&self, prop: &PropInfo, truthy: bool) -> String {
        if prop.is_boolean || self.is_boolean_like(prop) {
            return truthy.to_string();
        }
        if !truthy {
            return UNDEFINED_MOCK.to_string();
        }
        match self.mock_for(prop) {
            mock if mock == UNDEFINED_MOCK || mock == "''" || mock == "0" => "true".to_string(),
            mock => mock,
        }
    }

    fn is_boolean_like(&self, prop: &PropInfo) -> bool {
        match TypeShape::classify(&prop.type_text) {
            TypeShape::Boolean => true,
            TypeShape::Unknown => is_boolean_name(&prop.name),
            _ => false,
        }
    }
}

/// `isOpen`, `hasError`, `showLabel`, `canEdit`, `shouldFocus`.
pub fn is_boolean_name(name: &str) -> bool {
    BOOLEAN_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

/// `onClick`, `onChange`, but not `online` or `one`.
pub fn is_handler_name(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// `id`, `userId`, `accountID`, `parent_id`.
pub fn is_identifier_name(name: &str) -> bool {
    name == "id" || name.ends_with("Id") || name.ends_with("ID") || name.ends_with("_id")
}

/// Render a single-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
