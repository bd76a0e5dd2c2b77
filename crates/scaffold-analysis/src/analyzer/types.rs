//! Component contract types produced by the analyzer.

use scaffold_core::types::collections::PropNames;
use serde::Serialize;

use crate::selector::{ElementKind, SelectorInfo};

/// How a component is exported from its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Default,
    Named,
}

/// One declared or inferred prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropInfo {
    pub name: String,
    /// Declared type text, whitespace-collapsed. `unknown` when inferred.
    #[serde(rename = "type")]
    pub type_text: String,
    /// No default, not optional, and the type does not admit `undefined`.
    pub is_required: bool,
    pub is_callback: bool,
    /// The declared type is exactly `boolean`.
    pub is_boolean: bool,
}

/// An element a user acts on: a button or an input-like element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractiveElement {
    pub kind: ElementKind,
    pub tag: String,
    pub selector: SelectorInfo,
    /// Callback props referenced from this element's `on*` handlers.
    pub handler_props: PropNames,
    /// Carries a `value` or `checked` attribute.
    pub controlled: bool,
    /// Statically disabled (`disabled` or `disabled={true}`).
    pub disabled: bool,
    pub line: usize,
}

/// An element rendered only when its gating props hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalElementInfo {
    pub kind: ElementKind,
    pub tag: String,
    pub selector: SelectorInfo,
    /// Props that must be truthy for the element to render.
    pub required_props: PropNames,
    /// Props that must be falsy for the element to render.
    pub falsy_props: PropNames,
    pub line: usize,
}

impl ConditionalElementInfo {
    pub fn is_interactive(&self) -> bool {
        self.kind.is_interactive()
    }
}

/// The full analyzed contract of one exported component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentInfo {
    pub name: String,
    pub export_kind: ExportKind,
    /// The name the module exports it under (`default` for default exports).
    pub exported_as: String,
    pub props: Vec<PropInfo>,
    /// Interactive elements rendered unconditionally.
    pub interactive_elements: Vec<InteractiveElement>,
    pub conditional_elements: Vec<ConditionalElementInfo>,
    pub markup_count: usize,
    pub line: usize,
}

impl ComponentInfo {
    pub fn prop(&self, name: &str) -> Option<&PropInfo> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn required_props(&self) -> impl Iterator<Item = &PropInfo> {
        self.props.iter().filter(|p| p.is_required)
    }

    pub fn callback_props(&self) -> impl Iterator<Item = &PropInfo> {
        self.props.iter().filter(|p| p.is_callback)
    }

    pub fn boolean_props(&self) -> impl Iterator<Item = &PropInfo> {
        self.props.iter().filter(|p| p.is_boolean)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InteractiveElement> {
        self.interactive_elements
            .iter()
            .filter(|e| e.kind == ElementKind::Button)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &InteractiveElement> {
        self.interactive_elements.iter().filter(|e| e.kind.is_input())
    }
}
