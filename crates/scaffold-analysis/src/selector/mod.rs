//! Selector strategy: pick the most stable locator for a markup element.
//!
//! Priority, first match wins:
//! 1. explicit test identifier (`data-testid`)
//! 2. accessible label (`aria-label`)
//! 3. static visible text, for clickable and non-input elements
//! 4. placeholder, for input-like elements
//! 5. structural role, always available
//!
//! [`derive_selector`] is total: every element gets a selector.

pub mod attributes;
pub mod roles;

use serde::Serialize;

pub use attributes::{AttrValue, AttributeBag};
pub use roles::implicit_role;

pub const TEST_ID_ATTRIBUTE: &str = "data-testid";
pub const LABEL_ATTRIBUTE: &str = "aria-label";
pub const PLACEHOLDER_ATTRIBUTE: &str = "placeholder";
pub const ROLE_ATTRIBUTE: &str = "role";

/// Role used when nothing more specific is known.
pub const GENERIC_ROLE: &str = "generic";

/// Flavor of an input-like element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
    Checkbox,
    Radio,
    Select,
}

impl InputKind {
    pub fn role(self) -> &'static str {
        match self {
            Self::Text => "textbox",
            Self::Number => "spinbutton",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "combobox",
        }
    }

    /// Checkbox and radio inputs are clicked, not typed into.
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// What kind of element a selector is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Button,
    Input(InputKind),
    /// Any other element, with its implicit role if it has one.
    Other(Option<&'static str>),
}

impl ElementKind {
    /// Classify a host tag and its attributes.
    pub fn classify(tag: &str, attributes: &AttributeBag) -> Self {
        let explicit_role = attributes.text(ROLE_ATTRIBUTE);
        if explicit_role == Some("button") {
            return Self::Button;
        }
        let input_type = attributes.text("type");
        match tag {
            "button" => Self::Button,
            "input" => match input_type {
                Some("checkbox") => Self::Input(InputKind::Checkbox),
                Some("radio") => Self::Input(InputKind::Radio),
                Some("number") => Self::Input(InputKind::Number),
                Some("button" | "submit" | "reset") => Self::Button,
                // Not typed into or clicked: pickers, sliders, hidden fields.
                Some(
                    "range" | "date" | "datetime-local" | "month" | "time" | "week" | "color"
                    | "file" | "hidden" | "image",
                ) => Self::Other(implicit_role(tag, input_type)),
                _ => Self::Input(InputKind::Text),
            },
            "textarea" => Self::Input(InputKind::Text),
            "select" => Self::Input(InputKind::Select),
            _ => Self::Other(implicit_role(tag, input_type)),
        }
    }

    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn is_input(self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Role used for the structural fallback.
    pub fn default_role(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input(kind) => kind.role(),
            Self::Other(role) => role.unwrap_or(GENERIC_ROLE),
        }
    }

    /// Short noun for test titles.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input(InputKind::Select) => "select",
            Self::Input(InputKind::Checkbox) => "checkbox",
            Self::Input(InputKind::Radio) => "radio",
            Self::Input(InputKind::Text | InputKind::Number) => "input",
            Self::Other(_) => "element",
        }
    }
}

/// Which locator strategy a selector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorStrategy {
    TestId,
    AccessibleLabel,
    VisibleText,
    Placeholder,
    StructuralRole,
}

impl SelectorStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::TestId => "test-id",
            Self::AccessibleLabel => "accessible-label",
            Self::VisibleText => "visible-text",
            Self::Placeholder => "placeholder",
            Self::StructuralRole => "structural-role",
        }
    }
}

/// A derived selector. For [`SelectorStrategy::StructuralRole`] the value is
/// the role name and `role` repeats it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectorInfo {
    pub strategy: SelectorStrategy,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SelectorInfo {
    fn new(strategy: SelectorStrategy, value: &str) -> Self {
        Self {
            strategy,
            value: value.to_string(),
            role: None,
        }
    }

    fn structural(role: &str) -> Self {
        Self {
            strategy: SelectorStrategy::StructuralRole,
            value: role.to_string(),
            role: Some(role.to_string()),
        }
    }
}

/// Derive the selector for one element.
///
/// `text_content` is the element's static visible text, if it has any.
pub fn derive_selector(
    attributes: &AttributeBag,
    text_content: Option<&str>,
    kind: ElementKind,
) -> SelectorInfo {
    if let Some(id) = attributes.text(TEST_ID_ATTRIBUTE) {
        return SelectorInfo::new(SelectorStrategy::TestId, id);
    }
    if let Some(label) = attributes.text(LABEL_ATTRIBUTE) {
        return SelectorInfo::new(SelectorStrategy::AccessibleLabel, label);
    }
    if !kind.is_input() {
        if let Some(text) = text_content.map(normalize_text).filter(|t| !t.is_empty()) {
            return SelectorInfo::new(SelectorStrategy::VisibleText, &text);
        }
    }
    if kind.is_input() {
        if let Some(placeholder) = attributes.text(PLACEHOLDER_ATTRIBUTE) {
            return SelectorInfo::new(SelectorStrategy::Placeholder, placeholder);
        }
    }
    let role = attributes
        .text(ROLE_ATTRIBUTE)
        .unwrap_or_else(|| kind.default_role());
    SelectorInfo::structural(role)
}

/// Collapse runs of whitespace the way the text matcher does.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
