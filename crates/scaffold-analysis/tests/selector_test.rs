//! Selector strategy tests
//!
//! Priority order, per-kind restrictions, and the structural fallback.

use scaffold_analysis::selector::{
    derive_selector, AttrValue, AttributeBag, ElementKind, InputKind, SelectorStrategy,
};

fn bag(entries: &[(&str, &str)]) -> AttributeBag {
    let mut bag = AttributeBag::new();
    for (name, value) in entries {
        bag.insert(*name, AttrValue::Text(value.to_string()));
    }
    bag
}

#[test]
fn test_id_beats_everything() {
    let attributes = bag(&[
        ("aria-label", "Save"),
        ("data-testid", "save-button"),
        ("placeholder", "ignored"),
    ]);
    let selector = derive_selector(&attributes, Some("Save now"), ElementKind::Button);
    assert_eq!(selector.strategy, SelectorStrategy::TestId);
    assert_eq!(selector.value, "save-button");
    assert_eq!(selector.role, None);
}

#[test]
fn accessible_label_beats_visible_text() {
    let attributes = bag(&[("aria-label", "Close dialog")]);
    let selector = derive_selector(&attributes, Some("×"), ElementKind::Button);
    assert_eq!(selector.strategy, SelectorStrategy::AccessibleLabel);
    assert_eq!(selector.value, "Close dialog");
}

#[test]
fn visible_text_is_whitespace_normalized() {
    let selector = derive_selector(
        &AttributeBag::new(),
        Some("  Add\n   to   cart "),
        ElementKind::Button,
    );
    assert_eq!(selector.strategy, SelectorStrategy::VisibleText);
    assert_eq!(selector.value, "Add to cart");
}

#[test]
fn inputs_never_use_visible_text() {
    let attributes = bag(&[("placeholder", "Search")]);
    let kind = ElementKind::Input(InputKind::Text);
    let selector = derive_selector(&attributes, Some("stray text"), kind);
    assert_eq!(selector.strategy, SelectorStrategy::Placeholder);
    assert_eq!(selector.value, "Search");
}

#[test]
fn placeholder_is_ignored_on_buttons() {
    let attributes = bag(&[("placeholder", "odd")]);
    let selector = derive_selector(&attributes, None, ElementKind::Button);
    assert_eq!(selector.strategy, SelectorStrategy::StructuralRole);
    assert_eq!(selector.value, "button");
}

#[test]
fn blank_attributes_fall_through() {
    let attributes = bag(&[("data-testid", "   "), ("aria-label", "")]);
    let selector = derive_selector(&attributes, Some("Go"), ElementKind::Button);
    assert_eq!(selector.strategy, SelectorStrategy::VisibleText);
    assert_eq!(selector.value, "Go");
}

#[test]
fn dynamic_attributes_are_not_static_selectors() {
    let mut attributes = AttributeBag::new();
    attributes.insert("data-testid", AttrValue::Expression("`row-${id}`".into()));
    let selector = derive_selector(&attributes, None, ElementKind::Input(InputKind::Checkbox));
    assert_eq!(selector.strategy, SelectorStrategy::StructuralRole);
    assert_eq!(selector.role.as_deref(), Some("checkbox"));
}

#[test]
fn explicit_role_overrides_default_role() {
    let attributes = bag(&[("role", "switch")]);
    let kind = ElementKind::classify("input", &bag(&[("type", "checkbox"), ("role", "switch")]));
    let selector = derive_selector(&attributes, None, kind);
    assert_eq!(selector.value, "switch");
}

#[test]
fn element_without_role_gets_generic() {
    let kind = ElementKind::classify("div", &AttributeBag::new());
    assert_eq!(kind, ElementKind::Other(None));
    let selector = derive_selector(&AttributeBag::new(), None, kind);
    assert_eq!(selector.value, "generic");
}

#[test]
fn classification_of_input_types() {
    let classify = |t: &str| ElementKind::classify("input", &bag(&[("type", t)]));
    assert_eq!(classify("email"), ElementKind::Input(InputKind::Text));
    assert_eq!(classify("number"), ElementKind::Input(InputKind::Number));
    assert_eq!(classify("radio"), ElementKind::Input(InputKind::Radio));
    assert_eq!(classify("submit"), ElementKind::Button);
    assert!(!classify("file").is_interactive());
    assert!(!classify("hidden").is_interactive());
    assert_eq!(
        ElementKind::classify("div", &bag(&[("role", "button")])),
        ElementKind::Button
    );
    assert_eq!(
        ElementKind::classify("textarea", &AttributeBag::new()),
        ElementKind::Input(InputKind::Text)
    );
}

#[test]
fn later_duplicate_attribute_wins() {
    let mut attributes = AttributeBag::new();
    attributes.insert("aria-label", AttrValue::Text("First".into()));
    attributes.insert("aria-label", AttrValue::Text("Second".into()));
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.text("aria-label"), Some("Second"));
}
