//! Rendering selectors as Testing Library queries.

use crate::mocks::js_string;
use crate::selector::{ElementKind, SelectorInfo, SelectorStrategy};

/// The `screen` query expression locating an element.
pub fn query(selector: &SelectorInfo) -> String {
    let value = js_string(&selector.value);
    match selector.strategy {
        SelectorStrategy::TestId => format!("screen.getByTestId({value})"),
        SelectorStrategy::AccessibleLabel => format!("screen.getByLabelText({value})"),
        SelectorStrategy::VisibleText => format!("screen.getByText({value})"),
        SelectorStrategy::Placeholder => format!("screen.getByPlaceholderText({value})"),
        SelectorStrategy::StructuralRole => {
            let role = selector.role.as_deref().unwrap_or(&selector.value);
            format!("screen.getAllByRole({})[0]", js_string(role))
        }
    }
}

/// Human wording for test titles, e.g. `the "Save" button`.
pub fn describe(selector: &SelectorInfo, kind: ElementKind) -> String {
    let noun = kind.noun();
    match selector.strategy {
        SelectorStrategy::StructuralRole => {
            let role = selector.role.as_deref().unwrap_or(&selector.value);
            if role == noun {
                format!("the first {noun}")
            } else {
                format!("the first {role} {noun}")
            }
        }
        _ => format!("the \"{}\" {noun}", selector.value),
    }
}
