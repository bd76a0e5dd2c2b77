//! Test scenarios for one component.
//!
//! Each scenario writes one or more `it(...)` blocks into the component's
//! `describe` block and records which imports it relied on.

use super::framework::FrameworkSyntax;
use super::queries::{describe, query};
use super::writer::CodeWriter;
use crate::analyzer::{ComponentInfo, ConditionalElementInfo, InteractiveElement, PropInfo};
use crate::mocks::{js_string, MockSynthesizer, TypeShape};
use crate::selector::{ElementKind, InputKind, SelectorInfo};
use scaffold_core::config::TestFramework;

const TYPED_TEXT: &str = "Test input";
const TYPED_NUMBER: &str = "42";

/// Imports and globals the generated body relies on.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Usage {
    pub screen: bool,
    pub user_event: bool,
    pub stubs: bool,
    pub before_each: bool,
}

/// Everything needed to emit one component's `describe` block.
pub(crate) struct ComponentScaffold<'a> {
    pub component: &'a ComponentInfo,
    pub framework: TestFramework,
    pub mocks: MockSynthesizer,
    pub typed: bool,
    pub wrapper: Option<&'a str>,
    pub max_buttons: usize,
    pub max_inputs: usize,
}

impl ComponentScaffold<'_> {
    fn name(&self) -> &str {
        &self.component.name
    }

    fn render_fn(&self) -> String {
        format!("render{}", self.component.name)
    }

    fn props_type(&self) -> String {
        format!("React.ComponentProps<typeof {}>", self.component.name)
    }

    /// Required props and every callback, each with its mock value.
    fn defaults(&self) -> Vec<(&PropInfo, String)> {
        self.component
            .props
            .iter()
            .filter(|p| p.is_required || p.is_callback)
            .map(|p| (p, self.mocks.mock_for(p)))
            .collect()
    }

    /// `defaultProps`, the render helper, and mock resets.
    pub fn setup(&self, w: &mut CodeWriter, usage: &mut Usage) {
        let defaults = self.defaults();
        let assertion = if self.typed {
            format!(" as {}", self.props_type())
        } else {
            String::new()
        };

        if defaults.is_empty() {
            w.line(format!("const defaultProps = {{}}{assertion};"));
        } else {
            w.open("const defaultProps = {");
            for (prop, value) in &defaults {
                w.line(format!("{}: {value},", prop_key(&prop.name)));
            }
            w.close(format!("}}{assertion};"));
        }
        let stubs = defaults.iter().any(|(_, value)| value == self.mocks.stub());
        usage.stubs |= stubs;
        w.blank();

        let parameter = if self.typed {
            format!("overrides: Partial<{}> = {{}}", self.props_type())
        } else {
            "overrides = {}".to_string()
        };
        w.open(format!("const {} = ({parameter}) =>", self.render_fn()));
        let element = format!("<{} {{...defaultProps}} {{...overrides}} />", self.name());
        match self.wrapper {
            Some(wrapper) => w.line(format!("render({element}, {{ wrapper: {wrapper} }});")),
            None => w.line(format!("render({element});")),
        }
        w.dedent();
        w.blank();

        if stubs {
            usage.before_each = true;
            w.open("beforeEach(() => {");
            w.line(self.framework.clear_mocks());
            w.close("});");
            w.blank();
        }
    }

    /// (a) Rendering with default props does not throw.
    pub fn renders_without_crashing(&self, w: &mut CodeWriter) {
        w.open("it('renders without crashing', () => {");
        w.line(format!("expect(() => {}()).not.toThrow();", self.render_fn()));
        w.close("});");
        w.blank();
    }

    /// (b) The default render mounts into the document.
    pub fn renders_with_default_props(&self, w: &mut CodeWriter) {
        w.open("it('renders with default props', () => {");
        w.line(format!("const {{ container }} = {}();", self.render_fn()));
        w.line("expect(container).toBeInTheDocument();");
        w.close("});");
        w.blank();
    }

    /// (c) The first few buttons and inputs are present.
    pub fn presence(&self, w: &mut CodeWriter, usage: &mut Usage) {
        let buttons = self.component.buttons().take(self.max_buttons);
        let inputs = self.component.inputs().take(self.max_inputs);
        let mut seen: Vec<&SelectorInfo> = Vec::new();
        for element in buttons.chain(inputs) {
            if seen.contains(&&element.selector) {
                continue;
            }
            seen.push(&element.selector);
            usage.screen = true;
            let title = format!("renders {}", describe(&element.selector, element.kind));
            w.open(format!("it({}, () => {{", js_string(&title)));
            w.line(format!("{}();", self.render_fn()));
            w.line(format!("expect({}).toBeInTheDocument();", query(&element.selector)));
            w.close("});");
            w.blank();
        }
    }

    /// (d) Each gated element appears once its gating props are forced.
    pub fn conditionals(&self, w: &mut CodeWriter, usage: &mut Usage) {
        for element in &self.component.conditional_elements {
            let overrides = self.overrides_for(element);
            if overrides.is_empty() {
                continue;
            }
            usage.screen = true;
            let conditions: Vec<String> = overrides
                .iter()
                .map(|(prop, value, truthy)| condition_phrase(prop, value, *truthy))
                .collect();
            let title = format!(
                "renders {} when {}",
                describe(&element.selector, element.kind),
                conditions.join(" and ")
            );
            let object = overrides
                .iter()
                .map(|(prop, value, _)| format!("{}: {value}", prop_key(&prop.name)))
                .collect::<Vec<_>>()
                .join(", ");
            w.open(format!("it({}, () => {{", js_string(&title)));
            w.line(format!("{}({{ {object} }});", self.render_fn()));
            w.line(format!("expect({}).toBeInTheDocument();", query(&element.selector)));
            w.close("});");
            w.blank();
        }
    }

    fn overrides_for<'c>(
        &'c self,
        element: &ConditionalElementInfo,
    ) -> Vec<(&'c PropInfo, String, bool)> {
        let required = element.required_props.iter().map(|name| (name, true));
        let falsy = element.falsy_props.iter().map(|name| (name, false));
        required
            .chain(falsy)
            .filter_map(|(name, truthy)| {
                let prop = self.component.prop(name)?;
                Some((prop, self.mocks.forced_value(prop, truthy), truthy))
            })
            .collect()
    }

    /// (e) One render per value of each boolean prop.
    pub fn variants(&self, w: &mut CodeWriter) {
        for prop in self.component.boolean_props() {
            let title = format!("renders with {}=%s", prop.name);
            w.open(format!(
                "it.each([true, false])({}, (value) => {{",
                js_string(&title)
            ));
            w.line(format!(
                "const {{ container }} = {}({{ {}: value }});",
                self.render_fn(),
                prop_key(&prop.name)
            ));
            w.line("expect(container).toBeInTheDocument();");
            w.close("});");
            w.blank();
        }
    }

    /// (f) Simulated clicks and typing on each enabled interactive element.
    pub fn interactions(&self, w: &mut CodeWriter, usage: &mut Usage) {
        let mut seen: Vec<&SelectorInfo> = Vec::new();
        for element in &self.component.interactive_elements {
            if element.disabled || seen.contains(&&element.selector) {
                continue;
            }
            seen.push(&element.selector);
            match element.kind {
                ElementKind::Button => self.click_button(element, w),
                ElementKind::Input(kind) => self.use_input(element, kind, w),
                ElementKind::Other(_) => continue,
            }
            usage.screen = true;
            usage.user_event = true;
        }
    }

    fn click_button(&self, element: &InteractiveElement, w: &mut CodeWriter) {
        let target = describe(&element.selector, element.kind);
        let handler = element.handler_props.first();
        let title = match handler {
            Some(h) => format!("calls {h} when {target} is clicked"),
            None => format!("handles a click on {target}"),
        };
        w.open(format!("it({}, async () => {{", js_string(&title)));
        w.line("const user = userEvent.setup();");
        match handler {
            Some(h) => {
                w.line(format!("{}();", self.render_fn()));
                w.line(format!("await user.click({});", query(&element.selector)));
                w.line(format!("expect({}).toHaveBeenCalled();", prop_access(h)));
            }
            None => {
                w.line(format!("const {{ container }} = {}();", self.render_fn()));
                w.line(format!("await user.click({});", query(&element.selector)));
                w.line("expect(container).toBeInTheDocument();");
            }
        }
        w.close("});");
        w.blank();
    }

    fn use_input(&self, element: &InteractiveElement, kind: InputKind, w: &mut CodeWriter) {
        let target = describe(&element.selector, element.kind);
        let handler = element.handler_props.first();
        let (title, action, value_check) = match kind {
            InputKind::Text => (
                format!("accepts typing in {target}"),
                format!("await user.type(field, {});", js_string(TYPED_TEXT)),
                format!("expect(field).toHaveValue({});", js_string(TYPED_TEXT)),
            ),
            InputKind::Number => (
                format!("accepts a number in {target}"),
                format!("await user.type(field, {});", js_string(TYPED_NUMBER)),
                format!("expect(field).toHaveValue({TYPED_NUMBER});"),
            ),
            InputKind::Checkbox | InputKind::Radio => (
                format!("toggles {target}"),
                "await user.click(field);".to_string(),
                "expect(field).toBeChecked();".to_string(),
            ),
            InputKind::Select => (
                format!("opens {target}"),
                "await user.click(field);".to_string(),
                "expect(field).toBeInTheDocument();".to_string(),
            ),
        };
        let assertion = match handler {
            Some(h) => format!("expect({}).toHaveBeenCalled();", prop_access(h)),
            None if !element.controlled => value_check,
            None => "expect(field).toBeInTheDocument();".to_string(),
        };

        w.open(format!("it({}, async () => {{", js_string(&title)));
        w.line("const user = userEvent.setup();");
        w.line(format!("{}();", self.render_fn()));
        w.line(format!("const field = {};", query(&element.selector)));
        w.line(action);
        w.line(assertion);
        w.close("});");
        w.blank();
    }

    /// (g) Snapshot of the default render.
    pub fn snapshot(&self, w: &mut CodeWriter) {
        w.open("it('matches the snapshot', () => {");
        w.line(format!("const {{ asFragment }} = {}();", self.render_fn()));
        w.line("expect(asFragment()).toMatchSnapshot();");
        w.close("});");
        w.blank();
    }
}

fn condition_phrase(prop: &PropInfo, value: &str, truthy: bool) -> String {
    let boolean = prop.is_boolean || TypeShape::classify(&prop.type_text) == TypeShape::Boolean;
    match (boolean || value == "true" || value == "false", truthy) {
        (true, _) => format!("{} is {value}", prop.name),
        (false, true) => format!("{} is set", prop.name),
        (false, false) => format!("{} is not set", prop.name),
    }
}

/// Object key for a prop: bare when it is an identifier, quoted otherwise.
fn prop_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// `defaultProps.onClick` or `defaultProps['on-click']`.
fn prop_access(name: &str) -> String {
    if is_identifier(name) {
        format!("defaultProps.{name}")
    } else {
        format!("defaultProps[{}]", js_string(name))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
