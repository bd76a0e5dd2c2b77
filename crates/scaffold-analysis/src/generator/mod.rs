//! Test scaffold generator.
//!
//! Turns analyzed components into one test module. Output is a pure
//! function of the components, the target, the pass, and the generation
//! config: the same inputs always yield byte-identical text.
//!
//! Pass 1 ([`Pass::Minimal`]) emits render, default-props, presence, and
//! snapshot scenarios. Pass 2 ([`Pass::Enriched`]) adds conditional,
//! boolean-variant, and interaction scenarios.

mod framework;
pub mod queries;
mod scenarios;
mod writer;

use serde::Serialize;

use framework::FrameworkSyntax;
use scaffold_core::config::{GenerationConfig, TestFramework};
use scenarios::{ComponentScaffold, Usage};
use writer::CodeWriter;

use crate::analyzer::{ComponentInfo, ExportKind};
use crate::mocks::MockSynthesizer;
use crate::placement::GENERATED_HEADER;

/// Which set of scenarios to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Minimal,
    Enriched,
}

impl Pass {
    pub fn number(self) -> u8 {
        match self {
            Self::Minimal => 1,
            Self::Enriched => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Enriched => "enriched",
        }
    }
}

/// Where the generated module will live and what it imports.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldTarget<'a> {
    /// File name of the source module, for the header comment.
    pub source_name: &'a str,
    /// Specifier of the source module relative to the test file.
    pub import_path: &'a str,
    /// Emit type annotations (TypeScript dialects).
    pub typed: bool,
}

/// Emits test modules according to a [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    framework: TestFramework,
    variants: bool,
    max_buttons: usize,
    max_inputs: usize,
    render_module: String,
    user_event_module: String,
    wrapper: Option<(String, String)>,
    mocks: MockSynthesizer,
}

impl Default for Generator {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

impl Generator {
    pub fn from_config(config: &GenerationConfig) -> Self {
        let framework = config.effective_framework();
        Self {
            framework,
            variants: config.effective_variants(),
            max_buttons: config.effective_max_buttons(),
            max_inputs: config.effective_max_inputs(),
            render_module: config.effective_render_module().to_string(),
            user_event_module: config.effective_user_event_module().to_string(),
            wrapper: config
                .wrapper()
                .map(|(import, name)| (import.to_string(), name.to_string())),
            mocks: MockSynthesizer::new(framework),
        }
    }

    pub fn framework(&self) -> TestFramework {
        self.framework
    }

    pub fn mocks(&self) -> &MockSynthesizer {
        &self.mocks
    }

    /// Generate the full test module for a file's components.
    pub fn generate(
        &self,
        components: &[ComponentInfo],
        target: &ScaffoldTarget<'_>,
        pass: Pass,
    ) -> String {
        let mut usage = Usage::default();
        let mut body = CodeWriter::new();
        for component in components {
            self.component_block(component, target, pass, &mut body, &mut usage);
            body.blank();
        }

        let mut out = CodeWriter::new();
        out.line(GENERATED_HEADER);
        out.line(format!(
            "// Source: {} (pass {}, {})",
            target.source_name,
            pass.number(),
            pass.label()
        ));
        out.blank();
        self.imports(components, target, &usage, &mut out);
        out.blank();
        out.append(body);
        out.finish()
    }

    fn component_block(
        &self,
        component: &ComponentInfo,
        target: &ScaffoldTarget<'_>,
        pass: Pass,
        w: &mut CodeWriter,
        usage: &mut Usage,
    ) {
        let scaffold = ComponentScaffold {
            component,
            framework: self.framework,
            mocks: self.mocks,
            typed: target.typed,
            wrapper: self.wrapper.as_ref().map(|(_, name)| name.as_str()),
            max_buttons: self.max_buttons,
            max_inputs: self.max_inputs,
        };

        w.open(format!(
            "describe({}, () => {{",
            crate::mocks::js_string(&component.name)
        ));
        scaffold.setup(w, usage);
        scaffold.renders_without_crashing(w);
        scaffold.renders_with_default_props(w);
        scaffold.presence(w, usage);
        if pass == Pass::Enriched {
            scaffold.conditionals(w, usage);
            if self.variants {
                scaffold.variants(w);
            }
            scaffold.interactions(w, usage);
        }
        scaffold.snapshot(w);
        w.close("});");
    }

    fn imports(
        &self,
        components: &[ComponentInfo],
        target: &ScaffoldTarget<'_>,
        usage: &Usage,
        w: &mut CodeWriter,
    ) {
        let mut globals = vec!["describe", "expect", "it"];
        if usage.before_each {
            globals.push("beforeEach");
        }
        if usage.stubs {
            globals.push(self.framework.mock_namespace());
        }
        if let Some(line) = self.framework.globals_import(&globals) {
            w.line(line);
        }

        w.line("import React from 'react';");
        let render_names = if usage.screen {
            "render, screen"
        } else {
            "render"
        };
        w.line(format!(
            "import {{ {render_names} }} from '{}';",
            self.render_module
        ));
        if usage.user_event {
            w.line(format!("import userEvent from '{}';", self.user_event_module));
        }
        w.line(self.framework.matchers_import());
        if let Some((import, name)) = &self.wrapper {
            w.line(format!("import {{ {name} }} from '{import}';"));
        }
        w.line(component_import(components, target.import_path));
    }
}

/// `import Default, { Named, Other as Local } from './Module';`
fn component_import(components: &[ComponentInfo], import_path: &str) -> String {
    let default = components
        .iter()
        .find(|c| c.export_kind == ExportKind::Default)
        .map(|c| c.name.as_str());
    let named: Vec<String> = components
        .iter()
        .filter(|c| c.export_kind == ExportKind::Named)
        .map(|c| {
            if c.exported_as == c.name {
                c.name.clone()
            } else {
                format!("{} as {}", c.exported_as, c.name)
            }
        })
        .collect();

    let clause = match (default, named.is_empty()) {
        (Some(d), true) => d.to_string(),
        (Some(d), false) => format!("{d}, {{ {} }}", named.join(", ")),
        (None, _) => format!("{{ {} }}", named.join(", ")),
    };
    format!("import {clause} from '{import_path}';")
}
