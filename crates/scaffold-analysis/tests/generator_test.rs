//! Test scaffold generator tests
//!
//! Pass contents, imports per framework, determinism, and config knobs.

use scaffold_analysis::analyzer::{analyze, ComponentInfo};
use scaffold_analysis::generator::{Generator, Pass, ScaffoldTarget};
use scaffold_analysis::loader::{NoModules, SourceContext};
use scaffold_analysis::placement::{carries_marker, GENERATED_HEADER};
use scaffold_core::config::{GenerationConfig, TestFramework};

// ============================================================================
// Helpers
// ============================================================================

const BUTTON: &str = include_str!("../../../test-fixtures/components/Button.tsx");

fn components(name: &str, source: &str) -> Vec<ComponentInfo> {
    let context = SourceContext::new().unwrap();
    let file = context.parse_str(name, source).unwrap();
    analyze(&file, &NoModules)
}

fn target<'a>(source_name: &'a str, import_path: &'a str) -> ScaffoldTarget<'a> {
    ScaffoldTarget {
        source_name,
        import_path,
        typed: true,
    }
}

fn button_scaffold(generator: &Generator, pass: Pass) -> String {
    let components = components("Button.tsx", BUTTON);
    generator.generate(&components, &target("Button.tsx", "./Button"), pass)
}

// ============================================================================
// Header and imports
// ============================================================================

#[test]
fn output_starts_with_the_generated_marker() {
    let out = button_scaffold(&Generator::default(), Pass::Minimal);
    assert!(out.starts_with(GENERATED_HEADER));
    assert!(carries_marker(&out));
    assert!(out.contains("// Source: Button.tsx (pass 1, minimal)"));
    assert!(out.ends_with('\n'));
}

#[test]
fn jest_imports() {
    let out = button_scaffold(&Generator::default(), Pass::Minimal);
    assert!(!out.contains("from 'vitest'"));
    assert!(out.contains("import React from 'react';"));
    assert!(out.contains("import { render, screen } from '@testing-library/react';"));
    assert!(out.contains("import '@testing-library/jest-dom';"));
    assert!(out.contains("import Button from './Button';"));
}

#[test]
fn vitest_imports_globals_and_uses_vi() {
    let config = GenerationConfig {
        framework: Some(TestFramework::Vitest),
        ..GenerationConfig::default()
    };
    let out = button_scaffold(&Generator::from_config(&config), Pass::Minimal);
    assert!(out.contains("import { beforeEach, describe, expect, it, vi } from 'vitest';"));
    assert!(out.contains("onClick: vi.fn(),"));
    assert!(out.contains("vi.clearAllMocks();"));
    assert!(out.contains("import '@testing-library/jest-dom/vitest';"));
    assert!(!out.contains("jest.fn()"));
}

#[test]
fn user_event_is_imported_only_with_interactions() {
    let generator = Generator::default();
    assert!(!button_scaffold(&generator, Pass::Minimal).contains("userEvent"));
    assert!(button_scaffold(&generator, Pass::Enriched)
        .contains("import userEvent from '@testing-library/user-event';"));

    let static_only = components(
        "Heading.tsx",
        "export function Heading({ text }: { text: string }) { return <h1>{text}</h1>; }",
    );
    let out = generator.generate(
        &static_only,
        &target("Heading.tsx", "./Heading"),
        Pass::Enriched,
    );
    assert!(!out.contains("userEvent"));
    assert!(out.contains("import { render } from '@testing-library/react';"));
}

#[test]
fn default_and_named_components_share_one_import() {
    let components = components(
        "Layout.tsx",
        r#"
export function Header() { return <header />; }
const Footer = () => <footer />;
export { Footer as PageFooter };
export default function Layout() { return <main />; }
"#,
    );
    let out = Generator::default().generate(
        &components,
        &target("Layout.tsx", "./Layout"),
        Pass::Minimal,
    );
    assert!(out.contains("import Layout, { Header, PageFooter as Footer } from './Layout';"));
    assert!(out.contains("describe('Header', () => {"));
    assert!(out.contains("describe('Footer', () => {"));
    assert!(out.contains("describe('Layout', () => {"));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn minimal_pass_scenarios() {
    let out = button_scaffold(&Generator::default(), Pass::Minimal);
    assert!(out.contains("label: 'Test label',"));
    assert!(out.contains("onClick: jest.fn(),"));
    assert!(out.contains("} as React.ComponentProps<typeof Button>;"));
    assert!(out.contains("it('renders without crashing', () => {"));
    assert!(out.contains("expect(() => renderButton()).not.toThrow();"));
    assert!(out.contains("it('renders with default props', () => {"));
    assert!(out.contains("expect(container).toBeInTheDocument();"));
    assert!(out.contains("it('renders the \"Submit form\" button', () => {"));
    assert!(out.contains("expect(screen.getByLabelText('Submit form')).toBeInTheDocument();"));
    assert!(out.contains("expect(asFragment()).toMatchSnapshot();"));

    assert!(!out.contains("it.each"));
    assert!(!out.contains("getByTestId('spinner')"));
}

#[test]
fn enriched_pass_adds_conditions_variants_and_interactions() {
    let out = button_scaffold(&Generator::default(), Pass::Enriched);
    assert!(out.contains("// Source: Button.tsx (pass 2, enriched)"));
    assert!(out.contains("renderButton({ isLoading: true });"));
    assert!(out.contains("expect(screen.getByTestId('spinner')).toBeInTheDocument();"));
    assert!(out.contains("it.each([true, false])('renders with isLoading=%s', (value) => {"));
    assert!(out.contains("const { container } = renderButton({ isLoading: value });"));
    assert!(out.contains("await user.click(screen.getByLabelText('Submit form'));"));
    assert!(out.contains("expect(defaultProps.onClick).toHaveBeenCalled();"));
}

#[test]
fn aliased_handler_props_get_stubs_and_call_assertions() {
    let components = components(
        "Dialog.tsx",
        r#"
type SaveCallback = (id: string) => void;
interface Props { onSave: SaveCallback; onClose: VoidCallback }
export function Dialog({ onSave, onClose }: Props) {
  return <div><button onClick={() => onSave('1')}>Save</button><button onClick={onClose}>Close</button></div>;
}
"#,
    );
    let out = Generator::default().generate(
        &components,
        &target("Dialog.tsx", "./Dialog"),
        Pass::Enriched,
    );
    assert!(out.contains("onSave: jest.fn(),"));
    assert!(out.contains("onClose: jest.fn(),"));
    assert!(!out.contains("onSave: {},"));
    assert!(out.contains("await user.click(screen.getByText('Save'));"));
    assert!(out.contains("expect(defaultProps.onSave).toHaveBeenCalled();"));
    assert!(out.contains("expect(defaultProps.onClose).toHaveBeenCalled();"));
}

#[test]
fn variants_can_be_disabled() {
    let config = GenerationConfig {
        variants: Some(false),
        ..GenerationConfig::default()
    };
    let out = button_scaffold(&Generator::from_config(&config), Pass::Enriched);
    assert!(!out.contains("it.each"));
    assert!(out.contains("getByTestId('spinner')"));
}

#[test]
fn inputs_are_typed_into_and_checkboxes_toggled() {
    let source = include_str!("../../../test-fixtures/components/LoginForm.tsx");
    let components = components("LoginForm.tsx", source);
    let out = Generator::default().generate(
        &components,
        &target("LoginForm.tsx", "./LoginForm"),
        Pass::Enriched,
    );
    assert!(out.contains("import { LoginForm } from './LoginForm';"));
    assert!(out.contains("const field = screen.getByPlaceholderText('Email');"));
    assert!(out.contains("await user.type(field, 'Test input');"));
    assert!(out.contains("const field = screen.getByLabelText('Remember me');"));
    assert!(out.contains("expect(field).toBeChecked();"));
    assert!(out.contains("await user.click(screen.getByText('Sign in'));"));
    assert!(out.contains("renderLoginForm({ error: 'Test error' });"));
    assert!(out.contains("screen.getAllByRole('alert')[0]"));
}

#[test]
fn disabled_elements_get_no_interaction() {
    let components = components(
        "Archive.tsx",
        "export function Archive() { return <button disabled>Archive</button>; }",
    );
    let out = Generator::default().generate(
        &components,
        &target("Archive.tsx", "./Archive"),
        Pass::Enriched,
    );
    assert!(out.contains("screen.getByText('Archive')"));
    assert!(!out.contains("user.click"));
    assert!(!out.contains("userEvent"));
}

#[test]
fn untyped_sources_skip_type_assertions() {
    let source = include_str!("../../../test-fixtures/components/Badge.jsx");
    let components = components("Badge.jsx", source);
    let out = Generator::default().generate(
        &components,
        &ScaffoldTarget {
            source_name: "Badge.jsx",
            import_path: "./Badge",
            typed: false,
        },
        Pass::Minimal,
    );
    assert!(!out.contains("React.ComponentProps"));
    assert!(out.contains("const renderBadge = (overrides = {}) =>"));
    assert!(out.contains("tone: 'info',"));
}

#[test]
fn wrapper_is_imported_and_applied() {
    let config = GenerationConfig {
        wrapper_import: Some("../test/providers".into()),
        wrapper_name: Some("Providers".into()),
        ..GenerationConfig::default()
    };
    let out = button_scaffold(&Generator::from_config(&config), Pass::Minimal);
    assert!(out.contains("import { Providers } from '../test/providers';"));
    assert!(out.contains("render(<Button {...defaultProps} {...overrides} />, { wrapper: Providers });"));
}

#[test]
fn generation_is_deterministic() {
    let generator = Generator::default();
    for pass in [Pass::Minimal, Pass::Enriched] {
        let first = button_scaffold(&generator, pass);
        let second = button_scaffold(&generator, pass);
        assert_eq!(first, second);
    }
}

#[test]
fn no_consecutive_blank_lines() {
    let out = button_scaffold(&Generator::default(), Pass::Enriched);
    assert!(!out.contains("\n\n\n"));
}
