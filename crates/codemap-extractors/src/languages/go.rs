//! Go: functions, methods and type declarations

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_go::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("go", &[".go"], grammar)
        .rule(
            "function_declaration",
            NodeRule::new(SymbolKind::Function, &["identifier"]).signature(&["parameters"]),
        )
        .rule(
            "method_declaration",
            NodeRule::new(SymbolKind::Method, &["field_identifier"]).signature(&["parameters"]),
        )
        // interface members, older and newer grammar names
        .rule(
            "method_elem",
            NodeRule::new(SymbolKind::Method, &["field_identifier"]).signature(&["parameters"]),
        )
        .rule(
            "method_spec",
            NodeRule::new(SymbolKind::Method, &["field_identifier"]).signature(&["parameters"]),
        )
        .override_node("type_spec", type_spec)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// `type X struct{}` / `type X interface{}` / `type X Y`
fn type_spec(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let name = walker.name(node, &["type_identifier", "name"])?;
    let definition = node.child_by_field_name("type");

    let kind = match definition.map(|d| d.kind()) {
        Some("struct_type") => SymbolKind::Struct,
        Some("interface_type") => SymbolKind::Interface,
        _ => SymbolKind::Type,
    };
    let children = definition
        .filter(|d| d.kind() == "interface_type")
        .map(|d| walker.collect_members(d, true))
        .unwrap_or_default();

    Some(
        Symbol::new(name, kind, walker.base.line_range(&node))
            .with_docstring(walker.preceding_comment(node))
            .with_children(children),
    )
}
