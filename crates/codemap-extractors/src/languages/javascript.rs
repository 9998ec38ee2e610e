//! JavaScript: declarations, classes and `const f = () => {}` bindings

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule, has_async_token};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("javascript", &[".js", ".jsx", ".mjs", ".cjs"], grammar)
        .rule(
            "function_declaration",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["formal_parameters"])
                .async_when(has_async_token),
        )
        .rule(
            "generator_function_declaration",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["formal_parameters"])
                .async_when(has_async_token),
        )
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, &["identifier"]).body(&["class_body"]),
        )
        .rule(
            "method_definition",
            NodeRule::new(
                SymbolKind::Method,
                &["property_identifier", "private_property_identifier"],
            )
            .signature(&["formal_parameters"])
            .async_when(has_async_token),
        )
        .override_node("lexical_declaration", function_binding)
        .override_node("variable_declaration", function_binding)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// `const name = (args) => ...` or `= function (args) {...}` as a function
///
/// Declarations binding anything else produce no symbol.
pub(crate) fn function_binding(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let mut cursor = node.walk();
    let declarators: Vec<Node<'_>> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "variable_declarator")
        .collect();

    declarators.into_iter().find_map(|declarator| {
        let value = declarator.child_by_field_name("value")?;
        if !matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function"
        ) {
            return None;
        }
        let name = walker.name(declarator, &["identifier"])?;

        let kind = if has_async_token(&value) {
            SymbolKind::AsyncFunction
        } else {
            SymbolKind::Function
        };
        let signature = walker.signature(value, &["formal_parameters"]).or_else(|| {
            value
                .child_by_field_name("parameter")
                .map(|p| format!("({})", walker.base.get_node_text(&p)))
        });

        Some(
            Symbol::new(name, kind, walker.base.line_range(&node))
                .with_signature(signature)
                .with_docstring(walker.preceding_comment(node)),
        )
    })
}
