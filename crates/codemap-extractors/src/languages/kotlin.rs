//! Kotlin: classes, objects, interfaces and functions

use crate::base::{BaseExtractor, Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

const NAME_PATHS: &[&str] = &["identifier", "type_identifier", "simple_identifier"];

fn grammar(_path: &str) -> Language {
    tree_sitter_kotlin_ng::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("kotlin", &[".kt", ".kts"], grammar)
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, NAME_PATHS).body(&["class_body", "enum_class_body"]),
        )
        .rule(
            "object_declaration",
            NodeRule::new(SymbolKind::Class, NAME_PATHS).body(&["class_body"]),
        )
        .rule(
            "function_declaration",
            NodeRule::new(SymbolKind::Function, NAME_PATHS)
                .signature(&["function_value_parameters"]),
        )
        .override_node("class_declaration", class_declaration)
        .comments(&["line_comment", "multiline_comment", "block_comment"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// `interface Foo` shares the class node; the keyword decides the kind
fn class_declaration(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let rule = walker.spec.rules.get("class_declaration")?;
    let mut symbol = walker.apply_rule(node, rule)?;
    if BaseExtractor::has_child_kind(&node, "interface") {
        symbol.kind = SymbolKind::Interface;
    } else if BaseExtractor::has_child_kind(&node, "enum") {
        symbol.kind = SymbolKind::Enum;
    }
    Some(symbol)
}
