//! Swift
//!
//! The grammar uses one `class_declaration` node for classes, structs,
//! enums, actors and extensions; the keyword token tells them apart.

use crate::base::{BaseExtractor, Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_swift::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("swift", &[".swift"], grammar)
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, &["type_identifier", "user_type"])
                .body(&["class_body", "enum_class_body"]),
        )
        .rule(
            "protocol_declaration",
            NodeRule::new(SymbolKind::Interface, &["type_identifier"]).body(&["protocol_body"]),
        )
        .rule(
            "function_declaration",
            NodeRule::new(SymbolKind::Function, &["simple_identifier"]),
        )
        .rule(
            "protocol_function_declaration",
            NodeRule::new(SymbolKind::Function, &["simple_identifier"]),
        )
        .override_node("class_declaration", class_declaration)
        .comments(&["comment", "multiline_comment"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

fn declaration_kind(node: &Node) -> SymbolKind {
    for (keyword, kind) in [
        ("enum", SymbolKind::Enum),
        ("struct", SymbolKind::Struct),
        ("extension", SymbolKind::Other("extension".to_string())),
        ("actor", SymbolKind::Class),
    ] {
        if BaseExtractor::has_child_kind(node, keyword) {
            return kind;
        }
    }
    SymbolKind::Class
}

fn class_declaration(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let rule = walker.spec.rules.get("class_declaration")?;
    let mut symbol = walker.apply_rule(node, rule)?;
    symbol.kind = declaration_kind(&node);
    Some(symbol)
}
