//! Rust items: functions, types, traits, impls and inline modules

use crate::base::SymbolKind;
use crate::engine::TreeSitterExtractor;
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_rust::LANGUAGE.into()
}

/// `async fn`, whether the grammar puts `async` on the item or in its modifiers
fn is_async_fn(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| match child.kind() {
        "async" => true,
        "function_modifiers" => {
            let mut inner = child.walk();
            child.children(&mut inner).any(|m| m.kind() == "async")
        }
        _ => false,
    });
    found
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("rust", &[".rs"], grammar)
        .rule(
            "function_item",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["parameters"])
                .async_when(is_async_fn),
        )
        .rule(
            "function_signature_item",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["parameters"])
                .async_when(is_async_fn),
        )
        .rule(
            "struct_item",
            NodeRule::new(SymbolKind::Struct, &["type_identifier"]),
        )
        .rule(
            "enum_item",
            NodeRule::new(SymbolKind::Enum, &["type_identifier"]),
        )
        .rule(
            "union_item",
            NodeRule::new(SymbolKind::Struct, &["type_identifier"]),
        )
        .rule(
            "type_item",
            NodeRule::new(SymbolKind::Type, &["type_identifier"]),
        )
        .rule(
            "trait_item",
            NodeRule::new(SymbolKind::Trait, &["type_identifier"]).body(&["declaration_list"]),
        )
        .rule(
            "impl_item",
            NodeRule::new(SymbolKind::Impl, &["type", "type_identifier"])
                .body(&["declaration_list"]),
        )
        .rule(
            "mod_item",
            NodeRule::new(SymbolKind::Module, &["identifier"])
                .body(&["declaration_list"])
                .keep_member_kinds(),
        )
        .rule(
            "macro_definition",
            NodeRule::new(SymbolKind::Other("macro".to_string()), &["identifier"]),
        )
        .comments(&["line_comment", "block_comment"])
        .doc_skip(&["attribute_item"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}
