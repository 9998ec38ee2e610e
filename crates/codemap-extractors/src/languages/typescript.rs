//! TypeScript and TSX
//!
//! Same shape as JavaScript plus interfaces, type aliases, enums and
//! namespaces. `.tsx` files get the TSX grammar.

use crate::base::SymbolKind;
use crate::engine::TreeSitterExtractor;
use crate::languages::javascript::function_binding;
use crate::rules::{LanguageSpec, NodeRule, has_async_token};
use tree_sitter::Language;

fn grammar(path: &str) -> Language {
    if path.ends_with(".tsx") {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }
}

pub fn spec() -> LanguageSpec {
    let function = || {
        NodeRule::new(SymbolKind::Function, &["identifier"])
            .signature(&["formal_parameters"])
            .async_when(has_async_token)
    };
    let method = || {
        NodeRule::new(
            SymbolKind::Method,
            &["property_identifier", "private_property_identifier"],
        )
        .signature(&["formal_parameters"])
        .async_when(has_async_token)
    };

    LanguageSpec::new("typescript", &[".ts", ".tsx", ".mts", ".cts"], grammar)
        .rule("function_declaration", function())
        .rule("generator_function_declaration", function())
        .rule("function_signature", function())
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, &["type_identifier", "identifier"])
                .body(&["class_body"]),
        )
        .rule(
            "abstract_class_declaration",
            NodeRule::new(SymbolKind::Class, &["type_identifier", "identifier"])
                .body(&["class_body"]),
        )
        .rule("method_definition", method())
        .rule("method_signature", method())
        .rule("abstract_method_signature", method())
        .rule(
            "interface_declaration",
            NodeRule::new(SymbolKind::Interface, &["type_identifier"])
                .body(&["interface_body", "object_type"]),
        )
        .rule(
            "type_alias_declaration",
            NodeRule::new(SymbolKind::Type, &["type_identifier"]),
        )
        .rule(
            "enum_declaration",
            NodeRule::new(SymbolKind::Enum, &["identifier"]),
        )
        .rule(
            "internal_module",
            NodeRule::new(SymbolKind::Namespace, &["identifier", "nested_identifier"])
                .body(&["statement_block"])
                .keep_member_kinds(),
        )
        .override_node("lexical_declaration", function_binding)
        .override_node("variable_declaration", function_binding)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}
