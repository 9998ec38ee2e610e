//! Java: types and their methods/constructors

use crate::base::SymbolKind;
use crate::engine::TreeSitterExtractor;
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::Language;

fn grammar(_path: &str) -> Language {
    tree_sitter_java::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("java", &[".java"], grammar)
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, &["name", "identifier"]).body(&["class_body"]),
        )
        .rule(
            "record_declaration",
            NodeRule::new(SymbolKind::Class, &["name", "identifier"]).body(&["class_body"]),
        )
        .rule(
            "interface_declaration",
            NodeRule::new(SymbolKind::Interface, &["name", "identifier"])
                .body(&["interface_body"]),
        )
        .rule(
            "enum_declaration",
            NodeRule::new(SymbolKind::Enum, &["name", "identifier"]).body(&["enum_body"]),
        )
        .rule(
            "method_declaration",
            NodeRule::new(SymbolKind::Method, &["name", "identifier"])
                .signature(&["formal_parameters"]),
        )
        .rule(
            "constructor_declaration",
            NodeRule::new(SymbolKind::Method, &["name", "identifier"])
                .signature(&["formal_parameters"]),
        )
        .comments(&["block_comment", "line_comment"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}
