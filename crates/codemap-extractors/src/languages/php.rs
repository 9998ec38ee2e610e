//! PHP: namespaces, classes, interfaces, traits, enums and functions

use crate::base::SymbolKind;
use crate::engine::TreeSitterExtractor;
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::Language;

fn grammar(_path: &str) -> Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("php", &[".php", ".phtml"], grammar)
        .rule(
            "class_declaration",
            NodeRule::new(SymbolKind::Class, &["name"]).body(&["declaration_list"]),
        )
        .rule(
            "interface_declaration",
            NodeRule::new(SymbolKind::Interface, &["name"]).body(&["declaration_list"]),
        )
        .rule(
            "trait_declaration",
            NodeRule::new(SymbolKind::Trait, &["name"]).body(&["declaration_list"]),
        )
        .rule(
            "enum_declaration",
            NodeRule::new(SymbolKind::Enum, &["name"]).body(&["enum_declaration_list"]),
        )
        .rule(
            "enum_case",
            NodeRule::new(SymbolKind::Other("constant".to_string()), &["name"]),
        )
        .rule(
            "function_definition",
            NodeRule::new(SymbolKind::Function, &["name"]).signature(&["formal_parameters"]),
        )
        .rule(
            "method_declaration",
            NodeRule::new(SymbolKind::Method, &["name"]).signature(&["formal_parameters"]),
        )
        .rule(
            "namespace_definition",
            NodeRule::new(SymbolKind::Namespace, &["namespace_name", "name"])
                .body(&["compound_statement"])
                .keep_member_kinds(),
        )
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}
