//! C#: namespaces, types, methods and properties

use crate::base::SymbolKind;
use crate::engine::TreeSitterExtractor;
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_c_sharp::LANGUAGE.into()
}

/// `async` arrives as a `modifier` node rather than a bare token
fn has_async_modifier(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| {
        child.kind() == "async"
            || (child.kind() == "modifier" && child.child(0).is_some_and(|m| m.kind() == "async"))
    });
    found
}

pub fn spec() -> LanguageSpec {
    let type_rule = |kind: SymbolKind| NodeRule::new(kind, &["name"]).body(&["declaration_list"]);

    LanguageSpec::new("csharp", &[".cs"], grammar)
        .rule("class_declaration", type_rule(SymbolKind::Class))
        .rule("record_declaration", type_rule(SymbolKind::Class))
        .rule("interface_declaration", type_rule(SymbolKind::Interface))
        .rule("struct_declaration", type_rule(SymbolKind::Struct))
        .rule(
            "enum_declaration",
            NodeRule::new(SymbolKind::Enum, &["name"]).body(&["enum_member_declaration_list"]),
        )
        .rule(
            "namespace_declaration",
            NodeRule::new(SymbolKind::Namespace, &["name"])
                .body(&["declaration_list"])
                .keep_member_kinds(),
        )
        .rule(
            "method_declaration",
            NodeRule::new(SymbolKind::Method, &["name"])
                .signature(&["parameter_list"])
                .async_when(has_async_modifier),
        )
        .rule(
            "constructor_declaration",
            NodeRule::new(SymbolKind::Method, &["name"]).signature(&["parameter_list"]),
        )
        .rule(
            "property_declaration",
            NodeRule::new(SymbolKind::Other("property".to_string()), &["name"]),
        )
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}
