//! C: functions, named struct/union/enum definitions and typedefs

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

/// Function names sit under one or more pointer declarators for
/// pointer-returning functions
pub(crate) const FUNCTION_NAME_PATHS: &[&str] = &[
    "function_declarator/identifier",
    "pointer_declarator/function_declarator/identifier",
    "pointer_declarator/pointer_declarator/function_declarator/identifier",
    "declarator/identifier",
];

pub(crate) const FUNCTION_SIGNATURE_PATHS: &[&str] = &[
    "function_declarator/parameter_list",
    "pointer_declarator/function_declarator/parameter_list",
    "pointer_declarator/pointer_declarator/function_declarator/parameter_list",
];

fn grammar(_path: &str) -> Language {
    tree_sitter_c::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("c", &[".c", ".h"], grammar)
        .rule(
            "function_definition",
            NodeRule::new(SymbolKind::Function, FUNCTION_NAME_PATHS)
                .signature(FUNCTION_SIGNATURE_PATHS),
        )
        .override_node("struct_specifier", tagged_definition)
        .override_node("union_specifier", tagged_definition)
        .override_node("enum_specifier", tagged_definition)
        .override_node("type_definition", type_definition)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// `struct Name { ... }`; anonymous definitions and bare references
/// (`struct Name *p`) are skipped
pub(crate) fn tagged_definition(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    node.child_by_field_name("body")?;
    let name = walker.name(node, &["type_identifier"])?;
    let kind = match node.kind() {
        "enum_specifier" => SymbolKind::Enum,
        _ => SymbolKind::Struct,
    };
    Some(
        Symbol::new(name, kind, walker.base.line_range(&node))
            .with_docstring(walker.preceding_comment(node)),
    )
}

/// The alias a typedef introduces: its last direct identifier, or the
/// innermost one under a function-pointer declarator
pub(crate) fn type_definition(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let mut cursor = node.walk();
    let direct = node
        .children(&mut cursor)
        .filter(|c| matches!(c.kind(), "type_identifier" | "identifier"))
        .last();
    let name_node = direct.or_else(|| {
        node.child_by_field_name("declarator")
            .and_then(innermost_identifier)
    })?;

    let name = walker.base.get_node_text(&name_node);
    if name.trim().is_empty() {
        return None;
    }
    Some(
        Symbol::new(name.trim(), SymbolKind::Typedef, walker.base.line_range(&node))
            .with_docstring(walker.preceding_comment(node)),
    )
}

fn innermost_identifier(node: Node<'_>) -> Option<Node<'_>> {
    if matches!(node.kind(), "type_identifier" | "identifier") {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(innermost_identifier)
}
