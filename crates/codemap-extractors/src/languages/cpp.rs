//! C++: namespaces, classes, templates and (member) functions

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::languages::c::{tagged_definition, type_definition};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

const FUNCTION_NAME_PATHS: &[&str] = &[
    "function_declarator/identifier",
    "function_declarator/field_identifier",
    "function_declarator/qualified_identifier",
    "function_declarator/destructor_name",
    "function_declarator/operator_name",
    "pointer_declarator/function_declarator/identifier",
    "pointer_declarator/function_declarator/field_identifier",
    "pointer_declarator/function_declarator/qualified_identifier",
    "reference_declarator/function_declarator/identifier",
    "reference_declarator/function_declarator/field_identifier",
    "reference_declarator/function_declarator/qualified_identifier",
];

const FUNCTION_SIGNATURE_PATHS: &[&str] = &[
    "function_declarator/parameter_list",
    "pointer_declarator/function_declarator/parameter_list",
    "reference_declarator/function_declarator/parameter_list",
];

fn grammar(_path: &str) -> Language {
    tree_sitter_cpp::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new(
        "cpp",
        &[".cpp", ".hpp", ".cc", ".hh", ".cxx", ".hxx"],
        grammar,
    )
    .rule(
        "function_definition",
        NodeRule::new(SymbolKind::Function, FUNCTION_NAME_PATHS)
            .signature(FUNCTION_SIGNATURE_PATHS),
    )
    .rule(
        "class_specifier",
        NodeRule::new(SymbolKind::Class, &["type_identifier"]).body(&["field_declaration_list"]),
    )
    .rule(
        "struct_specifier",
        NodeRule::new(SymbolKind::Struct, &["type_identifier"]).body(&["field_declaration_list"]),
    )
    .rule(
        "namespace_definition",
        NodeRule::new(SymbolKind::Namespace, &["namespace_identifier", "nested_namespace_specifier"])
            .body(&["declaration_list"])
            .keep_member_kinds(),
    )
    .override_node("class_specifier", record_definition)
    .override_node("struct_specifier", record_definition)
    .override_node("union_specifier", tagged_definition)
    .override_node("enum_specifier", tagged_definition)
    .override_node("type_definition", type_definition)
    .override_node("field_declaration", method_declaration)
    .override_node("template_declaration", template_declaration)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// Classes and structs with a body; forward declarations are skipped
fn record_definition(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    node.child_by_field_name("body")?;
    let rule = walker.spec.rules.get(node.kind())?;
    walker.apply_rule(node, rule)
}

/// `void run();` inside a class body
fn method_declaration(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let declarator = node
        .child_by_field_name("declarator")
        .filter(|d| d.kind() == "function_declarator")?;
    let name = walker.name(declarator, &["field_identifier", "identifier", "destructor_name", "operator_name"])?;
    let signature = walker.signature(declarator, &["parameter_list"]);

    Some(
        Symbol::new(name, SymbolKind::Method, walker.base.line_range(&node))
            .with_signature(signature)
            .with_docstring(walker.preceding_comment(node)),
    )
}

/// `template <...> class X` becomes `template_class`, and so on
fn template_declaration(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let mut cursor = node.walk();
    let inner = node.named_children(&mut cursor).find(|c| {
        matches!(
            c.kind(),
            "class_specifier" | "struct_specifier" | "function_definition"
        )
    })?;

    let mut symbol = walker.symbol_for(inner)?;
    symbol.kind = SymbolKind::Other(format!("template_{}", symbol.kind));
    symbol.lines = walker.widened_range(node, &symbol);
    if symbol.docstring.is_none() {
        symbol.docstring = walker.preceding_comment(node);
    }
    Some(symbol)
}
