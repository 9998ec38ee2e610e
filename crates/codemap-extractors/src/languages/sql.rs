//! SQL DDL: tables with their columns, views, indexes, functions, triggers,
//! types, sequences, schemas and databases

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{LanguageSpec, NodeRule};
use tree_sitter::{Language, Node};

/// Schema-qualified names resolve to the object, not the schema
const OBJECT_NAME_PATHS: &[&str] = &["object_reference/name", "object_reference/identifier"];
const DIRECT_NAME_PATHS: &[&str] = &["identifier"];

fn grammar(_path: &str) -> Language {
    tree_sitter_sequel::LANGUAGE.into()
}

fn other(kind: &str) -> SymbolKind {
    SymbolKind::Other(kind.to_string())
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("sql", &[".sql"], grammar)
        .rule(
            "create_table",
            NodeRule::new(other("table"), OBJECT_NAME_PATHS)
                .body(&["column_definitions"])
                .keep_member_kinds(),
        )
        .rule("create_view", NodeRule::new(other("view"), OBJECT_NAME_PATHS))
        .rule(
            "create_materialized_view",
            NodeRule::new(other("materialized_view"), OBJECT_NAME_PATHS),
        )
        .rule("create_index", NodeRule::new(other("index"), DIRECT_NAME_PATHS))
        .rule("create_trigger", NodeRule::new(other("trigger"), OBJECT_NAME_PATHS))
        .rule("create_type", NodeRule::new(SymbolKind::Type, OBJECT_NAME_PATHS))
        .rule("create_sequence", NodeRule::new(other("sequence"), OBJECT_NAME_PATHS))
        .rule("create_schema", NodeRule::new(other("schema"), DIRECT_NAME_PATHS))
        .rule("create_database", NodeRule::new(other("database"), DIRECT_NAME_PATHS))
        .override_node("create_function", create_function)
        .override_node("column_definition", column_definition)
        .comments(&["comment", "marginalia"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// Arguments plus the declared return type: `(a INT, b INT) -> INT`
fn create_function(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let name = walker.name(node, OBJECT_NAME_PATHS)?;

    let mut signature = walker
        .base
        .find_child(&node, "function_arguments")
        .map(|args| collapse(&walker.base.get_node_text(&args)))
        .unwrap_or_else(|| "()".to_string());
    if let Some(returns) = return_type(walker, node) {
        signature.push_str(" -> ");
        signature.push_str(&returns);
    }

    Some(
        Symbol::new(name, SymbolKind::Function, walker.base.line_range(&node))
            .with_signature(Some(signature).filter(|s| s != "()"))
            .with_docstring(walker.preceding_comment(node)),
    )
}

/// The node right after `RETURNS`; built-in types are upper-cased
fn return_type(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<String> {
    let mut cursor = node.walk();
    let ty = node
        .children(&mut cursor)
        .skip_while(|c| c.kind() != "keyword_returns")
        .nth(1)?;
    let text = collapse(&walker.base.get_node_text(&ty));
    match ty.kind() {
        "identifier" | "object_reference" => Some(text),
        _ => Some(text.to_uppercase()),
    }
}

/// Columns only count inside a table body
fn column_definition(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    if node.parent()?.kind() != "column_definitions" {
        return None;
    }
    let name = walker.name(node, &["name", "identifier"])?;
    Some(
        Symbol::new(name, other("column"), walker.base.line_range(&node))
            .with_docstring(walker.preceding_comment(node)),
    )
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
