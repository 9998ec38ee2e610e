//! Python: functions, classes, decorated definitions and docstrings

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::{DocStrategy, LanguageSpec, NodeRule, has_async_token};
use tree_sitter::{Language, Node};

fn grammar(_path: &str) -> Language {
    tree_sitter_python::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("python", &[".py", ".pyi"], grammar)
        .rule(
            "function_definition",
            NodeRule::new(SymbolKind::Function, &["identifier"])
                .signature(&["parameters"])
                .async_when(has_async_token)
                .doc(DocStrategy::BodyDocstring),
        )
        .rule(
            "class_definition",
            NodeRule::new(SymbolKind::Class, &["identifier"])
                .body(&["block"])
                .doc(DocStrategy::BodyDocstring),
        )
        .override_node("decorated_definition", decorated_definition)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

/// The wrapped definition, starting at its first decorator
fn decorated_definition(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let definition = node.child_by_field_name("definition")?;
    let mut symbol = walker.symbol_for(definition)?;
    symbol.lines = walker.widened_range(node, &symbol);
    Some(symbol)
}
