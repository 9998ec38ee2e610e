//! CSS: rule sets, `@media` blocks, `@keyframes` and `@import`
//!
//! Selectors are typed by their first character: `#` id, `.` class, `:`
//! pseudo, anything else a plain selector. Media blocks nest the rule sets
//! they contain.

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::LanguageSpec;
use tree_sitter::{Language, Node};

/// Longest selector kept verbatim as a name
const MAX_SELECTOR_LEN: usize = 50;
/// Property names listed in a rule set signature
const SUMMARY_PROPERTIES: usize = 3;

fn grammar(_path: &str) -> Language {
    tree_sitter_css::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("css", &[".css"], grammar)
        .override_node("rule_set", rule_set)
        .override_node("media_statement", media_statement)
        .override_node("keyframes_statement", keyframes_statement)
        .override_node("import_statement", import_statement)
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

fn rule_set(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let selectors = walker.base.find_child(&node, "selectors")?;
    let selector = walker.base.get_node_text(&selectors);
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }

    Some(
        Symbol::new(selector_name(selector), selector_kind(selector), walker.base.line_range(&node))
            .with_signature(property_summary(walker, node))
            .with_docstring(walker.preceding_comment(node)),
    )
}

pub(crate) fn selector_kind(selector: &str) -> SymbolKind {
    match selector.chars().next() {
        Some('#') => SymbolKind::Other("id".to_string()),
        Some('.') => SymbolKind::Class,
        Some(':') => SymbolKind::Other("pseudo".to_string()),
        _ => SymbolKind::Other("selector".to_string()),
    }
}

/// First selector of a list, collapsed and cut to [`MAX_SELECTOR_LEN`]
pub(crate) fn selector_name(selector: &str) -> String {
    let first = selector.split(',').next().unwrap_or(selector);
    let first = first.split_whitespace().collect::<Vec<_>>().join(" ");
    if first.chars().count() <= MAX_SELECTOR_LEN {
        return first;
    }
    let cut: String = first.chars().take(MAX_SELECTOR_LEN - 3).collect();
    format!("{}...", cut)
}

/// `{color, margin}` or `{a, b, c, ...} (7 properties)`
fn property_summary(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<String> {
    let block = walker.base.find_child(&node, "block")?;
    let mut cursor = block.walk();
    let properties: Vec<String> = block
        .children(&mut cursor)
        .filter(|c| c.kind() == "declaration")
        .filter_map(|decl| walker.base.find_child(&decl, "property_name"))
        .map(|name| walker.base.get_node_text(&name))
        .collect();

    if properties.is_empty() {
        return None;
    }
    if properties.len() <= SUMMARY_PROPERTIES {
        Some(format!("{{{}}}", properties.join(", ")))
    } else {
        Some(format!(
            "{{{}, ...}} ({} properties)",
            properties[..SUMMARY_PROPERTIES].join(", "),
            properties.len()
        ))
    }
}

fn media_statement(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let block = walker.base.find_child(&node, "block");

    // Everything between the at-keyword and the block
    let mut cursor = node.walk();
    let query_nodes: Vec<Node<'_>> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "block" && c.kind() != "comment")
        .collect();
    let query = match (query_nodes.first(), query_nodes.last()) {
        (Some(first), Some(last)) => {
            let text = &walker.base.source[first.start_byte()..last.end_byte()];
            String::from_utf8_lossy(text)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        }
        _ => String::new(),
    };
    let query = if query.is_empty() { "all".to_string() } else { query };

    let children = block
        .map(|b| walker.collect_members(b, false))
        .unwrap_or_default();

    Some(
        Symbol::new(
            format!("@media {}", query),
            SymbolKind::Other("media".to_string()),
            walker.base.line_range(&node),
        )
        .with_docstring(walker.preceding_comment(node))
        .with_children(children),
    )
}

fn keyframes_statement(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let name = walker.name(node, &["keyframes_name"])?;
    Some(
        Symbol::new(
            format!("@keyframes {}", name),
            SymbolKind::Other("keyframe".to_string()),
            walker.base.line_range(&node),
        )
        .with_docstring(walker.preceding_comment(node)),
    )
}

fn import_statement(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let text = walker.base.get_node_text(&node);
    let target = import_target(&text);
    if target.is_empty() {
        return None;
    }
    Some(Symbol::new(
        format!("@import {}", target),
        SymbolKind::Other("import".to_string()),
        walker.base.line_range(&node),
    ))
}

/// The imported path from `@import "a.css";` or `@import url(a.css) screen;`
pub(crate) fn import_target(statement: &str) -> String {
    let rest = statement
        .trim()
        .trim_start_matches("@import")
        .trim()
        .trim_end_matches(';')
        .trim();

    let raw = if let Some(inner) = rest.strip_prefix("url(") {
        inner.split(')').next().unwrap_or_default()
    } else if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = &rest[1..];
        inner.split(quote).next().unwrap_or_default()
    } else {
        rest.split_whitespace().next().unwrap_or_default()
    };
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}
