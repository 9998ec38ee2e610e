//! HTML: elements with an `id` and HTML5 landmark elements
//!
//! Anything else is transparent, so an indexed element nests the indexed
//! elements found anywhere below it.

use crate::base::{Symbol, SymbolKind};
use crate::engine::{TreeSitterExtractor, TreeWalker};
use crate::rules::LanguageSpec;
use std::collections::HashMap;
use tree_sitter::{Language, Node};

const SEMANTIC_ELEMENTS: &[&str] = &[
    "header", "nav", "main", "section", "article", "aside", "footer", "form",
];

/// Attributes shown in a signature after `id` and `class`, in this order
const SIGNATURE_ATTRIBUTES: &[&str] = &["name", "type", "href", "src", "action", "method"];

const MAX_ATTRIBUTE_LEN: usize = 30;

fn grammar(_path: &str) -> Language {
    tree_sitter_html::LANGUAGE.into()
}

pub fn spec() -> LanguageSpec {
    LanguageSpec::new("html", &[".html", ".htm"], grammar)
        .override_node("element", element)
        .fallthrough(&["element"])
}

pub fn extractor() -> TreeSitterExtractor {
    TreeSitterExtractor::new(spec())
}

fn element(walker: &TreeWalker<'_>, node: Node<'_>) -> Option<Symbol> {
    let tag = walker
        .base
        .find_child(&node, "start_tag")
        .or_else(|| walker.base.find_child(&node, "self_closing_tag"))?;
    let tag_name = walker.name(tag, &["tag_name"])?;
    let attrs = attributes(walker, tag);

    let (name, kind) = if let Some(id) = attrs.get("id").filter(|id| !id.is_empty()) {
        (format!("#{}", id), SymbolKind::Other("id".to_string()))
    } else if SEMANTIC_ELEMENTS.contains(&tag_name.to_ascii_lowercase().as_str()) {
        let name = match attrs.get("class").and_then(|c| c.split_whitespace().next()) {
            Some(class) => format!("<{}.{}>", tag_name, class),
            None => format!("<{}>", tag_name),
        };
        (name, SymbolKind::Other("element".to_string()))
    } else {
        return None;
    };

    Some(
        Symbol::new(name, kind, walker.base.line_range(&node))
            .with_signature(Some(signature(&tag_name, &attrs)))
            .with_children(walker.collect_members(node, false)),
    )
}

/// Attribute name to unquoted value; valueless attributes map to ""
fn attributes(walker: &TreeWalker<'_>, tag: Node<'_>) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut cursor = tag.walk();
    for attr in tag.children(&mut cursor).filter(|c| c.kind() == "attribute") {
        let Some(name) = walker.name(attr, &["attribute_name"]) else {
            continue;
        };
        let value = walker
            .base
            .find_first_path(&attr, &["attribute_value", "quoted_attribute_value/attribute_value"])
            .map(|v| walker.base.get_node_text(&v))
            .unwrap_or_default();
        attrs.insert(name, value);
    }
    attrs
}

/// `<form id="login" class="card" action="/session" method="post">`
pub(crate) fn signature(tag_name: &str, attrs: &HashMap<String, String>) -> String {
    let mut parts = vec![format!("<{}", tag_name)];
    for key in ["id", "class"] {
        if let Some(value) = attrs.get(key) {
            parts.push(format!("{}=\"{}\"", key, value));
        }
    }
    for key in SIGNATURE_ATTRIBUTES {
        if let Some(value) = attrs.get(*key) {
            let value = if value.chars().count() > MAX_ATTRIBUTE_LEN {
                let cut: String = value.chars().take(MAX_ATTRIBUTE_LEN - 3).collect();
                format!("{}...", cut)
            } else {
                value.clone()
            };
            parts.push(format!("{}=\"{}\"", key, value));
        }
    }
    format!("{}>", parts.join(" "))
}
