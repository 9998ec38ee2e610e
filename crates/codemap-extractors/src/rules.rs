//! Declarative node rules
//!
//! A language is described by a table mapping tree-sitter node types to
//! [`NodeRule`]s plus a small override table for node types the table cannot
//! express. The generic interpreter in [`crate::engine`] reads these tables.

use crate::base::{Symbol, SymbolKind};
use crate::engine::TreeWalker;
use std::collections::HashMap;
use tree_sitter::{Language, Node};

/// Reclassifies a kind as its async variant when it returns true
pub type AsyncPredicate = fn(&Node) -> bool;

/// Replaces the generic node-to-symbol conversion for one node type
pub type OverrideFn = fn(&TreeWalker<'_>, Node<'_>) -> Option<Symbol>;

/// Picks the grammar for a file; most languages ignore the path
pub type GrammarFn = fn(&str) -> Language;

/// Where a symbol's documentation excerpt comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocStrategy {
    /// Comment node(s) immediately above the declaration
    #[default]
    PrecedingComment,
    /// First string statement of the `body` field (Python)
    BodyDocstring,
    None,
}

#[derive(Clone)]
pub struct NodeRule {
    pub kind: SymbolKind,
    /// Candidate paths to the name node, first match wins
    pub name_paths: &'static [&'static str],
    pub signature_paths: &'static [&'static str],
    /// Candidate body nodes; only the first one present is walked
    pub body_paths: &'static [&'static str],
    pub is_async: Option<AsyncPredicate>,
    pub doc: DocStrategy,
    /// Whether functions found in the body become methods
    pub retag_children: bool,
}

impl NodeRule {
    pub fn new(kind: SymbolKind, name_paths: &'static [&'static str]) -> Self {
        Self {
            kind,
            name_paths,
            signature_paths: &[],
            body_paths: &[],
            is_async: None,
            doc: DocStrategy::default(),
            retag_children: true,
        }
    }

    pub fn signature(mut self, paths: &'static [&'static str]) -> Self {
        self.signature_paths = paths;
        self
    }

    pub fn body(mut self, paths: &'static [&'static str]) -> Self {
        self.body_paths = paths;
        self
    }

    pub fn async_when(mut self, predicate: AsyncPredicate) -> Self {
        self.is_async = Some(predicate);
        self
    }

    pub fn doc(mut self, strategy: DocStrategy) -> Self {
        self.doc = strategy;
        self
    }

    /// Namespaces and modules keep the kinds of their members
    pub fn keep_member_kinds(mut self) -> Self {
        self.retag_children = false;
        self
    }
}

/// Everything the generic engine needs to know about one language
pub struct LanguageSpec {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub grammar: GrammarFn,
    pub rules: HashMap<&'static str, NodeRule>,
    pub overrides: HashMap<&'static str, OverrideFn>,
    pub comment_types: &'static [&'static str],
    /// Nodes allowed between a doc comment and its declaration (attributes)
    pub doc_skip: &'static [&'static str],
    /// Mapped nodes that are walked like unmapped ones when they yield no symbol
    pub fallthrough: &'static [&'static str],
}

impl LanguageSpec {
    pub fn new(name: &'static str, extensions: &'static [&'static str], grammar: GrammarFn) -> Self {
        Self {
            name,
            extensions,
            grammar,
            rules: HashMap::new(),
            overrides: HashMap::new(),
            comment_types: &["comment"],
            doc_skip: &[],
            fallthrough: &[],
        }
    }

    pub fn rule(mut self, node_type: &'static str, rule: NodeRule) -> Self {
        self.rules.insert(node_type, rule);
        self
    }

    pub fn override_node(mut self, node_type: &'static str, handler: OverrideFn) -> Self {
        self.overrides.insert(node_type, handler);
        self
    }

    pub fn comments(mut self, types: &'static [&'static str]) -> Self {
        self.comment_types = types;
        self
    }

    pub fn doc_skip(mut self, types: &'static [&'static str]) -> Self {
        self.doc_skip = types;
        self
    }

    pub fn fallthrough(mut self, types: &'static [&'static str]) -> Self {
        self.fallthrough = types;
        self
    }

    pub fn is_comment(&self, kind: &str) -> bool {
        self.comment_types.contains(&kind)
    }
}

/// Async when the node has a direct `async` token child
pub fn has_async_token(node: &Node) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == "async")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python(_: &str) -> Language {
        tree_sitter_python::LANGUAGE.into()
    }

    #[test]
    fn test_rule_builder_defaults() {
        let rule = NodeRule::new(SymbolKind::Function, &["identifier"]);
        assert_eq!(rule.doc, DocStrategy::PrecedingComment);
        assert!(rule.retag_children);
        assert!(rule.body_paths.is_empty());
        assert!(rule.is_async.is_none());

        let module = NodeRule::new(SymbolKind::Module, &["identifier"])
            .body(&["declaration_list"])
            .keep_member_kinds();
        assert!(!module.retag_children);
        assert_eq!(module.body_paths, &["declaration_list"]);
    }

    #[test]
    fn test_language_spec_tables() {
        let spec = LanguageSpec::new("python", &[".py"], python)
            .rule("class_definition", NodeRule::new(SymbolKind::Class, &["identifier"]))
            .comments(&["comment"]);

        assert!(spec.rules.contains_key("class_definition"));
        assert!(spec.overrides.is_empty());
        assert!(spec.fallthrough.is_empty());
        assert!(spec.is_comment("comment"));
        assert!(!spec.is_comment("string"));
    }
}
