//! Generic rule interpreter
//!
//! Walks a concrete syntax tree depth first. A node whose type has a rule
//! becomes a symbol and only its body is walked further; a node without a
//! rule is transparent and all of its children are visited. Override
//! handlers are consulted before the rule table. A mapped node listed in
//! the spec's `fallthrough` set turns transparent when it yields nothing.

use crate::base::{
    BaseExtractor, ExtractError, LineRange, Symbol, clean_comment, clean_docstring_literal,
};
use crate::rules::{DocStrategy, LanguageSpec, NodeRule};
use tree_sitter::{Node, Parser};
use tracing::debug;

/// Extraction contract shared by every language
pub trait SymbolExtractor: Send + Sync {
    fn language(&self) -> &'static str;

    fn extensions(&self) -> &'static [&'static str];

    /// Root-level symbols of `source`, children nested in source order
    fn extract(&self, source: &str, file_path: &str) -> Result<Vec<Symbol>, ExtractError>;
}

/// Tree-sitter extractor driven entirely by a [`LanguageSpec`]
pub struct TreeSitterExtractor {
    spec: LanguageSpec,
}

impl TreeSitterExtractor {
    pub fn new(spec: LanguageSpec) -> Self {
        Self { spec }
    }
}

impl SymbolExtractor for TreeSitterExtractor {
    fn language(&self) -> &'static str {
        self.spec.name
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.spec.extensions
    }

    fn extract(&self, source: &str, file_path: &str) -> Result<Vec<Symbol>, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&(self.spec.grammar)(file_path))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::Syntax {
                path: file_path.to_string(),
                message: "parser produced no tree".to_string(),
            })?;

        let root = tree.root_node();
        let walker = TreeWalker::new(&self.spec, source);
        let symbols = walker.collect(root);

        if root.has_error() {
            if symbols.is_empty() && !source.trim().is_empty() {
                let position = first_error(root)
                    .map(|n| n.start_position().row + 1)
                    .unwrap_or(1);
                return Err(ExtractError::Syntax {
                    path: file_path.to_string(),
                    message: format!("invalid syntax near line {}", position),
                });
            }
            debug!(
                "Partial {} tree for {}, kept {} symbols",
                self.spec.name,
                file_path,
                symbols.len()
            );
        }

        Ok(symbols)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

/// One traversal over one tree
pub struct TreeWalker<'a> {
    pub spec: &'a LanguageSpec,
    pub base: BaseExtractor<'a>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(spec: &'a LanguageSpec, source: &'a str) -> Self {
        Self {
            spec,
            base: BaseExtractor::new(source),
        }
    }

    /// Symbols for `node` and everything below it
    pub fn collect(&self, node: Node<'_>) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        self.visit(node, &mut symbols);
        symbols
    }

    /// Symbols found below `body`, functions re-tagged as members when asked
    pub fn collect_members(&self, body: Node<'_>, retag: bool) -> Vec<Symbol> {
        let mut members = Vec::new();
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            self.visit(child, &mut members);
        }
        if retag {
            members.into_iter().map(Symbol::retag_as_member).collect()
        } else {
            members
        }
    }

    fn visit(&self, node: Node<'_>, out: &mut Vec<Symbol>) {
        let kind = node.kind();
        if self.spec.overrides.contains_key(kind) || self.spec.rules.contains_key(kind) {
            match self.symbol_for(node) {
                Some(symbol) => out.push(symbol),
                None if self.spec.fallthrough.contains(&kind) => self.visit_children(node, out),
                None => {}
            }
            return;
        }
        self.visit_children(node, out);
    }

    fn visit_children(&self, node: Node<'_>, out: &mut Vec<Symbol>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, out);
        }
    }

    /// The symbol a single mapped node produces, override first
    pub fn symbol_for(&self, node: Node<'_>) -> Option<Symbol> {
        if let Some(handler) = self.spec.overrides.get(node.kind()) {
            return handler(self, node);
        }
        let rule = self.spec.rules.get(node.kind())?;
        self.apply_rule(node, rule)
    }

    /// Name, then signature, then doc, then body
    pub fn apply_rule(&self, node: Node<'_>, rule: &NodeRule) -> Option<Symbol> {
        let name = self.name(node, rule.name_paths)?;

        let kind = match rule.is_async {
            Some(predicate) if predicate(&node) => rule.kind.to_async(),
            _ => rule.kind.clone(),
        };

        let children = rule
            .body_paths
            .iter()
            .find_map(|path| self.base.find_path(&node, path))
            .map(|body| self.collect_members(body, rule.retag_children))
            .unwrap_or_default();

        Some(
            Symbol::new(name, kind, self.base.line_range(&node))
                .with_signature(self.signature(node, rule.signature_paths))
                .with_docstring(self.doc(node, rule.doc))
                .with_children(children),
        )
    }

    /// Text of the first name path that resolves to non-empty text
    pub fn name(&self, node: Node<'_>, paths: &[&str]) -> Option<String> {
        paths
            .iter()
            .filter_map(|path| self.base.find_path(&node, path))
            .map(|n| self.base.get_node_text(&n).trim().to_string())
            .find(|text| !text.is_empty())
    }

    /// Parameter text plus the return type when the grammar exposes one
    pub fn signature(&self, node: Node<'_>, paths: &[&str]) -> Option<String> {
        let params = self.base.find_first_path(&node, paths)?;
        let mut signature = collapse_whitespace(&self.base.get_node_text(&params));

        let return_type = node
            .child_by_field_name("return_type")
            .or_else(|| node.child_by_field_name("result"))
            .filter(|r| r.start_byte() >= params.end_byte());
        if let Some(ret) = return_type {
            let text = collapse_whitespace(&self.base.get_node_text(&ret));
            if text.starts_with(':') {
                signature.push_str(&text);
            } else if node.child_by_field_name("return_type").is_some() {
                signature.push_str(" -> ");
                signature.push_str(&text);
            } else {
                signature.push(' ');
                signature.push_str(&text);
            }
        }

        Some(signature)
    }

    pub fn doc(&self, node: Node<'_>, strategy: DocStrategy) -> Option<String> {
        match strategy {
            DocStrategy::PrecedingComment => self.preceding_comment(node),
            DocStrategy::BodyDocstring => self.body_docstring(node),
            DocStrategy::None => None,
        }
    }

    /// Comment block directly above `node`
    ///
    /// Consecutive line comments are joined; a blank line ends the block.
    /// When `node` is the first named child of a transparent wrapper (an
    /// export statement, a Go type declaration) the wrapper's predecessor is
    /// used instead.
    pub fn preceding_comment(&self, node: Node<'_>) -> Option<String> {
        let mut anchor = node;
        if anchor.prev_named_sibling().is_none() {
            if let Some(parent) = anchor.parent() {
                if !self.spec.rules.contains_key(parent.kind()) {
                    anchor = parent;
                }
            }
        }

        let mut boundary = anchor.start_position().row;
        let mut current = anchor.prev_named_sibling();
        let mut parts: Vec<String> = Vec::new();

        while let Some(sibling) = current {
            if parts.is_empty() && self.spec.doc_skip.contains(&sibling.kind()) {
                boundary = sibling.start_position().row;
                current = sibling.prev_named_sibling();
                continue;
            }
            if !self.spec.is_comment(sibling.kind()) || sibling.end_position().row + 1 < boundary {
                break;
            }

            let text = self.base.get_node_text(&sibling);
            let is_block = text.trim_start().starts_with("/*");
            if is_block && !parts.is_empty() {
                break;
            }
            parts.push(text);
            boundary = sibling.start_position().row;
            if is_block {
                break;
            }
            current = sibling.prev_named_sibling();
        }

        if parts.is_empty() {
            return None;
        }
        parts.reverse();
        clean_comment(&parts.join("\n"))
    }

    /// Leading string statement of the `body` field
    pub fn body_docstring(&self, node: Node<'_>) -> Option<String> {
        let body = node.child_by_field_name("body")?;
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|c| !self.spec.is_comment(c.kind()))?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let literal = first.named_child(0).filter(|n| n.kind() == "string")?;
        clean_docstring_literal(&self.base.get_node_text(&literal))
    }

    /// Line range of `node` with the start widened to `start_node`
    pub fn widened_range(&self, start_node: Node<'_>, symbol: &Symbol) -> LineRange {
        LineRange::new(start_node.start_position().row + 1, symbol.lines.end)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
