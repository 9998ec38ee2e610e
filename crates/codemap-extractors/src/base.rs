// Base types for codemap symbol extraction
//
// Every extractor, tree-sitter driven or line oriented, produces the same
// Symbol tree. The JSON form of these types is what lands in the shard files.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tree_sitter::Node;

/// Signatures longer than this are cut and suffixed with "..."
pub const MAX_SIGNATURE_LEN: usize = 100;
/// Doc excerpts are trimmed and cut to this many characters
pub const MAX_DOCSTRING_LEN: usize = 150;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("syntax error in {path}: {message}")]
    Syntax { path: String, message: String },
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

/// Symbol kinds, an open set
///
/// Serialized as a bare lowercase string so unknown kinds written by other
/// tools survive a load/save cycle as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SymbolKind {
    Class,
    Struct,
    Interface,
    Trait,
    Impl,
    Enum,
    Type,
    Typedef,
    Function,
    Method,
    AsyncFunction,
    AsyncMethod,
    Module,
    Namespace,
    Section,
    Subsection,
    Subsubsection,
    Key,
    List,
    Item,
    Collection,
    Multiline,
    Other(String),
}

impl SymbolKind {
    pub fn as_str(&self) -> &str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Interface => "interface",
            SymbolKind::Trait => "trait",
            SymbolKind::Impl => "impl",
            SymbolKind::Enum => "enum",
            SymbolKind::Type => "type",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Function => "function",
            SymbolKind::Method => "method",
            SymbolKind::AsyncFunction => "async_function",
            SymbolKind::AsyncMethod => "async_method",
            SymbolKind::Module => "module",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Section => "section",
            SymbolKind::Subsection => "subsection",
            SymbolKind::Subsubsection => "subsubsection",
            SymbolKind::Key => "key",
            SymbolKind::List => "list",
            SymbolKind::Item => "item",
            SymbolKind::Collection => "collection",
            SymbolKind::Multiline => "multiline",
            SymbolKind::Other(s) => s,
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "class" => SymbolKind::Class,
            "struct" => SymbolKind::Struct,
            "interface" => SymbolKind::Interface,
            "trait" => SymbolKind::Trait,
            "impl" => SymbolKind::Impl,
            "enum" => SymbolKind::Enum,
            "type" => SymbolKind::Type,
            "typedef" => SymbolKind::Typedef,
            "function" => SymbolKind::Function,
            "method" => SymbolKind::Method,
            "async_function" => SymbolKind::AsyncFunction,
            "async_method" => SymbolKind::AsyncMethod,
            "module" => SymbolKind::Module,
            "namespace" => SymbolKind::Namespace,
            "section" => SymbolKind::Section,
            "subsection" => SymbolKind::Subsection,
            "subsubsection" => SymbolKind::Subsubsection,
            "key" => SymbolKind::Key,
            "list" => SymbolKind::List,
            "item" => SymbolKind::Item,
            "collection" => SymbolKind::Collection,
            "multiline" => SymbolKind::Multiline,
            other => SymbolKind::Other(other.to_string()),
        }
    }

    /// The async variant of this kind (`function` -> `async_function`)
    pub fn to_async(&self) -> Self {
        match self {
            SymbolKind::Function => SymbolKind::AsyncFunction,
            SymbolKind::Method => SymbolKind::AsyncMethod,
            SymbolKind::AsyncFunction | SymbolKind::AsyncMethod => self.clone(),
            other => SymbolKind::Other(format!("async_{}", other.as_str())),
        }
    }
}

impl From<String> for SymbolKind {
    fn from(s: String) -> Self {
        SymbolKind::from_string(&s)
    }
}

impl From<SymbolKind> for String {
    fn from(kind: SymbolKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive 1-indexed line range, persisted as `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<[usize; 2]> for LineRange {
    fn from(pair: [usize; 2]) -> Self {
        LineRange::new(pair[0], pair[1])
    }
}

impl From<LineRange> for [usize; 2] {
    fn from(range: LineRange) -> Self {
        [range.start, range.end]
    }
}

/// One structural element of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub lines: LineRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, lines: LineRange) -> Self {
        Self {
            name: name.into(),
            kind,
            lines,
            signature: None,
            docstring: None,
            children: Vec::new(),
        }
    }

    pub fn with_signature(mut self, signature: Option<String>) -> Self {
        self.signature = signature
            .filter(|s| !s.is_empty())
            .map(|s| truncate_signature(&s));
        self
    }

    pub fn with_docstring(mut self, docstring: Option<String>) -> Self {
        self.docstring = docstring.and_then(|d| truncate_docstring(&d, MAX_DOCSTRING_LEN));
        self
    }

    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    /// A function collected from a type body is a method
    pub fn retag_as_member(mut self) -> Self {
        self.kind = match self.kind {
            SymbolKind::Function => SymbolKind::Method,
            SymbolKind::AsyncFunction => SymbolKind::AsyncMethod,
            other => other,
        };
        self
    }

    /// Number of symbols in this tree, self included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Symbol::count).sum::<usize>()
    }

    /// Re-applies a tighter doc excerpt limit to the whole tree
    pub fn limit_docstrings(&mut self, max_len: usize) {
        if let Some(doc) = self.docstring.take() {
            self.docstring = truncate_docstring(&doc, max_len);
        }
        for child in &mut self.children {
            child.limit_docstrings(max_len);
        }
    }
}

/// Counts every node of every tree in `symbols`
pub fn count_symbols(symbols: &[Symbol]) -> usize {
    symbols.iter().map(Symbol::count).sum()
}

fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn truncate_signature(signature: &str) -> String {
    if signature.chars().count() <= MAX_SIGNATURE_LEN {
        signature.to_string()
    } else {
        format!("{}...", take_chars(signature, MAX_SIGNATURE_LEN - 3))
    }
}

/// Trims and cuts a doc excerpt; empty excerpts become `None`
pub fn truncate_docstring(doc: &str, max_len: usize) -> Option<String> {
    let trimmed = doc.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(take_chars(trimmed, max_len).trim_end().to_string())
}

/// Shared node helpers for the tree-sitter extractors
pub struct BaseExtractor<'a> {
    pub source: &'a [u8],
}

impl<'a> BaseExtractor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
        }
    }

    pub fn get_node_text(&self, node: &Node) -> String {
        String::from_utf8_lossy(&self.source[node.start_byte()..node.end_byte()]).into_owned()
    }

    pub fn line_range(&self, node: &Node) -> LineRange {
        LineRange::new(node.start_position().row + 1, node.end_position().row + 1)
    }

    /// Resolves one path segment: a child node type, falling back to a field name
    pub fn find_child<'t>(&self, node: &Node<'t>, segment: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let by_kind = node.children(&mut cursor).find(|c| c.kind() == segment);
        by_kind.or_else(|| node.child_by_field_name(segment))
    }

    /// Follows a slash separated path such as `function_declarator/identifier`
    pub fn find_path<'t>(&self, node: &Node<'t>, path: &str) -> Option<Node<'t>> {
        path.split('/')
            .try_fold(*node, |current, segment| self.find_child(&current, segment))
    }

    /// First path in `paths` that resolves
    pub fn find_first_path<'t>(&self, node: &Node<'t>, paths: &[&str]) -> Option<Node<'t>> {
        paths.iter().find_map(|p| self.find_path(node, p))
    }

    pub fn has_child_kind(node: &Node, kind: &str) -> bool {
        let mut cursor = node.walk();
        node.children(&mut cursor).any(|c| c.kind() == kind)
    }
}

/// Strips comment syntax from a raw comment node text
pub fn clean_comment(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let lines: Vec<String> = if raw.starts_with("/*") {
        let inner = raw
            .trim_start_matches("/**")
            .trim_start_matches("/*!")
            .trim_start_matches("/*")
            .trim_end_matches("*/");
        inner
            .lines()
            .map(|l| l.trim().trim_start_matches('*').trim().to_string())
            .filter(|l| !l.is_empty() && !l.starts_with('@'))
            .collect()
    } else {
        raw.lines()
            .map(|l| strip_line_comment(l.trim()).to_string())
            .filter(|l| !l.is_empty())
            .collect()
    };

    if lines.is_empty() {
        None
    } else {
        truncate_docstring(&lines.join(" "), MAX_DOCSTRING_LEN)
    }
}

fn strip_line_comment(line: &str) -> &str {
    for prefix in ["///", "//!", "//", "--", "#"] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return rest.trim();
        }
    }
    line
}

/// Python style docstring literal: quotes and string prefixes removed,
/// first paragraph kept, whitespace collapsed
pub fn clean_docstring_literal(raw: &str) -> Option<String> {
    let unprefixed = raw.trim_start_matches(|c: char| "rRbBuUfF".contains(c));
    let mut body = unprefixed;
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if body.starts_with(quote) && body.ends_with(quote) && body.len() >= 2 * quote.len() {
            body = &body[quote.len()..body.len() - quote.len()];
            break;
        }
    }

    let paragraph = body
        .trim()
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    truncate_docstring(&paragraph, MAX_DOCSTRING_LEN)
}
