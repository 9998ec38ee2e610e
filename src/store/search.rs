//! Symbol search over stored trees

use codemap_extractors::{LineRange, Symbol, SymbolKind};
use serde::Serialize;

/// One symbol hit, reported with the file that owns it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolMatch {
    pub file: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub lines: LineRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

impl SymbolMatch {
    fn from_symbol(file: &str, symbol: &Symbol) -> Self {
        Self {
            file: file.to_string(),
            name: symbol.name.clone(),
            kind: symbol.kind.clone(),
            lines: symbol.lines,
            signature: symbol.signature.clone(),
            docstring: symbol.docstring.clone(),
        }
    }
}

/// Case-insensitive substring search; parents and children match independently
pub fn search_symbols(
    file: &str,
    symbols: &[Symbol],
    query_lower: &str,
    kind_filter: Option<&SymbolKind>,
    out: &mut Vec<SymbolMatch>,
) {
    for symbol in symbols {
        let kind_ok = kind_filter.is_none_or(|k| *k == symbol.kind);
        if kind_ok && symbol.name.to_lowercase().contains(query_lower) {
            out.push(SymbolMatch::from_symbol(file, symbol));
        }
        search_symbols(file, &symbol.children, query_lower, kind_filter, out);
    }
}

/// Every symbol, at any depth, whose lines overlap `range`
pub fn symbols_overlapping(
    file: &str,
    symbols: &[Symbol],
    range: &LineRange,
    out: &mut Vec<SymbolMatch>,
) {
    for symbol in symbols {
        if symbol.lines.overlaps(range) {
            out.push(SymbolMatch::from_symbol(file, symbol));
            symbols_overlapping(file, &symbol.children, range, out);
        }
    }
}
