//! YAML keys as a hierarchy, driven by indentation
//!
//! Kinds: `section` (mapping), `list` (followed by `- ` items), `item`
//! (`- key:` list entry), `collection` (inline `[..]`/`{..}`), `multiline`
//! (`|`/`>` block scalar) and `key` for plain scalars. Scalar values become
//! the symbol's doc excerpt.

use crate::base::{ExtractError, LineRange, Symbol, SymbolKind};
use crate::engine::SymbolExtractor;
use crate::languages::markdown::close_top;
use regex::Regex;
use std::sync::LazyLock;

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\s*)([\w\-]+|"[^"]+"|'[^']+')\s*:"#).unwrap());
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)-\s+(\w[\w\-]*)\s*:").unwrap());

const MAX_VALUE_PREVIEW: usize = 100;

struct Key {
    indent: usize,
    name: String,
    line: usize,
    list_item: bool,
    /// Byte offset just past the key's separating colon
    value_start: usize,
}

#[derive(Default)]
pub struct YamlExtractor;

impl YamlExtractor {
    pub fn new() -> Self {
        Self
    }

    fn keys(lines: &[&str]) -> Vec<Key> {
        let mut keys = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            let stripped = line.trim_start();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }

            if let Some(caps) = LIST_ITEM_RE.captures(line) {
                keys.push(Key {
                    // sits between its dash and the keys nested under it
                    indent: caps[1].len() + 1,
                    name: caps[2].to_string(),
                    line: idx + 1,
                    list_item: true,
                    value_start: caps.get(0).map_or(line.len(), |m| m.end()),
                });
            } else if let Some(caps) = KEY_RE.captures(line) {
                keys.push(Key {
                    indent: caps[1].len(),
                    name: caps[2].trim_matches(|c| c == '"' || c == '\'').to_string(),
                    line: idx + 1,
                    list_item: false,
                    value_start: caps.get(0).map_or(line.len(), |m| m.end()),
                });
            }
        }
        keys
    }

    fn kind(lines: &[&str], key: &Key) -> SymbolKind {
        if key.list_item {
            return SymbolKind::Item;
        }
        let value = Self::value(lines, key);
        if value.is_empty() {
            let next_is_item = lines
                .get(key.line)
                .is_some_and(|next| next.trim_start().starts_with('-'));
            return if next_is_item {
                SymbolKind::List
            } else {
                SymbolKind::Section
            };
        }
        if value.starts_with('[') || value.starts_with('{') {
            SymbolKind::Collection
        } else if value.starts_with('|') || value.starts_with('>') {
            SymbolKind::Multiline
        } else {
            SymbolKind::Key
        }
    }

    /// Text after the key's own colon; colons inside a quoted key are skipped
    fn value<'l>(lines: &[&'l str], key: &Key) -> &'l str {
        let line = lines[key.line - 1];
        line.get(key.value_start..).unwrap_or_default().trim()
    }

    fn value_preview(value: &str) -> Option<String> {
        if value.is_empty() || matches!(value, "|" | ">" | "|-" | ">-") {
            return None;
        }
        match value.char_indices().nth(MAX_VALUE_PREVIEW) {
            Some((idx, _)) => Some(format!("{}...", &value[..idx])),
            None => Some(value.to_string()),
        }
    }
}

impl SymbolExtractor for YamlExtractor {
    fn language(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".yaml", ".yml"]
    }

    fn extract(&self, source: &str, _file_path: &str) -> Result<Vec<Symbol>, ExtractError> {
        let lines: Vec<&str> = source.lines().collect();
        let keys = Self::keys(&lines);

        let mut roots = Vec::new();
        let mut stack: Vec<(usize, Symbol)> = Vec::new();

        for (i, key) in keys.iter().enumerate() {
            let end = keys[i + 1..]
                .iter()
                .find(|next| next.indent <= key.indent)
                .map(|next| next.line - 1)
                .unwrap_or(lines.len());

            let symbol = Symbol::new(
                key.name.clone(),
                Self::kind(&lines, key),
                LineRange::new(key.line, end),
            )
            .with_docstring(Self::value_preview(Self::value(&lines, key)));

            while stack.last().is_some_and(|(indent, _)| *indent >= key.indent) {
                close_top(&mut stack, &mut roots);
            }
            stack.push((key.indent, symbol));
        }

        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }
        Ok(roots)
    }
}
