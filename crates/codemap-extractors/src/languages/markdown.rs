//! Markdown headings as a section tree
//!
//! `##`, `###` and `####` become section, subsection and subsubsection.
//! A heading ends on the line before the next heading of the same or a
//! higher level. `#` titles are ignored, as are headings inside fences.

use crate::base::{ExtractError, LineRange, MAX_DOCSTRING_LEN, Symbol, SymbolKind};
use crate::engine::SymbolExtractor;
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+?)\s*$").unwrap());

/// Lines scanned for the excerpt below a heading
const EXCERPT_WINDOW: usize = 10;

struct Heading {
    level: usize,
    line: usize,
    title: String,
}

#[derive(Default)]
pub struct MarkdownExtractor;

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self
    }

    fn headings(lines: &[&str]) -> Vec<Heading> {
        let mut headings = Vec::new();
        let mut in_fence = false;
        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(caps) = HEADING.captures(line) {
                headings.push(Heading {
                    level: caps[1].len(),
                    line: idx + 1,
                    title: caps[2].trim().to_string(),
                });
            }
        }
        headings
    }

    /// First paragraph under the heading at `start` (1-indexed)
    fn first_paragraph(lines: &[&str], start: usize, end: usize) -> Option<String> {
        let mut content: Vec<&str> = Vec::new();
        let mut length = 0;

        for line in lines
            .iter()
            .take(end.min(start + EXCERPT_WINDOW))
            .skip(start)
        {
            let line = line.trim();
            if line.is_empty() {
                if content.is_empty() {
                    continue;
                }
                break;
            }
            if line.starts_with("```") || line.starts_with('#') {
                break;
            }
            content.push(line);
            length += line.len();
            if length > MAX_DOCSTRING_LEN {
                break;
            }
        }

        if content.is_empty() {
            None
        } else {
            Some(content.join(" "))
        }
    }
}

fn kind_for_level(level: usize) -> SymbolKind {
    match level {
        3 => SymbolKind::Subsection,
        4 => SymbolKind::Subsubsection,
        _ => SymbolKind::Section,
    }
}

/// Moves the top of `stack` under its new top, or to the roots
pub(crate) fn close_top(stack: &mut Vec<(usize, Symbol)>, roots: &mut Vec<Symbol>) {
    if let Some((_, symbol)) = stack.pop() {
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(symbol),
            None => roots.push(symbol),
        }
    }
}

impl SymbolExtractor for MarkdownExtractor {
    fn language(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".md", ".markdown"]
    }

    fn extract(&self, source: &str, _file_path: &str) -> Result<Vec<Symbol>, ExtractError> {
        let lines: Vec<&str> = source.lines().collect();
        let total_lines = lines.len();
        let headings = Self::headings(&lines);

        let mut roots = Vec::new();
        let mut stack: Vec<(usize, Symbol)> = Vec::new();

        for (i, heading) in headings.iter().enumerate() {
            let end = headings[i + 1..]
                .iter()
                .find(|next| next.level <= heading.level)
                .map(|next| next.line - 1)
                .unwrap_or(total_lines);

            let symbol = Symbol::new(
                heading.title.clone(),
                kind_for_level(heading.level),
                LineRange::new(heading.line, end),
            )
            .with_docstring(Self::first_paragraph(&lines, heading.line, end));

            while stack
                .last()
                .is_some_and(|(level, _)| *level >= heading.level)
            {
                close_top(&mut stack, &mut roots);
            }
            stack.push((heading.level, symbol));
        }

        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }
        Ok(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_paragraph_stops_at_blank_line() {
        let lines = vec!["## Title", "", "First line", "second line", "", "Other"];
        let excerpt = MarkdownExtractor::first_paragraph(&lines, 1, 6);
        assert_eq!(excerpt.as_deref(), Some("First line second line"));
    }

    #[test]
    fn test_first_paragraph_skips_code_fence() {
        let lines = vec!["## Title", "```rust", "fn main() {}", "```"];
        assert_eq!(MarkdownExtractor::first_paragraph(&lines, 1, 4), None);
    }
}
