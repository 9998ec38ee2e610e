//! Line-range lookups of the form `path:45-89`

use crate::error::{CodemapError, Result};
use codemap_extractors::LineRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineQuery {
    pub path: String,
    pub range: LineRange,
}

/// Parses `path:start-end` or `path:line`
pub fn parse_line_query(spec: &str) -> Result<LineQuery> {
    let (path, range) = spec
        .rsplit_once(':')
        .ok_or_else(|| invalid(spec, "expected <path>:<start>-<end>"))?;
    if path.is_empty() {
        return Err(invalid(spec, "missing file path"));
    }
    Ok(LineQuery {
        path: path.to_string(),
        range: parse_line_range(range).map_err(|e| invalid(spec, &e))?,
    })
}

/// Parses `45-89` or `45`; lines are 1-indexed and the range must not be reversed
pub fn parse_line_range(text: &str) -> std::result::Result<LineRange, String> {
    let (start, end) = match text.split_once('-') {
        Some((start, end)) => (parse_line(start)?, parse_line(end)?),
        None => {
            let line = parse_line(text)?;
            (line, line)
        }
    };
    if start > end {
        return Err(format!("start line {} is after end line {}", start, end));
    }
    Ok(LineRange::new(start, end))
}

fn parse_line(text: &str) -> std::result::Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err("line numbers start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a line number", text.trim())),
    }
}

fn invalid(spec: &str, reason: &str) -> CodemapError {
    CodemapError::InvalidQuery(format!("{}: {}", spec, reason))
}
