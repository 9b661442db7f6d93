//! Best-effort source line resolution
//!
//! Two strategies are available. `line_at_offset` derives the line from a
//! match offset and cannot fail for an offset inside the content.
//! `find_line` re-scans the content line by line with a search pattern and
//! degrades to `LineNumber::Unknown` when nothing matches or the pattern
//! does not compile.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A 1-based line number, or the "unknown" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineNumber {
    Known(usize),
    Unknown,
}

impl LineNumber {
    pub fn as_option(&self) -> Option<usize> {
        match self {
            LineNumber::Known(line) => Some(*line),
            LineNumber::Unknown => None,
        }
    }

    /// Keep `self` if known, otherwise evaluate the fallback
    pub fn or_else(self, fallback: impl FnOnce() -> LineNumber) -> LineNumber {
        match self {
            LineNumber::Known(_) => self,
            LineNumber::Unknown => fallback(),
        }
    }
}

impl From<Option<usize>> for LineNumber {
    fn from(line: Option<usize>) -> Self {
        line.map(LineNumber::Known).unwrap_or(LineNumber::Unknown)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumber::Known(line) => write!(f, "{}", line),
            LineNumber::Unknown => f.write_str("unknown"),
        }
    }
}

/// Index of the first line whose text matches `pattern`
pub fn find_line(content: &str, pattern: &str) -> LineNumber {
    let Ok(re) = Regex::new(pattern) else {
        return LineNumber::Unknown;
    };

    content
        .lines()
        .position(|line| re.is_match(line))
        .map(|index| LineNumber::Known(index + 1))
        .unwrap_or(LineNumber::Unknown)
}

/// Line containing the byte at `offset`
///
/// Offsets past the end of the content are reported as unknown.
pub fn line_at_offset(content: &str, offset: usize) -> LineNumber {
    if offset > content.len() {
        return LineNumber::Unknown;
    }
    let newlines = content.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count();
    LineNumber::Known(newlines + 1)
}
