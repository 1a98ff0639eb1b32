//! Line ranges into a source file.

use serde::{Deserialize, Serialize};

/// Half-open, 0-based range of source lines.
///
/// Ready to slice a `Vec` of lines directly: `lines[span.start..span.end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineSpan {
    /// First line, inclusive
    pub start: usize,
    /// One past the last line
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert a Space's 1-based inclusive range.
    ///
    /// Returns `None` when the range covers no line at all, which is how the
    /// analyzer describes an empty file (`0..0`).
    pub fn from_space_lines(start_line: usize, end_line: usize) -> Option<Self> {
        let span = Self::new(start_line.saturating_sub(1), end_line);
        (!span.is_empty()).then_some(span)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_space_lines() {
        assert_eq!(LineSpan::from_space_lines(2, 4), Some(LineSpan::new(1, 4)));
        assert_eq!(LineSpan::from_space_lines(7, 7), Some(LineSpan::new(6, 7)));
        assert_eq!(LineSpan::from_space_lines(0, 0), None);
    }
}
