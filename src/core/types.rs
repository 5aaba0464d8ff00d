//! Small value types: index ranges, transpose selection, row/column side.

use std::fmt;
use std::ops::Range;

/// Half-open range `[start, end)` of DOF indices in H-matrix ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "IndexRange start {start} > end {end}");
        Self { start, end }
    }

    /// Number of indices in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// True if the two ranges share at least one index.
    pub fn overlaps(&self, other: &IndexRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for IndexRange {
    fn from(r: Range<usize>) -> Self {
        IndexRange::new(r.start, r.end)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Selects `op(A)` in `y = alpha * op(A) * x + beta * y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransposeMode {
    /// op(A) = A
    #[default]
    NoTranspose,
    /// op(A) = Aᵀ
    Transpose,
}

impl TransposeMode {
    pub fn is_transposed(self) -> bool {
        matches!(self, TransposeMode::Transpose)
    }
}

/// Which side of an operator a cluster tree describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCol {
    Row,
    Column,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_basics() {
        let r = IndexRange::from(2..5);
        assert_eq!(r.len(), 3);
        assert!(r.contains(2) && r.contains(4) && !r.contains(5));
        assert!(r.overlaps(&IndexRange::new(4, 8)));
        assert!(!r.overlaps(&IndexRange::new(5, 8)));
        assert_eq!(r.to_string(), "[2, 5)");
        assert!(IndexRange::new(3, 3).is_empty());
    }
}
