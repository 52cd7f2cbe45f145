//! Index types for addressing rows in a form.
//!
//! Two coordinate systems coexist:
//!
//! - **Form row index**: the position of a [`Row`](super::Row) inside its
//!   section's row sequence.
//! - **Flat index**: the position a list widget sees, after every dynamic
//!   row has been expanded to its element count.
//!
//! [`IndexPath`] always carries a flat index. [`RowPosition`] is the result
//! of translating a flat index back to a form row index.

use std::fmt;
use std::ops::Range;

/// A `(section, flat row)` pair as consumed by a list widget.
///
/// # Example
///
/// ```
/// use terrace::model::IndexPath;
///
/// let path = IndexPath::new(0, 3);
/// assert_eq!(path.section, 0);
/// assert_eq!(path.row, 3);
/// assert_eq!(IndexPath::from((0, 3)), path);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// Section index within the form.
    pub section: usize,
    /// Flat row index within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates a new index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the path at the same section with a different row.
    #[inline]
    pub const fn with_row(self, row: usize) -> Self {
        Self::new(self.section, row)
    }

    /// Returns `count` consecutive paths in `section` starting at flat row `first`.
    pub fn run(section: usize, first: usize, count: usize) -> Vec<IndexPath> {
        (first..first + count)
            .map(|row| IndexPath::new(section, row))
            .collect()
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

/// A flat index translated back into form coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowPosition {
    /// Form row index of the owning row.
    pub index: usize,
    /// Position inside the row's expansion; always 0 for static rows.
    pub offset: usize,
}

impl RowPosition {
    /// Creates a new row position.
    #[inline]
    pub const fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }
}

/// Contiguous section indexes starting at `first`.
#[inline]
pub(crate) fn section_run(first: usize, count: usize) -> Range<usize> {
    first..first + count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_builds_consecutive_paths() {
        let paths = IndexPath::run(2, 4, 3);
        assert_eq!(
            paths,
            vec![
                IndexPath::new(2, 4),
                IndexPath::new(2, 5),
                IndexPath::new(2, 6)
            ]
        );
        assert!(IndexPath::run(0, 5, 0).is_empty());
    }

    #[test]
    fn test_ordering_is_section_major() {
        assert!(IndexPath::new(0, 9) < IndexPath::new(1, 0));
        assert!(IndexPath::new(1, 0) < IndexPath::new(1, 1));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", IndexPath::new(1, 2)), "[1, 2]");
    }

    #[test]
    fn test_section_run() {
        assert_eq!(section_run(3, 2), 3..5);
        assert!(section_run(3, 0).is_empty());
    }
}
