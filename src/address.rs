use boolinator::Boolinator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position on the board, `row` counted from the top and `col` from the left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this address lies inside a `height` x `width` board.
    #[inline]
    pub fn within(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Offset by a signed `(row, col)` delta. The board does not wrap, so anything
    /// that falls off an edge is `None`.
    #[inline]
    pub fn offset(self, delta: (isize, isize), height: usize, width: usize) -> Option<Self> {
        let row = self.row as isize + delta.0;
        let col = self.col as isize + delta.1;
        (row >= 0 && col >= 0)
            .and_option_from(|| Some(Self::new(row as usize, col as usize)))
            .and_then(|addr| addr.within(height, width).as_some(addr))
    }

    /// The ndarray index of this address.
    #[inline]
    pub fn ix(self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl From<(usize, usize)> for CellAddress {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let a = CellAddress::new(0, 0);
        assert_eq!(a.offset((-1, 0), 3, 3), None);
        assert_eq!(a.offset((0, -1), 3, 3), None);
        assert_eq!(a.offset((1, 1), 3, 3), Some(CellAddress::new(1, 1)));
        assert_eq!(CellAddress::new(2, 2).offset((0, 1), 3, 3), None);
        assert_eq!(CellAddress::new(2, 2).offset((1, 0), 3, 3), None);
    }
}
