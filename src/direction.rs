use enum_iterator::IntoEnumIterator;
use Direction::*;

/// The four orthogonal directions a cell can have a neighbor in.
///
/// Variants are declared in precedence order: when two directions of one cell
/// resolve to the same target, the one iterated first keeps it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// All directions, highest precedence first.
    #[inline]
    pub fn precedence() -> <Direction as IntoEnumIterator>::Iterator {
        Direction::into_enum_iter()
    }

    /// The classical `(row, col)` step for this direction.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Top => (-1, 0),
            Right => (0, 1),
            Bottom => (1, 0),
            Left => (0, -1),
        }
    }

    #[inline]
    pub fn inv(self) -> Self {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    /// Whether this direction moves along rows (`Top`/`Bottom`).
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Top | Bottom)
    }
}

impl From<usize> for Direction {
    fn from(n: usize) -> Self {
        match n {
            0 => Top,
            1 => Right,
            2 => Bottom,
            3 => Left,
            _ => panic!("invalid integer conversion to Direction"),
        }
    }
}

impl From<Direction> for usize {
    fn from(dir: Direction) -> usize {
        match dir {
            Top => 0,
            Right => 1,
            Bottom => 2,
            Left => 3,
        }
    }
}

/// Diagonal neighbors are never stored; they are reached by chaining a vertical hop
/// and then a horizontal hop from the intermediate cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
pub enum Diagonal {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Diagonal {
    #[inline]
    pub fn hops(self) -> (Direction, Direction) {
        match self {
            Diagonal::TopLeft => (Top, Left),
            Diagonal::TopRight => (Top, Right),
            Diagonal::BottomLeft => (Bottom, Left),
            Diagonal::BottomRight => (Bottom, Right),
        }
    }

    #[inline]
    pub fn all() -> <Diagonal as IntoEnumIterator>::Iterator {
        Diagonal::into_enum_iter()
    }
}
