use crate::Direction::{self, *};
use std::iter::{once, Chain, Once};
use std::ops::{Index, IndexMut};

/// One value per orthogonal direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

type NeighborhoodIter<T> = Chain<Chain<Chain<Once<T>, Once<T>>, Once<T>>, Once<T>>;

impl<T> Neighbors<T> {
    #[inline]
    pub fn new<F: FnMut(Direction) -> T>(mut f: F) -> Self {
        Self {
            top: f(Top),
            right: f(Right),
            bottom: f(Bottom),
            left: f(Left),
        }
    }

    pub fn as_ref(&self) -> Neighbors<&T> {
        Neighbors {
            top: &self.top,
            right: &self.right,
            bottom: &self.bottom,
            left: &self.left,
        }
    }

    #[inline]
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Neighbors<U> {
        Neighbors {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }

    /// Iterate over all values in precedence order.
    #[inline]
    pub fn iter(self) -> NeighborhoodIter<T> {
        once(self.top)
            .chain(once(self.right))
            .chain(once(self.bottom))
            .chain(once(self.left))
    }

    /// Iterate over all values with their directions in precedence order.
    #[inline]
    pub fn dir_iter(self) -> NeighborhoodIter<(Direction, T)> {
        once((Top, self.top))
            .chain(once((Right, self.right)))
            .chain(once((Bottom, self.bottom)))
            .chain(once((Left, self.left)))
    }
}

impl<T> std::iter::FromIterator<T> for Neighbors<T> {
    /// Panics if the iterator yields fewer than four items.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut next = || {
            iter.next()
                .expect("Neighbors::from_iter: need one item per direction")
        };
        Self {
            top: next(),
            right: next(),
            bottom: next(),
            left: next(),
        }
    }
}

impl<T> Index<Direction> for Neighbors<T> {
    type Output = T;
    #[inline]
    fn index(&self, ix: Direction) -> &T {
        match ix {
            Top => &self.top,
            Right => &self.right,
            Bottom => &self.bottom,
            Left => &self.left,
        }
    }
}

impl<T> IndexMut<Direction> for Neighbors<T> {
    #[inline]
    fn index_mut(&mut self, ix: Direction) -> &mut T {
        match ix {
            Top => &mut self.top,
            Right => &mut self.right,
            Bottom => &mut self.bottom,
            Left => &mut self.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_precedence_order() {
        let n = Neighbors::new(usize::from);
        assert_eq!(n.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        let dirs: Vec<_> = n.dir_iter().map(|(d, _)| d).collect();
        assert_eq!(dirs, Direction::precedence().collect::<Vec<_>>());
        assert_eq!(n, n.iter().collect());
    }
}
