//! Resolution of every cell's orthogonal neighbors on a portal-rewired board.

use crate::{CellAddress, Diagonal, Direction, Neighbors, PairMap, PortalClass, Result};
use itertools::Itertools;
use ndarray::Array2;
use std::iter::once;
use tracing::debug;

use Direction::*;
use PortalClass::*;

/// Portal overlay passes, lowest precedence first. Each pass points the anchor's
/// `from` slot at its partner and the partner's `to` slot back at the anchor, where the
/// anchor is the endpoint whose partner lies in the `from` direction. When both endpoints
/// share the travel coordinate, each one acts as anchor in turn and the precedence
/// dedup settles which of the two rewired slots survives.
const OVERLAY_PASSES: [(PortalClass, Direction, Direction); 4] = [
    (Horizontal, Right, Left),
    (Vertical, Top, Bottom),
    (Horizontal, Left, Right),
    (Vertical, Bottom, Top),
];

/// For every cell, the resolved target of each orthogonal direction, or `None` when
/// there is no neighbor that way.
///
/// No two directions of one cell share a target; the higher precedence direction keeps it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborTable {
    slots: Array2<Neighbors<Option<CellAddress>>>,
}

/// Build the neighbor table for a `height` x `width` board.
///
/// Starts from plain grid adjacency (no wraparound), applies the portal overlay passes
/// in increasing precedence, then drops any direction whose target is already held by
/// a higher precedence direction of the same cell.
pub fn build_topology(
    height: usize,
    width: usize,
    horizontal: &PairMap,
    vertical: &PairMap,
) -> Result<NeighborTable> {
    assert!(
        height >= 1 && width >= 1,
        "board is empty, which isnt allowed"
    );
    horizontal.check_bounds(height, width)?;
    vertical.check_bounds(height, width)?;

    let mut slots = Array2::from_shape_fn((height, width), |ix| {
        let addr = CellAddress::from(ix);
        Neighbors::new(|dir| addr.offset(dir.delta(), height, width))
    });

    for &(class, from, to) in OVERLAY_PASSES.iter() {
        let pairs = match class {
            Horizontal => horizontal,
            Vertical => vertical,
        };
        for (a, b) in pairs.pairs() {
            for (anchor, partner) in orient(class, from, a, b) {
                slots[anchor.ix()][from] = Some(partner);
                slots[partner.ix()][to] = Some(anchor);
            }
        }
    }

    let dropped: usize = slots.iter_mut().map(dedup).sum();
    debug!(
        height,
        width,
        horizontal = horizontal.len(),
        vertical = vertical.len(),
        dropped,
        "built neighbor table"
    );
    Ok(NeighborTable { slots })
}

/// Yields `(anchor, partner)` such that `partner` lies in direction `from` of `anchor`,
/// or both orientations when the endpoints tie on the travel axis.
fn orient(
    class: PortalClass,
    from: Direction,
    a: CellAddress,
    b: CellAddress,
) -> impl Iterator<Item = (CellAddress, CellAddress)> {
    let tied = class.travel(a) == class.travel(b);
    let (lo, hi) = if class.travel(a) < class.travel(b) {
        (a, b)
    } else {
        (b, a)
    };
    let first = match from {
        Right | Bottom => (lo, hi),
        Top | Left => (hi, lo),
    };
    once(first).chain(tied.then(|| (first.1, first.0)))
}

/// Invalidate every direction whose target a higher precedence direction already holds.
/// Returns how many slots were dropped.
fn dedup(neighbors: &mut Neighbors<Option<CellAddress>>) -> usize {
    let mut dropped = 0;
    for (rank, dir) in Direction::precedence().enumerate() {
        let target = neighbors[dir];
        if target.is_some()
            && Direction::precedence()
                .take(rank)
                .any(|higher| neighbors[higher] == target)
        {
            neighbors[dir] = None;
            dropped += 1;
        }
    }
    dropped
}

impl NeighborTable {
    /// `(height, width)`, matching the `dim()` of boards it can step.
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.slots.dim()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.slots.nrows()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.slots.ncols()
    }

    /// Get all four resolved directions of a cell. Panics if out of bounds.
    #[inline]
    pub fn neighbors(&self, addr: CellAddress) -> &Neighbors<Option<CellAddress>> {
        &self.slots[addr.ix()]
    }

    #[inline]
    pub fn neighbor(&self, addr: CellAddress, dir: Direction) -> Option<CellAddress> {
        self.slots[addr.ix()][dir]
    }

    /// Follow the vertical hop, then the horizontal hop from wherever it landed.
    #[inline]
    pub fn diagonal(&self, addr: CellAddress, diag: Diagonal) -> Option<CellAddress> {
        let (first, second) = diag.hops();
        self.neighbor(addr, first)
            .and_then(|mid| self.neighbor(mid, second))
    }

    /// All eight neighbor slots: the orthogonal ones in precedence order followed by
    /// top-left, top-right, bottom-left and bottom-right.
    pub fn neighborhood(&self, addr: CellAddress) -> [Option<CellAddress>; 8] {
        let n = self.neighbors(addr);
        [
            n.top,
            n.right,
            n.bottom,
            n.left,
            self.diagonal(addr, Diagonal::TopLeft),
            self.diagonal(addr, Diagonal::TopRight),
            self.diagonal(addr, Diagonal::BottomLeft),
            self.diagonal(addr, Diagonal::BottomRight),
        ]
    }

    /// The distinct cells among the eight neighbor slots.
    pub fn unique_neighbors(&self, addr: CellAddress) -> impl Iterator<Item = CellAddress> {
        self.neighborhood(addr).into_iter().flatten().unique()
    }
}
