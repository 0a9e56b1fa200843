//! Portal pairings.
//!
//! A [`PairMap`] is a perfect matching over marked cells: every endpoint has exactly one
//! partner, nobody is paired with itself, and the relation is stored symmetrically.
//! Iteration is ordered by address so that anything built from a map is reproducible.

use crate::{CellAddress, PortalFault, Result};
use itertools::Itertools;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::warn;

/// Which tunnel asset a pairing came from.
///
/// Horizontal-class tunnels primarily link column extremes and rewire `Left`/`Right`.
/// Vertical-class tunnels primarily link row extremes and rewire `Top`/`Bottom`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PortalClass {
    Horizontal,
    Vertical,
}

impl PortalClass {
    /// Coordinate that border tunnels are grouped by (orthogonal to travel).
    #[inline]
    fn bucket(self, addr: CellAddress) -> usize {
        match self {
            PortalClass::Horizontal => addr.row,
            PortalClass::Vertical => addr.col,
        }
    }

    /// Coordinate along the direction of travel.
    #[inline]
    pub fn travel(self, addr: CellAddress) -> usize {
        match self {
            PortalClass::Horizontal => addr.col,
            PortalClass::Vertical => addr.row,
        }
    }

    #[inline]
    fn compose(self, bucket: usize, travel: usize) -> CellAddress {
        match self {
            PortalClass::Horizontal => CellAddress::new(bucket, travel),
            PortalClass::Vertical => CellAddress::new(travel, bucket),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairMap {
    partners: BTreeMap<CellAddress, CellAddress>,
}

impl PairMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `a` with `b`. Re-inserting an existing pair is a no-op.
    pub fn insert_pair(&mut self, a: CellAddress, b: CellAddress) -> Result<()> {
        if a == b {
            return Err(PortalFault::SelfPair(a).into());
        }
        for (address, requested) in [(a, b), (b, a)] {
            if let Some(&existing) = self.partners.get(&address) {
                if existing != requested {
                    return Err(PortalFault::ConflictingPartner {
                        address,
                        existing,
                        requested,
                    }
                    .into());
                }
            }
        }
        self.partners.insert(a, b);
        self.partners.insert(b, a);
        Ok(())
    }

    /// Build a map from raw `endpoint -> partner` entries, which must already be
    /// symmetric: every `a -> b` needs a matching `b -> a`.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CellAddress, CellAddress)>,
    {
        let mut partners = BTreeMap::new();
        for (address, requested) in entries {
            if address == requested {
                return Err(PortalFault::SelfPair(address).into());
            }
            match partners.entry(address) {
                Entry::Vacant(v) => {
                    v.insert(requested);
                }
                Entry::Occupied(o) if *o.get() != requested => {
                    return Err(PortalFault::ConflictingPartner {
                        address,
                        existing: *o.get(),
                        requested,
                    }
                    .into());
                }
                Entry::Occupied(_) => {}
            }
        }
        for (&from, &to) in &partners {
            if partners.get(&to) != Some(&from) {
                return Err(PortalFault::Asymmetric { from, to }.into());
            }
        }
        Ok(Self { partners })
    }

    /// Pair up same-coloured marker pixels.
    ///
    /// A group of exactly two cells is one direct pair. Larger groups are border tunnels:
    /// cells are bucketed by the axis orthogonal to travel and the two extremes of each
    /// bucket are paired. A bucket holding a single cell forms no pair. Any group of odd
    /// size is rejected.
    pub fn from_color_groups<I>(class: PortalClass, groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = ([u8; 3], Vec<CellAddress>)>,
    {
        let mut map = Self::new();
        for (color, cells) in groups {
            if cells.len() % 2 != 0 {
                return Err(PortalFault::OddColor {
                    color,
                    count: cells.len(),
                }
                .into());
            }
            if let [a, b] = cells.as_slice() {
                map.insert_pair(*a, *b)?;
                continue;
            }
            let buckets = cells
                .iter()
                .map(|&addr| (class.bucket(addr), class.travel(addr)))
                .into_group_map();
            for (bucket, travels) in buckets.into_iter().sorted_by_key(|&(b, _)| b) {
                match travels.iter().copied().minmax().into_option() {
                    Some((lo, hi)) if lo != hi => {
                        map.insert_pair(class.compose(bucket, lo), class.compose(bucket, hi))?
                    }
                    _ => warn!(?color, bucket, "border tunnel bucket has a single endpoint"),
                }
            }
        }
        Ok(map)
    }

    #[inline]
    pub fn partner(&self, addr: CellAddress) -> Option<CellAddress> {
        self.partners.get(&addr).copied()
    }

    /// Every pair exactly once, smaller address first.
    pub fn pairs(&self) -> impl Iterator<Item = (CellAddress, CellAddress)> + '_ {
        self.partners
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(&a, &b)| (a, b))
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn check_bounds(&self, height: usize, width: usize) -> Result<()> {
        match self.partners.keys().find(|a| !a.within(height, width)) {
            Some(&address) => Err(PortalFault::OutOfBounds {
                address,
                height,
                width,
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn a(row: usize, col: usize) -> CellAddress {
        CellAddress::new(row, col)
    }

    #[test]
    fn insert_is_symmetric() {
        let mut map = PairMap::new();
        map.insert_pair(a(0, 0), a(2, 3)).unwrap();
        assert_eq!(map.partner(a(0, 0)), Some(a(2, 3)));
        assert_eq!(map.partner(a(2, 3)), Some(a(0, 0)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.pairs().collect::<Vec<_>>(), vec![(a(0, 0), a(2, 3))]);
    }

    #[test]
    fn rejects_self_and_conflicting_pairs() {
        let mut map = PairMap::new();
        assert!(matches!(
            map.insert_pair(a(1, 1), a(1, 1)),
            Err(Error::InvalidPortal(PortalFault::SelfPair(_)))
        ));
        map.insert_pair(a(0, 0), a(0, 4)).unwrap();
        map.insert_pair(a(0, 4), a(0, 0)).unwrap();
        assert!(matches!(
            map.insert_pair(a(0, 4), a(3, 3)),
            Err(Error::InvalidPortal(PortalFault::ConflictingPartner { .. }))
        ));
    }

    #[test]
    fn entries_must_be_symmetric() {
        let err = PairMap::from_entries(vec![(a(0, 0), a(0, 2))]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPortal(PortalFault::Asymmetric { .. })
        ));
        let map = PairMap::from_entries(vec![(a(0, 0), a(0, 2)), (a(0, 2), a(0, 0))]).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn horizontal_border_tunnel_pairs_row_extremes() {
        let cells = vec![a(0, 0), a(0, 4), a(1, 0), a(1, 4), a(2, 0), a(2, 4)];
        let map = PairMap::from_color_groups(PortalClass::Horizontal, vec![([9, 9, 9], cells)])
            .unwrap();
        assert_eq!(map.len(), 3);
        for row in 0..3 {
            assert_eq!(map.partner(a(row, 0)), Some(a(row, 4)));
        }
    }

    #[test]
    fn vertical_border_tunnel_pairs_column_extremes() {
        let cells = vec![a(0, 1), a(5, 1), a(0, 2), a(3, 2), a(5, 2), a(4, 3)];
        let map =
            PairMap::from_color_groups(PortalClass::Vertical, vec![([1, 2, 3], cells)]).unwrap();
        assert_eq!(map.partner(a(0, 1)), Some(a(5, 1)));
        assert_eq!(map.partner(a(0, 2)), Some(a(5, 2)));
        assert_eq!(map.partner(a(3, 2)), None);
        assert_eq!(map.partner(a(4, 3)), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn odd_colour_group_is_rejected() {
        let cells = vec![a(0, 0), a(0, 1), a(0, 2)];
        let err = PairMap::from_color_groups(PortalClass::Horizontal, vec![([255, 0, 0], cells)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPortal(PortalFault::OddColor { count: 3, .. })
        ));
    }

    #[test]
    fn bounds_are_checked() {
        let mut map = PairMap::new();
        map.insert_pair(a(0, 0), a(0, 5)).unwrap();
        assert!(map.check_bounds(5, 6).is_ok());
        assert!(map.check_bounds(5, 5).is_err());
    }
}
