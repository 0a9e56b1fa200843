use wormgrid::{
    build_topology, CellAddress, Diagonal, Direction, Error, PairMap, PortalFault,
};

fn a(row: usize, col: usize) -> CellAddress {
    CellAddress::new(row, col)
}

fn pairs(list: &[((usize, usize), (usize, usize))]) -> PairMap {
    let mut map = PairMap::new();
    for &(x, y) in list {
        map.insert_pair(x.into(), y.into()).unwrap();
    }
    map
}

#[test]
fn no_portals_is_plain_adjacency() {
    let table = build_topology(3, 3, &PairMap::new(), &PairMap::new()).unwrap();
    assert_eq!(table.dim(), (3, 3));
    assert_eq!(table.neighbor(a(1, 1), Direction::Top), Some(a(0, 1)));
    assert_eq!(table.neighbor(a(1, 1), Direction::Right), Some(a(1, 2)));
    assert_eq!(table.neighbor(a(1, 1), Direction::Bottom), Some(a(2, 1)));
    assert_eq!(table.neighbor(a(1, 1), Direction::Left), Some(a(1, 0)));
    assert_eq!(table.neighbor(a(0, 0), Direction::Top), None);
    assert_eq!(table.neighbor(a(0, 0), Direction::Left), None);
    assert_eq!(table.diagonal(a(1, 1), Diagonal::TopLeft), Some(a(0, 0)));
    assert_eq!(table.diagonal(a(1, 1), Diagonal::BottomRight), Some(a(2, 2)));
    assert_eq!(table.diagonal(a(0, 0), Diagonal::TopRight), None);
}

#[test]
fn horizontal_portal_rewires_left_and_right() {
    // The leftward endpoint's Right leads to the rightward endpoint and back.
    let table = build_topology(3, 4, &pairs(&[((1, 3), (1, 0))]), &PairMap::new()).unwrap();
    assert_eq!(table.neighbor(a(1, 0), Direction::Right), Some(a(1, 3)));
    assert_eq!(table.neighbor(a(1, 3), Direction::Left), Some(a(1, 0)));
    // Untouched slots keep plain adjacency.
    assert_eq!(table.neighbor(a(1, 0), Direction::Left), None);
    assert_eq!(table.neighbor(a(1, 3), Direction::Right), None);
    assert_eq!(table.neighbor(a(1, 0), Direction::Top), Some(a(0, 0)));
    assert_eq!(table.neighbor(a(1, 1), Direction::Left), Some(a(1, 0)));
}

#[test]
fn vertical_portal_rewires_top_and_bottom() {
    let table = build_topology(4, 3, &PairMap::new(), &pairs(&[((0, 2), (3, 2))])).unwrap();
    assert_eq!(table.neighbor(a(3, 2), Direction::Top), Some(a(0, 2)));
    assert_eq!(table.neighbor(a(0, 2), Direction::Bottom), Some(a(3, 2)));
    assert_eq!(table.neighbor(a(0, 2), Direction::Top), None);
    assert_eq!(table.neighbor(a(3, 2), Direction::Bottom), None);
    // Diagonals chain through the portal.
    assert_eq!(table.diagonal(a(3, 2), Diagonal::TopLeft), Some(a(0, 1)));
    assert_eq!(table.diagonal(a(0, 2), Diagonal::BottomLeft), Some(a(3, 1)));
    assert_eq!(table.diagonal(a(0, 2), Diagonal::TopLeft), None);
}

#[test]
fn top_beats_right_for_the_same_target() {
    // (2,1) reaches (0,3) both upwards through the vertical portal and rightwards
    // through the horizontal one.
    let horizontal = pairs(&[((2, 1), (0, 3))]);
    let vertical = pairs(&[((2, 1), (0, 3))]);
    let table = build_topology(4, 4, &horizontal, &vertical).unwrap();
    let n = table.neighbors(a(2, 1));
    assert_eq!(n.top, Some(a(0, 3)));
    assert_eq!(n.right, None);
    assert_eq!(n.bottom, Some(a(3, 1)));
    assert_eq!(n.left, Some(a(2, 0)));

    let partner = table.neighbors(a(0, 3));
    assert_eq!(partner.bottom, Some(a(2, 1)));
    assert_eq!(partner.left, None);
}

#[test]
fn orthogonal_targets_are_unique_per_cell() {
    let horizontal = pairs(&[((0, 0), (0, 1)), ((2, 0), (2, 2))]);
    let vertical = pairs(&[((0, 0), (1, 0)), ((2, 1), (0, 1))]);
    let table = build_topology(3, 3, &horizontal, &vertical).unwrap();
    for row in 0..3 {
        for col in 0..3 {
            let targets: Vec<_> = table.neighbors(a(row, col)).iter().flatten().collect();
            let mut unique = targets.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(targets.len(), unique.len(), "cell ({}, {})", row, col);
        }
    }
    // (0,0) -> (0,1) is plain adjacency and a portal at once; it stays Right.
    assert_eq!(table.neighbor(a(0, 0), Direction::Right), Some(a(0, 1)));
}

#[test]
fn vertical_pair_on_one_row_keeps_top() {
    let vertical = pairs(&[((1, 0), (1, 3))]);
    let table = build_topology(3, 4, &PairMap::new(), &vertical).unwrap();

    let west = table.neighbors(a(1, 0));
    assert_eq!(west.top, Some(a(1, 3)));
    assert_eq!(west.right, Some(a(1, 1)));
    assert_eq!(west.bottom, None);
    assert_eq!(west.left, None);

    let east = table.neighbors(a(1, 3));
    assert_eq!(east.top, Some(a(1, 0)));
    assert_eq!(east.right, None);
    assert_eq!(east.bottom, None);
    assert_eq!(east.left, Some(a(1, 2)));
}

#[test]
fn horizontal_pair_in_one_column_keeps_right() {
    let horizontal = pairs(&[((0, 2), (2, 2))]);
    let table = build_topology(3, 3, &horizontal, &PairMap::new()).unwrap();

    let north = table.neighbors(a(0, 2));
    assert_eq!(north.top, None);
    assert_eq!(north.right, Some(a(2, 2)));
    assert_eq!(north.bottom, Some(a(1, 2)));
    assert_eq!(north.left, None);

    let south = table.neighbors(a(2, 2));
    assert_eq!(south.top, Some(a(1, 2)));
    assert_eq!(south.right, Some(a(0, 2)));
    assert_eq!(south.bottom, None);
    assert_eq!(south.left, None);
}

#[test]
fn out_of_bounds_portal_is_rejected() {
    let err = build_topology(3, 3, &pairs(&[((0, 0), (0, 3))]), &PairMap::new()).unwrap_err();
    match err {
        Error::InvalidPortal(PortalFault::OutOfBounds { address, .. }) => {
            assert_eq!(address, a(0, 3))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(build_topology(2, 2, &PairMap::new(), &pairs(&[((2, 0), (0, 0))])).is_err());
}

#[test]
fn table_is_rebuilt_identically() {
    let horizontal = pairs(&[((1, 0), (3, 4)), ((0, 0), (0, 4))]);
    let vertical = pairs(&[((0, 2), (3, 2))]);
    let first = build_topology(4, 5, &horizontal, &vertical).unwrap();
    let second = build_topology(4, 5, &horizontal.clone(), &vertical.clone()).unwrap();
    assert_eq!(first, second);
}
