use {
    super::{leaf, phase1, phase2, Phase, LEAF_SIGNS, LOGO_CENTER, PHASE2_GRID},
    crate::basis::{AstralEntity, Pos},
    std::collections::HashSet,
};

// distances from the centre along (row, column), for the down-right leaf
const LEAF_FIXTURE: [(i32, i32); 27] = [
    (1, 2),
    (2, 1),
    (1, 3),
    (3, 1),
    (2, 4),
    (4, 2),
    (2, 5),
    (5, 2),
    (3, 6),
    (6, 3),
    (3, 7),
    (7, 3),
    (4, 8),
    (8, 4),
    (5, 8),
    (8, 5),
    (6, 9),
    (9, 6),
    (7, 9),
    (9, 7),
    (8, 10),
    (10, 8),
    (9, 10),
    (10, 9),
    (10, 11),
    (11, 10),
    (11, 11),
];

fn center() -> Pos {
    PHASE2_GRID.pos(LOGO_CENTER.0, LOGO_CENTER.1).unwrap()
}

fn relative(pos: Pos, center: Pos) -> (i32, i32) {
    (
        pos.row() as i32 - center.row() as i32,
        pos.column() as i32 - center.column() as i32,
    )
}

fn test_vec<E, A, T>(expected: E, actual: A)
where
    E: IntoIterator<Item = T>,
    A: IntoIterator<Item = T>,
    T: PartialEq + std::fmt::Debug,
    E::IntoIter: ExactSizeIterator,
    A::IntoIter: ExactSizeIterator,
{
    let expected = expected.into_iter();
    let actual = actual.into_iter();
    assert_eq!(expected.len(), actual.len());
    expected
        .zip(actual)
        .enumerate()
        .for_each(|(i, (e, a))| assert_eq!(e, a, "index: {}", i));
}

#[test]
fn phase1_is_x() {
    let placements = phase1().unwrap();
    assert_eq!(placements.len(), 14);
    assert!(placements.iter().all(|p| p.entity == AstralEntity::Polyanet));

    let actual = placements
        .iter()
        .map(|p| (p.pos.row(), p.pos.column()))
        .collect::<Vec<_>>();
    let expected = (2..=8u8)
        .flat_map(|i| vec![(i, i), (9 - i, i)])
        .collect::<Vec<_>>();
    test_vec(expected, actual.clone());

    let unique = actual.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), 14);
}

#[test]
fn leaf_matches_fixture() {
    let center = center();
    let cells = leaf(PHASE2_GRID, center, (1, 1)).unwrap();
    test_vec(
        LEAF_FIXTURE.iter().copied(),
        cells.into_iter().map(|p| relative(p, center)),
    );
}

#[test]
fn leaves_are_mirrored() {
    let center = center();
    for &(row_sign, column_sign) in &LEAF_SIGNS {
        let cells = leaf(PHASE2_GRID, center, (row_sign, column_sign)).unwrap();
        let mirrored = LEAF_FIXTURE
            .iter()
            .map(|&(r, c)| (r * row_sign, c * column_sign));
        test_vec(mirrored, cells.into_iter().map(|p| relative(p, center)));
    }
}

#[test]
fn phase2_logo() {
    let center = center();
    let placements = phase2(PHASE2_GRID, center).unwrap();
    assert_eq!(placements.len(), 5 + 4 * 27);
    assert!(placements.iter().all(|p| p.entity == AstralEntity::Polyanet));
    assert!(placements.iter().all(|p| PHASE2_GRID.is_pos_valid(p.pos)));

    // cross first
    test_vec(
        vec![(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)],
        placements[..5].iter().map(|p| relative(p.pos, center)),
    );

    let cells = placements
        .iter()
        .map(|p| relative(p.pos, center))
        .collect::<HashSet<_>>();
    assert_eq!(cells.len(), 113);
    for &(r, c) in &cells {
        assert!(cells.contains(&(-r, c)), "no row mirror for {:?}", (r, c));
        assert!(cells.contains(&(r, -c)), "no column mirror for {:?}", (r, c));
    }
}

#[test]
fn leaf_out_of_grid() {
    let center = PHASE2_GRID.pos(3, 15).unwrap();
    let err = leaf(PHASE2_GRID, center, (-1, 1)).unwrap_err();
    // (4, 2) away from (3, 15) towards up-right
    assert_eq!(err.row, -1);
    assert_eq!(err.column, 17);
}

#[test]
fn phase_generate() {
    assert_eq!(Phase::Phase1.generate().unwrap().len(), 14);
    assert_eq!(Phase::Phase2.generate().unwrap().len(), 113);
    assert_eq!(Phase::Phase2.grid().rows(), 30);
}
