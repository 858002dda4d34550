//! neighbor counting and the B3/S23 transition rule.

use crate::{pos, Cell, Error, Pos, Result, World};

const OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(-1, 0),
    pos!(-1, 1),
    pos!(0, -1),
    pos!(0, 1),
    pos!(1, -1),
    pos!(1, 0),
    pos!(1, 1),
];

/// the adjacent positions of `pos` that lie inside the grid. no wraparound.
pub fn neighbors(world: &World, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
    OFFSETS
        .iter()
        .map(move |offset| pos + *offset)
        .filter(|neighbor| world.contains(*neighbor))
}

pub fn count_live_neighbors(world: &World, pos: Pos) -> Result<usize> {
    if !world.contains(pos) {
        let (rows, cols) = world.dims();
        return Err(Error::OutOfBounds { pos, rows, cols });
    }
    Ok(tally(world, pos))
}

/// live neighbor count for a position already known to be on the grid.
pub(crate) fn tally(world: &World, pos: Pos) -> usize {
    neighbors(world, pos)
        .filter(|neighbor| matches!(world.get(*neighbor), Ok(Cell::Alive)))
        .count()
}

pub fn next_state(current: Cell, live_neighbors: usize) -> Cell {
    match (current, live_neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive, // survives
        (Cell::Dead, 3) => Cell::Alive,      // born
        _ => Cell::Dead,
    }
}

#[test]
fn test_next_state() {
    for count in 0..=8 {
        let expected_alive = Cell::from(count == 2 || count == 3);
        let expected_dead = Cell::from(count == 3);
        assert_eq!(next_state(Cell::Alive, count), expected_alive, "alive, {count}");
        assert_eq!(next_state(Cell::Dead, count), expected_dead, "dead, {count}");
    }
}

#[test]
fn test_candidate_counts() {
    let world = World::new(4, 5).unwrap();
    assert_eq!(neighbors(&world, pos!(0, 0)).count(), 3);
    assert_eq!(neighbors(&world, pos!(3, 4)).count(), 3);
    assert_eq!(neighbors(&world, pos!(0, 2)).count(), 5);
    assert_eq!(neighbors(&world, pos!(2, 0)).count(), 5);
    assert_eq!(neighbors(&world, pos!(1, 1)).count(), 8);
    assert_eq!(neighbors(&world, pos!(2, 3)).count(), 8);
}

#[test]
fn test_single_row_candidates() {
    let world = World::new(1, 1).unwrap();
    assert_eq!(neighbors(&world, pos!(0, 0)).count(), 0);
    let world = World::new(1, 3).unwrap();
    assert_eq!(neighbors(&world, pos!(0, 1)).count(), 2);
}

#[test]
fn test_count_live_neighbors() {
    let mut world = World::new(3, 3).unwrap();
    for pos in world.positions().collect::<Vec<_>>() {
        world.set(pos, Cell::Alive).unwrap();
    }
    assert_eq!(count_live_neighbors(&world, pos!(1, 1)).unwrap(), 8);
    assert_eq!(count_live_neighbors(&world, pos!(0, 0)).unwrap(), 3);
    assert_eq!(count_live_neighbors(&world, pos!(0, 1)).unwrap(), 5);

    world.set(pos!(0, 0), Cell::Dead).unwrap();
    assert_eq!(count_live_neighbors(&world, pos!(1, 1)).unwrap(), 7);
    // the center never counts itself
    assert_eq!(count_live_neighbors(&world, pos!(0, 0)).unwrap(), 3);
}

#[test]
fn test_count_out_of_bounds() {
    let world = World::new(3, 3).unwrap();
    assert!(matches!(
        count_live_neighbors(&world, pos!(-1, 0)),
        Err(Error::OutOfBounds { .. })
    ));
    assert!(matches!(
        count_live_neighbors(&world, pos!(0, 3)),
        Err(Error::OutOfBounds { .. })
    ));
}
