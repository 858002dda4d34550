use gridlife::{
    advance, count_live_neighbors, next_state, pos, Cell, Error, Pattern, Pos, Simulation, World,
};

fn world_with(rows: usize, cols: usize, alive: &[Pos]) -> World {
    let mut world = World::new(rows, cols).unwrap();
    for pos in alive {
        world.set(*pos, Cell::Alive).unwrap();
    }
    world
}

#[test]
fn blinker_oscillates() {
    let world = world_with(3, 3, &[pos!(1, 0), pos!(1, 1), pos!(1, 2)]);
    let next = advance(&world);
    assert_eq!(next.actives(), vec![pos!(0, 1), pos!(1, 1), pos!(2, 1)]);
    assert_eq!(advance(&next), world);
}

#[test]
fn advance_is_repeatable() {
    let world = world_with(5, 5, &[pos!(0, 1), pos!(1, 2), pos!(2, 0), pos!(2, 1), pos!(2, 2)]);
    let first = advance(&world);
    let second = advance(&world);
    assert_eq!(first, second);
    // the input is left untouched
    assert_eq!(world.population(), 5);
}

#[test]
fn empty_world_stays_empty() {
    for (rows, cols) in [(1, 1), (1, 7), (6, 2), (10, 10)] {
        let world = World::new(rows, cols).unwrap();
        assert_eq!(advance(&world), world);
    }
}

#[test]
fn isolated_cell_dies() {
    let world = world_with(3, 3, &[pos!(1, 1)]);
    assert_eq!(advance(&world).population(), 0);
}

#[test]
fn three_neighbors_always_alive() {
    let neighbors = [pos!(0, 0), pos!(0, 1), pos!(0, 2)];
    let world = world_with(3, 3, &neighbors);
    assert_eq!(count_live_neighbors(&world, pos!(1, 1)).unwrap(), 3);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Alive);

    let mut alive_center = neighbors.to_vec();
    alive_center.push(pos!(1, 1));
    let world = world_with(3, 3, &alive_center);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Alive);
}

#[test]
fn two_neighbors_keep_state() {
    let world = world_with(3, 3, &[pos!(0, 0), pos!(2, 2)]);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Dead);
    let world = world_with(3, 3, &[pos!(0, 0), pos!(1, 1), pos!(2, 2)]);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Alive);
}

#[test]
fn crowded_cell_dies() {
    let world = world_with(3, 3, &[pos!(0, 0), pos!(0, 2), pos!(2, 0), pos!(2, 2)]);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Dead);
    let world = world_with(3, 3, &[pos!(0, 0), pos!(0, 2), pos!(1, 1), pos!(2, 0), pos!(2, 2)]);
    assert_eq!(advance(&world).get(pos!(1, 1)).unwrap(), Cell::Dead);
}

#[test]
fn sparse_neighborhoods_die() {
    for count in [0, 1] {
        assert_eq!(next_state(Cell::Alive, count), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, count), Cell::Dead);
    }
    for count in 4..=8 {
        assert_eq!(next_state(Cell::Alive, count), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, count), Cell::Dead);
    }
}

#[test]
fn edges_do_not_wrap() {
    // a vertical line on the left edge would sustain the far column on a torus
    let world = world_with(3, 4, &[pos!(0, 0), pos!(1, 0), pos!(2, 0)]);
    assert_eq!(count_live_neighbors(&world, pos!(1, 3)).unwrap(), 0);
    let next = advance(&world);
    assert_eq!(next.actives(), vec![pos!(1, 0), pos!(1, 1)]);
}

#[test]
fn toggle_twice_restores() {
    let mut sim = Simulation::new(4, 4).unwrap();
    let before = sim.world().clone();
    sim.toggle(pos!(2, 3)).unwrap();
    assert_ne!(sim.world(), &before);
    sim.toggle(pos!(2, 3)).unwrap();
    assert_eq!(sim.world(), &before);
}

#[test]
fn construction_rejects_empty_grids() {
    assert!(matches!(Simulation::new(0, 3), Err(Error::InvalidDimension { .. })));
    assert!(matches!(Simulation::new(3, 0), Err(Error::InvalidDimension { .. })));
    assert!(matches!(World::new(0, 0), Err(Error::InvalidDimension { .. })));
}

#[test]
fn coordinates_are_bounds_checked() {
    let mut sim = Simulation::new(3, 5).unwrap();
    for pos in [pos!(-1, 0), pos!(3, 0), pos!(0, -1), pos!(0, 5)] {
        assert!(matches!(sim.get(pos), Err(Error::OutOfBounds { .. })));
        assert!(matches!(sim.set(pos, Cell::Alive), Err(Error::OutOfBounds { .. })));
        assert!(matches!(sim.toggle(pos), Err(Error::OutOfBounds { .. })));
    }
    assert_eq!(sim.world().population(), 0);
}

#[test]
fn step_matches_pure_advance() {
    let glider = Pattern::parse(".#.\n..#\n###").unwrap();
    let mut sim = Simulation::new(8, 8).unwrap();
    sim.load(&glider, pos!(0, 0)).unwrap();
    let mut expected = sim.world().clone();
    for generation in 1..=4 {
        expected = advance(&expected);
        let report = sim.step();
        assert_eq!(sim.world(), &expected);
        assert_eq!(report.generation, generation);
        assert_eq!(report.population, 5);
    }
    // after four generations the glider has moved one cell down and right
    assert_eq!(
        sim.world().actives(),
        vec![pos!(1, 2), pos!(2, 3), pos!(3, 1), pos!(3, 2), pos!(3, 3)]
    );
}

#[test]
fn reset_keeps_dimensions() {
    let mut sim = Simulation::new(6, 9).unwrap();
    sim.toggle(pos!(5, 8)).unwrap();
    sim.step();
    sim.reset();
    assert_eq!(sim.dims(), (6, 9));
    assert_eq!(sim.generation(), 0);
    assert_eq!(sim.world().population(), 0);
}
