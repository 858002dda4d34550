use std::{
    collections::VecDeque,
    hash::{Hash, Hasher},
};

use log::{debug, info, trace};
use metrohash::MetroHash64;

use crate::{
    rules::{next_state, tally},
    Cell, Error, Pattern, Pos, Result, World,
};

/// how many past generations are remembered when looking for repeats.
const HISTORY_LEN: usize = 16;

/// computes the generation following `world` into a fresh grid.
pub fn advance(world: &World) -> World {
    let mut next = world.clone();
    advance_into(world, &mut next);
    next
}

/// writes the generation following `current` into `next`, overwriting every cell.
/// reads only from `current`, so evaluation order does not matter.
fn advance_into(current: &World, next: &mut World) {
    debug_assert_eq!(current.dims(), next.dims());
    let cells = current.positions().zip(current.cells().iter());
    for ((pos, cell), slot) in cells.zip(next.cells_mut().iter_mut()) {
        *slot = next_state(*cell, tally(current, pos));
    }
}

fn fingerprint(world: &World) -> u64 {
    let mut hasher = MetroHash64::default();
    world.dims().hash(&mut hasher);
    world.cells().hash(&mut hasher);
    hasher.finish()
}

/// outcome of a single generation advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub population: usize,
    /// the new generation matches one of the recently seen ones.
    pub repeated: bool,
}

/// owns the current generation and the scratch buffer the next one is computed into.
#[derive(Debug)]
pub struct Simulation {
    current: World,
    next: World,
    generation: u64,
    history: VecDeque<u64>,
}

impl Simulation {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let current = World::new(rows, cols)?;
        let next = World::new(rows, cols)?;
        debug!("created {rows}x{cols} simulation");
        Ok(Self {
            current,
            next,
            generation: 0,
            history: VecDeque::with_capacity(HISTORY_LEN),
        })
    }

    pub fn world(&self) -> &World {
        &self.current
    }

    pub fn dims(&self) -> (usize, usize) {
        self.current.dims()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, pos: Pos) -> Result<Cell> {
        self.current.get(pos)
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<()> {
        self.current.set(pos, cell)?;
        self.history.clear();
        Ok(())
    }

    pub fn toggle(&mut self, pos: Pos) -> Result<Cell> {
        let cell = self.current.get(pos)?.toggled();
        self.set(pos, cell)?;
        Ok(cell)
    }

    pub fn step(&mut self) -> StepReport {
        if self.history.is_empty() {
            self.history.push_back(fingerprint(&self.current));
        }

        advance_into(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        let hash = fingerprint(&self.current);
        let repeated = self.history.contains(&hash);
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(hash);

        let report = StepReport {
            generation: self.generation,
            population: self.current.population(),
            repeated,
        };
        trace!("{report:?}");
        if repeated {
            info!("generation {} repeats a recent state", self.generation);
        }
        report
    }

    /// clears both grids and the generation counter, keeping the dimensions.
    pub fn reset(&mut self) {
        self.current.clear();
        self.next.clear();
        self.generation = 0;
        self.history.clear();
        debug!("simulation reset");
    }

    /// sets every cell of `pattern` alive, offset by `origin`.
    /// nothing is written unless the whole pattern fits.
    pub fn load(&mut self, pattern: &Pattern, origin: Pos) -> Result<()> {
        let (rows, cols) = self.dims();
        let cells: Vec<Pos> = pattern.cells().iter().map(|p| origin + *p).collect();
        if let Some(pos) = cells.iter().find(|p| !self.current.contains(**p)) {
            return Err(Error::OutOfBounds {
                pos: *pos,
                rows,
                cols,
            });
        }
        for pos in cells {
            self.current.set(pos, Cell::Alive)?;
        }
        self.history.clear();
        debug!("loaded {} cells at {origin}", pattern.cells().len());
        Ok(())
    }
}

#[cfg(test)]
use crate::pos;

#[cfg(test)]
fn blinker() -> Simulation {
    let mut sim = Simulation::new(3, 3).unwrap();
    for col in 0..3 {
        sim.set(pos!(1, col), Cell::Alive).unwrap();
    }
    sim
}

#[test]
fn test_blinker_oscillates() {
    let mut sim = blinker();
    let report = sim.step();
    assert_eq!(sim.world().actives(), vec![pos!(0, 1), pos!(1, 1), pos!(2, 1)]);
    assert_eq!(report.generation, 1);
    assert_eq!(report.population, 3);
    assert!(!report.repeated);

    let report = sim.step();
    assert_eq!(sim.world().actives(), vec![pos!(1, 0), pos!(1, 1), pos!(1, 2)]);
    assert!(report.repeated);
}

#[test]
fn test_scratch_does_not_leak() {
    let mut sim = blinker();
    sim.step();
    sim.step();
    // the scratch buffer now holds the vertical phase; a cleared grid must stay empty
    sim.reset();
    let report = sim.step();
    assert_eq!(report.population, 0);
    assert_eq!(sim.generation(), 1);
}

#[test]
fn test_still_life_repeats() {
    let mut sim = Simulation::new(4, 4).unwrap();
    for pos in [pos!(1, 1), pos!(1, 2), pos!(2, 1), pos!(2, 2)] {
        sim.set(pos, Cell::Alive).unwrap();
    }
    assert!(sim.step().repeated);
}

#[test]
fn test_edit_clears_history() {
    let mut sim = blinker();
    sim.step();
    sim.toggle(pos!(0, 0)).unwrap();
    sim.toggle(pos!(0, 0)).unwrap();
    // history restarts from the edited grid, so the period-2 return is still a repeat
    assert!(!sim.step().repeated);
    assert!(sim.step().repeated);
}

#[test]
fn test_toggle() {
    let mut sim = Simulation::new(2, 2).unwrap();
    assert_eq!(sim.toggle(pos!(1, 1)).unwrap(), Cell::Alive);
    assert_eq!(sim.get(pos!(1, 1)).unwrap(), Cell::Alive);
    assert_eq!(sim.toggle(pos!(1, 1)).unwrap(), Cell::Dead);
    assert!(matches!(
        sim.toggle(pos!(2, 0)),
        Err(Error::OutOfBounds { .. })
    ));
}

#[test]
fn test_load_rejects_overflow() {
    let pattern = Pattern::parse("###").unwrap();
    let mut sim = Simulation::new(3, 3).unwrap();
    assert!(matches!(
        sim.load(&pattern, pos!(0, 1)),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(sim.world().population(), 0);
    sim.load(&pattern, pos!(2, 0)).unwrap();
    assert_eq!(sim.world().actives(), vec![pos!(2, 0), pos!(2, 1), pos!(2, 2)]);
}
