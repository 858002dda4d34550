use std::fmt;

use crate::{pos, Error, Pos, Result};

pub use cell::Cell;
mod cell;

/// a dense, fixed-size grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl World {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        // both axes must stay addressable by a `Pos`
        let max = i32::MAX as usize;
        let len = match rows.checked_mul(cols) {
            Some(len) if (1..=max).contains(&rows) && (1..=max).contains(&cols) => len,
            _ => return Err(Error::InvalidDimension { rows, cols }),
        };
        let cells = vec![Cell::Dead; len];
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// maps a position to its offset in `cells`, rejecting anything off-grid.
    fn index(&self, pos: Pos) -> Result<usize> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row as usize * self.cols + pos.col as usize)
    }

    pub fn get(&self, pos: Pos) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<()> {
        let index = self.index(pos)?;
        self.cells[index] = cell;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// every coordinate of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| pos!(row, col)))
    }

    pub fn actives(&self) -> Vec<Pos> {
        self.positions()
            .zip(self.cells.iter())
            .filter_map(|(pos, cell)| cell.is_alive().then_some(pos))
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                let c = if cell.is_alive() { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[test]
fn test_new_is_dead() {
    let world = World::new(3, 4).unwrap();
    assert_eq!(world.dims(), (3, 4));
    assert_eq!(world.population(), 0);
    assert!(world.positions().all(|p| world.get(p).unwrap() == Cell::Dead));
    assert_eq!(world.positions().count(), 12);
}

#[test]
fn test_invalid_dimension() {
    assert!(matches!(
        World::new(0, 5),
        Err(Error::InvalidDimension { rows: 0, cols: 5 })
    ));
    assert!(matches!(
        World::new(5, 0),
        Err(Error::InvalidDimension { .. })
    ));
}

#[test]
fn test_oversized_dimension() {
    let past_pos = i32::MAX as usize + 1;
    for (rows, cols) in [(usize::MAX, 4), (4, usize::MAX), (past_pos, 1), (1, past_pos)] {
        assert!(matches!(
            World::new(rows, cols),
            Err(Error::InvalidDimension { .. })
        ));
    }
}

#[test]
fn test_bounds() {
    let mut world = World::new(2, 3).unwrap();
    for pos in [pos!(-1, 0), pos!(2, 0), pos!(0, -1), pos!(0, 3)] {
        assert!(matches!(world.get(pos), Err(Error::OutOfBounds { .. })));
        assert!(matches!(
            world.set(pos, Cell::Alive),
            Err(Error::OutOfBounds { .. })
        ));
    }
    assert_eq!(world.population(), 0);
}

#[test]
fn test_set_touches_one_cell() {
    let mut world = World::new(3, 3).unwrap();
    world.set(pos!(1, 2), Cell::Alive).unwrap();
    assert_eq!(world.actives(), vec![pos!(1, 2)]);
    assert_eq!(world.to_string(), "...\n..#\n...\n");
}

#[test]
fn test_clone_is_independent() {
    let mut original = World::new(2, 2).unwrap();
    original.set(pos!(0, 0), Cell::Alive).unwrap();
    let mut copy = original.clone();
    copy.set(pos!(0, 0), Cell::Dead).unwrap();
    copy.set(pos!(1, 1), Cell::Alive).unwrap();
    assert_eq!(original.actives(), vec![pos!(0, 0)]);
    assert_eq!(copy.actives(), vec![pos!(1, 1)]);
}
