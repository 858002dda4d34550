use crate::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// the opposite state, used for direct edits between generations.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Dead),
            1 => Ok(Cell::Alive),
            other => Err(Error::InvalidCell(other)),
        }
    }
}

#[test]
fn test_cell_decode() {
    assert_eq!(Cell::try_from(0).unwrap(), Cell::Dead);
    assert_eq!(Cell::try_from(1).unwrap(), Cell::Alive);
    assert!(matches!(Cell::try_from(2), Err(Error::InvalidCell(2))));
    assert!(matches!(Cell::try_from(255), Err(Error::InvalidCell(255))));
    assert_eq!(u8::from(Cell::Alive), 1);
}

#[test]
fn test_cell_toggled() {
    assert_eq!(Cell::Dead.toggled(), Cell::Alive);
    assert_eq!(Cell::Alive.toggled().toggled(), Cell::Alive);
    assert_eq!(Cell::default(), Cell::Dead);
}

#[test]
fn test_cell_bool() {
    assert_eq!(Cell::from(true), Cell::Alive);
    assert!(bool::from(Cell::Alive));
    assert!(!bool::from(Cell::Dead));
}
