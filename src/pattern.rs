//! plaintext patterns: `#` or `O` for alive cells, `.` or space for dead ones,
//! `!` starts a comment line.

use std::{fs, path::Path};

use log::debug;

use crate::{pos, Error, Pos, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    cells: Vec<Pos>,
}

impl Pattern {
    pub fn parse(text: &str) -> Result<Self> {
        let mut cells = vec![];
        let mut row = 0;
        for (index, line) in text.lines().enumerate() {
            if line.starts_with('!') {
                continue;
            }
            for (col, c) in line.chars().enumerate() {
                match c {
                    '#' | 'O' => cells.push(pos!(row, col as i32)),
                    '.' | ' ' => (),
                    found => {
                        return Err(Error::InvalidPattern {
                            line: index + 1,
                            column: col + 1,
                            found,
                        })
                    }
                }
            }
            row += 1;
        }
        Ok(Self { cells })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let pattern = Self::parse(&content)?;
        debug!("read {} cells from {}", pattern.cells.len(), path.display());
        Ok(pattern)
    }

    /// offsets of the alive cells, relative to the top-left corner.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// bounding box as (rows, cols).
    pub fn size(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|p| p.row + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|p| p.col + 1).max().unwrap_or(0);
        (rows as usize, cols as usize)
    }

    /// the origin that puts the pattern in the middle of a `rows`x`cols` grid.
    pub fn centered_in(&self, rows: usize, cols: usize) -> Pos {
        let (height, width) = self.size();
        let row = rows.saturating_sub(height) / 2;
        let col = cols.saturating_sub(width) / 2;
        pos!(row as i32, col as i32)
    }
}

#[test]
fn test_parse() {
    let pattern = Pattern::parse("!glider\n.#.\n..O\n###\n").unwrap();
    assert_eq!(
        pattern.cells(),
        &[pos!(0, 1), pos!(1, 2), pos!(2, 0), pos!(2, 1), pos!(2, 2)]
    );
    assert_eq!(pattern.size(), (3, 3));
    assert_eq!(pattern.centered_in(9, 7), pos!(3, 2));
}

#[test]
fn test_parse_rejects_unknown_chars() {
    let err = Pattern::parse("!comment\n#.\n.x").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidPattern {
            line: 3,
            column: 2,
            found: 'x'
        }
    ));
}

#[test]
fn test_empty_pattern() {
    let pattern = Pattern::parse("").unwrap();
    assert!(pattern.cells().is_empty());
    assert_eq!(pattern.size(), (0, 0));
    assert_eq!(pattern.centered_in(4, 4), pos!(2, 2));
}

#[test]
fn test_missing_file() {
    let result = Pattern::from_file("/nonexistent/gridlife/pattern.txt");
    assert!(matches!(result, Err(Error::Io(_))));
}
