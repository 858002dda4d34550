use std::io::{self, Write};

use gridlife::{pos, Pos};

/// an off-screen character buffer, flushed to the terminal in one write.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            height,
            lines,
            width,
        }
    }

    /// draws `f` over every screen position where it returns a character.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for row in 0..self.height {
            for col in 0..self.width {
                if let Some(c) = f(pos!(row as i32, col as i32)) {
                    self.lines[row][col] = c;
                }
            }
        }
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn display(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line: String = line.iter().collect();
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}

#[test]
fn test_layers_stack() {
    let mut canvas = Canvas::new(3, 2);
    canvas.layer(|_| Some('.'));
    canvas.layer(|p| (p == pos!(1, 2)).then_some('#'));
    assert_eq!(canvas.render(), "...\n..#");
}
