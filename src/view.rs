use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use gridlife::{pos, Pos};
use log::error;
use termion::{event::Key, input::TermRead, raw::IntoRawMode};

use crate::player::{Frame, PlayerCmd, PlayerHandle};

pub use canvas::Canvas;
mod canvas;

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(50);
const KEY_HELP: &str = "p:play n:step space:toggle c:clear +/-:speed q:quit";

pub struct View {
    thread: JoinHandle<io::Result<()>>,
}

impl View {
    pub fn spawn(handle: PlayerHandle) -> Self {
        let thread = thread::spawn(|| view_loop(handle));
        Self { thread }
    }

    pub fn join(self) {
        match self.thread.join() {
            Ok(Ok(())) => (),
            Ok(Err(err)) => error!("terminal error: {err}"),
            Err(_) => error!("view thread panicked"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Toggle,
    TogglePlay,
    Step,
    Clear,
    Accelerate,
    Decelerate,
}

fn key_command(key: Key) -> Option<InputCmd> {
    let command = match key {
        Key::Char('q') | Key::Ctrl('c') | Key::Esc => InputCmd::Exit,
        Key::Up | Key::Char('k') => InputCmd::Move(Dir::Up),
        Key::Down | Key::Char('j') => InputCmd::Move(Dir::Down),
        Key::Left | Key::Char('h') => InputCmd::Move(Dir::Left),
        Key::Right | Key::Char('l') => InputCmd::Move(Dir::Right),
        Key::Char(' ') | Key::Char('\n') => InputCmd::Toggle,
        Key::Char('p') => InputCmd::TogglePlay,
        Key::Char('n') => InputCmd::Step,
        Key::Char('c') => InputCmd::Clear,
        Key::Char('+') | Key::Char('=') => InputCmd::Accelerate,
        Key::Char('-') => InputCmd::Decelerate,
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let Ok(key) = key else { break };
        let Some(command) = key_command(key) else {
            continue;
        };
        if sender.send(command).is_err() {
            break;
        }
    }
}

/// cursor and scroll position over the grid.
#[derive(Debug, Default)]
struct ViewState {
    cursor: Pos,
    origin: Pos,
}

impl ViewState {
    fn move_cursor(&mut self, dir: Dir, (rows, cols): (usize, usize)) {
        let step = match dir {
            Dir::Up => pos!(-1, 0),
            Dir::Down => pos!(1, 0),
            Dir::Left => pos!(0, -1),
            Dir::Right => pos!(0, 1),
        };
        let next = self.cursor + step;
        self.cursor = pos!(
            next.row.clamp(0, rows as i32 - 1),
            next.col.clamp(0, cols as i32 - 1)
        );
    }

    /// scrolls just enough to keep the cursor inside a `height`x`width` screen.
    fn follow_cursor(&mut self, height: usize, width: usize) {
        let (height, width) = (height.max(1) as i32, width.max(1) as i32);
        if self.cursor.row < self.origin.row {
            self.origin.row = self.cursor.row;
        } else if self.cursor.row >= self.origin.row + height {
            self.origin.row = self.cursor.row - height + 1;
        }
        if self.cursor.col < self.origin.col {
            self.origin.col = self.cursor.col;
        } else if self.cursor.col >= self.origin.col + width {
            self.origin.col = self.cursor.col - width + 1;
        }
    }
}

/// forwards a key command to the player. returns false when the view should close.
fn handle_input(
    cmd: InputCmd,
    view: &mut ViewState,
    frame: &Frame,
    player: &PlayerHandle,
) -> bool {
    let forwarded = match cmd {
        InputCmd::Exit => return false,
        InputCmd::Move(dir) => {
            view.move_cursor(dir, frame.world.dims());
            None
        }
        InputCmd::Toggle => Some(PlayerCmd::Toggle(view.cursor)),
        InputCmd::TogglePlay => Some(PlayerCmd::TogglePlay),
        InputCmd::Step => Some(PlayerCmd::Step),
        InputCmd::Clear => Some(PlayerCmd::Clear),
        InputCmd::Accelerate => Some(PlayerCmd::Faster),
        InputCmd::Decelerate => Some(PlayerCmd::Slower),
    };
    match forwarded {
        Some(cmd) => player.send(cmd).is_ok(),
        None => true,
    }
}

fn view_loop(handle: PlayerHandle) -> io::Result<()> {
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut out = stdout().into_raw_mode()?;
    write!(out, "{}", termion::cursor::Hide)?;

    let mut view = ViewState::default();
    let result = loop {
        let Ok(frame) = handle.snapshot() else {
            break Ok(());
        };
        if !receiver
            .try_iter()
            .all(|cmd| handle_input(cmd, &mut view, &frame, &handle))
        {
            break Ok(());
        }
        if let Err(err) = display_frame(&mut out, &mut view, &frame) {
            break Err(err);
        }
        thread::sleep(VIEW_REFRESH_INTERVAL);
    };

    write!(out, "{}{}", termion::clear::All, termion::cursor::Show)?;
    out.flush()?;
    result
}

fn draw(view: &ViewState, frame: &Frame, width: usize, height: usize) -> Canvas {
    let (rows, cols) = frame.world.dims();
    let mut canvas = Canvas::new(width.min(cols), height.min(rows));
    canvas.layer(|screen| {
        let pos = view.origin + screen;
        let alive = frame.world.get(pos).ok()?.is_alive();
        Some(match (pos == view.cursor, alive) {
            (true, true) => '@',
            (true, false) => '+',
            (false, true) => '#',
            (false, false) => '.',
        })
    });
    canvas
}

fn status_line(view: &ViewState, frame: &Frame) -> String {
    let state = if frame.playing { "playing" } else { "paused" };
    format!(
        "gen {} | pop {} | {state} | {}ms | cursor {} | {KEY_HELP}",
        frame.generation,
        frame.world.population(),
        frame.tick.as_millis(),
        view.cursor,
    )
}

fn display_frame(out: &mut impl Write, view: &mut ViewState, frame: &Frame) -> io::Result<()> {
    let (width, height) = termion::terminal_size()?;
    let (width, height) = (width as usize, (height as usize).saturating_sub(1));
    view.follow_cursor(height, width);
    let canvas = draw(view, frame, width, height);
    canvas.display(out, &status_line(view, frame))
}

#[cfg(test)]
fn test_frame() -> Frame {
    use gridlife::{Cell, World};
    let mut world = World::new(4, 6).unwrap();
    world.set(pos!(0, 1), Cell::Alive).unwrap();
    world.set(pos!(3, 5), Cell::Alive).unwrap();
    Frame {
        world,
        generation: 7,
        playing: false,
        tick: Duration::from_millis(100),
    }
}

#[test]
fn test_key_mapping() {
    assert_eq!(key_command(Key::Char('q')), Some(InputCmd::Exit));
    assert_eq!(key_command(Key::Left), Some(InputCmd::Move(Dir::Left)));
    assert_eq!(key_command(Key::Char(' ')), Some(InputCmd::Toggle));
    assert_eq!(key_command(Key::Char('z')), None);
}

#[test]
fn test_cursor_is_clamped() {
    let mut view = ViewState::default();
    view.move_cursor(Dir::Up, (4, 6));
    view.move_cursor(Dir::Left, (4, 6));
    assert_eq!(view.cursor, pos!(0, 0));
    for _ in 0..10 {
        view.move_cursor(Dir::Down, (4, 6));
        view.move_cursor(Dir::Right, (4, 6));
    }
    assert_eq!(view.cursor, pos!(3, 5));
}

#[test]
fn test_scroll_follows_cursor() {
    let mut view = ViewState {
        cursor: pos!(3, 5),
        origin: pos!(0, 0),
    };
    view.follow_cursor(2, 3);
    assert_eq!(view.origin, pos!(2, 3));
    view.cursor = pos!(0, 4);
    view.follow_cursor(2, 3);
    assert_eq!(view.origin, pos!(0, 3));
}

#[test]
fn test_draw() {
    let frame = test_frame();
    let view = ViewState::default();
    assert_eq!(draw(&view, &frame, 80, 20).render(), "+#....\n......\n......\n.....#");
    // the screen is smaller than the grid
    let view = ViewState {
        cursor: pos!(3, 5),
        origin: pos!(2, 3),
    };
    assert_eq!(draw(&view, &frame, 3, 2).render(), "...\n..@");
}

#[test]
fn test_status_line() {
    let status = status_line(&ViewState::default(), &test_frame());
    assert!(status.starts_with("gen 7 | pop 2 | paused | 100ms | cursor (0, 0)"));
}
