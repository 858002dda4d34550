use std::{
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use gridlife::{Pos, Simulation, World};
use log::{error, info, warn};
use thiserror::Error;

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);
const MIN_TICK: Duration = Duration::from_millis(10);
const MAX_TICK: Duration = Duration::from_secs(5);

/// what the view needs to draw one screen.
#[derive(Debug, Clone)]
pub struct Frame {
    pub world: World,
    pub generation: u64,
    pub playing: bool,
    pub tick: Duration,
}

#[derive(Debug)]
pub enum PlayerCmd {
    Toggle(Pos),
    Step,
    TogglePlay,
    Clear,
    Faster,
    Slower,
    Snapshot(mpsc::Sender<Frame>),
    Quit,
}

#[derive(Debug, Error)]
#[error("the player thread has stopped")]
pub struct PlayerGone;

#[derive(Debug, Clone)]
pub struct PlayerHandle {
    sender: mpsc::Sender<PlayerCmd>,
}

impl PlayerHandle {
    pub fn send(&self, cmd: PlayerCmd) -> Result<(), PlayerGone> {
        self.sender.send(cmd).map_err(|_| PlayerGone)
    }

    pub fn snapshot(&self) -> Result<Frame, PlayerGone> {
        let (sender, receiver) = mpsc::channel();
        self.send(PlayerCmd::Snapshot(sender))?;
        receiver.recv().map_err(|_| PlayerGone)
    }
}

/// runs the simulation on its own thread. every edit and every generation goes
/// through the command channel, so edits never interleave with a step.
#[derive(Debug)]
pub struct Player {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<PlayerCmd>,
}

impl Player {
    pub fn spawn(sim: Simulation, tick: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let state = PlayerState {
            sim,
            tick: tick.clamp(MIN_TICK, MAX_TICK),
            playing: false,
        };
        let thread = thread::spawn(move || player_loop(receiver, state));
        Self { thread, sender }
    }

    pub fn handle(&self) -> PlayerHandle {
        let sender = self.sender.clone();
        PlayerHandle { sender }
    }

    pub fn join(self) {
        if self.thread.join().is_err() {
            error!("player thread panicked");
        }
    }
}

#[derive(Debug)]
struct PlayerState {
    sim: Simulation,
    tick: Duration,
    playing: bool,
}

impl PlayerState {
    /// applies one command, returns false once the loop should stop.
    fn apply(&mut self, cmd: PlayerCmd) -> bool {
        match cmd {
            PlayerCmd::Toggle(pos) => {
                if let Err(err) = self.sim.toggle(pos) {
                    warn!("ignoring toggle: {err}");
                }
            }
            PlayerCmd::Step => self.step(),
            PlayerCmd::TogglePlay => self.playing = !self.playing,
            PlayerCmd::Clear => {
                self.playing = false;
                self.sim.reset();
            }
            PlayerCmd::Faster => self.tick = (self.tick / 2).max(MIN_TICK),
            PlayerCmd::Slower => self.tick = (self.tick * 2).min(MAX_TICK),
            PlayerCmd::Snapshot(sender) => {
                // the requester may have given up waiting
                let _ = sender.send(self.frame());
            }
            PlayerCmd::Quit => return false,
        }
        true
    }

    fn step(&mut self) {
        let report = self.sim.step();
        if report.repeated && self.playing {
            info!("pausing at generation {}, pattern repeats", report.generation);
            self.playing = false;
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            world: self.sim.world().clone(),
            generation: self.sim.generation(),
            playing: self.playing,
            tick: self.tick,
        }
    }
}

fn player_loop(receiver: mpsc::Receiver<PlayerCmd>, state: PlayerState) {
    let mut state = state;
    let mut last_update = Instant::now();

    loop {
        loop {
            match receiver.try_recv() {
                Ok(cmd) => {
                    if !state.apply(cmd) {
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        if state.playing && last_update.elapsed() > state.tick {
            state.step();
            last_update = Instant::now();
        }

        thread::sleep(EVT_CHECK_TIMEOUT);
    }
}

#[cfg(test)]
fn test_state() -> PlayerState {
    use gridlife::{pos, Cell};
    let mut sim = Simulation::new(5, 5).unwrap();
    for col in 1..4 {
        sim.set(pos!(2, col), Cell::Alive).unwrap();
    }
    PlayerState {
        sim,
        tick: Duration::from_millis(200),
        playing: false,
    }
}

#[test]
fn test_apply_commands() {
    use gridlife::pos;
    let mut state = test_state();
    assert!(state.apply(PlayerCmd::Step));
    assert_eq!(state.frame().generation, 1);
    assert!(state.apply(PlayerCmd::Toggle(pos!(0, 0))));
    assert_eq!(state.frame().world.population(), 4);
    // off-grid toggles are logged and dropped
    assert!(state.apply(PlayerCmd::Toggle(pos!(9, 9))));
    assert!(state.apply(PlayerCmd::Clear));
    assert_eq!(state.frame().world.population(), 0);
    assert_eq!(state.frame().generation, 0);
    assert!(!state.apply(PlayerCmd::Quit));
}

#[test]
fn test_tick_bounds() {
    let mut state = test_state();
    for _ in 0..20 {
        state.apply(PlayerCmd::Faster);
    }
    assert_eq!(state.tick, MIN_TICK);
    for _ in 0..20 {
        state.apply(PlayerCmd::Slower);
    }
    assert_eq!(state.tick, MAX_TICK);
}

#[test]
fn test_pauses_on_repeat() {
    let mut state = test_state();
    state.apply(PlayerCmd::TogglePlay);
    state.step();
    assert!(state.playing);
    state.step();
    assert!(!state.playing);
}

#[test]
fn test_spawned_player() {
    let player = Player::spawn(test_state().sim, Duration::from_millis(50));
    let handle = player.handle();
    handle.send(PlayerCmd::Step).unwrap();
    let frame = handle.snapshot().unwrap();
    assert_eq!(frame.generation, 1);
    assert!(!frame.playing);
    handle.send(PlayerCmd::Quit).unwrap();
    player.join();
    assert!(handle.snapshot().is_err());
}
