//! a bounded game of life: a fixed grid, the B3/S23 rule and a double-buffered
//! generation advance.

pub use error::{Error, Result};
mod error;

pub use utils::Pos;
mod utils;

pub use world::{Cell, World};
pub mod world;

pub use rules::{count_live_neighbors, neighbors, next_state};
pub mod rules;

pub use sim::{advance, Simulation, StepReport};
mod sim;

pub use pattern::Pattern;
mod pattern;
