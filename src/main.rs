use std::{env::args, fmt::Display, process::exit};

use gridlife::{Pattern, Simulation};
use log::{error, info};

pub use config::Config;
mod config;

pub use player::{Player, PlayerCmd};
mod player;

pub use view::View;
mod view;

const USAGE: &str = "usage: gridlife [PATTERN] [--rows N] [--cols N] [--tick MS]";

fn fail(err: impl Display) -> ! {
    error!("{err}");
    eprintln!("[error] {err}");
    eprintln!("{USAGE}");
    exit(1);
}

fn setup(config: &Config) -> gridlife::Result<Simulation> {
    let mut simulation = Simulation::new(config.rows, config.cols)?;
    if let Some(path) = &config.pattern {
        let pattern = Pattern::from_file(path)?;
        let origin = pattern.centered_in(config.rows, config.cols);
        simulation.load(&pattern, origin)?;
        info!("loaded {} at {origin}", path.display());
    }
    Ok(simulation)
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_args(args().skip(1)).unwrap_or_else(|err| fail(err));
    let simulation = setup(&config).unwrap_or_else(|err| fail(err));

    let player = Player::spawn(simulation, config.tick);
    let view = View::spawn(player.handle());

    view.join();
    // the player outlives the view's handle clone, stop it explicitly
    let _ = player.handle().send(PlayerCmd::Quit);
    player.join();
}
