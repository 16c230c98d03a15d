use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use engine::prelude::*;

mod command;
use command::Command;

mod view;

pub const GAME_NAME: &str = "piperogue";

#[derive(Parser, Debug)]
#[command(about = "Turn-based tile roguelike")]
struct Args {
    #[arg(long, help = "IDM file with game parameters")]
    config: Option<PathBuf>,

    #[arg(long, help = "Game seed")]
    seed: Option<u64>,

    #[arg(long, help = "Field of view radius")]
    torch_radius: Option<i32>,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).with_context(|| {
                    format!("can't read config {}", path.display())
                })?;
                idm::from_str(&text).with_context(|| {
                    format!("bad config file {}", path.display())
                })?
            }
            None => Config::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(radius) = self.torch_radius {
            config.torch_radius = radius;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config()?;
    log::info!("{GAME_NAME} starting with {config:?}");

    let mut game = Runtime::with_default_dungeon(config)?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    redraw(&mut out, &game, &[])?;

    for line in stdin.lock().lines() {
        let cmd = match line?.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                writeln!(out, "{e}")?;
                prompt(&mut out)?;
                continue;
            }
        };

        let log = match cmd {
            Command::Step(dx, dy) => game.player_turn(dx, dy),
            Command::Wait => game.player_turn(0, 0),
            Command::Close => game.close_door(),
            Command::Up => game.climb_up(),
            Command::Down => game.climb_down(),
            Command::Eat => game.eat(),
            Command::Shoot(x, y) => game.shoot_arrow(x, y),
            Command::Shield => game.toggle_shield(),
            Command::Look => Vec::new(),
            Command::Help => {
                writeln!(out, "{}", command::HELP)?;
                prompt(&mut out)?;
                continue;
            }
            Command::Quit => break,
        };

        // Nothing renders the presentation events yet.
        for msg in game.drain_events() {
            log::trace!("{msg:?}");
        }

        redraw(&mut out, &game, &log)?;
    }

    log::info!("exiting after {} turns", game.turn());
    Ok(())
}

fn redraw(
    out: &mut impl Write,
    game: &Runtime,
    log: &[String],
) -> io::Result<()> {
    write!(out, "{}", view::render(game))?;
    writeln!(out, "{}", view::status(game))?;
    for line in log {
        writeln!(out, "{line}")?;
    }
    prompt(out)
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_file() {
        let config: Config = idm::from_str(
            "\
torch-radius 5
oil-ignite-chance 0.5
seed 7",
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                torch_radius: 5,
                oil_ignite_chance: 0.5,
                seed: 7
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["piperogue", "--seed", "3"]);
        let config = args.config().unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.torch_radius, Config::default().torch_radius);
    }
}
