use crate::command::Action;
use crate::config::Config;
use crate::coordinates::manhattan;
use crate::game::*;
use crate::input::*;
use clap::Parser;
use std::io::{self, BufReader, Write};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[cfg(test)]
mod arbitrary;
mod cell;
mod command;
mod config;
mod coordinates;
mod errors;
mod game;
mod grid;
mod input;
mod opponent;
mod orders;
mod robot;
mod survey;
mod time;
mod wave;

#[derive(Parser)]
struct Args {
  /// A log level among "off", "error", "warn", "info", "debug", "trace"
  #[arg(short, long, default_value = "info")]
  log_level: LevelFilter,
  /// Seed for tie-breaks between equally good exploration cells.
  #[arg(long, default_value_t = 0)]
  seed: u64,
  /// Cells a robot covers per round.
  #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
  move_speed: Option<u32>,
  /// Safe ore below which a radar is fetched unconditionally.
  #[arg(long)]
  low_safe_ore: Option<u32>,
  /// Visible ore needed to detonate a hazard in an even fight.
  #[arg(long)]
  hazard_ore_floor: Option<u32>,
  /// Never request traps.
  #[arg(long)]
  no_traps: bool,
}

impl Args {
  fn config(&self) -> Config {
    let default = Config::default();
    Config {
      move_speed: self.move_speed.unwrap_or(default.move_speed),
      low_safe_ore: self.low_safe_ore.unwrap_or(default.low_safe_ore),
      hazard_ore_floor: self.hazard_ore_floor.unwrap_or(default.hazard_ore_floor),
      use_traps: !self.no_traps,
      seed: self.seed,
    }
  }
}

fn initialize_logging(level: LevelFilter) {
  let format = tracing_subscriber::fmt::format().with_target(false).compact();

  let filter = Targets::new().with_default(level);

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(io::stderr),
    )
    .with(filter)
    .init();
}

fn print_output<T: Write>(writer: &mut T, output: &[Action]) -> io::Result<()> {
  for action in output {
    debug!("Robot {}: {}", action.robot, action.command);
    writeln!(writer, "{}", action)?;
  }
  writer.flush()
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  initialize_logging(args.log_level);
  let config = args.config();
  let mut stdin = BufReader::new(io::stdin());
  let mut stdout = io::stdout();
  let mut output = Vec::new();
  let (width, height) = read_header(&mut stdin)?;
  info!("Field is {}x{}, {:?}.", width, height, config);
  let mut game = Game::new(width, height, config);
  debug!("{} survey spots.", game.survey().targets().len());
  while let Some(snapshot) = read_snapshot(&mut stdin, width, height)? {
    turn(&mut game, &snapshot, &mut output)?;
    print_output(&mut stdout, &output)?;
  }
  let lost = game.orders().robots().iter().filter(|own| !own.robot.alive).count();
  let walked: u32 = game
    .orders()
    .robots()
    .iter()
    .map(|own| own.robot.path.windows(2).map(|step| manhattan(width, step[0], step[1])).sum::<u32>())
    .sum();
  let destroyed = game.opponent().robots().iter().filter(|enemy| !enemy.robot.alive).count();
  let hazards = game.grid().cells().iter().filter(|cell| cell.is_hazard()).count();
  info!(
    "Input is over after {} rounds with score {}:{}. Robots walked {} cells, {} lost, {} enemy robots destroyed, {} hazards left.",
    game.context().round,
    game.context().my_score,
    game.context().opponent_score,
    walked,
    lost,
    destroyed,
    hazards
  );
  if let Some(point) = game.survey().next_target(game.grid()) {
    info!("Survey spot {}:{} never got a radar.", point.x, point.y);
  }
  Ok(())
}
