use crate::command::Action;
use crate::config::Config;
use crate::errors::InputError;
use crate::grid::Grid;
use crate::input::Snapshot;
use crate::opponent::OpponentObserver;
use crate::orders::OrderAssigner;
use crate::survey::SurveyPlanner;
use crate::time::*;
use std::time::Instant;
use tracing::debug;

/// Per-match counters handed to every stage of a round.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchContext {
  /// Current round number, starting from 1.
  pub round: u32,
  pub my_score: u32,
  pub opponent_score: u32,
  /// Rounds left until the headquarters hands out a radar.
  pub radar_cooldown: u32,
  /// Rounds left until the headquarters hands out a trap.
  pub trap_cooldown: u32,
  pub config: Config,
}

impl MatchContext {
  pub fn new(config: Config) -> MatchContext {
    MatchContext {
      config,
      ..MatchContext::default()
    }
  }

  fn begin_round(&mut self, snapshot: &Snapshot) {
    self.round += 1;
    self.my_score = snapshot.my_score;
    self.opponent_score = snapshot.opponent_score;
    self.radar_cooldown = snapshot.radar_cooldown;
    self.trap_cooldown = snapshot.trap_cooldown;
  }
}

#[derive(Clone)]
pub struct Game {
  /// Field width.
  width: u32,
  /// Field height.
  height: u32,
  context: MatchContext,
  grid: Grid,
  survey: SurveyPlanner,
  opponent: OpponentObserver,
  orders: OrderAssigner,
}

impl Game {
  pub fn new(width: u32, height: u32, config: Config) -> Game {
    Game {
      width,
      height,
      context: MatchContext::new(config),
      grid: Grid::new(width, height),
      survey: SurveyPlanner::new(width, height),
      opponent: OpponentObserver::new(),
      orders: OrderAssigner::new(width, height, config.seed),
    }
  }

  pub fn context(&self) -> &MatchContext {
    &self.context
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn survey(&self) -> &SurveyPlanner {
    &self.survey
  }

  pub fn opponent(&self) -> &OpponentObserver {
    &self.opponent
  }

  pub fn orders(&self) -> &OrderAssigner {
    &self.orders
  }
}

/// Runs one round and leaves one action per robot we have ever seen in
/// `output`, in order of first sighting. A snapshot that breaks the input
/// contract is rejected before any state changes.
pub fn turn(game: &mut Game, snapshot: &Snapshot, output: &mut Vec<Action>) -> Result<(), InputError> {
  let start_time = Instant::now();
  output.clear();
  snapshot.validate(game.width, game.height)?;
  game.context.begin_round(snapshot);
  let context = game.context;
  game.grid.update(&context, snapshot);
  game.orders.observe(game.width, snapshot);
  game.opponent.update(&context, snapshot, &mut game.grid);
  game.survey.relocate(&game.grid);
  game.orders.reconcile(&mut game.grid);
  game.orders.assign(&context, &mut game.grid, &game.survey);
  game.orders.actions(output);
  debug!(
    "Round {}: {} new holes, {} visible ore, {} safe, {}ms.",
    context.round,
    game.grid.new_holes().len(),
    game.grid.visible_ore(),
    game.grid.safe_ore(),
    elapsed_time(start_time)
  );
  Ok(())
}
