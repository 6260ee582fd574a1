use crate::cell::Item;
use crate::game::MatchContext;
use crate::grid::Grid;
use crate::input::{EntityKind, Snapshot};
use crate::robot::*;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct EnemyRobot {
  pub robot: Robot,
  /// The feed hides enemy cargo. A robot that paused on the home column
  /// probably took a trap.
  pub suspected_trap: bool,
}

impl Tracked for EnemyRobot {
  fn robot(&self) -> &Robot {
    &self.robot
  }

  fn robot_mut(&mut self) -> &mut Robot {
    &mut self.robot
  }

  fn spawn(robot: Robot) -> Self {
    EnemyRobot {
      robot,
      suspected_trap: false,
    }
  }
}

/// Watches the opponent's robots for trap placements.
#[derive(Clone, Debug, Default)]
pub struct OpponentObserver {
  robots: Vec<EnemyRobot>,
}

impl OpponentObserver {
  pub fn new() -> OpponentObserver {
    OpponentObserver::default()
  }

  pub fn robots(&self) -> &[EnemyRobot] {
    &self.robots
  }

  /// Updates enemy records, puts living enemies on the grid and marks
  /// suspected traps where a robot stood still and dropped its trap.
  pub fn update(&mut self, context: &MatchContext, snapshot: &Snapshot, grid: &mut Grid) {
    let width = grid.width();
    track(&mut self.robots, width, snapshot.entities_of(EntityKind::EnemyRobot));
    for enemy in self.robots.iter_mut().filter(|enemy| enemy.robot.alive) {
      let id = enemy.robot.id;
      let pos = enemy.robot.pos;
      grid.cell_mut(pos).enemies.push(id);
      if !enemy.robot.not_moved {
        continue;
      }
      let carried_trap = enemy.robot.prev_item == Item::Trap || enemy.suspected_trap;
      if carried_trap && enemy.robot.item == Item::None && !enemy.robot.is_home(width) {
        let point = grid.point(pos);
        debug!("Enemy {} dropped a trap near {}:{}.", id, point.x, point.y);
        grid.mark_trap_placement(context.round, pos);
      }
      enemy.suspected_trap = enemy.robot.is_home(width);
    }
  }
}
