use crate::cell::Item;
use crate::command::{Action, Command};
use crate::coordinates::*;
use crate::game::MatchContext;
use crate::grid::Grid;
use crate::input::{EntityKind, Snapshot};
use crate::robot::*;
use crate::survey::SurveyPlanner;
use crate::wave::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::cmp::Reverse;
use tracing::{debug, info};

/// Multi-round task of one of our robots. Every order goes back to `None`
/// when it's done or abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
  None,
  MineOre,
  /// Dig a cell nobody has seen yet. Unseen survey spots go first, then
  /// the nearest unseen cell.
  Explore,
  ReturnHome,
  RequestRadar,
  RequestTrap,
  PlaceRadar,
  PlaceTrap,
  /// Dig a suspected trap on purpose.
  TriggerHazard,
  Wait,
}

impl Order {
  fn message(self) -> Option<&'static str> {
    match self {
      Order::None => None,
      Order::MineOre => Some("mine"),
      Order::Explore => Some("explore"),
      Order::ReturnHome => Some("home"),
      Order::RequestRadar | Order::RequestTrap => Some("request"),
      Order::PlaceRadar => Some("radar"),
      Order::PlaceTrap => Some("trap"),
      Order::TriggerHazard => Some("boom"),
      Order::Wait => Some("wait"),
    }
  }
}

#[derive(Clone, Debug)]
pub struct OwnRobot {
  pub robot: Robot,
  pub order: Order,
  pub target: Option<Pos>,
  pub command: Command,
}

impl OwnRobot {
  fn clear(&mut self) {
    self.order = Order::None;
    self.target = None;
    self.command = Command::Wait;
  }
}

impl Tracked for OwnRobot {
  fn robot(&self) -> &Robot {
    &self.robot
  }

  fn robot_mut(&mut self) -> &mut Robot {
    &mut self.robot
  }

  fn spawn(robot: Robot) -> Self {
    OwnRobot {
      robot,
      order: Order::None,
      target: None,
      command: Command::Wait,
    }
  }
}

enum Status {
  Keep,
  Completed,
  Invalid(&'static str),
}

/// Radar and trap requests already in progress.
struct Claims {
  /// Some robot carries a radar or is on its way to fetch one.
  radar_busy: bool,
  /// A radar was requested at home during this pass.
  radar_requested: bool,
  trap: bool,
}

fn status(own: &OwnRobot, grid: &Grid, detonations: &[Pos]) -> Status {
  let robot = &own.robot;
  let target = match own.target {
    Some(target) => target,
    None if own.order == Order::Wait => return Status::Completed,
    None => return Status::Invalid("no target"),
  };
  let cell = grid.cell(target);
  let adjacent = manhattan(grid.width(), robot.pos, target) <= 1;
  let stuck = robot.not_moved && !adjacent;
  if own.order != Order::TriggerHazard && cell.is_hazard() && !detonations.contains(&target) {
    return Status::Invalid("target is a suspected trap");
  }
  match own.order {
    Order::None => Status::Keep,
    Order::MineOre => {
      if robot.item == Item::Ore {
        Status::Completed
      } else if !cell.has_ore() {
        Status::Invalid("ore is gone")
      } else if cell.trap {
        Status::Invalid("target is trapped")
      } else if stuck {
        Status::Invalid("robot is stuck")
      } else {
        Status::Keep
      }
    }
    Order::Explore => {
      if robot.item == Item::Ore || cell.hole || cell.visible {
        Status::Completed
      } else if cell.trap {
        Status::Invalid("target is trapped")
      } else if stuck {
        Status::Invalid("robot is stuck")
      } else {
        Status::Keep
      }
    }
    Order::ReturnHome => {
      if robot.is_home(grid.width()) || robot.item != Item::Ore {
        Status::Completed
      } else {
        Status::Keep
      }
    }
    Order::RequestRadar => {
      if robot.item == Item::Radar {
        Status::Completed
      } else {
        Status::Keep
      }
    }
    Order::RequestTrap => {
      if robot.item == Item::Trap {
        Status::Completed
      } else {
        Status::Keep
      }
    }
    Order::PlaceRadar => {
      if robot.item != Item::Radar {
        Status::Completed
      } else if cell.radar {
        Status::Invalid("radar is already there")
      } else {
        Status::Keep
      }
    }
    Order::PlaceTrap => {
      if robot.item != Item::Trap {
        Status::Completed
      } else if cell.trap {
        Status::Invalid("trap is already there")
      } else {
        Status::Keep
      }
    }
    Order::TriggerHazard => {
      if adjacent && robot.not_moved {
        Status::Completed
      } else if !cell.is_hazard() {
        Status::Invalid("hazard is already resolved")
      } else {
        Status::Keep
      }
    }
    Order::Wait => Status::Completed,
  }
}

/// Best cell to dig for ore from `from`. Cells nobody claimed, reachable in
/// fewer moves, already holed and richer go first. Suspected traps are used
/// only when there is no safe ore on the field at all.
pub fn best_ore(grid: &Grid, from: Pos, speed: u32) -> Option<Pos> {
  let width = grid.width();
  let minable = |pos: &Pos| {
    let cell = grid.cell(*pos);
    cell.has_ore() && !cell.trap
  };
  let safe_exists = (0..grid.cells().len()).filter(minable).any(|pos| !grid.cell(pos).is_hazard());
  (0..grid.cells().len())
    .filter(minable)
    .filter(|&pos| {
      let cell = grid.cell(pos);
      !cell.targeted && cell.is_hazard() != safe_exists
    })
    .min_by_key(|&pos| {
      let cell = grid.cell(pos);
      (
        travel_legs(manhattan(width, from, pos), speed),
        !cell.hole,
        Reverse(cell.ore),
        pos,
      )
    })
}

/// Checks suspected traps around the robot. Digging one pays off when enemies
/// outnumber us around it, or when the sides are even and we lead the score
/// or can take the ore lying there.
fn hazard_response(robot: &Robot, grid: &Grid, context: &MatchContext) -> Option<Pos> {
  let leading = context.my_score > context.opponent_score;
  grid.around(robot.pos).find(|&pos| {
    let cell = grid.cell(pos);
    if !cell.is_hazard() || cell.targeted {
      return false;
    }
    let (friends, enemies) = grid.forces_around(pos);
    let worth_ore = robot.item == Item::None && cell.visible && cell.ore >= context.config.hazard_ore_floor;
    enemies > friends || enemies == friends && (leading || worth_ore)
  })
}

fn command_for(own: &OwnRobot, width: u32) -> Command {
  let robot = &own.robot;
  let target = match own.target {
    Some(target) if robot.alive => from_pos(width, target),
    _ => return Command::Wait,
  };
  match own.order {
    Order::None | Order::Wait => Command::Wait,
    Order::ReturnHome => Command::Move(target),
    Order::RequestRadar | Order::RequestTrap if !robot.is_home(width) => Command::Move(target),
    Order::RequestRadar => Command::Request(Item::Radar),
    Order::RequestTrap => Command::Request(Item::Trap),
    Order::MineOre | Order::Explore | Order::PlaceRadar | Order::PlaceTrap | Order::TriggerHazard => {
      Command::Dig(target)
    }
  }
}

/// Our robots, their orders and the logic that hands out new ones.
#[derive(Clone)]
pub struct OrderAssigner {
  /// In order of first sighting.
  robots: Vec<OwnRobot>,
  /// Random numbers generator.
  rng: XorShiftRng,
  /// Tags for the wave algorithm.
  tags: Vec<Tag>,
  /// Cells with non zero tags.
  tagged: Vec<Pos>,
}

impl OrderAssigner {
  pub fn new(width: u32, height: u32, seed: u64) -> OrderAssigner {
    let len = length(width, height);
    OrderAssigner {
      robots: Vec::new(),
      rng: XorShiftRng::seed_from_u64(seed),
      tags: vec![Tag::new(); len],
      tagged: Vec::with_capacity(len),
    }
  }

  pub fn robots(&self) -> &[OwnRobot] {
    &self.robots
  }

  pub fn observe(&mut self, width: u32, snapshot: &Snapshot) {
    track(&mut self.robots, width, snapshot.entities_of(EntityKind::OwnRobot));
  }

  /// Clears finished and outdated orders and claims the targets of the
  /// remaining ones. Dead robots lose their orders for good.
  pub fn reconcile(&mut self, grid: &mut Grid) {
    let detonations: Vec<Pos> = self
      .robots
      .iter()
      .filter(|own| own.robot.alive && own.order == Order::TriggerHazard)
      .filter_map(|own| own.target)
      .collect();
    for own in self.robots.iter_mut() {
      if !own.robot.alive {
        own.clear();
        continue;
      }
      if own.order == Order::None {
        continue;
      }
      match status(own, grid, &detonations) {
        Status::Keep => {}
        Status::Completed => {
          debug!("Robot {} completed {:?}.", own.robot.id, own.order);
          if own.order == Order::TriggerHazard {
            if let Some(target) = own.target {
              grid.resolve_hazard(target, own.robot.item == Item::Ore);
            }
          }
          own.clear();
        }
        Status::Invalid(reason) => {
          debug!("Robot {} drops {:?}: {}.", own.robot.id, own.order, reason);
          own.clear();
        }
      }
    }
    let width = grid.width();
    for own in self.robots.iter().filter(|own| own.robot.alive) {
      if let Some(target) = own.target {
        if !from_pos(width, target).is_home() {
          grid.cell_mut(target).targeted = true;
        }
      }
    }
  }

  /// Gives orders to idle robots and refreshes every robot's command.
  pub fn assign(&mut self, context: &MatchContext, grid: &mut Grid, survey: &SurveyPlanner) {
    let mut claims = Claims {
      radar_busy: self.robots.iter().any(|own| {
        own.robot.alive && (matches!(own.order, Order::RequestRadar | Order::Wait) || own.robot.item == Item::Radar)
      }),
      radar_requested: false,
      trap: self
        .robots
        .iter()
        .any(|own| own.robot.alive && own.order == Order::RequestTrap),
    };
    for index in 0..self.robots.len() {
      let own = &self.robots[index];
      if !own.robot.alive || own.order != Order::None {
        continue;
      }
      let id = own.robot.id;
      let (order, target) = match hazard_response(&own.robot, grid, context) {
        Some(hazard) => {
          info!("Robot {} goes to detonate a suspected trap.", id);
          (Order::TriggerHazard, Some(hazard))
        }
        None => self.pick_order(index, context, grid, survey, &mut claims),
      };
      if let Some(target) = target {
        if !grid.point(target).is_home() {
          grid.cell_mut(target).targeted = true;
        }
      }
      if order != Order::None {
        debug!("Robot {} takes {:?}.", id, order);
      }
      let own = &mut self.robots[index];
      own.order = order;
      own.target = target;
    }
    let width = grid.width();
    for own in self.robots.iter_mut() {
      own.command = command_for(own, width);
    }
  }

  fn pick_order(
    &mut self,
    index: usize,
    context: &MatchContext,
    grid: &Grid,
    survey: &SurveyPlanner,
    claims: &mut Claims,
  ) -> (Order, Option<Pos>) {
    let speed = context.config.move_speed;
    let pos = self.robots[index].robot.pos;
    let (order, target) = match self.robots[index].robot.item {
      Item::Radar => {
        let target = survey
          .next_unclaimed(grid)
          .map(|point| grid.pos(point))
          .or_else(|| best_ore(grid, pos, speed));
        (Order::PlaceRadar, target)
      }
      Item::Trap => (Order::PlaceTrap, best_ore(grid, pos, speed)),
      Item::Ore => (Order::ReturnHome, Some(grid.pos(Point::new(0, grid.point(pos).y)))),
      Item::None => return self.pick_empty_handed(index, context, grid, survey, claims),
    };
    match target {
      Some(_) => (order, target),
      None => (Order::None, None),
    }
  }

  fn pick_empty_handed(
    &mut self,
    index: usize,
    context: &MatchContext,
    grid: &Grid,
    survey: &SurveyPlanner,
    claims: &mut Claims,
  ) -> (Order, Option<Pos>) {
    let config = &context.config;
    let id = self.robots[index].robot.id;
    let pos = self.robots[index].robot.pos;
    let at_home = grid.point(pos).is_home();
    let home = grid.pos(Point::new(0, grid.point(pos).y));
    if at_home && !claims.radar_requested && context.radar_cooldown == 0 && survey.next_unclaimed(grid).is_some() {
      claims.radar_requested = true;
      claims.radar_busy = true;
      return (Order::RequestRadar, Some(home));
    }
    let ore = best_ore(grid, pos, config.move_speed);
    if at_home && config.use_traps && !claims.trap && context.trap_cooldown == 0 && ore.is_some() {
      claims.trap = true;
      return (Order::RequestTrap, Some(home));
    }
    if grid.safe_ore() < config.low_safe_ore && !claims.radar_busy {
      claims.radar_busy = true;
      info!("Safe ore is running low, robot {} goes for a radar.", id);
      return if at_home && context.radar_cooldown > 0 {
        (Order::Wait, None)
      } else {
        (Order::RequestRadar, Some(home))
      };
    }
    if ore.is_some() {
      return (Order::MineOre, ore);
    }
    if let Some(point) = survey.nearest_unexplored(grid, pos) {
      return (Order::Explore, Some(grid.pos(point)));
    }
    match self.explore_cell(grid, pos) {
      Some(cell) => (Order::Explore, Some(cell)),
      None => (Order::None, None),
    }
  }

  /// The nearest cell nobody has looked into yet, for when every survey spot
  /// is seen or claimed. Equally near cells are chosen randomly.
  fn explore_cell(&mut self, grid: &Grid, from: Pos) -> Option<Pos> {
    let mut nearest = None;
    let mut candidates = Vec::new();
    simple_wave(
      grid.width(),
      grid.height(),
      &mut self.tags,
      &mut self.tagged,
      from,
      |pos, path_size, _| {
        if nearest.map_or(false, |distance| path_size > distance) {
          return false;
        }
        let cell = grid.cell(pos);
        if !cell.visible
          && !cell.hole
          && !cell.hazard
          && !cell.trap
          && !cell.radar
          && !cell.targeted
          && !grid.point(pos).is_home()
        {
          nearest = Some(path_size);
          candidates.push(pos);
        }
        true
      },
      |_, _, _| false,
    );
    clear_tags(&mut self.tags, &mut self.tagged);
    candidates.choose(&mut self.rng).copied()
  }

  pub fn actions(&self, output: &mut Vec<Action>) {
    output.extend(
      self
        .robots
        .iter()
        .map(|own| Action::new(own.robot.id, own.command, own.order.message())),
    );
  }
}
