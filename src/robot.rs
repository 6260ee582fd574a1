use crate::cell::Item;
use crate::coordinates::*;
use crate::input::Entity;
use tracing::debug;

/// Observation history of one robot, ours or the opponent's.
#[derive(Clone, Debug)]
pub struct Robot {
  pub id: u32,
  /// Last known position. Meaningless once the robot is dead.
  pub pos: Pos,
  pub last_pos: Pos,
  pub item: Item,
  /// Item reported in the previous round.
  pub prev_item: Item,
  pub alive: bool,
  /// Position didn't change between the two latest observations.
  pub not_moved: bool,
  pub path: Vec<Pos>,
}

impl Robot {
  pub fn new(width: u32, entity: &Entity) -> Robot {
    let point = entity.point();
    let pos = point.map_or(0, |point| to_pos(width, point));
    Robot {
      id: entity.id,
      pos,
      last_pos: pos,
      item: entity.item,
      prev_item: Item::None,
      alive: point.is_some(),
      not_moved: false,
      path: point.map(|_| pos).into_iter().collect(),
    }
  }

  pub fn observe(&mut self, width: u32, entity: &Entity) {
    if !self.alive {
      return;
    }
    self.prev_item = self.item;
    self.item = entity.item;
    match entity.point() {
      Some(point) => {
        let pos = to_pos(width, point);
        self.last_pos = self.pos;
        self.pos = pos;
        self.not_moved = self.last_pos == self.pos;
        self.path.push(pos);
      }
      None => self.kill(),
    }
  }

  pub fn kill(&mut self) {
    if self.alive {
      debug!("Robot {} is destroyed.", self.id);
    }
    self.alive = false;
    self.not_moved = false;
    self.item = Item::None;
  }

  pub fn point(&self, width: u32) -> Point {
    from_pos(width, self.pos)
  }

  pub fn is_home(&self, width: u32) -> bool {
    self.point(width).is_home()
  }
}

/// A record that wraps a `Robot` and is kept for the whole match.
pub trait Tracked {
  fn robot(&self) -> &Robot;
  fn robot_mut(&mut self) -> &mut Robot;
  fn spawn(robot: Robot) -> Self;
}

/// Matches entities to records by id. New ids get a record, records whose
/// robot vanished from the feed are marked dead. Records are never removed so
/// their order is the order of first sighting.
pub fn track<'a, R, I>(records: &mut Vec<R>, width: u32, entities: I)
where
  R: Tracked,
  I: Iterator<Item = &'a Entity>,
{
  let mut seen = Vec::with_capacity(records.len());
  for entity in entities {
    seen.push(entity.id);
    match records.iter_mut().find(|record| record.robot().id == entity.id) {
      Some(record) => record.robot_mut().observe(width, entity),
      None => records.push(R::spawn(Robot::new(width, entity))),
    }
  }
  for record in records.iter_mut() {
    if !seen.contains(&record.robot().id) {
      record.robot_mut().kill();
    }
  }
}
