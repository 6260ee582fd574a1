use crate::cell::Item;
use crate::coordinates::*;
use crate::errors::InputError;
use anyhow::{anyhow, bail, Context};
use std::{convert::TryFrom, io::BufRead, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
  OwnRobot,
  EnemyRobot,
  Radar,
  Trap,
}

impl TryFrom<i32> for EntityKind {
  type Error = InputError;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(EntityKind::OwnRobot),
      1 => Ok(EntityKind::EnemyRobot),
      2 => Ok(EntityKind::Radar),
      3 => Ok(EntityKind::Trap),
      kind => Err(InputError::UnknownEntityKind(kind)),
    }
  }
}

#[derive(Clone, Copy, Debug)]
pub struct Entity {
  pub id: u32,
  pub kind: EntityKind,
  /// Raw position, (-1, -1) for destroyed robots.
  pub x: i32,
  pub y: i32,
  pub item: Item,
}

impl Entity {
  pub fn new(id: u32, kind: EntityKind, x: i32, y: i32, item: Item) -> Entity {
    Entity { id, kind, x, y, item }
  }

  pub fn point(&self) -> Option<Point> {
    if self.x < 0 || self.y < 0 {
      None
    } else {
      Some(Point::new(self.x as u32, self.y as u32))
    }
  }

  fn is_dead_marker(&self) -> bool {
    self.x == -1 && self.y == -1
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellObservation {
  /// `None` when the cell is out of sight.
  pub ore: Option<u32>,
  pub hole: bool,
}

/// Everything the referee tells us in one round.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
  pub my_score: u32,
  pub opponent_score: u32,
  /// Row-major, indexed by `Pos`.
  pub cells: Vec<CellObservation>,
  pub entities: Vec<Entity>,
  pub radar_cooldown: u32,
  pub trap_cooldown: u32,
}

impl Snapshot {
  /// A round with no entities and nothing seen.
  #[cfg(test)]
  pub fn empty(width: u32, height: u32) -> Snapshot {
    Snapshot {
      cells: vec![CellObservation::default(); length(width, height)],
      ..Snapshot::default()
    }
  }

  pub fn validate(&self, width: u32, height: u32) -> Result<(), InputError> {
    let expected = length(width, height);
    if self.cells.len() != expected {
      return Err(InputError::CellCount {
        expected,
        actual: self.cells.len(),
      });
    }
    for entity in &self.entities {
      if !entity.is_dead_marker() && !contains(width, height, entity.x, entity.y) {
        return Err(InputError::OutOfBounds {
          id: entity.id,
          x: entity.x,
          y: entity.y,
        });
      }
    }
    Ok(())
  }

  pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
    self.entities.iter().filter(move |entity| entity.kind == kind)
  }
}

fn read_nonempty_line<T: BufRead>(reader: &mut T) -> anyhow::Result<Option<String>> {
  let mut input = String::new();
  loop {
    input.clear();
    if reader.read_line(&mut input).context("failed to read from stdin")? == 0 {
      return Ok(None);
    }
    if !input.trim().is_empty() {
      return Ok(Some(input));
    }
  }
}

fn expect_line<T: BufRead>(reader: &mut T, what: &str) -> anyhow::Result<String> {
  read_nonempty_line(reader)?.ok_or_else(|| anyhow!("unexpected end of input while reading {}", what))
}

fn parse<F>(token: Option<&str>, what: &str) -> anyhow::Result<F>
where
  F: FromStr,
  F::Err: std::error::Error + Send + Sync + 'static,
{
  let token = token.ok_or_else(|| anyhow!("missing {}", what))?;
  token
    .parse()
    .with_context(|| format!("invalid {} {:?}", what, token))
}

/// Reads the field size sent once before the first round.
pub fn read_header<T: BufRead>(reader: &mut T) -> anyhow::Result<(u32, u32)> {
  let line = expect_line(reader, "the field size")?;
  let mut split = line.split_whitespace();
  let width: u32 = parse(split.next(), "width")?;
  let height: u32 = parse(split.next(), "height")?;
  if width < 2 || height == 0 {
    bail!("field {}x{} is too small", width, height);
  }
  Ok((width, height))
}

/// Reads one round. Returns `None` when the referee closed the input before a
/// new round started.
pub fn read_snapshot<T: BufRead>(reader: &mut T, width: u32, height: u32) -> anyhow::Result<Option<Snapshot>> {
  let line = match read_nonempty_line(reader)? {
    Some(line) => line,
    None => return Ok(None),
  };
  let mut split = line.split_whitespace();
  let mut snapshot = Snapshot {
    my_score: parse(split.next(), "score")?,
    opponent_score: parse(split.next(), "opponent score")?,
    cells: Vec::with_capacity(length(width, height)),
    ..Snapshot::default()
  };
  for row in 0..height {
    let line = expect_line(reader, "a field row")?;
    let mut split = line.split_whitespace();
    for column in 0..width {
      let ore = match split.next() {
        Some("?") => None,
        token => Some(parse(token, "ore amount").with_context(|| format!("at ({}, {})", column, row))?),
      };
      let hole = parse::<u32>(split.next(), "hole flag")? == 1;
      snapshot.cells.push(CellObservation { ore, hole });
    }
  }
  let line = expect_line(reader, "the entity header")?;
  let mut split = line.split_whitespace();
  let entity_count: usize = parse(split.next(), "entity count")?;
  snapshot.radar_cooldown = parse(split.next(), "radar cooldown")?;
  snapshot.trap_cooldown = parse(split.next(), "trap cooldown")?;
  snapshot.entities.reserve(entity_count);
  for _ in 0..entity_count {
    let line = expect_line(reader, "an entity")?;
    let mut split = line.split_whitespace();
    let id = parse(split.next(), "entity id")?;
    let kind = EntityKind::try_from(parse::<i32>(split.next(), "entity type")?)?;
    let x = parse(split.next(), "entity x")?;
    let y = parse(split.next(), "entity y")?;
    let item = Item::try_from(parse::<i32>(split.next(), "entity item")?)?;
    snapshot.entities.push(Entity::new(id, kind, x, y, item));
  }
  snapshot.validate(width, height)?;
  Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  const ROUND: &str = "3 1
? 0 ? 0 ? 0
0 0 2 1 ? 1
4 3 2
0 0 0 1 -1
1 1 2 1 -1
2 2 1 1 -1
3 0 -1 -1 -1
";

  #[test]
  fn reads_header() {
    let mut reader = Cursor::new("30 15\n");
    assert_eq!(read_header(&mut reader).unwrap(), (30, 15));
  }

  #[test]
  fn reads_a_round() {
    let mut reader = Cursor::new(ROUND);
    let snapshot = read_snapshot(&mut reader, 3, 2).unwrap().unwrap();
    assert_eq!(snapshot.my_score, 3);
    assert_eq!(snapshot.opponent_score, 1);
    assert_eq!(snapshot.cells.len(), 6);
    assert_eq!(snapshot.cells[0], CellObservation { ore: None, hole: false });
    assert_eq!(snapshot.cells[4], CellObservation { ore: Some(2), hole: true });
    assert_eq!(snapshot.cells[5], CellObservation { ore: None, hole: true });
    assert_eq!(snapshot.radar_cooldown, 3);
    assert_eq!(snapshot.trap_cooldown, 2);
    assert_eq!(snapshot.entities.len(), 4);
    assert_eq!(snapshot.entities[1].kind, EntityKind::EnemyRobot);
    assert_eq!(snapshot.entities[2].point(), Some(Point::new(1, 1)));
    assert_eq!(snapshot.entities[3].point(), None);
    assert!(read_snapshot(&mut reader, 3, 2).unwrap().is_none());
  }

  #[test]
  fn rejects_entities_outside_of_the_field() {
    let mut reader = Cursor::new("0 0\n? 0 ? 0\n1 0 0\n7 0 5 0 -1\n");
    let err = read_snapshot(&mut reader, 2, 1).unwrap_err();
    assert_eq!(
      err.downcast_ref::<InputError>(),
      Some(&InputError::OutOfBounds { id: 7, x: 5, y: 0 })
    );
  }

  #[test]
  fn rejects_unknown_entity_types() {
    let mut reader = Cursor::new("0 0\n? 0 ? 0\n1 0 0\n7 9 1 0 -1\n");
    let err = read_snapshot(&mut reader, 2, 1).unwrap_err();
    assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::UnknownEntityKind(9)));
  }

  #[test]
  fn validate_checks_cell_count() {
    let snapshot = Snapshot::empty(3, 3);
    assert_eq!(
      snapshot.validate(4, 3),
      Err(InputError::CellCount { expected: 12, actual: 9 })
    );
    assert_eq!(snapshot.validate(3, 3), Ok(()));
  }
}
