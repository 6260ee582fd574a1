use crate::cell::Item;
use crate::coordinates::*;
use crate::input::{CellObservation, Entity, EntityKind, Snapshot};
use quickcheck::{Arbitrary, Gen};

pub const FIELD_WIDTH: u32 = 8;
pub const FIELD_HEIGHT: u32 = 5;

/// Our robots use ids 0..5, the opponent's 5..10.
pub const ROBOTS: u32 = 5;

/// A valid random snapshot of a small field.
#[derive(Clone, Debug)]
pub struct Round(pub Snapshot);

fn position(g: &mut Gen, dead_allowed: bool) -> (i32, i32) {
  if dead_allowed && u8::arbitrary(g) % 8 == 0 {
    (-1, -1)
  } else {
    (
      (u32::arbitrary(g) % FIELD_WIDTH) as i32,
      (u32::arbitrary(g) % FIELD_HEIGHT) as i32,
    )
  }
}

impl Arbitrary for Round {
  fn arbitrary(g: &mut Gen) -> Self {
    let mut snapshot = Snapshot::empty(FIELD_WIDTH, FIELD_HEIGHT);
    for cell in snapshot.cells.iter_mut() {
      *cell = CellObservation {
        ore: Option::<u8>::arbitrary(g).map(|ore| u32::from(ore % 4)),
        hole: u8::arbitrary(g) % 3 == 0,
      };
    }
    snapshot.my_score = u32::from(u8::arbitrary(g) % 20);
    snapshot.opponent_score = u32::from(u8::arbitrary(g) % 20);
    snapshot.radar_cooldown = u32::from(u8::arbitrary(g) % 3);
    snapshot.trap_cooldown = u32::from(u8::arbitrary(g) % 3);
    let robot_items = [Item::None, Item::Radar, Item::Trap, Item::Ore];
    for id in 0..ROBOTS * 2 {
      let (x, y) = position(g, true);
      let kind = if id < ROBOTS {
        EntityKind::OwnRobot
      } else {
        EntityKind::EnemyRobot
      };
      let item = *g.choose(&robot_items).unwrap_or(&Item::None);
      snapshot.entities.push(Entity::new(id, kind, x, y, item));
    }
    for id in 0..u32::from(u8::arbitrary(g) % 4) {
      let (x, y) = position(g, false);
      let kind = if bool::arbitrary(g) {
        EntityKind::Radar
      } else {
        EntityKind::Trap
      };
      snapshot.entities.push(Entity::new(100 + id, kind, x, y, Item::None));
    }
    Round(snapshot)
  }
}

#[test]
fn generated_rounds_are_valid() {
  let mut g = Gen::new(10);
  for _ in 0..20 {
    let round = Round::arbitrary(&mut g);
    assert_eq!(round.0.validate(FIELD_WIDTH, FIELD_HEIGHT), Ok(()));
    assert_eq!(round.0.cells.len(), length(FIELD_WIDTH, FIELD_HEIGHT));
  }
}
