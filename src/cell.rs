use crate::errors::InputError;
use std::{convert::TryFrom, fmt};

/// What a robot carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item {
  None,
  Radar,
  Trap,
  Ore,
}

impl TryFrom<i32> for Item {
  type Error = InputError;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      -1 => Ok(Item::None),
      2 => Ok(Item::Radar),
      3 => Ok(Item::Trap),
      4 => Ok(Item::Ore),
      code => Err(InputError::UnknownItem(code)),
    }
  }
}

impl fmt::Display for Item {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Item::None => f.write_str("NONE"),
      Item::Radar => f.write_str("RADAR"),
      Item::Trap => f.write_str("TRAP"),
      Item::Ore => f.write_str("ORE"),
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct GridCell {
  /// Known ore amount. Zero when unknown or depleted.
  pub ore: u32,
  /// Ore amount is observed this round.
  pub visible: bool,
  pub hole: bool,
  /// Round when the hole was first seen.
  pub dig_round: Option<u32>,
  /// Suspected trap. Sticky until a robot detonates it.
  pub hazard: bool,
  pub radar: bool,
  pub trap: bool,
  /// Some robot already claimed this cell in the current round.
  pub targeted: bool,
  /// Ids of our robots standing here.
  pub friends: Vec<u32>,
  /// Ids of living enemy robots standing here.
  pub enemies: Vec<u32>,
}

impl GridCell {
  /// A visible radar or trap means the cell is already resolved, so the
  /// inferred hazard doesn't apply to it.
  pub fn is_hazard(&self) -> bool {
    self.hazard && !self.radar && !self.trap
  }

  pub fn has_ore(&self) -> bool {
    self.ore > 0
  }
}
