/// Cells a robot walks per round.
const MOVE_SPEED: u32 = 4;

/// If visible ore on cells that aren't suspected traps drops below this number
/// an idle robot goes for a radar even when it has somewhere to dig.
const LOW_SAFE_ORE: u32 = 6;

/// Minimum visible ore on a suspected trap that makes an empty-handed robot
/// detonate it when the neighbourhood is evenly matched.
const HAZARD_ORE_FLOOR: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  pub move_speed: u32,
  pub low_safe_ore: u32,
  pub hazard_ore_floor: u32,
  /// Request traps from the headquarters when radars are unavailable.
  pub use_traps: bool,
  /// Seed for breaking ties between equally good exploration cells.
  pub seed: u64,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      move_speed: MOVE_SPEED,
      low_safe_ore: LOW_SAFE_ORE,
      hazard_ore_floor: HAZARD_ORE_FLOOR,
      use_traps: true,
      seed: 0,
    }
  }
}
