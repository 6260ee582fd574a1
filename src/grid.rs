use crate::cell::GridCell;
use crate::coordinates::*;
use crate::game::MatchContext;
use crate::input::{EntityKind, Snapshot};
use std::iter;
use tracing::{debug, info};

/// World model of the whole field. Cells are created once and live for the
/// match; everything but the hole history and hazard marks is overwritten
/// from each round's observation.
#[derive(Clone, Debug)]
pub struct Grid {
  width: u32,
  height: u32,
  cells: Vec<GridCell>,
  /// Holes first seen in the current round.
  new_holes: Vec<Pos>,
  /// Sum of ore on visible cells.
  visible_ore: u32,
  /// Sum of ore on visible cells that aren't suspected traps.
  safe_ore: u32,
}

impl Grid {
  pub fn new(width: u32, height: u32) -> Grid {
    Grid {
      width,
      height,
      cells: vec![GridCell::default(); length(width, height)],
      new_holes: Vec::new(),
      visible_ore: 0,
      safe_ore: 0,
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn cell(&self, pos: Pos) -> &GridCell {
    &self.cells[pos]
  }

  pub fn cell_mut(&mut self, pos: Pos) -> &mut GridCell {
    &mut self.cells[pos]
  }

  pub fn cells(&self) -> &[GridCell] {
    &self.cells
  }

  pub fn new_holes(&self) -> &[Pos] {
    &self.new_holes
  }

  pub fn visible_ore(&self) -> u32 {
    self.visible_ore
  }

  pub fn safe_ore(&self) -> u32 {
    self.safe_ore
  }

  pub fn pos(&self, point: Point) -> Pos {
    to_pos(self.width, point)
  }

  pub fn point(&self, pos: Pos) -> Point {
    from_pos(self.width, pos)
  }

  pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
    neighbors(self.width, self.height, pos)
  }

  /// The cell itself followed by its axis neighbours.
  pub fn around(&self, pos: Pos) -> impl Iterator<Item = Pos> {
    iter::once(pos).chain(self.neighbors(pos))
  }

  /// Refreshes cells from a validated snapshot. Enemy occupancy is left
  /// empty, the opponent observer fills it from its living records.
  pub fn update(&mut self, context: &MatchContext, snapshot: &Snapshot) {
    debug_assert_eq!(snapshot.cells.len(), self.cells.len());
    self.new_holes.clear();
    for (pos, (cell, observation)) in self.cells.iter_mut().zip(&snapshot.cells).enumerate() {
      cell.visible = observation.ore.is_some();
      cell.ore = observation.ore.unwrap_or(0);
      if observation.hole && cell.dig_round.is_none() {
        cell.dig_round = Some(context.round);
        self.new_holes.push(pos);
      }
      cell.hole = observation.hole;
      cell.radar = false;
      cell.trap = false;
      cell.targeted = false;
      cell.friends.clear();
      cell.enemies.clear();
    }
    for entity in &snapshot.entities {
      if let Some(point) = entity.point() {
        let cell = &mut self.cells[to_pos(self.width, point)];
        match entity.kind {
          EntityKind::Radar => cell.radar = true,
          EntityKind::Trap => cell.trap = true,
          EntityKind::OwnRobot => cell.friends.push(entity.id),
          EntityKind::EnemyRobot => {}
        }
      }
    }
    self.refresh_counters();
  }

  pub fn refresh_counters(&mut self) {
    let mut visible_ore = 0;
    let mut safe_ore = 0;
    for cell in self.cells.iter().filter(|cell| cell.visible) {
      visible_ore += cell.ore;
      if !cell.is_hazard() {
        safe_ore += cell.ore;
      }
    }
    self.visible_ore = visible_ore;
    self.safe_ore = safe_ore;
  }

  /// An enemy robot dropped a trap while standing at `center`. Marks holes
  /// around it as suspected traps, preferring the ones dug this round.
  /// Returns the number of newly marked cells.
  pub fn mark_trap_placement(&mut self, round: u32, center: Pos) -> usize {
    let holes: Vec<Pos> = self.around(center).filter(|&pos| self.cells[pos].hole).collect();
    let fresh: Vec<Pos> = holes
      .iter()
      .copied()
      .filter(|&pos| self.cells[pos].dig_round == Some(round))
      .collect();
    let chosen = if fresh.is_empty() { holes } else { fresh };
    let mut marked = 0;
    for pos in chosen {
      let cell = &mut self.cells[pos];
      if cell.radar || cell.trap || cell.hazard {
        continue;
      }
      cell.hazard = true;
      marked += 1;
      let point = from_pos(self.width, pos);
      info!("Suspected trap at {}:{}.", point.x, point.y);
    }
    if marked > 0 {
      self.refresh_counters();
    }
    marked
  }

  /// A robot detonated a suspected trap. The only way a hazard mark goes
  /// away.
  pub fn resolve_hazard(&mut self, pos: Pos, buried_ore: bool) {
    let cell = &mut self.cells[pos];
    cell.hazard = false;
    if buried_ore {
      cell.ore += 1;
    }
    let point = from_pos(self.width, pos);
    debug!("Hazard at {}:{} is resolved.", point.x, point.y);
    self.refresh_counters();
  }

  /// Counts our robots and living enemies on the cell and its neighbours.
  pub fn forces_around(&self, pos: Pos) -> (usize, usize) {
    self.around(pos).fold((0, 0), |(friends, enemies), pos| {
      let cell = &self.cells[pos];
      (friends + cell.friends.len(), enemies + cell.enemies.len())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::arbitrary::{Round, FIELD_HEIGHT, FIELD_WIDTH};
  use crate::cell::Item;
  use crate::input::{CellObservation, Entity};
  use quickcheck::quickcheck;

  fn context(round: u32) -> MatchContext {
    MatchContext {
      round,
      ..MatchContext::default()
    }
  }

  fn observe(snapshot: &mut Snapshot, x: u32, y: u32, ore: Option<u32>, hole: bool) {
    snapshot.cells[to_pos(30, Point::new(x, y))] = CellObservation { ore, hole };
  }

  #[test]
  fn remembers_when_a_hole_appeared() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    observe(&mut snapshot, 3, 4, Some(2), true);
    grid.update(&context(1), &snapshot);
    let pos = grid.pos(Point::new(3, 4));
    assert_eq!(grid.cell(pos).dig_round, Some(1));
    assert_eq!(grid.new_holes(), &[pos]);
    observe(&mut snapshot, 5, 4, None, true);
    grid.update(&context(2), &snapshot);
    assert_eq!(grid.cell(pos).dig_round, Some(1));
    assert_eq!(grid.cell(grid.pos(Point::new(5, 4))).dig_round, Some(2));
    assert_eq!(grid.new_holes(), &[grid.pos(Point::new(5, 4))]);
  }

  #[test]
  fn counts_safe_ore() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    observe(&mut snapshot, 3, 4, Some(2), true);
    observe(&mut snapshot, 4, 4, Some(3), false);
    observe(&mut snapshot, 8, 8, None, false);
    grid.update(&context(1), &snapshot);
    assert_eq!(grid.visible_ore(), 5);
    assert_eq!(grid.safe_ore(), 5);
    assert_eq!(grid.mark_trap_placement(1, grid.pos(Point::new(3, 4))), 1);
    assert_eq!(grid.visible_ore(), 5);
    assert_eq!(grid.safe_ore(), 3);
  }

  #[test]
  fn marks_only_fresh_holes_around_a_trap_placement() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    observe(&mut snapshot, 9, 10, None, true);
    observe(&mut snapshot, 11, 10, None, true);
    observe(&mut snapshot, 10, 9, None, true);
    grid.update(&context(4), &snapshot);
    observe(&mut snapshot, 10, 10, None, true);
    observe(&mut snapshot, 10, 11, None, true);
    grid.update(&context(5), &snapshot);
    assert_eq!(grid.mark_trap_placement(5, grid.pos(Point::new(10, 10))), 2);
    let hazards: Vec<Point> = (0..grid.cells().len())
      .filter(|&pos| grid.cell(pos).hazard)
      .map(|pos| grid.point(pos))
      .collect();
    assert_eq!(hazards, vec![Point::new(10, 10), Point::new(10, 11)]);
  }

  #[test]
  fn falls_back_to_old_holes_and_skips_resolved_cells() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    observe(&mut snapshot, 9, 10, None, true);
    observe(&mut snapshot, 11, 10, None, true);
    snapshot
      .entities
      .push(Entity::new(20, EntityKind::Radar, 11, 10, Item::None));
    grid.update(&context(1), &snapshot);
    grid.update(&context(2), &snapshot);
    assert_eq!(grid.mark_trap_placement(2, grid.pos(Point::new(10, 10))), 1);
    assert!(grid.cell(grid.pos(Point::new(9, 10))).hazard);
    assert!(!grid.cell(grid.pos(Point::new(11, 10))).hazard);
  }

  #[test]
  fn resolving_a_hazard_may_bury_ore() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    observe(&mut snapshot, 6, 6, Some(1), true);
    grid.update(&context(1), &snapshot);
    let pos = grid.pos(Point::new(6, 6));
    grid.mark_trap_placement(1, pos);
    assert_eq!(grid.safe_ore(), 0);
    grid.resolve_hazard(pos, true);
    assert!(!grid.cell(pos).hazard);
    assert_eq!(grid.cell(pos).ore, 2);
    assert_eq!(grid.safe_ore(), 2);
  }

  #[test]
  fn counts_forces_around_a_cell() {
    let mut grid = Grid::new(30, 15);
    let mut snapshot = Snapshot::empty(30, 15);
    snapshot
      .entities
      .push(Entity::new(0, EntityKind::OwnRobot, 5, 5, Item::None));
    snapshot
      .entities
      .push(Entity::new(1, EntityKind::OwnRobot, 9, 9, Item::None));
    grid.update(&context(1), &snapshot);
    let pos = grid.pos(Point::new(5, 6));
    grid.cell_mut(pos).enemies.push(7);
    let right = grid.pos(Point::new(6, 6));
    grid.cell_mut(right).enemies.push(8);
    assert_eq!(grid.forces_around(pos), (1, 2));
  }

  fn fields(grid: &Grid) -> Vec<(u32, bool, bool, Option<u32>, bool, bool, bool)> {
    grid
      .cells()
      .iter()
      .map(|cell| (cell.ore, cell.visible, cell.hole, cell.dig_round, cell.hazard, cell.radar, cell.trap))
      .collect()
  }

  quickcheck! {
    fn update_is_idempotent(round: Round) -> bool {
      let mut grid = Grid::new(FIELD_WIDTH, FIELD_HEIGHT);
      grid.update(&context(3), &round.0);
      let first = fields(&grid);
      grid.update(&context(3), &round.0);
      fields(&grid) == first && grid.cells().iter().all(|cell| !cell.targeted)
    }

    fn hazards_are_sticky(first: Round, second: Round) -> bool {
      let mut grid = Grid::new(FIELD_WIDTH, FIELD_HEIGHT);
      grid.update(&context(1), &first.0);
      for pos in 0..grid.cells().len() {
        grid.mark_trap_placement(1, pos);
      }
      let marked: Vec<bool> = grid.cells().iter().map(|cell| cell.hazard).collect();
      grid.update(&context(2), &second.0);
      grid.update(&context(3), &first.0);
      grid.cells().iter().zip(marked).all(|(cell, hazard)| !hazard || cell.hazard)
    }
  }
}
