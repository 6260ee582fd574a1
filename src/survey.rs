use crate::cell::GridCell;
use crate::coordinates::*;
use crate::grid::Grid;
use tracing::info;

/// Radar spots that cover a 30x15 field with radars of range 4.
const SURVEY_LAYOUT: &[(u32, u32)] = &[
  (5, 5),
  (14, 4),
  (10, 9),
  (19, 8),
  (1, 10),
  (6, 14),
  (10, 0),
  (15, 13),
  (1, 0),
  (19, 0),
  (24, 4),
  (23, 13),
  (28, 9),
  (29, 0),
];

fn usable(cell: &GridCell) -> bool {
  !cell.radar && !cell.trap && !cell.is_hazard()
}

/// Fixed list of places where radars should go. Entries move away from
/// dangerous cells but the list never grows or shrinks.
#[derive(Clone, Debug)]
pub struct SurveyPlanner {
  targets: Vec<Point>,
}

impl SurveyPlanner {
  pub fn new(width: u32, height: u32) -> SurveyPlanner {
    SurveyPlanner {
      targets: SURVEY_LAYOUT
        .iter()
        .filter(|&&(x, y)| x < width && y < height)
        .map(|&(x, y)| Point::new(x, y))
        .collect(),
    }
  }

  pub fn targets(&self) -> &[Point] {
    &self.targets
  }

  /// The first spot without a radar, trap or suspected trap.
  pub fn next_target(&self, grid: &Grid) -> Option<Point> {
    self
      .targets
      .iter()
      .copied()
      .find(|&point| usable(grid.cell(grid.pos(point))))
  }

  /// Like `next_target` but skips spots another robot already claimed this
  /// round.
  pub fn next_unclaimed(&self, grid: &Grid) -> Option<Point> {
    self.targets.iter().copied().find(|&point| {
      let cell = grid.cell(grid.pos(point));
      usable(cell) && !cell.targeted
    })
  }

  /// The closest unclaimed spot nobody has looked into yet, ties going to the
  /// earlier spot in the layout.
  pub fn nearest_unexplored(&self, grid: &Grid, from: Pos) -> Option<Point> {
    let origin = grid.point(from);
    self
      .targets
      .iter()
      .copied()
      .filter(|&point| {
        let cell = grid.cell(grid.pos(point));
        usable(cell) && !cell.targeted && !cell.visible && !cell.hole && !point.is_home()
      })
      .min_by_key(|&point| point_manhattan(origin, point))
  }

  /// Moves spots that became dangerous or got a trap to a usable diagonal
  /// cell off the home column. Returns the number of moved spots.
  pub fn relocate(&mut self, grid: &Grid) -> usize {
    let mut moved = 0;
    for target in self.targets.iter_mut() {
      let cell = grid.cell(grid.pos(*target));
      if cell.radar || !(cell.is_hazard() || cell.trap) {
        continue;
      }
      let replacement = diagonals(grid.width(), grid.height(), grid.pos(*target))
        .map(|pos| grid.point(pos))
        .find(|&point| !point.is_home() && usable(grid.cell(grid.pos(point))));
      if let Some(point) = replacement {
        info!(
          "Survey spot {}:{} moves to {}:{}.",
          target.x, target.y, point.x, point.y
        );
        *target = point;
        moved += 1;
      }
    }
    moved
  }
}
