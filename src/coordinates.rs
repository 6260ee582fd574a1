pub type Pos = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
  pub x: u32,
  pub y: u32,
}

impl Point {
  pub fn new(x: u32, y: u32) -> Point {
    Point { x, y }
  }

  /// The leftmost column is the headquarters where ore is delivered and items
  /// are requested.
  pub fn is_home(self) -> bool {
    self.x == 0
  }
}

pub fn length(width: u32, height: u32) -> Pos {
  (width * height) as Pos
}

pub fn to_pos(width: u32, point: Point) -> Pos {
  (point.y * width + point.x) as Pos
}

pub fn from_pos(width: u32, pos: Pos) -> Point {
  Point {
    x: pos as u32 % width,
    y: pos as u32 / width,
  }
}

pub fn contains(width: u32, height: u32, x: i32, y: i32) -> bool {
  x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

pub fn n(width: u32, pos: Pos) -> Option<Pos> {
  if pos < width as Pos {
    None
  } else {
    Some(pos - width as Pos)
  }
}

pub fn s(width: u32, height: u32, pos: Pos) -> Option<Pos> {
  let next = pos + width as Pos;
  if next >= length(width, height) {
    None
  } else {
    Some(next)
  }
}

pub fn w(width: u32, pos: Pos) -> Option<Pos> {
  if pos as u32 % width == 0 {
    None
  } else {
    Some(pos - 1)
  }
}

pub fn e(width: u32, pos: Pos) -> Option<Pos> {
  if pos as u32 % width == width - 1 {
    None
  } else {
    Some(pos + 1)
  }
}

pub fn nw(width: u32, pos: Pos) -> Option<Pos> {
  n(width, pos).and_then(|pos| w(width, pos))
}

pub fn ne(width: u32, pos: Pos) -> Option<Pos> {
  n(width, pos).and_then(|pos| e(width, pos))
}

pub fn sw(width: u32, height: u32, pos: Pos) -> Option<Pos> {
  s(width, height, pos).and_then(|pos| w(width, pos))
}

pub fn se(width: u32, height: u32, pos: Pos) -> Option<Pos> {
  s(width, height, pos).and_then(|pos| e(width, pos))
}

/// Axis-adjacent cells inside the field. There is no wraparound.
pub fn neighbors(width: u32, height: u32, pos: Pos) -> impl Iterator<Item = Pos> {
  [n(width, pos), w(width, pos), s(width, height, pos), e(width, pos)]
    .into_iter()
    .flatten()
}

/// Diagonal cells inside the field in the order (-1, -1), (1, -1), (-1, 1),
/// (1, 1).
pub fn diagonals(width: u32, height: u32, pos: Pos) -> impl Iterator<Item = Pos> {
  [nw(width, pos), ne(width, pos), sw(width, height, pos), se(width, height, pos)]
    .into_iter()
    .flatten()
}

pub fn point_manhattan(point1: Point, point2: Point) -> u32 {
  let diff_x = (point1.x as i32 - point2.x as i32).unsigned_abs();
  let diff_y = (point1.y as i32 - point2.y as i32).unsigned_abs();
  diff_x + diff_y
}

pub fn manhattan(width: u32, pos1: Pos, pos2: Pos) -> u32 {
  point_manhattan(from_pos(width, pos1), from_pos(width, pos2))
}

/// Number of rounds a robot spends walking before it can act on a cell at the
/// given distance. Digging works from an adjacent cell, so the last step is
/// free.
pub fn travel_legs(distance: u32, speed: u32) -> u32 {
  if distance <= 1 {
    0
  } else {
    (distance - 1 + speed - 1) / speed
  }
}
