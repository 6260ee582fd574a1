use crate::coordinates::*;
use std::collections::VecDeque;

#[derive(Clone)]
pub struct Tag {
  start: Pos,  // Cell where the wave started.
  prev: Pos,   // Cell from which the wave came to the current one.
  length: u32, // Distance from the start plus one.
}

impl Tag {
  pub fn new() -> Tag {
    Tag {
      start: 0,
      prev: 0,
      length: 0,
    }
  }
}

/// Breadth-first expansion over the field from several start cells. `cond`
/// decides whether a cell joins the wave, `stop_cond` ends it early. Both get
/// the cell, the start cell it was reached from, its distance and the
/// previous cell.
pub fn wave<'r, T, F1, F2>(
  width: u32,
  height: u32,
  tags: &mut [Tag],
  tagged: &mut Vec<Pos>,
  start: &mut T,
  mut cond: F1,
  mut stop_cond: F2,
) -> Option<Pos>
where
  T: Iterator<Item = &'r Pos>,
  F1: FnMut(Pos, Pos, u32, Pos) -> bool,
  F2: FnMut(Pos, Pos, u32, Pos) -> bool,
{
  let mut q = VecDeque::new();
  for &pos in start {
    if tags[pos].length == 0 && cond(pos, pos, 0, pos) {
      q.push_back(pos);
      let tag = &mut tags[pos];
      tag.start = pos;
      tag.prev = pos;
      tag.length = 1;
      tagged.push(pos);
    }
  }
  while let Some(pos) = q.pop_front() {
    let length = tags[pos].length;
    if stop_cond(pos, tags[pos].start, length - 1, tags[pos].prev) {
      return Some(pos);
    }
    let start_pos = tags[pos].start;
    for next_pos in neighbors(width, height, pos) {
      if tags[next_pos].length == 0 && cond(next_pos, start_pos, length, pos) {
        let next_tag = &mut tags[next_pos];
        next_tag.start = start_pos;
        next_tag.prev = pos;
        next_tag.length = length + 1;
        tagged.push(next_pos);
        q.push_back(next_pos);
      }
    }
  }
  None
}

pub fn simple_wave<F1, F2>(
  width: u32,
  height: u32,
  tags: &mut [Tag],
  tagged: &mut Vec<Pos>,
  start: Pos,
  mut cond: F1,
  mut stop_cond: F2,
) -> Option<Pos>
where
  F1: FnMut(Pos, u32, Pos) -> bool,
  F2: FnMut(Pos, u32, Pos) -> bool,
{
  wave(
    width,
    height,
    tags,
    tagged,
    &mut Some(start).iter(),
    |pos, _, path_size, prev| cond(pos, path_size, prev),
    |pos, _, path_size, prev| stop_cond(pos, path_size, prev),
  )
}

pub fn clear_tags(tags: &mut [Tag], tagged: &mut Vec<Pos>) {
  for &pos in tagged.iter() {
    let tag = &mut tags[pos];
    tag.start = 0;
    tag.prev = 0;
    tag.length = 0;
  }
  tagged.clear();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn distances_are_manhattan_on_an_open_field() {
    let (width, height) = (7, 5);
    let mut tags = vec![Tag::new(); length(width, height)];
    let mut tagged = Vec::new();
    let start = to_pos(width, Point::new(3, 2));
    simple_wave(width, height, &mut tags, &mut tagged, start, |_, _, _| true, |_, _, _| false);
    assert_eq!(tagged.len(), length(width, height));
    for pos in 0..length(width, height) {
      assert_eq!(tags[pos].length - 1, manhattan(width, start, pos));
    }
    clear_tags(&mut tags, &mut tagged);
    assert!(tags.iter().all(|tag| tag.length == 0));
    assert!(tagged.is_empty());
  }

  #[test]
  fn stops_at_the_first_goal() {
    let (width, height) = (7, 5);
    let mut tags = vec![Tag::new(); length(width, height)];
    let mut tagged = Vec::new();
    let goal = to_pos(width, Point::new(6, 4));
    let found = simple_wave(
      width,
      height,
      &mut tags,
      &mut tagged,
      0,
      |pos, _, _| pos != to_pos(width, Point::new(1, 0)),
      |pos, _, _| pos == goal,
    );
    assert_eq!(found, Some(goal));
    assert_eq!(tags[goal].length - 1, 10);
  }
}
