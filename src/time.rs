use std::time::Instant;

pub fn elapsed_time(start_time: Instant) -> u32 {
  start_time.elapsed().as_millis() as u32
}
