use crate::cell::Item;
use crate::coordinates::Point;
use std::fmt;

/// One robot's instruction for the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
  Move(Point),
  Dig(Point),
  Request(Item),
  Wait,
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Command::Move(point) => write!(f, "MOVE {} {}", point.x, point.y),
      Command::Dig(point) => write!(f, "DIG {} {}", point.x, point.y),
      Command::Request(item) => write!(f, "REQUEST {}", item),
      Command::Wait => f.write_str("WAIT"),
    }
  }
}

/// A command with a possible message shown next to the robot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
  pub robot: u32,
  pub command: Command,
  pub message: Option<&'static str>,
}

impl Action {
  pub fn new<M>(robot: u32, command: Command, message: M) -> Self
  where
    M: Into<Option<&'static str>>,
  {
    Action {
      robot,
      command,
      message: message.into(),
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.command)?;
    if let Some(message) = self.message {
      write!(f, " {}", message)
    } else {
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_commands() {
    assert_eq!(Command::Move(Point::new(0, 7)).to_string(), "MOVE 0 7");
    assert_eq!(Command::Dig(Point::new(5, 5)).to_string(), "DIG 5 5");
    assert_eq!(Command::Request(Item::Radar).to_string(), "REQUEST RADAR");
    assert_eq!(Command::Request(Item::Trap).to_string(), "REQUEST TRAP");
    assert_eq!(Command::Wait.to_string(), "WAIT");
  }

  #[test]
  fn renders_message() {
    let action = Action::new(3, Command::Dig(Point::new(4, 2)), "mine");
    assert_eq!(action.to_string(), "DIG 4 2 mine");
    assert_eq!(Action::new(3, Command::Wait, None).to_string(), "WAIT");
  }
}
