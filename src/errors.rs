/// Input that breaks the referee's contract. The feed is trusted, so any of
/// these ends the match instead of corrupting the world model.
#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
  CellCount { expected: usize, actual: usize },
  OutOfBounds { id: u32, x: i32, y: i32 },
  UnknownEntityKind(i32),
  UnknownItem(i32),
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      InputError::CellCount { expected, actual } => {
        write!(f, "Snapshot has {} cells, the field has {}", actual, expected)
      }
      InputError::OutOfBounds { id, x, y } => write!(f, "Entity {} is outside of the field at ({}, {})", id, x, y),
      InputError::UnknownEntityKind(kind) => write!(f, "Unknown entity type {}", kind),
      InputError::UnknownItem(item) => write!(f, "Unknown item code {}", item),
    }
  }
}
