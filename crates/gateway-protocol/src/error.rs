/// Errors raised while decoding or validating a frame
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// Error serializing or deserializing JSON data
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  /// The frame is valid JSON but not a non-empty array
  #[error("Invalid data")]
  InvalidData,
  /// The envelope is an array, but its elements do not fit the command
  #[error("{command} frame has the wrong shape: {reason}")]
  TypeMismatch { command: String, reason: String },
}

impl Error {
  pub fn type_mismatch<C, R>(command: C, reason: R) -> Self
  where
    C: Into<String>,
    R: Into<String>,
  {
    Self::TypeMismatch {
      command: command.into(),
      reason: reason.into(),
    }
  }
}
