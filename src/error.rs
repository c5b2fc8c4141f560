use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("unsupported input format: {reason}")]
  UnsupportedInputFormat { reason: String },

  #[error("inference failed: {message}")]
  InferenceFailure { message: String },

  #[error("invalid probability vector: {message}")]
  InvalidProbabilities { message: String },
}

impl Error {
  pub(crate) fn unsupported(reason: impl Display) -> Self {
    Self::UnsupportedInputFormat {
      reason: reason.to_string(),
    }
  }

  pub(crate) fn inference(message: impl Display) -> Self {
    Self::InferenceFailure {
      message: message.to_string(),
    }
  }

  pub(crate) fn probabilities(message: impl Display) -> Self {
    Self::InvalidProbabilities {
      message: message.to_string(),
    }
  }
}
