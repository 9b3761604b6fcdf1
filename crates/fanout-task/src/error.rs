use std::any::Any;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure descriptor for a task whose work terminated abnormally.
///
/// Failures are data: they are attached to the task's result and never
/// escalated past the execution unit.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("task panicked: {message}")]
pub struct TaskFailure {
  message: String,
}

impl TaskFailure {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  /// Build a failure from a caught panic payload.
  pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
      (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "task panicked with a non-string payload".to_string()
    };
    Self { message }
  }

  /// Textual summary of what went wrong.
  pub fn message(&self) -> &str {
    &self.message
  }
}
