//! Task execution result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TaskFailure;
use crate::types::{TaskId, TaskValue};

/// Outcome of one task, produced exactly once by the unit that ran it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
  /// ID the task was registered with.
  pub task_id: TaskId,
  /// Name the task was registered with.
  pub task_name: String,
  /// The work's value, or the failure that replaced it.
  pub outcome: Result<TaskValue, TaskFailure>,
  /// Time spent inside the work, measured on a monotonic clock.
  pub duration: Duration,
}

impl TaskResult {
  pub fn is_success(&self) -> bool {
    self.outcome.is_ok()
  }

  pub fn value(&self) -> Option<&TaskValue> {
    self.outcome.as_ref().ok()
  }

  pub fn failure(&self) -> Option<&TaskFailure> {
    self.outcome.as_ref().err()
  }
}
