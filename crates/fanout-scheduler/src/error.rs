//! Error types for scheduler misuse.

use fanout_task::TaskId;
use thiserror::Error;

/// Errors returned when the scheduler is used out of order or loses results.
///
/// Task failures are not errors at this level; they are recorded in each
/// task's result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
  /// A task was added after execution started.
  #[error("cannot register task {task_id}: execution has already started")]
  RegistrationClosed { task_id: TaskId },

  /// `execute` was called more than once.
  #[error("tasks have already been executed")]
  AlreadyExecuted,

  /// Results were requested before execution completed.
  #[error("results are not available until execution completes")]
  NotExecuted,

  /// The wait barrier returned without one result per task.
  #[error("expected {expected} task results but collected {received}")]
  LostResults { expected: usize, received: usize },
}
