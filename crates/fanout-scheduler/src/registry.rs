//! Ordered task registry.

use fanout_task::Task;

/// Ordered list of tasks waiting to run.
///
/// Population is single-threaded; the registry is drained in one go when
/// execution starts.
#[derive(Debug, Default)]
pub struct TaskRegistry {
  tasks: Vec<Task>,
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a task. Duplicate ids are accepted.
  pub fn add(&mut self, task: Task) {
    self.tasks.push(task);
  }

  /// Tasks in registration order.
  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Hand every task over to the executor, leaving the registry empty.
  pub(crate) fn take(&mut self) -> Vec<Task> {
    std::mem::take(&mut self.tasks)
  }
}
