//! Result collection and execution reports.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

pub use fanout_task::TaskResult;

use crate::summary::Summary;

/// Append-only collection of task results, shared between the fan-in loop
/// and later readers.
///
/// Entries are kept in completion order.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
  results: Arc<Mutex<Vec<TaskResult>>>,
}

impl ResultCollection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append one result. The lock is held only for the push.
  pub fn push(&self, result: TaskResult) {
    // Only pushes happen under the lock, so a poisoned vec is still whole.
    let mut results = self.results.lock().unwrap_or_else(|e| e.into_inner());
    results.push(result);
  }

  pub fn len(&self) -> usize {
    self.results.lock().unwrap_or_else(|e| e.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Copy of every result collected so far.
  pub fn snapshot(&self) -> Vec<TaskResult> {
    self.results.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }

  /// Compute aggregates without copying the results out.
  pub fn summarize(&self) -> Summary {
    let results = self.results.lock().unwrap_or_else(|e| e.into_inner());
    Summary::from_results(&results)
  }
}

/// Result of a complete batch execution.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
  /// Unique execution ID.
  pub execution_id: String,
  /// Wall-clock time from the first launch to the last collected result.
  pub wall_time: Duration,
  /// Aggregates over every task result.
  pub summary: Summary,
}
