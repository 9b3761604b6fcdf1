//! Aggregation and human-readable reporting.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::result::TaskResult;

/// Aggregates over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  /// Number of task results.
  pub total: usize,
  pub succeeded: usize,
  pub failed: usize,
  /// Sum of per-task durations. Tasks overlap, so this can exceed the batch
  /// wall-clock time.
  pub total_duration: Duration,
  /// `total_duration / total`, or zero for an empty batch.
  pub average_duration: Duration,
}

impl Summary {
  pub fn from_results(results: &[TaskResult]) -> Self {
    let total = results.len();
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    let total_duration = results
      .iter()
      .fold(Duration::ZERO, |acc, r| acc.saturating_add(r.duration));

    Self {
      total,
      succeeded,
      failed: total - succeeded,
      total_duration,
      average_duration: average(total_duration, total),
    }
  }
}

fn average(total_duration: Duration, count: usize) -> Duration {
  if count == 0 {
    return Duration::ZERO;
  }
  let nanos = total_duration.as_nanos() / count as u128;
  Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Per-task outcomes together with their summary.
///
/// Results are ordered by task id so repeated runs render the same way.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub results: Vec<TaskResult>,
  pub summary: Summary,
}

impl Report {
  pub fn new(mut results: Vec<TaskResult>) -> Self {
    results.sort_by_key(|r| r.task_id);
    let summary = Summary::from_results(&results);
    Self { results, summary }
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for result in &self.results {
      match &result.outcome {
        Ok(value) => writeln!(
          f,
          "ok      #{} {} ({:?}): {}",
          result.task_id, result.task_name, result.duration, value
        )?,
        Err(failure) => writeln!(
          f,
          "FAILED  #{} {} ({:?}): {}",
          result.task_id, result.task_name, result.duration, failure
        )?,
      }
    }
    if !self.results.is_empty() {
      writeln!(f)?;
    }
    write!(f, "{}", self.summary)
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "tasks:      {}", self.total)?;
    writeln!(f, "succeeded:  {}", self.succeeded)?;
    writeln!(f, "failed:     {}", self.failed)?;
    writeln!(f, "total time: {:?}", self.total_duration)?;
    if self.total > 0 {
      writeln!(f, "average:    {:?}", self.average_duration)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use fanout_task::{TaskFailure, TaskValue};

  use super::*;

  fn ok(id: u64, millis: u64, value: impl Into<TaskValue>) -> TaskResult {
    TaskResult {
      task_id: id,
      task_name: format!("task-{}", id),
      outcome: Ok(value.into()),
      duration: Duration::from_millis(millis),
    }
  }

  fn failed(id: u64, millis: u64, message: &str) -> TaskResult {
    TaskResult {
      task_id: id,
      task_name: format!("task-{}", id),
      outcome: Err(TaskFailure::new(message)),
      duration: Duration::from_millis(millis),
    }
  }

  #[test]
  fn test_empty_summary() {
    let summary = Summary::from_results(&[]);
    assert_eq!(summary, Summary::default());
    assert_eq!(summary.average_duration, Duration::ZERO);
  }

  #[test]
  fn test_counts_and_durations() {
    let results = vec![ok(1, 100, 5050), failed(2, 20, "boom"), ok(3, 30, "ok")];
    let summary = Summary::from_results(&results);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_duration, Duration::from_millis(150));
    assert_eq!(summary.average_duration, Duration::from_millis(50));
  }

  #[test]
  fn test_report_sorted_by_id() {
    let report = Report::new(vec![ok(3, 1, 3), ok(1, 1, 1), failed(2, 1, "x")]);
    let ids: Vec<u64> = report.results.iter().map(|r| r.task_id).collect();
    assert_eq!(ids, [1, 2, 3]);
  }

  #[test]
  fn test_report_rendering() {
    let report = Report::new(vec![ok(1, 10, 55), failed(2, 0, "negative input")]);
    let text = report.to_string();

    assert!(text.contains("ok      #1 task-1 (10ms): 55"));
    assert!(text.contains("FAILED  #2 task-2 (0ns): task panicked: negative input"));
    assert!(text.contains("tasks:      2"));
    assert!(text.contains("failed:     1"));
    assert!(text.contains("average:    5ms"));
  }

  #[test]
  fn test_empty_report_omits_average() {
    let text = Report::new(Vec::new()).to_string();
    assert!(text.starts_with("tasks:      0"));
    assert!(!text.contains("average"));
  }

  #[test]
  fn test_summary_serializes() {
    let summary = Summary::from_results(&[ok(1, 1500, 1)]);
    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["total_duration"]["secs"], 1);
    assert_eq!(json["total_duration"]["nanos"], 500_000_000);
  }
}
